//! # Configuration for `imgref`
//!
//! Optional TOML fragments are read from `imgref/*.toml` under the usual
//! systemd configuration bases; later bases override earlier ones.
//!
//! ```toml
//! [output]
//! format = "json"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use fn_error_context::context;
use serde::{Deserialize, Serialize};

/// How results are printed.
#[derive(clap::ValueEnum, Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum OutputFormat {
    /// Aligned columns with a header
    #[default]
    Table,
    /// A JSON array of records
    Json,
    /// One remote identifier per line
    Plain,
}

/// The toplevel config entry, e.g. /etc/imgref/05-output.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub(crate) struct ConfigurationToplevel {
    pub(crate) output: Option<OutputConfiguration>,
}

/// The serialized `[output]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct OutputConfiguration {
    /// Default output format
    pub(crate) format: Option<OutputFormat>,
}

fn merge_basic<T>(s: &mut Option<T>, o: Option<T>) {
    if let Some(o) = o {
        *s = Some(o);
    }
}

trait Mergeable {
    fn merge(&mut self, other: Self)
    where
        Self: Sized;
}

impl<T> Mergeable for Option<T>
where
    T: Mergeable,
{
    fn merge(&mut self, other: Self)
    where
        Self: Sized,
    {
        if let Some(other) = other {
            if let Some(s) = self.as_mut() {
                s.merge(other)
            } else {
                *self = Some(other);
            }
        }
    }
}

impl Mergeable for OutputConfiguration {
    /// Apply any values in other, overriding any existing values in `self`.
    fn merge(&mut self, other: Self) {
        merge_basic(&mut self.format, other.format)
    }
}

impl Mergeable for ConfigurationToplevel {
    /// Apply any values in other, overriding any existing values in `self`.
    fn merge(&mut self, other: Self) {
        self.output.merge(other.output)
    }
}

impl ConfigurationToplevel {
    /// The configured output format, if any.
    pub(crate) fn output_format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|o| o.format)
    }
}

/// Parse a single fragment, returning it along with any keys we did not
/// recognize.
fn parse_config(buf: &str) -> Result<(ConfigurationToplevel, Vec<String>)> {
    let mut unused = Vec::new();
    let de = toml::Deserializer::parse(buf)?;
    let c = serde_ignored::deserialize(de, |path| {
        unused.push(path.to_string());
    })?;
    Ok((c, unused))
}

/// Load one configuration file.
#[context("Loading {}", path.display())]
pub(crate) fn load_config_file(path: &Path) -> Result<ConfigurationToplevel> {
    let buf = std::fs::read_to_string(path)?;
    let (c, unused) = parse_config(&buf).with_context(|| format!("Parsing {path:?}"))?;
    for key in unused {
        eprintln!("warning: {path:?}: Unknown key {key}");
    }
    Ok(c)
}

#[context("Loading configuration")]
/// Load the configuration, merging all found configuration files.
pub(crate) fn load_config() -> Result<ConfigurationToplevel> {
    const SYSTEMD_CONVENTIONAL_BASES: &[&str] = &["/usr/lib", "/usr/local/lib", "/etc", "/run"];
    let fragments = liboverdrop::scan(
        SYSTEMD_CONVENTIONAL_BASES,
        imgref_utils::NAME,
        &["toml"],
        true,
    );
    let mut config = ConfigurationToplevel::default();
    for (_name, path) in fragments {
        let c = load_config_file(&path)?;
        tracing::debug!("Merging config from {path:?}: {c:?}");
        config.merge(c);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let (mut c, unused) = parse_config(
            r##"[output]
format = "json"
"##,
        )
        .unwrap();
        assert!(unused.is_empty());
        assert_eq!(c.output_format(), Some(OutputFormat::Json));

        // An empty fragment overrides nothing
        let (empty, _) = parse_config("").unwrap();
        c.merge(empty);
        assert_eq!(c.output_format(), Some(OutputFormat::Json));

        let (other, _) = parse_config(
            r##"[output]
format = "plain"
"##,
        )
        .unwrap();
        c.merge(other);
        assert_eq!(c.output_format(), Some(OutputFormat::Plain));
    }

    #[test]
    fn test_unknown_keys() {
        let (c, unused) = parse_config(
            r##"[output]
format = "table"
color = true

[registry]
mirror = "example.com"
"##,
        )
        .unwrap();
        assert_eq!(c.output_format(), Some(OutputFormat::Table));
        assert_eq!(unused.len(), 2);
        assert!(unused.iter().any(|k| k == "output.color"));
    }

    #[test]
    fn test_invalid_config() {
        assert!(parse_config("[output]\nformat = \"yaml\"\n").is_err());
        assert!(parse_config("[output").is_err());
    }

    #[test]
    fn test_load_config_file() -> Result<()> {
        let td = tempfile::tempdir()?;
        let path = td.path().join("10-output.toml");
        std::fs::write(&path, "[output]\nformat = \"plain\"\n")?;
        let c = load_config_file(&path)?;
        assert_eq!(c.output_format(), Some(OutputFormat::Plain));

        let missing = td.path().join("missing.toml");
        let e = load_config_file(&missing).unwrap_err();
        assert!(format!("{e:#}").contains("missing.toml"));
        Ok(())
    }
}
