//! # imgref command line
//!
//! Command line parsing and output rendering, built on clap.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use comfy_table::{Table, presets::NOTHING};
use fn_error_context::context;
use imgref::Repository;

use crate::config::{self, OutputFormat};

/// Parse and normalize container image references.
#[derive(Debug, Parser)]
#[clap(name = "imgref", version)]
pub(crate) struct Cli {
    /// Read configuration from this file instead of the system directories
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    opt: Opt,
}

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Opt {
    /// Resolve image references into registry coordinates
    Parse {
        /// Output format; overrides the configuration file
        #[clap(long, value_enum)]
        format: Option<OutputFormat>,

        /// Image references, e.g. `debian:8.2` or `quay.io/org/app`
        #[clap(required = true)]
        references: Vec<String>,
    },
    /// Show how repository names are split into registry and path
    Normalize {
        /// Repository names, without tag or digest
        #[clap(required = true)]
        names: Vec<String>,
    },
}

#[context("Parsing references")]
fn parse_references(references: &[String]) -> Result<Vec<Repository>> {
    references
        .iter()
        .map(|r| Repository::parse(r).with_context(|| format!("Parsing {r}")))
        .collect()
}

/// Write the records in the requested format.
fn print_repositories(
    out: &mut impl Write,
    repos: &[Repository],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(NOTHING)
                .set_content_arrangement(comfy_table::ContentArrangement::Dynamic)
                .set_header(["REGISTRY", "REPOSITORY", "TAG", "REMOTE"]);
            for repo in repos {
                table.add_row([
                    repo.registry.as_str(),
                    repo.short_name.as_str(),
                    repo.tag.as_str(),
                    repo.remote.as_str(),
                ]);
            }
            writeln!(out, "{table}")?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, repos)?;
            writeln!(out)?;
        }
        OutputFormat::Plain => {
            for repo in repos {
                writeln!(out, "{}", repo.remote)?;
            }
        }
    }
    Ok(())
}

/// Write hostname, repository path and stored form for each name.
fn print_normalized(out: &mut impl Write, names: &[String]) -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_header(["NAME", "HOSTNAME", "PATH", "STORED"]);
    for name in names {
        let stored = imgref::normalize(name).with_context(|| format!("Normalizing {name}"))?;
        let (hostname, path) = imgref::split_hostname(name);
        table.add_row([name.as_str(), hostname, &path, stored.as_str()]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

/// Parse the provided arguments and execute.
pub(crate) fn run_from_iter<I>(args: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let config = match cli.config.as_deref() {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config()?,
    };
    let mut stdout = std::io::stdout().lock();
    match cli.opt {
        Opt::Parse { format, references } => {
            let format = format.or(config.output_format()).unwrap_or_default();
            tracing::debug!("Parsing {} references as {format:?}", references.len());
            let repos = parse_references(&references)?;
            print_repositories(&mut stdout, &repos, format)
        }
        Opt::Normalize { names } => print_normalized(&mut stdout, &names),
    }
}
