//! Flat, serializable snapshot of a [`Reference`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DEFAULT_SCHEME;
use crate::error::{Error, Result};
use crate::reference::Reference;

/// Every derived field of a [`Reference`], as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Repository {
    /// The image's name (e.g. `debian:8.2`).
    pub name: String,
    /// The image's repository (e.g. `index.docker.io/library/debian`).
    pub repository: String,
    /// The image's registry (e.g. `host[:port]`).
    pub registry: String,
    /// Registry scheme; always [`DEFAULT_SCHEME`].
    pub scheme: String,
    /// The repository path (e.g. `library/debian`).
    pub short_name: String,
    /// The image's remote identifier (e.g. `registry/name[:tag]`).
    pub remote: String,
    /// The image's tag, or its digest.
    pub tag: String,
}

impl Repository {
    /// Parse `remote` exactly like [`Reference::parse`] and flatten it.
    pub fn parse(remote: &str) -> Result<Self> {
        Reference::parse(remote).map(|r| Self::from(&r))
    }
}

impl From<&Reference> for Repository {
    fn from(r: &Reference) -> Self {
        Self {
            name: r.name(),
            repository: r.repository(),
            registry: r.registry().to_owned(),
            scheme: DEFAULT_SCHEME.to_owned(),
            short_name: r.short_name().into_owned(),
            remote: r.remote(),
            tag: r.tag().to_owned(),
        }
    }
}

impl FromStr for Repository {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn test_parse_repo() {
        let r = Repository::parse("myregistry.local:5000/team/app:1.2").unwrap();
        assert_eq!(
            r,
            Repository {
                name: "myregistry.local:5000/team/app:1.2".into(),
                repository: "myregistry.local:5000/team/app".into(),
                registry: "myregistry.local:5000".into(),
                scheme: "https".into(),
                short_name: "team/app".into(),
                remote: "myregistry.local:5000/team/app:1.2".into(),
                tag: "1.2".into(),
            }
        );

        // The scheme is never taken from the input
        let r: Repository = "http://debian".parse().unwrap();
        assert_eq!(r.scheme.as_str(), "https");
        assert_eq!(r.remote.as_str(), "index.docker.io/library/debian:latest");

        assert!(Repository::parse("Debian").unwrap_err().is_invalid_format());
    }

    #[test]
    fn test_serialize() {
        let r = Repository::parse("quay.io/org/app:v1").unwrap();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["short-name"].as_str(), Some("org/app"));
        assert_eq!(v["registry"].as_str(), Some("quay.io"));
        let back: Repository = serde_json::from_value(v).unwrap();
        assert_eq!(back, r);
    }
}
