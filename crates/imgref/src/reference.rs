//! # Reference facade
//!
//! [`Reference`] is the read-only view most callers want: a parsed and
//! normalized [`Named`] that always carries a tag or digest, with the
//! string forms needed to talk to a registry.

use std::borrow::Cow;
use std::str::FromStr;

use crate::default_tag::with_default_tag;
use crate::error::{Error, Result};
use crate::named::Named;

/// A fully resolved image reference.
///
/// For `debian:8.2`:
///
/// | Accessor | Value |
/// |---|---|
/// | [`name`](Self::name) | `debian:8.2` |
/// | [`short_name`](Self::short_name) | `library/debian` |
/// | [`tag`](Self::tag) | `8.2` |
/// | [`registry`](Self::registry) | `index.docker.io` |
/// | [`repository`](Self::repository) | `index.docker.io/library/debian` |
/// | [`remote`](Self::remote) | `index.docker.io/library/debian:8.2` |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    named: Named,
    /// `:tag`, `@digest`, or empty.
    suffix: String,
}

impl Reference {
    /// Parse and normalize a remote identifier such as `debian`,
    /// `https://quay.io/org/app:v1` or `localhost:5000/app@sha256:...`.
    /// References without a tag or digest get [`crate::DEFAULT_TAG`].
    pub fn parse(remote: &str) -> Result<Self> {
        let named = with_default_tag(Named::parse(remote)?);
        let suffix = match &named {
            Named::Canonical { digest, .. } => format!("@{digest}"),
            Named::Tagged { tag, .. } => format!(":{tag}"),
            Named::Name(_) => String::new(),
        };
        Ok(Self { named, suffix })
    }

    /// The underlying named reference.
    pub fn named(&self) -> &Named {
        &self.named
    }

    /// The stored name with its tag or digest, e.g. `debian:8.2`.
    pub fn name(&self) -> String {
        format!("{}{}", self.named.name(), self.suffix)
    }

    /// The repository path without the registry, e.g. `library/debian`.
    pub fn short_name(&self) -> Cow<'_, str> {
        self.named.remote_name()
    }

    /// The tag, or the digest for a digested reference.
    pub fn tag(&self) -> &str {
        self.suffix.get(1..).unwrap_or_default()
    }

    /// The registry, e.g. `index.docker.io` or `localhost:5000`.
    pub fn registry(&self) -> &str {
        self.named.hostname()
    }

    /// Registry and repository path, e.g. `index.docker.io/library/debian`.
    pub fn repository(&self) -> String {
        self.named.full_name()
    }

    /// Everything needed to pull the image, e.g.
    /// `index.docker.io/library/debian:8.2`.
    pub fn remote(&self) -> String {
        format!("{}{}", self.named.full_name(), self.suffix)
    }
}

impl FromStr for Reference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.named.full_name(), self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;
    use crate::testutil::RefString;

    const HEX: &str = "6c3c624b58dbbcd3c0dd82b4c53f04194d1247c6eebdaab7c610cf7d66709b3b";

    #[test]
    fn test_parse() {
        struct Case {
            s: &'static str,
            name: &'static str,
            short_name: &'static str,
            tag: &'static str,
            registry: &'static str,
            remote: &'static str,
        }
        for case in [
            Case {
                s: "debian",
                name: "debian:latest",
                short_name: "library/debian",
                tag: "latest",
                registry: "index.docker.io",
                remote: "index.docker.io/library/debian:latest",
            },
            Case {
                s: "docker.io/library/debian:8.2",
                name: "debian:8.2",
                short_name: "library/debian",
                tag: "8.2",
                registry: "index.docker.io",
                remote: "index.docker.io/library/debian:8.2",
            },
            Case {
                s: "https://docker.io/team/app:1",
                name: "team/app:1",
                short_name: "team/app",
                tag: "1",
                registry: "index.docker.io",
                remote: "index.docker.io/team/app:1",
            },
            Case {
                s: "myregistry.local:5000/team/app:1.2",
                name: "myregistry.local:5000/team/app:1.2",
                short_name: "team/app",
                tag: "1.2",
                registry: "myregistry.local:5000",
                remote: "myregistry.local:5000/team/app:1.2",
            },
            Case {
                s: "http://localhost/app",
                name: "localhost/app:latest",
                short_name: "app",
                tag: "latest",
                registry: "localhost",
                remote: "localhost/app:latest",
            },
        ] {
            let r = Reference::parse(case.s).unwrap();
            assert_eq!(r.name().as_str(), case.name);
            assert_eq!(&*r.short_name(), case.short_name);
            assert_eq!(r.tag(), case.tag);
            assert_eq!(r.registry(), case.registry);
            assert_eq!(r.remote().as_str(), case.remote);
            assert_eq!(r.to_string().as_str(), case.remote);
        }
    }

    #[test]
    fn test_alias_and_official_prefix() {
        let r = Reference::parse("docker.io/library/ubuntu").unwrap();
        assert_eq!(r.registry(), "index.docker.io");

        let r: Reference = "ubuntu".parse().unwrap();
        assert_eq!(r.repository().as_str(), "index.docker.io/library/ubuntu");
        assert_eq!(r.tag(), "latest");
    }

    #[test]
    fn test_digest() {
        let r = Reference::parse(&format!("debian@sha256:{HEX}")).unwrap();
        assert_eq!(r.tag(), format!("sha256:{HEX}").as_str());
        assert!(matches!(r.named(), Named::Canonical { .. }));
        assert!(r.named().tag().is_none());
        assert_eq!(
            r.remote(),
            format!("index.docker.io/library/debian@sha256:{HEX}")
        );
        assert_eq!(r.name(), format!("debian@sha256:{HEX}"));
    }

    #[test]
    fn test_rejects() {
        assert!(Reference::parse("Ubuntu").unwrap_err().is_invalid_format());
        assert!(Reference::parse(HEX).unwrap_err().is_invalid_format());
        for v in ["", "debian:", "https://", "quay.io/org/app@sha256:abc", "a b"] {
            assert!(Reference::parse(v).unwrap_err().is_syntax(), "{v}");
        }
    }

    #[test]
    fn test_long_name_keeps_hostname() {
        let s = format!("docker.io/foo.bar/{}", "a".repeat(237));
        let r = Reference::parse(&s).unwrap();
        assert_eq!(r.registry(), "index.docker.io");
        assert_eq!(&*r.short_name(), format!("foo.bar/{}", "a".repeat(237)).as_str());
        let remote = r.remote();
        assert!(remote.len() > s.len());
        let reparsed = Reference::parse(&remote).unwrap();
        assert_eq!(reparsed, r);
    }

    #[test]
    fn test_remote_roundtrip() {
        fn prop(s: RefString) -> bool {
            let Ok(r) = Reference::parse(&s.0) else {
                return false;
            };
            let remote = r.remote();
            let Ok(reparsed) = Reference::parse(&remote) else {
                return false;
            };
            remote.starts_with(&format!("{}/{}", r.registry(), r.short_name()))
                && reparsed.remote() == remote
                && reparsed.named() == r.named()
        }
        quickcheck::quickcheck(prop as fn(RefString) -> bool);
    }
}
