//! # Named references
//!
//! A [`Named`] is a normalized repository name carrying at most one of a
//! tag or a digest. The three shapes are variants of one enum, so a value
//! holding both cannot be built; the tag and digest combinators always
//! produce a fresh value from the shared [`RepositoryName`].

use std::borrow::Cow;
use std::str::FromStr;

use crate::digest::Digest;
use crate::error::{Error, Result};
use crate::grammar;
use crate::hostname::{normalize, split_hostname};

/// Returns true if `s` is a 64 character lowercase hex string, the form
/// of content-addressed image IDs.
pub fn is_content_id(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// A validated repository name in its stored form, e.g. `debian` or
/// `quay.io/org/app`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Normalize and validate `raw` as a repository name.
    ///
    /// The length limit applies to `raw`; keeping the registry hostname
    /// while normalizing can make the stored form longer.
    pub fn new(raw: &str) -> Result<Self> {
        grammar::validate_name(raw).map_err(|e| Error::syntax(raw, e))?;
        let name = normalize(raw)?;
        if is_content_id(&name) {
            return Err(Error::InvalidFormat(format!(
                "invalid repository name ({name}), cannot specify 64-byte hexadecimal strings"
            )));
        }
        grammar::validate_name_pattern(&name).map_err(|e| Error::syntax(&name, e))?;
        Ok(Self(name))
    }

    /// The stored name, e.g. `ubuntu` rather than `docker.io/library/ubuntu`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The registry hostname, e.g. `index.docker.io`.
    pub fn hostname(&self) -> &str {
        split_hostname(&self.0).0
    }

    /// The repository path on the registry, e.g. `library/ubuntu`.
    pub fn remote_name(&self) -> Cow<'_, str> {
        split_hostname(&self.0).1
    }

    /// The hostname and repository path, e.g. `index.docker.io/library/ubuntu`.
    pub fn full_name(&self) -> String {
        let (hostname, remote_name) = split_hostname(&self.0);
        format!("{hostname}/{remote_name}")
    }
}

impl std::fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reference to a repository, optionally pinned to a tag or a digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Named {
    /// Only a repository name.
    Name(RepositoryName),
    /// A repository name and a tag.
    Tagged {
        /// The repository.
        name: RepositoryName,
        /// The tag, e.g. `8.2`.
        tag: String,
    },
    /// A repository name and a content digest.
    Canonical {
        /// The repository.
        name: RepositoryName,
        /// The content digest.
        digest: Digest,
    },
}

impl Named {
    /// Build a name-only reference from a repository name.
    pub fn with_name(raw: &str) -> Result<Self> {
        RepositoryName::new(raw).map(Self::Name)
    }

    /// Parse a full reference string; a leading `http://` or `https://`
    /// is ignored. If both a tag and a digest are present, the digest wins.
    pub fn parse(s: &str) -> Result<Self> {
        let s = crate::strip_scheme(s);
        let parsed = grammar::parse_normalized_named(s).map_err(|e| Error::syntax(s, e))?;
        let named = Self::with_name(&parsed.name)?;
        if let Some(digest) = parsed.digest {
            named.with_digest(digest.as_str())
        } else if let Some(tag) = parsed.tag {
            named.with_tag(&tag)
        } else {
            Ok(named)
        }
    }

    /// Combine the repository of `self` with `tag`. Any existing tag or
    /// digest is dropped.
    pub fn with_tag(&self, tag: &str) -> Result<Self> {
        grammar::validate_tag(tag).map_err(|e| Error::syntax(tag, e))?;
        Ok(Self::Tagged {
            name: self.repository().clone(),
            tag: tag.to_owned(),
        })
    }

    /// Combine the repository of `self` with `digest`. Any existing tag or
    /// digest is dropped.
    pub fn with_digest(&self, digest: &str) -> Result<Self> {
        let digest = digest
            .parse::<Digest>()
            .map_err(|e| Error::syntax(digest, e))?;
        Ok(Self::Canonical {
            name: self.repository().clone(),
            digest,
        })
    }

    /// The repository this reference points into.
    pub fn repository(&self) -> &RepositoryName {
        match self {
            Self::Name(name) | Self::Tagged { name, .. } | Self::Canonical { name, .. } => name,
        }
    }

    /// The stored repository name; see [`RepositoryName::as_str`].
    pub fn name(&self) -> &str {
        self.repository().as_str()
    }

    /// See [`RepositoryName::hostname`].
    pub fn hostname(&self) -> &str {
        self.repository().hostname()
    }

    /// See [`RepositoryName::remote_name`].
    pub fn remote_name(&self) -> Cow<'_, str> {
        self.repository().remote_name()
    }

    /// See [`RepositoryName::full_name`].
    pub fn full_name(&self) -> String {
        self.repository().full_name()
    }

    /// The tag, for [`Named::Tagged`].
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Tagged { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// The digest, for [`Named::Canonical`].
    pub fn digest(&self) -> Option<&Digest> {
        match self {
            Self::Canonical { digest, .. } => Some(digest),
            _ => None,
        }
    }

    /// Returns true if there is neither a tag nor a digest.
    pub fn is_name_only(&self) -> bool {
        matches!(self, Self::Name(_))
    }
}

impl FromStr for Named {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Named {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Tagged { name, tag } => write!(f, "{name}:{tag}"),
            Self::Canonical { name, digest } => write!(f, "{name}@{digest}"),
        }
    }
}
