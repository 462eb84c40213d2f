//! # Reference grammar
//!
//! Syntax validation for reference strings, following the grammar used by
//! the Docker distribution project:
//!
//! ```text
//! reference  := name [ ":" tag ] [ "@" digest ]
//! name       := [ domain "/" ] path-component [ "/" path-component ]*
//! domain     := host [ ":" port ]
//! tag        := [A-Za-z0-9_][A-Za-z0-9_.-]{0,127}
//! digest     := algorithm ":" hex
//! ```
//!
//! This layer only answers "is this a reference, and what are its parts".
//! Path components are accepted in any case here; the lowercase rule and
//! the other naming policies live in [`crate::hostname`] and
//! [`crate::Named`] so that they surface as
//! [`crate::Error::InvalidFormat`] rather than as syntax errors.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::digest::Digest;
use crate::hostname::is_registry_host;
use crate::{ALIAS_REGISTRY_HOSTNAME, DEFAULT_REGISTRY_HOSTNAME, DEFAULT_REPO_PREFIX};

/// Maximum length of a repository name, including any domain.
pub const NAME_TOTAL_LENGTH_MAX: usize = 255;

const ALPHANUMERIC: &str = "[a-zA-Z0-9]+";
const SEPARATOR: &str = "(?:[._]|__|[-]+)";
const DOMAIN_COMPONENT: &str = "(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9])";
const IPV6_ADDRESS: &str = r"\[[a-fA-F0-9:]+\]";
const PORT: &str = "[0-9]+";
const TAG: &str = "[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}";
const DIGEST: &str = "[A-Za-z][A-Za-z0-9]*(?:[-_+.][A-Za-z][A-Za-z0-9]*)*:[[:xdigit:]]{32,}";

fn name_pattern() -> String {
    let path_component = format!("{ALPHANUMERIC}(?:{SEPARATOR}{ALPHANUMERIC})*");
    let domain_name = format!(r"{DOMAIN_COMPONENT}(?:\.{DOMAIN_COMPONENT})*");
    let domain = format!("(?:{domain_name}|{IPV6_ADDRESS})(?::{PORT})?");
    format!("(?:{domain}/)?{path_component}(?:/{path_component})*")
}

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^{pattern}$")).expect("reference grammar must compile")
}

static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    anchored(&format!(
        "({})(?::({TAG}))?(?:@({DIGEST}))?",
        name_pattern()
    ))
});
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| anchored(&name_pattern()));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| anchored(TAG));

/// Reasons the grammar rejects an input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// The string does not match the reference grammar at all.
    #[error("invalid reference format")]
    InvalidReferenceFormat,
    /// The name part exceeds [`NAME_TOTAL_LENGTH_MAX`].
    #[error("repository name must not be more than {} characters", NAME_TOTAL_LENGTH_MAX)]
    NameTooLong,
    /// A tag that does not match the tag grammar.
    #[error("invalid tag format: {0:?}")]
    InvalidTag(String),
    /// A digest that is not `algorithm:hex` with the right hex length.
    #[error("invalid digest format: {0:?}")]
    InvalidDigest(String),
    /// A digest using an algorithm we do not know.
    #[error("unsupported digest algorithm: {0:?}")]
    UnsupportedDigestAlgorithm(String),
}

/// The parts of a syntactically valid reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    /// The fully qualified name, e.g. `docker.io/library/debian`.
    pub name: String,
    /// The tag, if one was given.
    pub tag: Option<String>,
    /// The digest, if one was given.
    pub digest: Option<Digest>,
}

/// Expand a familiar name into its fully qualified form: names without a
/// domain land on `docker.io`, single segment names there gain the
/// `library/` namespace, and the legacy `index.docker.io` domain is
/// folded into `docker.io`.
fn qualify(name: &str) -> String {
    let (domain, remainder) = match name.split_once('/') {
        Some((first, rest)) if is_registry_host(first) => (first, rest),
        _ => (ALIAS_REGISTRY_HOSTNAME, name),
    };
    let domain = if domain == DEFAULT_REGISTRY_HOSTNAME {
        ALIAS_REGISTRY_HOSTNAME
    } else {
        domain
    };
    if domain == ALIAS_REGISTRY_HOSTNAME && !remainder.contains('/') {
        format!("{domain}/{DEFAULT_REPO_PREFIX}{remainder}")
    } else {
        format!("{domain}/{remainder}")
    }
}

/// Parse `s` as a reference, qualifying a familiar name such as `debian`
/// into `docker.io/library/debian`.
pub fn parse_normalized_named(s: &str) -> Result<ParsedReference, SyntaxError> {
    let caps = REFERENCE_RE
        .captures(s)
        .ok_or(SyntaxError::InvalidReferenceFormat)?;
    let name = caps
        .get(1)
        .map(|m| m.as_str())
        .ok_or(SyntaxError::InvalidReferenceFormat)?;
    // The limit applies to the qualified form, so `index.docker.io/x` and
    // `docker.io/x` are measured the same way.
    let name = qualify(name);
    if name.len() > NAME_TOTAL_LENGTH_MAX {
        return Err(SyntaxError::NameTooLong);
    }
    let tag = caps.get(2).map(|m| m.as_str().to_owned());
    let digest = caps
        .get(3)
        .map(|m| m.as_str().parse::<Digest>())
        .transpose()?;
    Ok(ParsedReference { name, tag, digest })
}

/// Check that `name` is a repository name, with no tag or digest.
pub fn validate_name(name: &str) -> Result<(), SyntaxError> {
    if name.len() > NAME_TOTAL_LENGTH_MAX {
        return Err(SyntaxError::NameTooLong);
    }
    validate_name_pattern(name)
}

/// Like [`validate_name`], but without the length limit. Used on stored
/// names, which may be longer than the input they were derived from.
pub fn validate_name_pattern(name: &str) -> Result<(), SyntaxError> {
    if !NAME_RE.is_match(name) {
        return Err(SyntaxError::InvalidReferenceFormat);
    }
    Ok(())
}

/// Check that `tag` is a valid tag.
pub fn validate_tag(tag: &str) -> Result<(), SyntaxError> {
    if !TAG_RE.is_match(tag) {
        return Err(SyntaxError::InvalidTag(tag.to_owned()));
    }
    Ok(())
}
