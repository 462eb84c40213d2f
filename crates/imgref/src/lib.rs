//! # Container image references
//!
//! This crate turns user supplied image strings such as `debian`,
//! `docker.io/library/debian:8.2` or
//! `myregistry.example.com:5000/team/app@sha256:...` into the fully
//! qualified coordinates needed to contact a registry.
//!
//! Parsing runs in a fixed order, with each step usable on its own:
//!
//! 1. [`grammar`] checks the syntax and extracts name, tag and digest.
//! 2. [`hostname`] splits the name into registry and repository path,
//!    rewriting the `docker.io` alias and the official `library/` prefix.
//! 3. [`Named`] holds the result as a name, a tagged name or a digested
//!    (canonical) name.
//! 4. [`with_default_tag`] tags name-only references with [`DEFAULT_TAG`].
//! 5. [`Reference`] derives the string forms callers need, and
//!    [`Repository`] flattens them into a serializable record.
//!
//! ```
//! let r = imgref::Reference::parse("ubuntu").unwrap();
//! assert_eq!(r.registry(), "index.docker.io");
//! assert_eq!(r.remote(), "index.docker.io/library/ubuntu:latest");
//! ```
//!
//! Everything here is pure computation over immutable values; no network
//! access happens and nothing is cached.

mod default_tag;
mod digest;
mod error;
pub mod grammar;
pub mod hostname;
mod named;
mod reference;
mod repository;
#[cfg(test)]
mod testutil;

pub use default_tag::with_default_tag;
pub use digest::Digest;
pub use error::{Error, Result};
pub use hostname::{normalize, split_hostname};
pub use named::{Named, RepositoryName, is_content_id};
pub use reference::Reference;
pub use repository::Repository;

/// The tag used when a reference names neither a tag nor a digest.
pub const DEFAULT_TAG: &str = "latest";

/// The registry used for names without an explicit hostname.
pub const DEFAULT_REGISTRY_HOSTNAME: &str = "index.docker.io";

/// A legacy spelling of [`DEFAULT_REGISTRY_HOSTNAME`]; always rewritten.
pub const ALIAS_REGISTRY_HOSTNAME: &str = "docker.io";

/// The namespace of official images on the default registry.
pub const DEFAULT_REPO_PREFIX: &str = "library/";

/// The scheme used to contact registries.
pub const DEFAULT_SCHEME: &str = "https";

/// Remove one leading `http://` or `https://` from `s`.
pub fn strip_scheme(s: &str) -> &str {
    s.strip_prefix("http://")
        .or_else(|| s.strip_prefix("https://"))
        .unwrap_or(s)
}
