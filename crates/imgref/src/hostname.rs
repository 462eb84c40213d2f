//! # Hostname normalization
//!
//! A repository name like `quay.io/org/app` carries its registry as the
//! first path segment, while `debian` or `team/app` implicitly live on the
//! default registry. [`split_hostname`] makes that decision, and
//! [`normalize`] derives the short form we store.
//!
//! The first segment is a hostname only when it contains a `.` or a `:`,
//! or is literally `localhost`. The legacy `docker.io` alias is rewritten
//! to [`DEFAULT_REGISTRY_HOSTNAME`], and single segment repositories there
//! are placed under the [`DEFAULT_REPO_PREFIX`] namespace.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::{ALIAS_REGISTRY_HOSTNAME, DEFAULT_REGISTRY_HOSTNAME, DEFAULT_REPO_PREFIX};

/// Whether the first segment of a name should be read as a registry host.
pub(crate) fn is_registry_host(segment: &str) -> bool {
    segment.contains(['.', ':']) || segment == "localhost"
}

/// Split a repository name into its registry hostname and repository path.
///
/// If no hostname is present, [`DEFAULT_REGISTRY_HOSTNAME`] is used. The
/// name must already have been validated by the grammar; any string can
/// be split, so this never fails.
pub fn split_hostname(name: &str) -> (&str, Cow<'_, str>) {
    let (hostname, remote_name) = match name.split_once('/') {
        Some((first, rest)) if is_registry_host(first) => (first, rest),
        _ => (DEFAULT_REGISTRY_HOSTNAME, name),
    };
    let hostname = if hostname == ALIAS_REGISTRY_HOSTNAME {
        DEFAULT_REGISTRY_HOSTNAME
    } else {
        hostname
    };
    let remote_name = if hostname == DEFAULT_REGISTRY_HOSTNAME && !remote_name.contains('/') {
        Cow::Owned(format!("{DEFAULT_REPO_PREFIX}{remote_name}"))
    } else {
        Cow::Borrowed(remote_name)
    };
    (hostname, remote_name)
}

/// Returns a repository name in its stored form: on the default registry
/// the hostname and the `library/` prefix of official images are dropped,
/// anywhere else the name is kept as given.
///
/// The repository path must be lowercase.
pub fn normalize(name: &str) -> Result<String> {
    let (hostname, remote_name) = split_hostname(name);
    if remote_name.to_lowercase() != *remote_name {
        return Err(Error::InvalidFormat(
            "repository name must be lowercase".into(),
        ));
    }
    if hostname != DEFAULT_REGISTRY_HOSTNAME {
        return Ok(name.to_owned());
    }
    let short = match remote_name.strip_prefix(DEFAULT_REPO_PREFIX) {
        Some(rest) if !rest.contains('/') => rest,
        _ => &*remote_name,
    };
    // The stored form must split back into the same registry and path.
    let (short_host, short_remote) = split_hostname(short);
    if short_host == hostname && short_remote == remote_name {
        Ok(short.to_owned())
    } else {
        tracing::trace!("Keeping registry hostname for {name}");
        Ok(format!("{hostname}/{remote_name}"))
    }
}
