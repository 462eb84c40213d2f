//! Promotion of name-only references to tagged ones.

use crate::DEFAULT_TAG;
use crate::named::Named;

/// Attach [`DEFAULT_TAG`] to a reference with neither a tag nor a digest;
/// anything else is returned unchanged.
pub fn with_default_tag(named: Named) -> Named {
    match named {
        Named::Name(name) => {
            tracing::debug!("No tag or digest for {name}, using {DEFAULT_TAG}");
            // The default tag is always grammatically valid.
            Named::Tagged {
                name,
                tag: DEFAULT_TAG.to_owned(),
            }
        }
        named @ (Named::Tagged { .. } | Named::Canonical { .. }) => named,
    }
}
