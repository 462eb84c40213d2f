//! Content digests (`algorithm:hex`).

use std::str::FromStr;

use crate::grammar::SyntaxError;

/// A validated content digest such as `sha256:6c3c62...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    value: String,
    /// Offset of the `:` separating the algorithm from the encoded hash.
    sep: usize,
}

impl Digest {
    /// The hash algorithm, e.g. `sha256`.
    pub fn algorithm(&self) -> &str {
        &self.value[..self.sep]
    }

    /// The hex encoded hash.
    pub fn encoded(&self) -> &str {
        &self.value[self.sep + 1..]
    }

    /// The full `algorithm:hex` form.
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

/// Length of the hex encoding for the algorithms we accept.
fn encoded_len(algorithm: &str) -> Option<usize> {
    match algorithm {
        "sha256" => Some(64),
        "sha384" => Some(96),
        "sha512" => Some(128),
        _ => None,
    }
}

impl FromStr for Digest {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (algorithm, encoded) = s
            .split_once(':')
            .ok_or_else(|| SyntaxError::InvalidDigest(s.to_owned()))?;
        if algorithm.is_empty() || encoded.is_empty() {
            return Err(SyntaxError::InvalidDigest(s.to_owned()));
        }
        let expected = encoded_len(algorithm)
            .ok_or_else(|| SyntaxError::UnsupportedDigestAlgorithm(algorithm.to_owned()))?;
        let is_lower_hex = encoded
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if encoded.len() != expected || !is_lower_hex {
            return Err(SyntaxError::InvalidDigest(s.to_owned()));
        }
        Ok(Self {
            value: s.to_owned(),
            sep: algorithm.len(),
        })
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
