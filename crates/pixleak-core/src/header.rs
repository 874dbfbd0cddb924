//! Canonical header rendering and the SHA-256 header oracle.
//!
//! Producer and attacker both render headers through `HeaderTemplate`, so the
//! hashed form is single-space ASCII `"<MAGIC> <WIDTH> <HEIGHT> <MAXVAL>"`
//! with no trailing content on both sides of the contract. Any other
//! rendering would make the published digests unmatchable.

use sha2::{Digest, Sha256};

use crate::types::{Dimensions, HeaderDigest};

/// The fixed parts of a raw PPM header: magic number and maximum channel value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
    magic: String,
    maxval: String,
}

impl HeaderTemplate {
    pub fn new(magic: impl Into<String>, maxval: impl Into<String>) -> Self {
        Self {
            magic: magic.into(),
            maxval: maxval.into(),
        }
    }

    pub fn magic(&self) -> &str {
        &self.magic
    }

    pub fn maxval(&self) -> &str {
        &self.maxval
    }

    /// Render the canonical header bytes for the given dimensions.
    pub fn render(&self, dims: Dimensions) -> Vec<u8> {
        format!(
            "{} {} {} {}",
            self.magic, dims.width, dims.height, self.maxval
        )
        .into_bytes()
    }
}

impl Default for HeaderTemplate {
    fn default() -> Self {
        Self::new("P6", "255")
    }
}

/// SHA-256 of a rendered header.
pub fn digest_header(header: &[u8]) -> HeaderDigest {
    let hash = Sha256::digest(header);
    HeaderDigest::from_bytes(hash.into())
}
