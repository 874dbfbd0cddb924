use std::fmt;
use std::str::FromStr;

use crate::error::PixleakError;

/// SHA-256 digest length in bytes
pub const DIGEST_SIZE: usize = 32;

/// A published header digest (32 bytes), displayed as 64 hex chars.
///
/// Identity is byte equality; the digest is opaque everywhere except the
/// oracle that produced it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeaderDigest([u8; DIGEST_SIZE]);

impl HeaderDigest {
    pub fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// First 3 digest bytes as 6 hex chars, used to tag artifact filenames.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..3])
    }
}

impl FromStr for HeaderDigest {
    type Err = PixleakError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = hex::decode(s)
            .map_err(|e| PixleakError::Format(format!("invalid digest hex '{s}': {e}")))?;
        let bytes: [u8; DIGEST_SIZE] = raw.try_into().map_err(|raw: Vec<u8>| {
            PixleakError::Format(format!(
                "digest must be {DIGEST_SIZE} bytes, got {}",
                raw.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for HeaderDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for HeaderDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeaderDigest({})", hex::encode(self.0))
    }
}

/// Image dimensions in pixels, generated deterministically from search indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_hex_roundtrip() {
        let hex64 = "a665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27ae3";
        let digest: HeaderDigest = hex64.parse().unwrap();
        assert_eq!(digest.to_string(), hex64);
    }

    #[test]
    fn digest_short_hex_is_first_three_bytes() {
        let hex64 = "a665a45920422f9d417e4867efdc4fb8a04a1f3fff1fa07e998e86f7f7a27ae3";
        let digest: HeaderDigest = hex64.parse().unwrap();
        assert_eq!(digest.short_hex(), "a665a4");
    }

    #[test]
    fn digest_rejects_wrong_length() {
        assert!("abcd".parse::<HeaderDigest>().is_err());
        let too_long = "00".repeat(DIGEST_SIZE + 1);
        assert!(too_long.parse::<HeaderDigest>().is_err());
    }

    #[test]
    fn digest_rejects_non_hex() {
        let bad = "zz".repeat(DIGEST_SIZE);
        assert!(bad.parse::<HeaderDigest>().is_err());
    }

    #[test]
    fn dimensions_display() {
        assert_eq!(Dimensions::new(640, 480).to_string(), "640x480");
    }
}
