//! Loading the published header digest list.
//!
//! One 64-char hex digest per line, order-independent, blank lines ignored.
//! Duplicate lines collapse under set semantics: two images that truly share
//! identical headers become indistinguishable by digest alone. That ambiguity
//! is inherent to the published format, so it is logged, not resolved.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use pixleak_core::HeaderDigest;

/// Parsed digest list.
pub struct DigestList {
    pub digests: HashSet<HeaderDigest>,
    /// Non-blank line count before dedup; this is what the file-count
    /// precondition compares against.
    pub entries: usize,
}

/// Read and parse a digest list file.
pub fn load(path: &Path) -> Result<DigestList> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading digest list: {}", path.display()))?;
    parse(&content).with_context(|| format!("parsing digest list: {}", path.display()))
}

fn parse(content: &str) -> Result<DigestList> {
    let mut digests = HashSet::new();
    let mut entries = 0usize;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        entries += 1;
        let digest: HeaderDigest = line.parse()?;
        digests.insert(digest);
    }

    if digests.len() < entries {
        warn!(
            collapsed = entries - digests.len(),
            "duplicate digest lines collapsed; images with identical headers cannot be told apart"
        );
    }

    Ok(DigestList { digests, entries })
}
