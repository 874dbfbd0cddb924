//! Run-scoped recovery pipeline.
//!
//! Wires the stages together in order: directory listing → count
//! precondition → digest load → bound derivation → brute force →
//! interactive assignment. The pending-digest set lives here for exactly
//! one run and is handed back in the summary; there is no process-wide
//! state.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use pixleak_core::config::PixleakConfig;
use pixleak_core::{HeaderDigest, PixleakError};

use crate::assign::{self, Accepted, Operator};
use crate::bound;
use crate::brute::{self, ProgressFn};
use crate::digests;

/// Outcome of one recovery run.
#[derive(Debug)]
pub struct RunSummary {
    /// Ciphertext files examined
    pub files: usize,
    /// Digests the brute force recovered headers for
    pub recovered: usize,
    /// Accepted (file, artifact) assignments
    pub accepted: Vec<Accepted>,
    /// Digests no file claimed; nonempty is an expected outcome
    pub unresolved: HashSet<HeaderDigest>,
}

/// Execute a full recovery run.
///
/// Fails with `PixleakError::Precondition` on a file/digest count mismatch
/// (before any search work) and with `PixleakError::NotFound` when the
/// search space is exhausted without a single match. Accepted artifacts
/// already on disk stay there whatever happens later; there is no
/// cross-file rollback.
pub fn run(
    input_dir: &Path,
    digest_file: &Path,
    output_dir: &Path,
    config: &PixleakConfig,
    operator: &mut dyn Operator,
    progress: Option<&ProgressFn>,
) -> Result<RunSummary> {
    let files = list_files(input_dir)?;
    let digest_list = digests::load(digest_file)?;

    if files.len() != digest_list.entries {
        return Err(PixleakError::Precondition(format!(
            "{} ciphertext files but {} digest lines; every image needs exactly one published digest",
            files.len(),
            digest_list.entries
        ))
        .into());
    }

    let sizes = file_sizes(&files)?;
    let bound = bound::compute_bound(&sizes, &config.search);
    info!(
        files = files.len(),
        digests = digest_list.digests.len(),
        bound,
        "starting dimension brute force"
    );

    let template = config.header.template();
    let record = brute::search(bound, &digest_list.digests, &template, progress);
    if record.is_empty() {
        return Err(PixleakError::NotFound.into());
    }
    info!(
        recovered = record.len(),
        pending = digest_list.digests.len(),
        "brute force finished"
    );

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory: {}", output_dir.display()))?;

    // run-scoped pending set: born here, returned in the summary, dropped
    // with it
    let mut pending = digest_list.digests;
    let accepted = assign::assign(&files, &record, &mut pending, output_dir, operator)?;

    Ok(RunSummary {
        files: files.len(),
        recovered: record.len(),
        accepted,
        unresolved: pending,
    })
}

/// Regular files in the input directory, sorted by name for a stable
/// presentation order.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading input directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_sizes(files: &[PathBuf]) -> Result<Vec<u64>> {
    files
        .iter()
        .map(|path| {
            let meta = std::fs::metadata(path)
                .with_context(|| format!("stat: {}", path.display()))?;
            Ok(meta.len())
        })
        .collect()
}
