//! Operator-driven candidate assignment.
//!
//! For each ciphertext file, every still-pending digest with a recovered
//! header is materialized, persisted, and shown to the operator. Acceptance
//! consumes the digest globally, so a digest resolves to at most one file
//! per run. Rejection deletes the artifact on the spot. A file whose
//! candidates are all rejected simply stays unresolved; that is an expected
//! outcome.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use pixleak_core::HeaderDigest;

use crate::brute::CandidateRecord;
use crate::reconstruct;

/// Operator capability: display a reconstructed candidate and collect a
/// yes/no verdict. The assignment logic only sees this trait, so tests can
/// drive it with a scripted stand-in instead of a real display.
pub trait Operator {
    fn present(&mut self, artifact: &Path) -> Result<()>;
    /// Blocks until the operator answers. `true` accepts the candidate.
    fn confirm(&mut self) -> Result<bool>;
}

/// Scripted operator: pops pre-baked verdicts front-to-back and rejects once
/// the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    answers: VecDeque<bool>,
    presented: Vec<PathBuf>,
}

impl ScriptedOperator {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            presented: Vec::new(),
        }
    }

    /// Every artifact path shown so far, in presentation order.
    pub fn presented(&self) -> &[PathBuf] {
        &self.presented
    }
}

impl Operator for ScriptedOperator {
    fn present(&mut self, artifact: &Path) -> Result<()> {
        self.presented.push(artifact.to_path_buf());
        Ok(())
    }

    fn confirm(&mut self) -> Result<bool> {
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}

/// One accepted assignment: source ciphertext file → persisted artifact.
#[derive(Debug)]
pub struct Accepted {
    pub source: PathBuf,
    pub artifact: PathBuf,
    pub digest: HeaderDigest,
}

/// Run the assignment loop over every ciphertext file.
///
/// `pending` shrinks by one per acceptance and is left holding the digests
/// that no file claimed; the caller reports those, it is not an error.
pub fn assign(
    files: &[PathBuf],
    record: &CandidateRecord,
    pending: &mut HashSet<HeaderDigest>,
    out_dir: &Path,
    operator: &mut dyn Operator,
) -> Result<Vec<Accepted>> {
    let mut accepted = Vec::new();

    for file in files {
        let ciphertext = std::fs::read(file)
            .with_context(|| format!("reading ciphertext: {}", file.display()))?;
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_owned)
            .with_context(|| format!("non-UTF-8 file name: {}", file.display()))?;
        info!(file = %file_name, bytes = ciphertext.len(), "presenting candidates");

        // snapshot, sorted by digest bytes: acceptance mutates the set
        // mid-file, and a stable order keeps runs reproducible
        let mut candidates: Vec<HeaderDigest> = pending.iter().copied().collect();
        candidates.sort_unstable_by_key(|d| *d.as_bytes());

        let mut resolved = false;
        for digest in candidates {
            let Some(recovered) = record.get(&digest) else {
                // the search may have claimed only a subset of the digests
                debug!(digest = %digest.short_hex(), "digest has no recovered header, skipping");
                continue;
            };

            let image = reconstruct::materialize(&recovered.header, &ciphertext);
            let name = reconstruct::artifact_name(&file_name, recovered.dims, &digest);
            let artifact = reconstruct::write_artifact(out_dir, &name, &image)?;

            operator.present(&artifact)?;
            if operator.confirm()? {
                // each digest belongs to exactly one image: consume it globally
                pending.remove(&digest);
                info!(file = %file_name, dims = %recovered.dims, "candidate accepted");
                accepted.push(Accepted {
                    source: file.clone(),
                    artifact,
                    digest,
                });
                resolved = true;
                break;
            }

            // rejected candidates must not stay on disk
            std::fs::remove_file(&artifact)
                .with_context(|| format!("removing rejected artifact: {}", artifact.display()))?;
        }

        if !resolved {
            warn!(file = %file_name, "no candidate accepted, file left unresolved");
        }
    }

    Ok(accepted)
}
