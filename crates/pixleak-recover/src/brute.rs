//! Exhaustive search over the header parameter space.
//!
//! Every (width, height) pair below the bound is rendered through the
//! canonical template and hashed; hits against the pending digest set are
//! claimed first-writer-wins. Cost is O(bound²) SHA-256 evaluations; the
//! bound scales with ciphertext byte length, not with how many images exist.
//!
//! Rows are distributed across the rayon pool. The only shared state is the
//! found counter and the mutex-guarded record; each digest claim is an
//! insert-if-absent, so a duplicate hit for an already-claimed digest is
//! dropped whatever thread saw it first.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rayon::prelude::*;
use tracing::info;

use pixleak_core::{digest_header, Dimensions, HeaderDigest, HeaderTemplate};

/// Progress callback type (rows_done, rows_total, message)
pub type ProgressFn = Box<dyn Fn(u64, u64, &str) + Send + Sync>;

/// A recovered header: the dimensions that produced a digest match and the
/// exact bytes that were hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredHeader {
    pub dims: Dimensions,
    pub header: Vec<u8>,
}

/// Write-once map from digest to its recovered header.
pub type CandidateRecord = HashMap<HeaderDigest, RecoveredHeader>;

/// Enumerate all (width, height) pairs in `0..bound × 0..bound` and claim
/// every pending digest whose header they render.
///
/// The whole enumeration stops as soon as every pending digest is claimed;
/// if it completes first, whatever was found is returned. The caller must
/// treat an empty record as a failed search.
pub fn search(
    bound: u32,
    pending: &HashSet<HeaderDigest>,
    template: &HeaderTemplate,
    progress: Option<&ProgressFn>,
) -> CandidateRecord {
    let target = pending.len();
    if target == 0 || bound == 0 {
        return CandidateRecord::new();
    }

    let found = AtomicUsize::new(0);
    let rows_done = AtomicUsize::new(0);
    let record = Mutex::new(CandidateRecord::new());

    (0..bound).into_par_iter().for_each(|width| {
        for height in 0..bound {
            // the single early-exit condition for the whole 2D enumeration;
            // rows still in flight see it at their next iteration
            if found.load(Ordering::Relaxed) >= target {
                break;
            }

            let dims = Dimensions::new(width, height);
            let header = template.render(dims);
            let digest = digest_header(&header);
            if !pending.contains(&digest) {
                continue;
            }

            let mut record = record.lock().expect("search record lock poisoned");
            if record.contains_key(&digest) {
                // duplicate hit for an already-claimed digest
                continue;
            }
            record.insert(digest, RecoveredHeader { dims, header });
            let claimed = found.fetch_add(1, Ordering::Relaxed) + 1;
            info!(%dims, digest = %digest.short_hex(), "recovered header {claimed}/{target}");
        }

        let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(report) = progress {
            report(
                done as u64,
                u64::from(bound),
                &format!("{}/{} digests", found.load(Ordering::Relaxed), target),
            );
        }
    });

    record.into_inner().expect("search record lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_of(headers: &[&[u8]]) -> HashSet<HeaderDigest> {
        headers.iter().map(|h| digest_header(h)).collect()
    }

    #[test]
    fn roundtrip_single_header() {
        let template = HeaderTemplate::default();
        let digest = digest_header(b"P6 4 3 255");
        let record = search(10, &pending_of(&[b"P6 4 3 255"]), &template, None);

        assert_eq!(record.len(), 1);
        let recovered = &record[&digest];
        assert_eq!(recovered.dims, Dimensions::new(4, 3));
        assert_eq!(recovered.header, b"P6 4 3 255");
    }

    #[test]
    fn finds_within_bound() {
        let template = HeaderTemplate::default();
        let record = search(20, &pending_of(&[b"P6 10 5 255"]), &template, None);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn misses_outside_bound() {
        let template = HeaderTemplate::default();
        let record = search(9, &pending_of(&[b"P6 10 5 255"]), &template, None);
        assert!(record.is_empty());
    }

    #[test]
    fn recovers_multiple_digests_injectively() {
        let template = HeaderTemplate::default();
        let headers: [&[u8]; 3] = [b"P6 1 2 255", b"P6 7 7 255", b"P6 3 9 255"];
        let record = search(12, &pending_of(&headers), &template, None);

        assert_eq!(record.len(), 3);
        let dims: HashSet<Dimensions> = record.values().map(|r| r.dims).collect();
        assert_eq!(dims.len(), 3);
    }

    #[test]
    fn empty_pending_searches_nothing() {
        let template = HeaderTemplate::default();
        let record = search(100, &HashSet::new(), &template, None);
        assert!(record.is_empty());
    }

    #[test]
    fn zero_bound_finds_nothing() {
        let template = HeaderTemplate::default();
        let record = search(0, &pending_of(&[b"P6 0 0 255"]), &template, None);
        assert!(record.is_empty());
    }

    #[test]
    fn respects_template_constants() {
        let template = HeaderTemplate::new("P6", "65535");
        let digest = digest_header(b"P6 2 2 65535");
        let record = search(5, &HashSet::from([digest]), &template, None);
        assert_eq!(record[&digest].header, b"P6 2 2 65535");
    }

    #[test]
    fn progress_reports_rows() {
        let template = HeaderTemplate::default();
        let calls = std::sync::Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let progress: ProgressFn = Box::new(move |_, _, _| {
            calls_clone.fetch_add(1, Ordering::Relaxed);
        });

        // unsatisfiable digest, so every row completes and reports
        let digest = digest_header(b"P6 1000 1000 255");
        search(4, &HashSet::from([digest]), &template, Some(&progress));
        assert_eq!(calls.load(Ordering::Relaxed), 4);
    }
}
