//! pixleak-recover: the header recovery engine
//!
//! # Overview
//! - `digests`: published digest list loading (set semantics)
//! - `bound`: search bound derivation from ciphertext sizes
//! - `brute`: exhaustive dimension search against the digest oracle
//! - `reconstruct`: candidate image materialization and artifact naming
//! - `assign`: operator-driven accept/reject assignment loop
//! - `pipeline`: run-scoped orchestration of the above

pub mod assign;
pub mod bound;
pub mod brute;
pub mod digests;
pub mod pipeline;
pub mod reconstruct;

// Convenience re-exports for the most common operations
pub use assign::{Accepted, Operator, ScriptedOperator};
pub use brute::{search, CandidateRecord, ProgressFn, RecoveredHeader};
pub use pipeline::{run, RunSummary};
