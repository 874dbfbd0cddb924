//! pixleak-core: shared types, the header hash oracle, config schema, and error types
//!
//! The one contract that must never drift lives here: `header::HeaderTemplate`
//! renders the canonical `"<MAGIC> <WIDTH> <HEIGHT> <MAXVAL>"` form and
//! `header::digest_header` hashes it. Both the corpus producer and the
//! recovery engine go through this module, so a header hashed at encryption
//! time is byte-for-byte the header the brute force re-renders.

pub mod config;
pub mod error;
pub mod header;
pub mod types;

pub use error::{PixleakError, PixleakResult};
pub use header::{digest_header, HeaderTemplate};
pub use types::{Dimensions, HeaderDigest, DIGEST_SIZE};
