//! pixleak-producer: builds the demonstration corpus
//!
//! For each valid raw PPM image in the input directory: hash the canonical
//! header through the shared oracle, strip the header, PKCS#7-pad and
//! AES-256-ECB encrypt the pixel data under one freshly generated run key.
//! Invalid files are skipped with a warning.
//!
//! Output layout, directly consumable by the recovery pipeline:
//!
//! ```text
//! <out>/encrypted/<name>.encrypted   one per valid input image
//! <out>/header-digests.txt           one hex digest per line
//! <out>/encryption-key               the raw 32-byte key
//! ```

pub mod ecb;
pub mod ppm;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use pixleak_core::{digest_header, HeaderTemplate};

/// Name of the digest list the batch job publishes.
pub const DIGEST_LIST_NAME: &str = "header-digests.txt";
/// Name of the key file written next to the corpus.
pub const KEY_FILE_NAME: &str = "encryption-key";
/// Subdirectory holding the header-less ciphertexts.
pub const ENCRYPTED_DIR_NAME: &str = "encrypted";

#[derive(Debug)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub encrypted_dir: PathBuf,
    pub digest_list: PathBuf,
}

/// Encrypt every valid PPM image under `input_dir` into `output_dir`.
pub fn produce(
    input_dir: &Path,
    output_dir: &Path,
    template: &HeaderTemplate,
) -> Result<BatchSummary> {
    let files = list_files(input_dir)?;

    let encrypted_dir = output_dir.join(ENCRYPTED_DIR_NAME);
    std::fs::create_dir_all(&encrypted_dir)
        .with_context(|| format!("creating output directory: {}", encrypted_dir.display()))?;

    let key = ecb::generate_key();
    let key_path = output_dir.join(KEY_FILE_NAME);
    std::fs::write(&key_path, key)
        .with_context(|| format!("writing key file: {}", key_path.display()))?;
    info!(key_file = %key_path.display(), "generated run key");

    let mut digest_lines = String::new();
    let mut processed = 0usize;
    let mut skipped = 0usize;

    for file in &files {
        let data =
            std::fs::read(file).with_context(|| format!("reading image: {}", file.display()))?;

        let split = match ppm::split_image(&data, template) {
            Ok(split) => split,
            Err(e) => {
                warn!(file = %file.display(), error = %e, "skipped invalid image");
                skipped += 1;
                continue;
            }
        };

        // publish the digest of the canonical rendering, never the raw
        // file's own header bytes
        let header = template.render(split.dims);
        let digest = digest_header(&header);
        digest_lines.push_str(&digest.to_string());
        digest_lines.push('\n');

        let ciphertext = ecb::encrypt(&key, split.body);
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_owned)
            .with_context(|| format!("non-UTF-8 file name: {}", file.display()))?;
        let out_path = encrypted_dir.join(format!("{name}.encrypted"));
        std::fs::write(&out_path, &ciphertext)
            .with_context(|| format!("writing ciphertext: {}", out_path.display()))?;

        info!(file = %name, dims = %split.dims, bytes = ciphertext.len(), "encrypted");
        processed += 1;
    }

    let digest_list = output_dir.join(DIGEST_LIST_NAME);
    std::fs::write(&digest_list, digest_lines)
        .with_context(|| format!("writing digest list: {}", digest_list.display()))?;

    info!(processed, skipped, "batch job finished");
    Ok(BatchSummary {
        processed,
        skipped,
        encrypted_dir,
        digest_list,
    })
}

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
