//! Candidate image reconstruction.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use pixleak_core::{Dimensions, HeaderDigest};

/// Reassemble a previewable image: recovered header, one separator byte, raw
/// ciphertext. Image decoders expect a single whitespace terminator after
/// the header, so exactly one space goes between the two; the ciphertext
/// itself is passed through untouched.
pub fn materialize(header: &[u8], ciphertext: &[u8]) -> Vec<u8> {
    let mut image = Vec::with_capacity(header.len() + 1 + ciphertext.len());
    image.extend_from_slice(header);
    image.push(b' ');
    image.extend_from_slice(ciphertext);
    image
}

/// Artifact file name: `<original-filename>.<width>x<height>.<digest-prefix>`
pub fn artifact_name(file_name: &str, dims: Dimensions, digest: &HeaderDigest) -> String {
    format!("{file_name}.{dims}.{}", digest.short_hex())
}

/// Persist a reconstructed candidate into the output directory.
pub fn write_artifact(out_dir: &Path, name: &str, image: &[u8]) -> Result<PathBuf> {
    let path = out_dir.join(name);
    std::fs::write(&path, image)
        .with_context(|| format!("writing artifact: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixleak_core::digest_header;

    #[test]
    fn materialize_inserts_single_separator() {
        let image = materialize(b"P6 4 3 255", b"\x01\x02\x03");
        assert_eq!(image, b"P6 4 3 255 \x01\x02\x03");
    }

    #[test]
    fn materialize_preserves_ciphertext_bytes() {
        let ciphertext = vec![0u8, 255, 10, 32, 13];
        let image = materialize(b"P6 1 1 255", &ciphertext);
        assert_eq!(&image[image.len() - ciphertext.len()..], &ciphertext[..]);
    }

    #[test]
    fn artifact_name_format() {
        let digest = digest_header(b"P6 4 3 255");
        let name = artifact_name("cat.ppm.encrypted", Dimensions::new(4, 3), &digest);
        assert_eq!(name, format!("cat.ppm.encrypted.4x3.{}", digest.short_hex()));
    }

    #[test]
    fn write_artifact_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(dir.path(), "img.4x3.abc123", b"payload").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"payload");
    }
}
