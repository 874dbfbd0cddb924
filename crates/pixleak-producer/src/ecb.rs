//! PKCS#7 padding and AES-256-ECB.
//!
//! ECB is the point of the demonstration: every 16-byte block is encrypted
//! independently, so identical plaintext blocks at aligned positions stay
//! identical in the ciphertext. Nothing in this module is fit for
//! protecting real data.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes256;
use rand::RngCore;

pub const BLOCK_SIZE: usize = 16;
pub const KEY_SIZE: usize = 32;

/// Generate a random 256-bit run key.
pub fn generate_key() -> [u8; KEY_SIZE] {
    let mut key = [0u8; KEY_SIZE];
    rand::thread_rng().fill_bytes(&mut key);
    key
}

/// PKCS#7: pad up to the next block boundary, a full extra block when the
/// input is already aligned.
pub fn pkcs7_pad(data: &[u8], block_size: usize) -> Vec<u8> {
    let pad = block_size - data.len() % block_size;
    let mut padded = Vec::with_capacity(data.len() + pad);
    padded.extend_from_slice(data);
    padded.extend(std::iter::repeat(pad as u8).take(pad));
    padded
}

/// Pad and encrypt with AES-256 in ECB mode. Output length is a multiple of
/// the block size.
pub fn encrypt(key: &[u8; KEY_SIZE], plaintext: &[u8]) -> Vec<u8> {
    let cipher = Aes256::new(key.into());
    let mut data = pkcs7_pad(plaintext, BLOCK_SIZE);
    for block in data.chunks_mut(BLOCK_SIZE) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_fills_to_block_boundary() {
        let padded = pkcs7_pad(b"hello", BLOCK_SIZE);
        assert_eq!(padded.len(), BLOCK_SIZE);
        assert_eq!(padded[5..], [11u8; 11]);
    }

    #[test]
    fn pad_aligned_input_gains_full_block() {
        let padded = pkcs7_pad(&[0u8; BLOCK_SIZE], BLOCK_SIZE);
        assert_eq!(padded.len(), 2 * BLOCK_SIZE);
        assert_eq!(padded[BLOCK_SIZE..], [BLOCK_SIZE as u8; BLOCK_SIZE]);
    }

    #[test]
    fn encrypt_is_deterministic_per_key() {
        let key = [7u8; KEY_SIZE];
        assert_eq!(encrypt(&key, b"some pixels"), encrypt(&key, b"some pixels"));
    }

    #[test]
    fn different_keys_differ() {
        let a = encrypt(&[1u8; KEY_SIZE], b"some pixels");
        let b = encrypt(&[2u8; KEY_SIZE], b"some pixels");
        assert_ne!(a, b);
    }

    #[test]
    fn output_is_block_aligned() {
        let key = generate_key();
        for len in [0usize, 1, 15, 16, 17, 47] {
            let out = encrypt(&key, &vec![0xAB; len]);
            assert_eq!(out.len() % BLOCK_SIZE, 0, "input len {len}");
        }
    }

    #[test]
    fn identical_plaintext_blocks_leak_through() {
        // the structural weakness the whole system demonstrates
        let key = generate_key();
        let plaintext = [0x42u8; 3 * BLOCK_SIZE];
        let out = encrypt(&key, &plaintext);
        assert_eq!(out[..BLOCK_SIZE], out[BLOCK_SIZE..2 * BLOCK_SIZE]);
        assert_eq!(out[..BLOCK_SIZE], out[2 * BLOCK_SIZE..3 * BLOCK_SIZE]);
    }
}
