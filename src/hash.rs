//! Artifact digests for installer integrity
//!
//! Catalog hashes are SHA-256 hex by default. A `sha256:` or `blake3:` prefix
//! selects the algorithm explicitly.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest as _, Sha256};

use crate::error::{GantryError, Result};

/// Hash prefix for SHA-256 digests
pub const SHA256_PREFIX: &str = "sha256:";

/// Hash prefix for BLAKE3 digests
pub const BLAKE3_PREFIX: &str = "blake3:";

/// Digest algorithms a catalog hash can name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Sha256,
    Blake3,
}

/// Split an expected digest into its algorithm and bare hex value
///
/// Returns `None` for an unknown `<algo>:` prefix or a value that is not hex.
pub fn parse_expected(expected: &str) -> Option<(Algorithm, String)> {
    let expected = expected.trim();
    let (algorithm, hex_value) = if let Some(rest) = expected.strip_prefix(SHA256_PREFIX) {
        (Algorithm::Sha256, rest)
    } else if let Some(rest) = expected.strip_prefix(BLAKE3_PREFIX) {
        (Algorithm::Blake3, rest)
    } else if expected.contains(':') {
        return None;
    } else {
        (Algorithm::Sha256, expected)
    };

    if hex_value.is_empty() || !hex_value.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    Some((algorithm, hex_value.to_ascii_lowercase()))
}

/// Calculate the lowercase hex digest of a file
pub fn hash_file(path: &Path, algorithm: Algorithm) -> Result<String> {
    let file = File::open(path).map_err(|e| GantryError::IoError {
        message: format!("Failed to open {}: {}", path.display(), e),
    })?;

    let mut reader = BufReader::new(file);
    let mut buffer = [0u8; 8192];
    let mut sha256 = Sha256::new();
    let mut blake3 = blake3::Hasher::new();

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| GantryError::IoError {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;

        if bytes_read == 0 {
            break;
        }

        match algorithm {
            Algorithm::Sha256 => sha256.update(&buffer[..bytes_read]),
            Algorithm::Blake3 => {
                blake3.update(&buffer[..bytes_read]);
            }
        }
    }

    Ok(match algorithm {
        Algorithm::Sha256 => hex::encode(sha256.finalize()),
        Algorithm::Blake3 => blake3.finalize().to_hex().to_string(),
    })
}

/// Check a file against an expected catalog digest
pub fn verify_file(path: &Path, expected: &str) -> Result<bool> {
    let Some((algorithm, expected_hex)) = parse_expected(expected) else {
        log::warn!("Unrecognised digest format: {expected}");
        return Ok(false);
    };

    let actual = hash_file(path, algorithm)?;
    Ok(actual == expected_hex)
}
