//! Artifact verification gate
//!
//! A cached artifact is trusted only when its digest matches the catalog. A
//! missing or mismatching artifact is fetched once and checked once more; there
//! is no retry loop beyond that.

use std::path::Path;

use crate::cache::ArtifactPaths;
use crate::error::{GantryError, Result};
use crate::fetch::Fetcher;
use crate::hash;
use crate::output::Reporter;

/// Compares a local file against an expected digest
pub trait Verifier {
    fn verify(&self, path: &Path, expected: &str) -> bool;
}

/// Verifier backed by [`hash::verify_file`]
///
/// Read errors count as a mismatch.
#[derive(Debug, Default)]
pub struct DigestVerifier;

impl Verifier for DigestVerifier {
    fn verify(&self, path: &Path, expected: &str) -> bool {
        match hash::verify_file(path, expected) {
            Ok(matches) => {
                if !matches {
                    log::debug!("Digest mismatch for {}", path.display());
                }
                matches
            }
            Err(e) => {
                log::warn!("Unable to hash {}: {}", path.display(), e);
                false
            }
        }
    }
}

/// Ensures a verified copy of an artifact exists in the cache
pub struct VerificationGate<'a> {
    pub verifier: &'a dyn Verifier,
    pub fetcher: &'a dyn Fetcher,
    pub reporter: &'a dyn Reporter,
    /// Repository base URL; locations are appended verbatim
    pub repo_url: &'a str,
}

impl VerificationGate<'_> {
    /// Verify the cached artifact, fetching and re-verifying it on a miss
    ///
    /// Returns `Ok(false)` when the artifact still does not match after the fetch.
    /// A fetch failure is returned as [`GantryError::RetrievalFailed`].
    pub fn ensure_verified(
        &self,
        paths: &ArtifactPaths,
        expected_digest: &str,
        location: &str,
        display_name: &str,
    ) -> Result<bool> {
        if paths.absolute_file.is_file()
            && self.verifier.verify(&paths.absolute_file, expected_digest)
        {
            log::debug!("Cached artifact verified: {}", paths.absolute_file.display());
            return Ok(true);
        }

        self.reporter.info(&format!("Downloading {display_name}..."));
        let url = format!("{}{}", self.repo_url, location);
        self.fetcher
            .fetch(&paths.absolute_dir, &url)
            .map_err(|e| match e {
                GantryError::RetrievalFailed { reason, .. } => GantryError::RetrievalFailed {
                    location: location.to_string(),
                    reason,
                },
                other => GantryError::RetrievalFailed {
                    location: location.to_string(),
                    reason: other.to_string(),
                },
            })?;

        Ok(self.verifier.verify(&paths.absolute_file, expected_digest))
    }
}
