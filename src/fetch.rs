//! Installer artifact retrieval
//!
//! Downloads go to a temporary file inside the destination directory and are
//! renamed into place once complete, so an interrupted transfer never leaves a
//! truncated artifact behind under the real name.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{GantryError, Result};
use crate::progress::DownloadProgress;

/// Retrieves a remote artifact into a local directory
pub trait Fetcher {
    /// Download `url` into `dest_dir`, naming the file after the URL's last path segment
    fn fetch(&self, dest_dir: &Path, url: &str) -> Result<()>;
}

/// HTTP(S) fetcher
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("gantry/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    fn download(&self, dest_dir: &Path, url: &str, file_name: &str) -> Result<()> {
        let retrieval_failed = |reason: String| GantryError::RetrievalFailed {
            location: url.to_string(),
            reason,
        };

        fs::create_dir_all(dest_dir).map_err(|e| {
            retrieval_failed(format!("cannot create {}: {}", dest_dir.display(), e))
        })?;

        let mut response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(retrieval_failed(format!("server returned {status}")));
        }

        let progress = DownloadProgress::new(file_name, response.content_length());
        let mut temp = NamedTempFile::new_in(dest_dir)
            .map_err(|e| retrieval_failed(format!("cannot create temporary file: {e}")))?;

        let mut buffer = [0u8; 8192];
        let copied = loop {
            let bytes_read = match response.read(&mut buffer) {
                Ok(0) => break Ok(()),
                Ok(n) => n,
                Err(e) => break Err(retrieval_failed(format!("read failed: {e}"))),
            };
            if let Err(e) = temp.write_all(&buffer[..bytes_read]) {
                break Err(retrieval_failed(format!("write failed: {e}")));
            }
            progress.inc(bytes_read as u64);
        };

        if let Err(e) = copied {
            progress.abandon();
            return Err(e);
        }
        progress.finish();
        log::debug!("Downloaded {} bytes from {}", progress.position(), url);

        let target = dest_dir.join(file_name);
        temp.persist(&target)
            .map_err(|e| GantryError::FileWriteFailed {
                path: target.display().to_string(),
                reason: e.error.to_string(),
            })?;

        Ok(())
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, dest_dir: &Path, url: &str) -> Result<()> {
        let file_name = file_name_from_url(url).ok_or_else(|| GantryError::RetrievalFailed {
            location: url.to_string(),
            reason: "URL has no file name".to_string(),
        })?;

        log::debug!("Fetching {} into {}", url, dest_dir.display());
        self.download(dest_dir, url, &file_name)
    }
}

/// Last path segment of a URL, ignoring any query or fragment
fn file_name_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let without_scheme = path.split_once("://").map_or(path, |(_, rest)| rest);
    // The host alone is not a file name
    let (_, path_part) = without_scheme.split_once('/')?;
    path_part
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
}
