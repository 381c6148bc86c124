//! Progress bar display for artifact downloads

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for one download
///
/// Draws to stderr and hides itself when stderr is not a terminal.
pub struct DownloadProgress {
    pb: ProgressBar,
}

impl DownloadProgress {
    /// Create a progress display; `total_bytes` comes from Content-Length when known
    pub fn new(file_name: &str, total_bytes: Option<u64>) -> Self {
        let pb = match total_bytes {
            Some(total) => {
                let pb = ProgressBar::new(total);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("[{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                {
                    pb.set_style(style.progress_chars("#>-"));
                }
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {bytes} {msg}")
                {
                    pb.set_style(style);
                }
                pb
            }
        };
        pb.set_message(file_name.to_string());

        Self { pb }
    }

    /// Record `bytes` more downloaded
    pub fn inc(&self, bytes: u64) {
        self.pb.inc(bytes);
    }

    /// Bytes recorded so far
    pub fn position(&self) -> u64 {
        self.pb.position()
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.pb.abandon();
    }
}
