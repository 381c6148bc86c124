//! Operator-facing output
//!
//! Plain, line-oriented progress messages. Diagnostics go through `log` instead.

use console::Style;

/// Line-oriented sink for progress and status messages
///
/// `Sync` because installer output is forwarded from the stdout drain thread.
pub trait Reporter: Sync {
    /// Normal progress line
    fn info(&self, message: &str);

    /// Item skipped or degraded, run continues
    fn warn(&self, message: &str);

    /// Item failed
    fn error(&self, message: &str);

    /// One line of installer stdout (verbose mode only)
    fn installer_output(&self, line: &str) {
        self.info(&format!("Installer output | {line}"));
    }
}

/// Reporter writing to the terminal
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn warn(&self, message: &str) {
        println!("{}", Style::new().yellow().apply_to(message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", Style::new().red().bold().apply_to(message));
    }
}

/// Reporter that keeps every line in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct BufferedReporter {
    lines: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl BufferedReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines reported so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Whether any reported line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }

    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

#[cfg(test)]
impl Reporter for BufferedReporter {
    fn info(&self, message: &str) {
        self.push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.push(format!("warning: {message}"));
    }

    fn error(&self, message: &str) {
        self.push(format!("error: {message}"));
    }
}
