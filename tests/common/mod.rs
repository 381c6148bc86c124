//! Common test utilities for gantry integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// sha256("test")
#[allow(dead_code)]
pub const TEST_SHA256: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

/// Nothing listens here; any download attempt fails fast
#[allow(dead_code)]
pub const UNREACHABLE_REPO: &str = "http://127.0.0.1:9/";

/// An agent root with config, catalog, cache and receipts in one temp dir
pub struct TestAgent {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the agent root
    pub path: PathBuf,
}

impl TestAgent {
    /// Create an agent root with a config pointing at `repo_url`
    ///
    /// `tools` is appended to the config as-is (e.g. a `tools:` block).
    pub fn new(repo_url: &str, tools: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let agent = Self { temp, path };
        agent.write_file(
            "config.yaml",
            &format!(
                "url: {repo_url}\n\
                 catalog: catalog.yaml\n\
                 manifest: manifest.yaml\n\
                 cache_path: cache\n\
                 receipts_path: receipts.json\n\
                 {tools}"
            ),
        );
        agent.write_file("catalog.yaml", "{}\n");
        agent
    }

    /// Write a file under the agent root
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file under the agent root
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists under the agent root
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Place an artifact in the cache at `location`
    #[allow(dead_code)]
    pub fn cache_artifact(&self, location: &str, content: &str) {
        self.write_file(&format!("cache/{location}"), content);
    }

    /// Config file path
    pub fn config(&self) -> PathBuf {
        self.path.join("config.yaml")
    }
}

/// Catalog entry YAML for one item
#[allow(dead_code)]
pub fn catalog_item(name: &str, location: &str, hash: &str, uninstall_method: &str) -> String {
    format!(
        "{name}:\n  \
           display_name: {name} app\n  \
           version: \"1.0\"\n  \
           installer_item_location: {location}\n  \
           installer_item_hash: {hash}\n  \
           uninstall_method: {uninstall_method}\n"
    )
}
