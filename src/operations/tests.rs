//! Orchestrator tests with recording collaborators

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::batch::{self, Request};
use super::{Orchestrator, Outcome};
use crate::catalog::{Catalog, CatalogItem};
use crate::config::FailurePolicy;
use crate::error::{GantryError, Result};
use crate::fetch::Fetcher;
use crate::installer::{CommandInvocation, ToolPaths};
use crate::output::BufferedReporter;
use crate::process::CommandRunner;
use crate::status::{ItemStatus, ReceiptStore, StatusCheck};
use crate::verify::{DigestVerifier, Verifier};

// sha256("test")
const TEST_SHA256: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

const REPO_URL: &str = "https://repo.example.com/";

/// Status collaborator returning a fixed answer, or an error for `None`
struct FixedStatus {
    status: Option<ItemStatus>,
    calls: Cell<usize>,
}

impl StatusCheck for FixedStatus {
    fn check_status(&self, _item: &CatalogItem) -> Result<ItemStatus> {
        self.calls.set(self.calls.get() + 1);
        self.status.ok_or_else(|| GantryError::IoError {
            message: "registry unavailable".to_string(),
        })
    }
}

/// Real digest check, counted
#[derive(Default)]
struct CountingVerifier {
    calls: Cell<usize>,
}

impl Verifier for CountingVerifier {
    fn verify(&self, path: &Path, expected: &str) -> bool {
        self.calls.set(self.calls.get() + 1);
        DigestVerifier.verify(path, expected)
    }
}

/// Writes `content` under the URL's file name, or fails when `content` is `None`
struct StubFetcher {
    content: Option<&'static str>,
    urls: RefCell<Vec<String>>,
}

impl Fetcher for StubFetcher {
    fn fetch(&self, dest_dir: &Path, url: &str) -> Result<()> {
        self.urls.borrow_mut().push(url.to_string());
        let Some(content) = self.content else {
            return Err(GantryError::RetrievalFailed {
                location: url.to_string(),
                reason: "503 Service Unavailable".to_string(),
            });
        };
        let file_name = url.rsplit('/').next().unwrap();
        std::fs::create_dir_all(dest_dir)?;
        std::fs::write(dest_dir.join(file_name), content)?;
        Ok(())
    }
}

/// Records invocations; fails every run when `fail` is set
#[derive(Default)]
struct RecordingRunner {
    fail: bool,
    runs: RefCell<Vec<CommandInvocation>>,
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &CommandInvocation, _verbose: bool) -> Result<()> {
        self.runs.borrow_mut().push(invocation.clone());
        if self.fail {
            return Err(crate::error::process::command_failed(
                invocation.program.display().to_string(),
                &invocation.args,
                "exit status: 1603",
            ));
        }
        Ok(())
    }
}

struct Harness {
    temp: TempDir,
    tools: ToolPaths,
    status: FixedStatus,
    verifier: CountingVerifier,
    fetcher: StubFetcher,
    runner: RecordingRunner,
    reporter: BufferedReporter,
}

impl Harness {
    fn new(status: Option<ItemStatus>) -> Self {
        Self {
            temp: TempDir::new().unwrap(),
            tools: ToolPaths {
                chocolatey: PathBuf::from("choco.exe"),
                msiexec: PathBuf::from("msiexec.exe"),
            },
            status: FixedStatus {
                status,
                calls: Cell::new(0),
            },
            verifier: CountingVerifier::default(),
            fetcher: StubFetcher {
                content: Some("test"),
                urls: RefCell::new(Vec::new()),
            },
            runner: RecordingRunner::default(),
            reporter: BufferedReporter::new(),
        }
    }

    fn installed() -> Self {
        Self::new(Some(ItemStatus {
            installed: true,
            version_matches: true,
        }))
    }

    fn not_installed() -> Self {
        Self::new(Some(ItemStatus::default()))
    }

    fn cache_root(&self) -> &Path {
        self.temp.path()
    }

    fn cache_file(&self, location: &str, content: &str) {
        let path = self.cache_root().join(location);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn orchestrator(&self) -> Orchestrator<'_> {
        Orchestrator {
            cache_root: self.temp.path(),
            repo_url: REPO_URL,
            verbose: false,
            tools: &self.tools,
            status: &self.status,
            verifier: &self.verifier,
            fetcher: &self.fetcher,
            runner: &self.runner,
            reporter: &self.reporter,
        }
    }

    fn fetches(&self) -> usize {
        self.fetcher.urls.borrow().len()
    }

    fn runs(&self) -> Vec<CommandInvocation> {
        self.runner.runs.borrow().clone()
    }
}

fn item(location: &str, uninstall_method: &str) -> CatalogItem {
    CatalogItem {
        name: "tool".to_string(),
        display_name: "Tool".to_string(),
        version: "1.0".to_string(),
        installer_item_location: location.to_string(),
        installer_item_hash: TEST_SHA256.to_string(),
        uninstall_method: uninstall_method.to_string(),
    }
}

fn cached_arg(h: &Harness, location: &str) -> String {
    h.cache_root()
        .join(location)
        .to_string_lossy()
        .into_owned()
}

// Idempotency

#[test]
fn test_install_already_installed_has_no_side_effects() {
    let h = Harness::installed();

    let outcome = h.orchestrator().install(&item("apps/tool/tool.msi", "msi")).unwrap();

    assert_eq!(outcome, Outcome::AlreadySatisfied);
    assert_eq!(h.verifier.calls.get(), 0);
    assert_eq!(h.fetches(), 0);
    assert!(h.runs().is_empty());
    assert!(!h.cache_root().join("apps").exists());
    assert!(h.reporter.contains("Tool already installed."));
}

#[test]
fn test_install_outdated_version_reinstalls() {
    let h = Harness::new(Some(ItemStatus {
        installed: true,
        version_matches: false,
    }));
    h.cache_file("apps/tool/tool.msi", "test");

    let outcome = h.orchestrator().install(&item("apps/tool/tool.msi", "msi")).unwrap();

    assert_eq!(outcome, Outcome::Installed);
    assert_eq!(h.runs().len(), 1);
}

#[test]
fn test_uninstall_not_installed_has_no_side_effects() {
    let h = Harness::not_installed();

    let outcome = h.orchestrator().uninstall(&item("apps/tool/tool.msi", "msi")).unwrap();

    assert_eq!(outcome, Outcome::NotInstalled);
    assert_eq!(h.verifier.calls.get(), 0);
    assert_eq!(h.fetches(), 0);
    assert!(h.runs().is_empty());
}

#[test]
fn test_status_error_counts_as_not_installed() {
    let h = Harness::new(None);
    h.cache_file("apps/tool/tool.msi", "test");

    let installed = h.orchestrator().install(&item("apps/tool/tool.msi", "msi")).unwrap();
    let removed = h.orchestrator().uninstall(&item("apps/tool/tool.msi", "msi")).unwrap();

    assert_eq!(installed, Outcome::Installed);
    assert_eq!(removed, Outcome::NotInstalled);
    assert!(h.reporter.contains("Unable to check status of item: Tool"));
}

// Verification gate

#[test]
fn test_scenario_a_cached_msi_installs_without_fetch() {
    let h = Harness::not_installed();
    h.cache_file("apps/tool/tool.msi", "test");

    let outcome = h.orchestrator().install(&item("apps/tool/tool.msi", "msi")).unwrap();

    assert_eq!(outcome, Outcome::Installed);
    assert_eq!(h.fetches(), 0);
    assert_eq!(
        h.runs(),
        vec![CommandInvocation {
            program: PathBuf::from("msiexec.exe"),
            args: vec![
                "/I".to_string(),
                cached_arg(&h, "apps/tool/tool.msi"),
                "/quiet".to_string(),
            ],
        }]
    );
    assert!(h.reporter.contains("Installing MSI for tool.msi"));
}

#[test]
fn test_scenario_b_choco_uninstall_uses_artifact_path() {
    let h = Harness::installed();
    h.cache_file("apps/tool/tool.msi", "test");

    let outcome = h
        .orchestrator()
        .uninstall(&item("apps/tool/tool.msi", "choco"))
        .unwrap();

    assert_eq!(outcome, Outcome::Removed);
    assert_eq!(
        h.runs(),
        vec![CommandInvocation {
            program: PathBuf::from("choco.exe"),
            args: vec![
                "uninstall".to_string(),
                cached_arg(&h, "apps/tool/tool.msi"),
                "-y".to_string(),
                "-r".to_string(),
            ],
        }]
    );
}

#[test]
fn test_msi_uninstall_command() {
    let h = Harness::installed();
    h.cache_file("apps/tool/tool.msi", "test");

    h.orchestrator()
        .uninstall(&item("apps/tool/tool.msi", "msi"))
        .unwrap();

    let runs = h.runs();
    assert_eq!(runs[0].program, PathBuf::from("msiexec.exe"));
    assert_eq!(
        runs[0].args,
        vec!["/X".to_string(), cached_arg(&h, "apps/tool/tool.msi"), "/quiet".to_string()]
    );
}

#[test]
fn test_nupkg_install_command() {
    let h = Harness::not_installed();
    h.cache_file("packages/editor.nupkg", "test");

    let outcome = h
        .orchestrator()
        .install(&item("packages/editor.nupkg", "choco"))
        .unwrap();

    assert_eq!(outcome, Outcome::Installed);
    let runs = h.runs();
    assert_eq!(runs[0].program, PathBuf::from("choco.exe"));
    assert_eq!(
        runs[0].args,
        vec![
            "install".to_string(),
            cached_arg(&h, "packages/editor.nupkg"),
            "-y".to_string(),
            "-r".to_string(),
        ]
    );
}

#[test]
fn test_missing_artifact_fetched_once_then_verified_once() {
    let h = Harness::not_installed();

    let outcome = h.orchestrator().install(&item("apps/tool/tool.msi", "msi")).unwrap();

    assert_eq!(outcome, Outcome::Installed);
    assert_eq!(
        *h.fetcher.urls.borrow(),
        vec![format!("{REPO_URL}apps/tool/tool.msi")]
    );
    // File was absent: only the post-fetch check runs
    assert_eq!(h.verifier.calls.get(), 1);
    assert!(h.reporter.contains("Downloading Tool..."));
}

#[test]
fn test_stale_artifact_refetched() {
    let h = Harness::not_installed();
    h.cache_file("apps/tool/tool.msi", "stale");

    let outcome = h.orchestrator().install(&item("apps/tool/tool.msi", "msi")).unwrap();

    assert_eq!(outcome, Outcome::Installed);
    assert_eq!(h.fetches(), 1);
    assert_eq!(h.verifier.calls.get(), 2);
}

#[test]
fn test_scenario_d_mismatch_after_fetch_launches_nothing() {
    let mut h = Harness::not_installed();
    h.fetcher.content = Some("tampered");

    let outcome = h.orchestrator().install(&item("apps/tool/tool.msi", "msi")).unwrap();

    assert_eq!(outcome, Outcome::HashMismatch);
    assert_eq!(h.fetches(), 1);
    assert_eq!(h.verifier.calls.get(), 1);
    assert!(h.runs().is_empty());
    assert!(h.reporter.contains("Hash mismatch: Tool"));
}

#[test]
fn test_uninstall_mismatch_launches_nothing() {
    let mut h = Harness::installed();
    h.fetcher.content = Some("tampered");

    let outcome = h
        .orchestrator()
        .uninstall(&item("apps/tool/tool.msi", "msi"))
        .unwrap();

    assert_eq!(outcome, Outcome::HashMismatch);
    assert!(h.runs().is_empty());
}

#[test]
fn test_retrieval_failure_is_error() {
    let mut h = Harness::not_installed();
    h.fetcher.content = None;

    let result = h.orchestrator().install(&item("apps/tool/tool.msi", "msi"));

    assert!(matches!(result, Err(GantryError::RetrievalFailed { .. })));
    assert!(h.runs().is_empty());
}

// Dispatch

#[test]
fn test_scenario_c_exe_is_unsupported_without_fetch() {
    let h = Harness::not_installed();

    let outcome = h.orchestrator().install(&item("apps/setup.exe", "msi")).unwrap();

    assert_eq!(
        outcome,
        Outcome::Unsupported {
            kind: ".exe".to_string()
        }
    );
    assert_eq!(h.fetches(), 0);
    assert_eq!(h.verifier.calls.get(), 0);
    assert!(h.runs().is_empty());
    assert!(h.reporter.contains("EXE support not added yet: setup.exe"));
}

#[test]
fn test_ps1_is_unsupported() {
    let h = Harness::not_installed();

    let outcome = h.orchestrator().install(&item("scripts/setup.ps1", "")).unwrap();

    assert!(matches!(outcome, Outcome::Unsupported { .. }));
    assert!(h.reporter.contains("Powershell support not added yet: setup.ps1"));
    assert!(h.runs().is_empty());
}

#[test]
fn test_unknown_extension_is_unsupported() {
    let h = Harness::not_installed();

    let outcome = h.orchestrator().install(&item("apps/tool.zip", "")).unwrap();

    assert_eq!(
        outcome,
        Outcome::Unsupported {
            kind: ".zip".to_string()
        }
    );
    assert!(h.reporter.contains("Installer type unsupported: .zip"));
    assert_eq!(h.fetches(), 0);
}

#[test]
fn test_uppercase_extension_dispatches() {
    let h = Harness::not_installed();
    h.cache_file("apps/TOOL.MSI", "test");

    let outcome = h.orchestrator().install(&item("apps/TOOL.MSI", "msi")).unwrap();

    assert_eq!(outcome, Outcome::Installed);
}

#[test]
fn test_unknown_uninstall_method_is_unsupported() {
    let h = Harness::installed();
    h.cache_file("apps/tool/tool.msi", "test");

    let outcome = h
        .orchestrator()
        .uninstall(&item("apps/tool/tool.msi", "winget"))
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Unsupported {
            kind: "winget".to_string()
        }
    );
    assert_eq!(h.fetches(), 0);
    assert!(h.runs().is_empty());
    assert!(h.reporter.contains("Installer type unsupported: winget"));
}

#[test]
fn test_uninstall_ignores_extension() {
    // A .zip artifact can still be removed via its declared method
    let h = Harness::installed();
    h.cache_file("apps/tool.zip", "test");

    let outcome = h.orchestrator().uninstall(&item("apps/tool.zip", "msi")).unwrap();

    assert_eq!(outcome, Outcome::Removed);
}

#[test]
fn test_empty_location_fails_fast() {
    let h = Harness::not_installed();

    let result = h.orchestrator().install(&item("", "msi"));

    assert!(matches!(
        result,
        Err(GantryError::InvalidInstallerLocation { .. })
    ));
    assert_eq!(h.fetches(), 0);
    assert!(h.runs().is_empty());
}

#[test]
fn test_installer_failure_is_error() {
    let mut h = Harness::not_installed();
    h.runner.fail = true;
    h.cache_file("apps/tool/tool.msi", "test");

    let result = h.orchestrator().install(&item("apps/tool/tool.msi", "msi"));

    assert!(matches!(result, Err(GantryError::CommandFailed { .. })));
}

// Batch

const CATALOG: &str = r#"
tool:
  display_name: Tool
  version: "1.0"
  installer_item_location: apps/tool/tool.msi
  installer_item_hash: 9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08
  uninstall_method: msi
setup:
  display_name: Setup
  installer_item_location: apps/setup.exe
  installer_item_hash: 9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08
"#;

#[test]
fn test_batch_continues_past_skips_and_missing() {
    let h = Harness::not_installed();
    h.cache_file("apps/tool/tool.msi", "test");
    let catalog = Catalog::from_yaml(CATALOG).unwrap();
    let requests = vec![
        Request::install("setup"),
        Request::install("ghost"),
        Request::install("tool"),
    ];

    let report = batch::apply(
        &h.orchestrator(),
        &catalog,
        &requests,
        FailurePolicy::FailFast,
        None,
    )
    .unwrap();

    assert_eq!(report.installed, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.missing, vec!["ghost".to_string()]);
    assert!(h.reporter.contains("Item not found in catalog: ghost"));
    assert!(h.reporter.contains("1 installed"));
}

#[test]
fn test_batch_fail_fast_stops_at_first_error() {
    let mut h = Harness::not_installed();
    h.runner.fail = true;
    h.cache_file("apps/tool/tool.msi", "test");
    let catalog = Catalog::from_yaml(CATALOG).unwrap();
    let requests = vec![Request::install("tool"), Request::install("setup")];

    let result = batch::apply(
        &h.orchestrator(),
        &catalog,
        &requests,
        FailurePolicy::FailFast,
        None,
    );

    assert!(matches!(result, Err(GantryError::CommandFailed { .. })));
    assert!(!h.reporter.contains("EXE support not added yet"));
}

#[test]
fn test_batch_continue_collects_failures() {
    let mut h = Harness::not_installed();
    h.runner.fail = true;
    h.cache_file("apps/tool/tool.msi", "test");
    let catalog = Catalog::from_yaml(CATALOG).unwrap();
    let requests = vec![Request::install("tool"), Request::install("setup")];

    let report = batch::apply(
        &h.orchestrator(),
        &catalog,
        &requests,
        FailurePolicy::Continue,
        None,
    )
    .unwrap();

    assert_eq!(report.failed, vec!["tool".to_string()]);
    assert_eq!(report.skipped, 1);
    assert!(h.reporter.contains("EXE support not added yet"));
}

#[test]
fn test_batch_updates_receipts() {
    let h = Harness::not_installed();
    h.cache_file("apps/tool/tool.msi", "test");
    let catalog = Catalog::from_yaml(CATALOG).unwrap();
    let store = ReceiptStore::new(h.cache_root().join("receipts.json"));

    batch::apply(
        &h.orchestrator(),
        &catalog,
        &[Request::install("tool")],
        FailurePolicy::FailFast,
        Some(&store),
    )
    .unwrap();

    let tool = catalog.get("tool").unwrap();
    assert!(store.check_status(tool).unwrap().is_current());
}

#[test]
fn test_requests_from_manifest_installs_first() {
    let manifest = crate::catalog::Manifest {
        managed_installs: vec!["a".to_string()],
        managed_uninstalls: vec!["b".to_string()],
    };

    assert_eq!(
        Request::from_manifest(&manifest),
        vec![Request::install("a"), Request::uninstall("b")]
    );
}
