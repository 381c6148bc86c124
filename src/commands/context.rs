//! Shared setup for the item commands
//!
//! Loads the agent configuration and catalog once, then wires the production
//! collaborators (receipts, HTTP fetcher, system runner, console) into an
//! orchestrator for each batch.

use std::path::PathBuf;

use crate::cache;
use crate::catalog::Catalog;
use crate::config::{self, AgentConfig, FailurePolicy};
use crate::error::{GantryError, Result};
use crate::fetch::HttpFetcher;
use crate::installer::ToolPaths;
use crate::operations::Orchestrator;
use crate::operations::batch::{self, BatchReport, Request};
use crate::output::ConsoleReporter;
use crate::process::SystemRunner;
use crate::status::ReceiptStore;
use crate::verify::DigestVerifier;

/// Global command line options shared by every item command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub verbose: bool,
    pub keep_going: bool,
}

/// Loaded agent state for one command invocation
pub struct AgentContext {
    pub config: AgentConfig,
    pub catalog: Catalog,
    pub cache_root: PathBuf,
    pub tools: ToolPaths,
    pub receipts: ReceiptStore,
    pub verbose: bool,
    pub policy: FailurePolicy,
}

impl AgentContext {
    /// Load config and catalog; command line flags win over the config file
    pub fn load(options: &GlobalOptions) -> Result<Self> {
        let config_file = config::config_path(options.config.clone())?;
        let config = AgentConfig::load(&config_file)?;
        if config.verbose {
            raise_log_level();
        }

        let catalog = Catalog::load(&config.catalog)?;
        if catalog.is_empty() {
            log::warn!("Catalog {} has no items", config.catalog.display());
        } else {
            log::debug!("Catalog has {} items", catalog.len());
        }

        let cache_root =
            cache::resolve_cache_root(options.cache_dir.clone(), config.cache_path.as_deref())?;
        log::debug!("Using cache {}", cache_root.display());

        let policy = if options.keep_going {
            FailurePolicy::Continue
        } else {
            config.failure_policy
        };

        let receipts = ReceiptStore::new(config.receipts_file()?);
        log::debug!("Using receipts {}", receipts.path().display());

        Ok(Self {
            tools: ToolPaths::from_env(&config.tools),
            receipts,
            verbose: options.verbose || config.verbose,
            catalog,
            cache_root,
            policy,
            config,
        })
    }

    /// Run `requests` through an orchestrator backed by the real system
    ///
    /// Items that failed under [`FailurePolicy::Continue`] turn the whole run into
    /// [`GantryError::ItemsFailed`] once the batch is done.
    pub fn apply(&self, requests: &[Request]) -> Result<BatchReport> {
        let reporter = ConsoleReporter;
        let fetcher = HttpFetcher::new()?;
        let runner = SystemRunner::new(&reporter);

        let orchestrator = Orchestrator {
            cache_root: &self.cache_root,
            repo_url: &self.config.url,
            verbose: self.verbose,
            tools: &self.tools,
            status: &self.receipts,
            verifier: &DigestVerifier,
            fetcher: &fetcher,
            runner: &runner,
            reporter: &reporter,
        };

        let report = batch::apply(
            &orchestrator,
            &self.catalog,
            requests,
            self.policy,
            Some(&self.receipts),
        )?;

        if !report.failed.is_empty() {
            return Err(GantryError::ItemsFailed {
                failed: report.failed.len(),
            });
        }
        Ok(report)
    }
}

/// Let debug diagnostics through; the logger's own filter still applies
fn raise_log_level() {
    if log::max_level() < log::LevelFilter::Debug {
        log::set_max_level(log::LevelFilter::Debug);
    }
}
