//! Installer dispatch
//!
//! Two independent tables: installs dispatch on the artifact's file extension,
//! uninstalls on the catalog item's declared uninstall method. `choco uninstall`
//! takes the artifact path, which is why the method cannot be derived from the
//! extension or vice versa.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ToolOverrides;

/// Fallback for `%ProgramData%`
const DEFAULT_PROGRAM_DATA: &str = r"C:\ProgramData";

/// Fallback for `%WINDIR%`
const DEFAULT_WINDIR: &str = r"C:\Windows";

/// Locations of the platform installer tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// `<ProgramData>/chocolatey/bin/choco.exe`
    pub chocolatey: PathBuf,
    /// `<WINDIR>/system32/msiexec.exe`
    pub msiexec: PathBuf,
}

impl ToolPaths {
    /// Resolve tool paths from `ProgramData` / `WINDIR`, honouring config overrides
    pub fn from_env(overrides: &ToolOverrides) -> Self {
        let chocolatey = overrides.chocolatey.clone().unwrap_or_else(|| {
            env_root("ProgramData", DEFAULT_PROGRAM_DATA)
                .join("chocolatey")
                .join("bin")
                .join("choco.exe")
        });
        let msiexec = overrides.msiexec.clone().unwrap_or_else(|| {
            env_root("WINDIR", DEFAULT_WINDIR)
                .join("system32")
                .join("msiexec.exe")
        });

        Self {
            chocolatey,
            msiexec,
        }
    }
}

fn env_root(var: &str, fallback: &str) -> PathBuf {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from(fallback), PathBuf::from)
}

/// A concrete command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CommandInvocation {
    fn new(program: &Path, args: &[&str]) -> Self {
        Self {
            program: program.to_path_buf(),
            args: args.iter().map(ToString::to_string).collect(),
        }
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.program.display(), self.args)
    }
}

/// Installer types recognised by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerKind {
    /// `.nupkg`, installed with chocolatey
    Chocolatey,
    /// `.msi`, installed with msiexec
    Msi,
    /// `.exe`: no silent-install contract defined yet
    Exe,
    /// `.ps1`: no invocation contract defined yet
    PowerShell,
}

impl InstallerKind {
    /// Map a lowercased extension (with dot) to an installer kind
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            ".nupkg" => Some(Self::Chocolatey),
            ".msi" => Some(Self::Msi),
            ".exe" => Some(Self::Exe),
            ".ps1" => Some(Self::PowerShell),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Chocolatey => "choco",
            Self::Msi => "MSI",
            Self::Exe => "EXE",
            Self::PowerShell => "Powershell",
        }
    }

    /// Install command for `file`, or `None` for kinds without support
    pub fn install_command(self, tools: &ToolPaths, file: &Path) -> Option<CommandInvocation> {
        let file = file.to_string_lossy().into_owned();
        match self {
            Self::Chocolatey => Some(CommandInvocation::new(
                &tools.chocolatey,
                &["install", file.as_str(), "-y", "-r"],
            )),
            Self::Msi => Some(CommandInvocation::new(
                &tools.msiexec,
                &["/I", file.as_str(), "/quiet"],
            )),
            Self::Exe | Self::PowerShell => None,
        }
    }
}

/// Uninstall command families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallMethod {
    Chocolatey,
    Msi,
}

impl UninstallMethod {
    /// Parse a catalog `uninstall_method` value
    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "choco" => Some(Self::Chocolatey),
            "msi" => Some(Self::Msi),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Chocolatey => "choco",
            Self::Msi => "MSI",
        }
    }

    /// Uninstall command against the cached artifact `file`
    pub fn uninstall_command(self, tools: &ToolPaths, file: &Path) -> CommandInvocation {
        let file = file.to_string_lossy().into_owned();
        match self {
            Self::Chocolatey => CommandInvocation::new(
                &tools.chocolatey,
                &["uninstall", file.as_str(), "-y", "-r"],
            ),
            Self::Msi => CommandInvocation::new(&tools.msiexec, &["/X", file.as_str(), "/quiet"]),
        }
    }
}
