//! Installer process execution
//!
//! Quiet runs send the child's stdout to the null device: there is no pipe to
//! fill and nothing to wait on once the installer itself exits, even if it leaves
//! a background process behind. Verbose runs pipe stdout through a scoped reader
//! thread that is joined before the exit status is reported.

use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};

use crate::error::{Result, process};
use crate::installer::CommandInvocation;
use crate::output::Reporter;

/// Runs installer commands to completion
pub trait CommandRunner {
    /// Run `invocation`; with `verbose`, installer stdout is echoed line by line
    fn run(&self, invocation: &CommandInvocation, verbose: bool) -> Result<()>;
}

/// Runs commands as child processes of the agent
pub struct SystemRunner<'a> {
    reporter: &'a dyn Reporter,
}

impl<'a> SystemRunner<'a> {
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        Self { reporter }
    }
}

impl CommandRunner for SystemRunner<'_> {
    fn run(&self, invocation: &CommandInvocation, verbose: bool) -> Result<()> {
        let command = invocation.program.display().to_string();
        if verbose {
            self.reporter.info(&format!("command: {invocation}"));
        }

        let stdout = if verbose {
            Stdio::piped()
        } else {
            Stdio::null()
        };
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .spawn()
            .map_err(|e| {
                self.reporter.error(&format!("command: {invocation}"));
                process::launch_failed(&command, &invocation.args, e.to_string())
            })?;
        log::debug!("Started {} (pid {})", command, child.id());

        let status = match child.stdout.take() {
            Some(stdout) => {
                let echo = self.reporter;
                std::thread::scope(|scope| {
                    scope.spawn(move || drain_output(stdout, echo));
                    child.wait()
                })
            }
            None => child.wait(),
        };

        let status = status.map_err(|e| {
            self.reporter.error(&format!("command: {invocation}"));
            process::command_failed(&command, &invocation.args, e.to_string())
        })?;

        if !status.success() {
            self.reporter.error(&format!("command: {invocation}"));
            return Err(process::command_failed(
                &command,
                &invocation.args,
                status.to_string(),
            ));
        }

        log::debug!("{} finished: {}", command, status);
        Ok(())
    }
}

/// Read `output` to EOF, forwarding each line to `echo`
///
/// Installer output is not guaranteed to be UTF-8; lines are decoded lossily.
fn drain_output(output: impl Read, echo: &dyn Reporter) {
    let mut reader = BufReader::new(output);
    let mut line = Vec::new();

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&line);
                echo.installer_output(text.trim_end_matches(['\r', '\n']));
            }
            Err(e) => {
                log::debug!("Stopped reading installer output: {e}");
                break;
            }
        }
    }
}
