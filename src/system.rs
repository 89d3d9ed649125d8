//! Structured command execution.
//!
//! Unpack and build stages go through [`CommandRunner`]: program plus argv,
//! never a shell-concatenated string, so the pipeline tests can record
//! invocations instead of spawning anything.

use crate::error::{CpmError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// One finished invocation.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// A command to run: program, arguments, optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: None,
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

pub trait CommandRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> Result<ExecOutput>;
}

/// Real process execution with a timeout guard.
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ExecOutput> {
        let display = invocation.display();

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &invocation.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| CpmError::CommandFailed {
            command: display.clone(),
            reason: e.to_string(),
        })?;

        let stdout = child.stdout.take().ok_or_else(|| CpmError::CommandFailed {
            command: display.clone(),
            reason: "Failed to capture stdout".to_string(),
        })?;
        let stderr = child.stderr.take().ok_or_else(|| CpmError::CommandFailed {
            command: display.clone(),
            reason: "Failed to capture stderr".to_string(),
        })?;

        let stdout_thread = thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = std::io::BufReader::new(stdout).read_to_end(&mut buf);
            buf
        });
        let stderr_thread = thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = std::io::BufReader::new(stderr).read_to_end(&mut buf);
            buf
        });

        let start = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if start.elapsed() > self.timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        let _ = stdout_thread.join();
                        let _ = stderr_thread.join();
                        return Err(CpmError::CommandFailed {
                            command: display,
                            reason: format!(
                                "Command timed out after {} seconds",
                                self.timeout.as_secs()
                            ),
                        });
                    }
                    thread::sleep(Duration::from_millis(50));
                }
                Err(e) => {
                    return Err(CpmError::CommandFailed {
                        command: display,
                        reason: e.to_string(),
                    });
                }
            }
        };

        let stdout = stdout_thread.join().unwrap_or_default();
        let stderr = stderr_thread.join().unwrap_or_default();

        Ok(ExecOutput {
            success: status.success(),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    }
}

/// Split a manifest-declared install command into an [`Invocation`].
pub fn parse_install_command(command: &str, cwd: &Path) -> Result<Invocation> {
    let words = shlex::split(command)
        .ok_or_else(|| CpmError::BuildCommand(format!("Unparseable command: {}", command)))?;
    let (program, args) = words
        .split_first()
        .ok_or_else(|| CpmError::BuildCommand("Empty install command".to_string()))?;
    Ok(Invocation {
        program: program.clone(),
        args: args.to_vec(),
        cwd: Some(cwd.to_path_buf()),
    })
}
