//! Install command
//!
//! Resolves the package manifest, then dispatches: manifests with `src` copy
//! raw files into the destination directory, manifests with an installable
//! release (`install`/`gyp` plus `repo`+`version`) go through the tarball
//! pipeline. A manifest may declare both.

mod executable;
mod sources;

use crate::error::{CpmError, Result};
use crate::manifest::Manifest;
use crate::remote::RemoteSource;
use crate::system::CommandRunner;
use crate::ui::{self, Level, Reporter};
use std::path::PathBuf;

/// What to do when a file fetch or pipeline stage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// First failure aborts the install with an error.
    Abort,
    /// Failures are logged; unaffected work continues.
    Continue,
}

pub struct InstallOptions {
    /// Package name in `owner/repo` form.
    pub name: String,
    /// Destination directory for fetched source files.
    pub to: PathBuf,
    pub policy: FailurePolicy,
}

#[derive(Debug, Default)]
pub struct InstallReport {
    pub files_written: usize,
    pub files_failed: usize,
    pub built: bool,
}

pub fn run(
    remote: &dyn RemoteSource,
    runner: &dyn CommandRunner,
    reporter: &dyn Reporter,
    options: &InstallOptions,
) -> Result<InstallReport> {
    reporter.emit(Level::Info, &format!("install {}", options.name));

    let manifest = Manifest::fetch(remote, &options.name)?;
    let mut report = InstallReport::default();

    if !manifest.has_sources() && !manifest.has_executable() {
        // No-op manifest: logged loudly, but not a failure.
        reporter.emit(
            Level::Error,
            &format!(
                "manifest for {} declares neither src files nor an installable release",
                options.name
            ),
        );
        return Ok(report);
    }

    if manifest.has_executable() {
        if ui::is_interrupted() {
            return Err(CpmError::Interrupted);
        }
        report.built = executable::run(remote, runner, reporter, &manifest, options.policy)?;
    }

    if let Some(files) = manifest.src.as_ref().filter(|files| !files.is_empty()) {
        if ui::is_interrupted() {
            return Err(CpmError::Interrupted);
        }
        let (written, failed) = sources::install_sources(
            remote,
            reporter,
            &options.name,
            files,
            &options.to,
            options.policy,
        )?;
        report.files_written = written;
        report.files_failed = failed;
    }

    Ok(report)
}
