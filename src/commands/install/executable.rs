//! Executable mode: download a release tarball, unpack it, run the build.
//!
//! Stages are strictly sequential; a failed stage skips its dependents and
//! nothing already unpacked is rolled back.

use super::FailurePolicy;
use crate::constants::urls;
use crate::error::{CpmError, Result};
use crate::manifest::Manifest;
use crate::remote::RemoteSource;
use crate::system::{self, CommandRunner, Invocation};
use crate::ui::{Level, Reporter};
use crate::utils::bytes::format_bytes;
use crate::utils::tmp::TempWorkspace;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Fetching,
    Downloaded,
    Unpacking,
    Unpacked,
    Building,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Fetching => "fetching",
            Stage::Downloaded => "downloaded",
            Stage::Unpacking => "unpacking",
            Stage::Unpacked => "unpacked",
            Stage::Building => "building",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Run the tarball pipeline. Returns whether the build completed; under
/// `FailurePolicy::Continue` a failed stage is logged and `false` returned
/// instead of an error.
pub(super) fn run(
    remote: &dyn RemoteSource,
    runner: &dyn CommandRunner,
    reporter: &dyn Reporter,
    manifest: &Manifest,
    policy: FailurePolicy,
) -> Result<bool> {
    // A broken manifest is a hard error regardless of policy.
    let (repo, version) = manifest.executable_fields()?;
    let name = manifest.build_name().ok_or(CpmError::MissingField("name"))?;

    let workspace = TempWorkspace::create(&repo.replace('/', "-"))?;

    match pipeline(
        remote,
        runner,
        reporter,
        manifest,
        repo,
        version,
        name,
        workspace.path(),
    ) {
        Ok(()) => {
            reporter.emit(Level::Success, &format!("built {} {}", name, version));
            Ok(true)
        }
        Err((stage, err)) => {
            reporter.emit(Level::Debug, &format!("stage {} -> {}", stage, Stage::Failed));
            reporter.emit(
                Level::Error,
                &format!("{} failed while {}: {}", repo, stage, err),
            );
            match policy {
                FailurePolicy::Abort => Err(err),
                FailurePolicy::Continue => Ok(false),
            }
        }
    }
}

fn advance(reporter: &dyn Reporter, stage: Stage) -> Stage {
    reporter.emit(Level::Debug, &format!("stage {}", stage));
    stage
}

#[allow(clippy::too_many_arguments)]
fn pipeline(
    remote: &dyn RemoteSource,
    runner: &dyn CommandRunner,
    reporter: &dyn Reporter,
    manifest: &Manifest,
    repo: &str,
    version: &str,
    name: &str,
    workspace: &Path,
) -> std::result::Result<(), (Stage, CpmError)> {
    let mut stage = advance(reporter, Stage::Fetching);

    let url = urls::tarball_url(repo, version);
    reporter.emit(Level::Info, &format!("fetch {}", url));
    let body = remote.fetch(&url).map_err(|e| (stage, e))?;

    let archive = workspace.join(urls::archive_file_name(repo));
    fs::write(&archive, &body).map_err(|source| {
        (
            stage,
            CpmError::FilesystemWrite {
                path: archive.clone(),
                source,
            },
        )
    })?;
    advance(reporter, Stage::Downloaded);
    reporter.emit(
        Level::Debug,
        &format!("{} ({})", archive.display(), format_bytes(body.len() as u64)),
    );

    stage = advance(reporter, Stage::Unpacking);
    reporter.emit(Level::Info, &format!("unpack {}", archive.display()));
    let archive_arg = archive.to_string_lossy().into_owned();
    let workspace_arg = workspace.to_string_lossy().into_owned();
    let unpack = Invocation::new(
        "tar",
        &["-zxf", archive_arg.as_str(), "-C", workspace_arg.as_str()],
    );
    let out = runner.run(&unpack).map_err(|e| (stage, e))?;
    if !out.success {
        return Err((
            stage,
            CpmError::ArchiveExtraction(out.stderr.trim().to_string()),
        ));
    }
    advance(reporter, Stage::Unpacked);

    stage = advance(reporter, Stage::Building);
    let build_dir = workspace.join(urls::build_dir_name(name, version));
    let steps = build_steps(reporter, manifest, &build_dir).map_err(|e| (stage, e))?;
    for step in steps {
        let out = runner.run(&step).map_err(|e| (stage, e))?;
        if !out.success {
            return Err((
                stage,
                CpmError::BuildCommand(format!("{}: {}", step.display(), out.stderr.trim())),
            ));
        }
    }

    advance(reporter, Stage::Done);
    Ok(())
}

/// The manifest's literal `install` command wins; a bare `gyp` manifest gets
/// the synthesized native build: generate with gyp, then make.
fn build_steps(
    reporter: &dyn Reporter,
    manifest: &Manifest,
    build_dir: &Path,
) -> Result<Vec<Invocation>> {
    if let Some(command) = &manifest.install {
        reporter.emit(Level::Info, &format!("exec {}", command));
        return Ok(vec![system::parse_install_command(command, build_dir)?]);
    }

    reporter.emit(Level::Info, "exec gyp --depth=1 && make");
    Ok(vec![
        Invocation::new("gyp", &["--depth=1"]).in_dir(build_dir),
        Invocation::new("make", &[]).in_dir(build_dir),
    ])
}
