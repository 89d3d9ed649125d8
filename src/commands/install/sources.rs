//! Source-file mode: copy each declared file into the destination directory.
//!
//! Files are fetched and written concurrently; completion order is not
//! specified and log lines from sibling files may interleave.

use super::FailurePolicy;
use crate::constants::urls;
use crate::error::{CpmError, Result};
use crate::remote::RemoteSource;
use crate::ui::{Level, Reporter};
use crate::utils::bytes::format_bytes;
use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

/// Fetch every file in `files` and write it to `{to}/{basename}`.
/// Returns `(written, failed)` counts.
pub(super) fn install_sources(
    remote: &dyn RemoteSource,
    reporter: &dyn Reporter,
    name: &str,
    files: &[String],
    to: &Path,
    policy: FailurePolicy,
) -> Result<(usize, usize)> {
    fs::create_dir_all(to).map_err(|source| CpmError::FilesystemWrite {
        path: to.to_path_buf(),
        source,
    })?;

    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        for file in files {
            let tx = tx.clone();
            scope.spawn(move || {
                let result = fetch_one(remote, reporter, name, file, to);
                let _ = tx.send((file.as_str(), result));
            });
        }
        drop(tx);

        let mut written = 0;
        let mut failed = 0;
        let mut first_err = None;

        for (file, result) in rx {
            match result {
                Ok(_) => written += 1,
                Err(e) => {
                    failed += 1;
                    reporter.emit(Level::Error, &format!("{}: {}", file, e));
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
            }
        }

        match policy {
            FailurePolicy::Abort => {
                if let Some(e) = first_err {
                    return Err(e);
                }
            }
            FailurePolicy::Continue => {
                if failed > 0 {
                    reporter.emit(
                        Level::Warn,
                        &format!("{} of {} source files failed", failed, files.len()),
                    );
                }
            }
        }

        Ok((written, failed))
    })
}

fn fetch_one(
    remote: &dyn RemoteSource,
    reporter: &dyn Reporter,
    name: &str,
    file: &str,
    to: &Path,
) -> Result<u64> {
    let url = urls::source_file_url(name, file);
    reporter.emit(Level::Info, &format!("fetch {}", file));
    reporter.emit(Level::Debug, &url);

    let body = remote.fetch(&url)?;

    let basename = Path::new(file)
        .file_name()
        .ok_or_else(|| CpmError::Other(format!("Invalid source path '{}'", file)))?;
    let dest = to.join(basename);

    fs::write(&dest, &body).map_err(|source| CpmError::FilesystemWrite {
        path: dest.clone(),
        source,
    })?;

    reporter.emit(
        Level::Success,
        &format!("write {} - {}", dest.display(), format_bytes(body.len() as u64)),
    );
    Ok(body.len() as u64)
}
