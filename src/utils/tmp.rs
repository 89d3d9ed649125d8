use crate::error::Result;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Scoped scratch directory for tarball downloads and unpacking.
///
/// Lives under the OS temp dir, suffixed with the process id so concurrent
/// runs cannot collide, and is removed on drop.
pub struct TempWorkspace {
    root: PathBuf,
}

impl TempWorkspace {
    pub fn create(label: &str) -> Result<Self> {
        let root = env::temp_dir().join(format!("cpm-{}-{}", label, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }
}

impl Drop for TempWorkspace {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

#[cfg(test)]
mod tests {
    use super::TempWorkspace;

    #[test]
    fn creates_and_removes_on_drop() {
        let path = {
            let ws = TempWorkspace::create("test-scope").unwrap();
            assert!(ws.path().is_dir());
            std::fs::write(ws.path().join("probe"), b"x").unwrap();
            ws.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn create_clears_stale_content() {
        let ws = TempWorkspace::create("test-stale").unwrap();
        let stale = ws.path().join("stale");
        std::fs::write(&stale, b"old").unwrap();
        let root = ws.path().to_path_buf();
        std::mem::forget(ws);

        let ws = TempWorkspace::create("test-stale").unwrap();
        assert_eq!(ws.path(), root);
        assert!(!stale.exists());
    }
}
