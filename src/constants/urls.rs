//! External URLs and URL patterns
//!
//! Centralized builders for:
//! - Manifest and raw source-file content (raw.github.com)
//! - Release tarballs (github.com archive endpoint)
//! - The categorized package index (clib wiki)

use crate::constants::DEFAULT_BRANCH;

/// Raw-content host for manifests and source files.
pub const RAW_CONTENT_BASE: &str = "https://raw.github.com";

/// Archive host for release tarballs.
pub const ARCHIVE_BASE: &str = "https://github.com";

/// Categorized package index queried by `cpm search`.
pub const REGISTRY_INDEX_URL: &str = "https://github.com/clibs/clib/wiki/Packages";

/// Manifest location for a package, e.g.
/// `foo/bar` -> `https://raw.github.com/foo/bar/master/package.json`
pub fn manifest_url(name: &str) -> String {
    format!("{}/{}/{}/package.json", RAW_CONTENT_BASE, name, DEFAULT_BRANCH)
}

/// Raw content of one file inside a package repo.
pub fn source_file_url(name: &str, file: &str) -> String {
    format!("{}/{}/{}/{}", RAW_CONTENT_BASE, name, DEFAULT_BRANCH, file)
}

/// Release tarball for a `owner/repo` at a tag or branch ref.
pub fn tarball_url(repo: &str, version: &str) -> String {
    format!("{}/{}/archive/{}.tar.gz", ARCHIVE_BASE, repo, version)
}

/// Local archive file name: slashes flattened so `foo/bar` lands as one file.
pub fn archive_file_name(repo: &str) -> String {
    format!("{}.tar.gz", repo.replace('/', "-"))
}

/// Directory the archive endpoint unpacks into.
pub fn build_dir_name(name: &str, version: &str) -> String {
    format!("{}-{}", name, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_url_substitutes_package_name() {
        assert_eq!(
            manifest_url("foo/bar"),
            "https://raw.github.com/foo/bar/master/package.json"
        );
    }

    #[test]
    fn source_file_url_keeps_relative_path() {
        assert_eq!(
            source_file_url("foo/bar", "lib/a.c"),
            "https://raw.github.com/foo/bar/master/lib/a.c"
        );
    }

    #[test]
    fn tarball_url_uses_archive_endpoint() {
        assert_eq!(
            tarball_url("foo/bar", "v1.0.0"),
            "https://github.com/foo/bar/archive/v1.0.0.tar.gz"
        );
    }

    #[test]
    fn archive_file_name_flattens_slashes() {
        assert_eq!(archive_file_name("foo/bar"), "foo-bar.tar.gz");
    }

    #[test]
    fn build_dir_joins_name_and_version() {
        assert_eq!(build_dir_name("bar", "v1.0.0"), "bar-v1.0.0");
    }
}
