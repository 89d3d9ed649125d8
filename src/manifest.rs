//! Package manifest (`package.json`)
//!
//! Fetched fresh per install, parsed with serde, never persisted. A manifest
//! declares either a list of raw source files (`src`), a buildable release
//! (`repo` + `version` + `install`/`gyp`), or both.

use crate::constants::urls;
use crate::error::{CpmError, Result};
use crate::remote::RemoteSource;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,

    /// `owner/repo`, present for executable packages only.
    #[serde(default)]
    pub repo: Option<String>,

    /// Tag or branch reference of the release tarball.
    #[serde(default)]
    pub version: Option<String>,

    /// Literal build/install command, argv-split before execution.
    #[serde(default)]
    pub install: Option<String>,

    /// Native-build marker. Any truthy JSON value selects the gyp pipeline.
    #[serde(default)]
    pub gyp: Option<Value>,

    /// Relative paths of raw source files to copy.
    #[serde(default)]
    pub src: Option<Vec<String>>,
}

impl Manifest {
    /// Fetch and parse the manifest for `name` (`owner/repo`).
    pub fn fetch(remote: &dyn RemoteSource, name: &str) -> Result<Self> {
        let url = urls::manifest_url(name);
        let body = remote.fetch(&url)?;
        serde_json::from_slice(&body).map_err(|source| CpmError::ManifestParse { url, source })
    }

    pub fn has_sources(&self) -> bool {
        self.src.as_ref().is_some_and(|files| !files.is_empty())
    }

    /// True when the manifest declares a buildable release.
    pub fn has_executable(&self) -> bool {
        self.install.is_some() || self.is_gyp()
    }

    /// `gyp` counts when present and not an explicit JSON "off" value.
    pub fn is_gyp(&self) -> bool {
        match &self.gyp {
            None => false,
            Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// Resolve the fields the executable pipeline depends on.
    pub fn executable_fields(&self) -> Result<(&str, &str)> {
        let repo = self
            .repo
            .as_deref()
            .ok_or(CpmError::MissingField("repo"))?;
        let version = self
            .version
            .as_deref()
            .ok_or(CpmError::MissingField("version"))?;
        Ok((repo, version))
    }

    /// Name used for the unpacked build directory. Falls back to the tail of
    /// `repo` for manifests that omit `name`.
    pub fn build_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or_else(|| self.repo.as_deref().and_then(|r| r.rsplit('/').next()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Manifest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_source_manifest() {
        let m = parse(r#"{"name": "bar", "src": ["lib/a.js", "lib/b.js"]}"#);
        assert!(m.has_sources());
        assert!(!m.has_executable());
        assert_eq!(m.src.as_deref().unwrap().len(), 2);
    }

    #[test]
    fn parses_executable_manifest() {
        let m = parse(r#"{"name": "bar", "repo": "foo/bar", "version": "v1.0.0", "install": "make install"}"#);
        assert!(m.has_executable());
        assert!(!m.has_sources());
        let (repo, version) = m.executable_fields().unwrap();
        assert_eq!(repo, "foo/bar");
        assert_eq!(version, "v1.0.0");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let m = parse(r#"{"name": "bar", "description": "x", "keywords": ["a"], "src": ["a.c"]}"#);
        assert!(m.has_sources());
    }

    #[test]
    fn empty_src_is_not_sources() {
        let m = parse(r#"{"src": []}"#);
        assert!(!m.has_sources());
    }

    #[test]
    fn gyp_truthiness() {
        assert!(parse(r#"{"gyp": true}"#).is_gyp());
        assert!(parse(r#"{"gyp": "binding.gyp"}"#).is_gyp());
        assert!(!parse(r#"{"gyp": false}"#).is_gyp());
        assert!(!parse(r#"{"gyp": null}"#).is_gyp());
        assert!(!parse(r#"{}"#).is_gyp());
    }

    #[test]
    fn executable_fields_require_repo_and_version() {
        let m = parse(r#"{"install": "make install"}"#);
        assert!(matches!(
            m.executable_fields(),
            Err(CpmError::MissingField("repo"))
        ));

        let m = parse(r#"{"repo": "foo/bar", "install": "make install"}"#);
        assert!(matches!(
            m.executable_fields(),
            Err(CpmError::MissingField("version"))
        ));
    }

    #[test]
    fn build_name_falls_back_to_repo_tail() {
        let m = parse(r#"{"repo": "foo/bar", "version": "v1", "install": "make"}"#);
        assert_eq!(m.build_name(), Some("bar"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        struct Fake;
        impl RemoteSource for Fake {
            fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
                Ok(b"{not json".to_vec())
            }
        }
        let err = Manifest::fetch(&Fake, "foo/bar").unwrap_err();
        assert!(matches!(err, CpmError::ManifestParse { .. }));
    }
}
