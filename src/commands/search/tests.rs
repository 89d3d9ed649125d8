use super::*;
use crate::constants::urls::REGISTRY_INDEX_URL;
use crate::error::CpmError;
use crate::ui::MemoryReporter;

fn entry(name: &str, description: &str) -> PackageEntry {
    PackageEntry {
        name: name.to_string(),
        description: description.to_string(),
        category: "Utilities".to_string(),
    }
}

struct FakeIndex(&'static str);

impl RemoteSource for FakeIndex {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        assert_eq!(url, REGISTRY_INDEX_URL);
        Ok(self.0.as_bytes().to_vec())
    }
}

struct DownIndex;

impl RemoteSource for DownIndex {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        Err(CpmError::RemoteFetch {
            status: 503,
            url: url.to_string(),
        })
    }
}

const INDEX_HTML: &str = r#"
    <h2>Networking</h2>
    <ul>
      <li><a href="https://github.com/clibs/http-get">clibs/http-get</a> - simple HTTP client</li>
      <li><a href="https://github.com/clibs/wire">clibs/wire</a> - raw socket helpers</li>
    </ul>
"#;

#[test]
fn all_words_must_match() {
    let e = entry("clibs/http-get", "simple HTTP client");
    assert!(matches_query(&e, "http client"));
    assert!(!matches_query(&e, "http server"));
}

#[test]
fn matching_is_case_insensitive() {
    let e = entry("clibs/http-get", "Simple HTTP Client");
    assert!(matches_query(&e, "hTTp CLIENT"));
}

#[test]
fn words_match_name_or_description() {
    let e = entry("clibs/ms", "millisecond parsing");
    assert!(matches_query(&e, "ms"));
    assert!(matches_query(&e, "millisecond"));
    assert!(matches_query(&e, "ms parsing"));
}

#[test]
fn run_filters_the_fetched_index() {
    let reporter = MemoryReporter::new();
    let results = run(
        &FakeIndex(INDEX_HTML),
        &reporter,
        &SearchOptions {
            query: "http client".to_string(),
        },
    )
    .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "clibs/http-get");
    assert!(reporter.contains("clibs/http-get"));
}

#[test]
fn zero_matches_is_ok_not_an_error() {
    let reporter = MemoryReporter::new();
    let results = run(
        &FakeIndex(INDEX_HTML),
        &reporter,
        &SearchOptions {
            query: "async".to_string(),
        },
    )
    .unwrap();

    assert!(results.is_empty());
    assert!(reporter.contains("No packages found"));
}

#[test]
fn index_failure_surfaces_as_error_value() {
    let reporter = MemoryReporter::new();
    let err = run(
        &DownIndex,
        &reporter,
        &SearchOptions {
            query: "http".to_string(),
        },
    )
    .unwrap_err();

    assert!(matches!(err, CpmError::RemoteFetch { status: 503, .. }));
}
