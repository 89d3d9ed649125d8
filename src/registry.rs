//! Categorized package index.
//!
//! The index is a rendered wiki page: `<h2>` category headers followed by
//! `<li><a>owner/name</a> - description</li>` items. The page format belongs
//! to the registry; this module only flattens it into [`PackageEntry`]
//! values, fetched fresh per search call and never cached.

use crate::constants::urls::REGISTRY_INDEX_URL;
use crate::error::{CpmError, Result};
use crate::remote::RemoteSource;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub name: String,
    pub description: String,
    pub category: String,
}

/// Fetch the index and flatten all categories into one sequence.
pub fn fetch_index(remote: &dyn RemoteSource) -> Result<Vec<PackageEntry>> {
    let html = remote.fetch_text(REGISTRY_INDEX_URL)?;
    parse_index(&html)
}

pub fn parse_index(html: &str) -> Result<Vec<PackageEntry>> {
    let heading = Regex::new(r"(?is)<h2[^>]*>(.*?)</h2>")
        .map_err(|e| CpmError::Registry(e.to_string()))?;
    let item = Regex::new(r"(?is)<li>\s*<a\s[^>]*>(.*?)</a>\s*(?:[-–—:]\s*)?(.*?)</li>")
        .map_err(|e| CpmError::Registry(e.to_string()))?;

    let mut entries = Vec::new();

    // Each heading owns the slice of HTML up to the next heading.
    let headings: Vec<_> = heading.captures_iter(html).collect();
    for (i, cap) in headings.iter().enumerate() {
        let category = clean_text(&cap[1]);
        let start = cap.get(0).map(|m| m.end()).unwrap_or(0);
        let end = headings
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(html.len());

        for item_cap in item.captures_iter(&html[start..end]) {
            let name = clean_text(&item_cap[1]);
            if name.is_empty() {
                continue;
            }
            entries.push(PackageEntry {
                name,
                description: clean_text(&item_cap[2]),
                category: category.clone(),
            });
        }
    }

    Ok(entries)
}

fn clean_text(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for ch in fragment.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    decode_entities(out.trim())
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <h1>Packages</h1>
        <h2><a id="hashing"></a>Hashing</h2>
        <ul>
          <li><a href="https://github.com/clibs/sha1">clibs/sha1</a> - sha1 digest</li>
          <li><a href="https://github.com/clibs/hash">clibs/hash</a> – C hash table</li>
        </ul>
        <h2>Networking &amp; HTTP</h2>
        <ul>
          <li><a href="https://github.com/clibs/http-get">clibs/http-get</a> - tiny http client</li>
        </ul>
    "#;

    #[test]
    fn flattens_categories_into_entries() {
        let entries = parse_index(FIXTURE).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "clibs/sha1");
        assert_eq!(entries[0].description, "sha1 digest");
        assert_eq!(entries[0].category, "Hashing");
        assert_eq!(entries[1].description, "C hash table");
        assert_eq!(entries[2].category, "Networking & HTTP");
    }

    #[test]
    fn strips_nested_tags_from_headings() {
        let entries = parse_index(FIXTURE).unwrap();
        assert!(entries.iter().all(|e| !e.category.contains('<')));
    }

    #[test]
    fn empty_page_yields_no_entries() {
        assert!(parse_index("<html><body></body></html>").unwrap().is_empty());
    }
}
