//! Package search command
//!
//! Fetches the categorized index, flattens it, and filters by query words.
//! Index failures come back as error values; rendering an empty result set
//! is a normal outcome, not an error.

use crate::error::Result;
use crate::registry::{self, PackageEntry};
use crate::remote::RemoteSource;
use crate::ui::{Level, Reporter};

pub struct SearchOptions {
    pub query: String,
}

pub fn run(
    remote: &dyn RemoteSource,
    reporter: &dyn Reporter,
    options: &SearchOptions,
) -> Result<Vec<PackageEntry>> {
    let entries = registry::fetch_index(remote)?;
    let total = entries.len();

    let matches: Vec<PackageEntry> = entries
        .into_iter()
        .filter(|entry| matches_query(entry, &options.query))
        .collect();

    reporter.emit(
        Level::Debug,
        &format!("{} of {} index entries matched", matches.len(), total),
    );
    render(reporter, &matches, &options.query);
    Ok(matches)
}

/// Every whitespace-separated query word must appear (case-insensitively)
/// in the entry's name or description. AND semantics, substring match.
fn matches_query(entry: &PackageEntry, query: &str) -> bool {
    let name = entry.name.to_lowercase();
    let description = entry.description.to_lowercase();

    query.split_whitespace().all(|word| {
        let word = word.to_lowercase();
        name.contains(&word) || description.contains(&word)
    })
}

fn render(reporter: &dyn Reporter, matches: &[PackageEntry], query: &str) {
    if matches.is_empty() {
        reporter.emit(Level::Info, &format!("No packages found for '{}'", query));
        return;
    }

    for entry in matches {
        let line = if entry.description.is_empty() {
            format!("{} ({})", entry.name, entry.category)
        } else {
            format!("{} - {} ({})", entry.name, entry.description, entry.category)
        };
        reporter.emit(Level::Info, &line);
    }
}

#[cfg(test)]
mod tests;
