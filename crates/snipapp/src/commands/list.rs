use crate::commands::{CmdResult, ListedSnippet};
use crate::error::Result;
use crate::model::Snippet;
use crate::store::DataStore;
use chrono::Utc;
use std::cmp::Ordering;

/// Lists snippets sorted ascending by value.
///
/// The order is by the snippet text, not by id or age. Values that read as numbers
/// come first, in numeric order, followed by everything else in text order. The
/// sort is stable, so equal values stay in id order.
///
/// `owner_filter` keeps only snippets owned by that user. An empty filter is no filter.
pub fn run<S: DataStore>(store: &S, owner_filter: Option<&str>) -> Result<CmdResult> {
    let mut snippets = store.list_snippets()?;
    snippets.sort_by(compare_values);

    let now = Utc::now();
    let listed = snippets
        .into_iter()
        .filter(|s| match owner_filter {
            Some(owner) if !owner.is_empty() => s.owner == owner,
            _ => true,
        })
        .map(|s| ListedSnippet::from_snippet(s, now))
        .collect();

    Ok(CmdResult::default().with_listed_snippets(listed))
}

fn compare_values(a: &Snippet, b: &Snippet) -> Ordering {
    match (as_number(&a.value), as_number(&b.value)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.value.cmp(&b.value),
    }
}

fn as_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}
