//! Customer-name extraction from label text
//!
//! Best effort: the name is the line right after a known label, trimmed
//! of the address that usually follows it on the same line.

use crate::options::NameOptions;
use crate::source::SourceDocument;
use log::{debug, warn};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static ADDRESS_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,-]").expect("valid separator pattern"));
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid digit pattern"));

/// One name per source page, in page order; "" where none was found.
pub fn extract_names(source: &SourceDocument, options: &NameOptions) -> Vec<String> {
    (0..source.page_count())
        .map(|page| match source.page_text(page) {
            Ok(text) => extract_name_from_text(&text, &options.label),
            Err(e) => {
                warn!("No text extracted from page {}: {}", page + 1, e);
                String::new()
            }
        })
        .collect()
}

/// Every labelled name in the document, page by page; a page may hold
/// several labels.
pub fn extract_all_names(source: &SourceDocument, options: &NameOptions) -> Vec<String> {
    let mut names = Vec::new();
    for page in 0..source.page_count() {
        match source.page_text(page) {
            Ok(text) => names.extend(extract_names_from_text(&text, &options.label)),
            Err(e) => warn!("No text extracted from page {}: {}", page + 1, e),
        }
    }
    names
}

/// De-duplicated, sorted, non-empty names
pub fn unique_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .filter(|name| !name.is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The cleaned line following the first line that contains `label`
/// (case-insensitive). Later labels are tried if the first yields nothing.
pub fn extract_name_from_text(text: &str, label: &str) -> String {
    labelled_names(text, label).next().unwrap_or_default()
}

/// The cleaned name after every occurrence of `label`, in text order
pub fn extract_names_from_text(text: &str, label: &str) -> Vec<String> {
    labelled_names(text, label).collect()
}

fn labelled_names<'a>(text: &'a str, label: &str) -> impl Iterator<Item = String> + 'a {
    let label = label.to_uppercase();
    let lines: Vec<&str> = text.lines().collect();

    (0..lines.len()).filter_map(move |i| {
        if !lines[i].to_uppercase().contains(&label) {
            return None;
        }
        let name = clean_customer_name(lines.get(i + 1)?);
        if name.is_empty() {
            return None;
        }
        debug!("Found name '{}' after label on line {}", name, i + 1);
        Some(name)
    })
}

/// Reduce a raw line to a name: cut at the first comma or hyphen, drop
/// digits, keep at most the first two words.
pub fn clean_customer_name(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() || raw.chars().all(|c| c.is_ascii_digit()) {
        return String::new();
    }

    let head = ADDRESS_SEPARATOR.split(raw).next().unwrap_or_default();
    let without_digits = DIGITS.replace_all(head, "");

    without_digits
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}
