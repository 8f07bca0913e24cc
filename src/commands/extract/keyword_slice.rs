use std::collections::HashMap;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use super::catalog::FieldCatalog;
use super::types::ZoneExtraction;

pub struct OcrTextCleaner {
    spaced_letters: Regex,
    whitespace_runs: Regex,
}

impl OcrTextCleaner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // "P R O P E R T Y" style headers: six or more spaced single letters.
            spaced_letters: Regex::new(r"(?:\b[A-Za-z]\s){6,}[A-Za-z]?\b")
                .context("failed to compile spaced-letter regex")?,
            whitespace_runs: Regex::new(r"\s{2,}")
                .context("failed to compile whitespace regex")?,
        })
    }

    pub fn clean(&self, text: &str) -> String {
        let without_headers = self.spaced_letters.replace_all(text, "");
        self.whitespace_runs
            .replace_all(&without_headers, " ")
            .trim()
            .to_string()
    }
}

pub fn parse_keyword_slices(
    text: &str,
    catalog: &FieldCatalog,
    cleaner: &OcrTextCleaner,
) -> ZoneExtraction {
    let cleaned = cleaner.clean(text);
    if cleaned.is_empty() {
        return ZoneExtraction::empty();
    }

    let mut found = catalog
        .keys()
        .iter()
        .filter_map(|key| cleaned.find(key.as_str()).map(|offset| (offset, key.as_str())))
        .collect::<Vec<(usize, &str)>>();

    if found.is_empty() {
        debug!(
            chars = cleaned.chars().count(),
            "no catalog keys in text; returning cleaned text"
        );
        return ZoneExtraction::Unstructured(cleaned);
    }

    found.sort_by_key(|(offset, _)| *offset);

    let mut values_by_key = HashMap::<&str, String>::new();
    for (index, &(offset, key)) in found.iter().enumerate() {
        let end = found
            .get(index + 1)
            .map_or(cleaned.len(), |(next_offset, _)| *next_offset);
        let span = cleaned.get(offset..end).unwrap_or_default();
        values_by_key.insert(key, collapse_whitespace(&strip_key_token(span, key)));
    }

    let fields = catalog.assemble(&values_by_key);
    debug!(
        keys_found = found.len(),
        fields = fields.len(),
        "keyword slice parse complete"
    );

    ZoneExtraction::Fields(fields)
}

fn strip_key_token(span: &str, key: &str) -> String {
    let without_key = span.replacen(key, "", 1);
    let trimmed = without_key.trim();
    trimmed
        .strip_prefix([':', '：'])
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}
