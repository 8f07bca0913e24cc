use std::collections::HashMap;

use tracing::debug;

use super::catalog::FieldCatalog;
use super::key_locate::locate_key;
use super::reading_order::{join_reading_order, sort_reading_order};
use super::row_bounds::{compute_row_bounds, sort_rows_top_down};
use super::row_values::collect_row_values;
use super::types::{ParserSettings, RowDescriptor, TextFragment, ZoneExtraction};

pub fn parse_positional(
    fragments: &[TextFragment],
    catalog: &FieldCatalog,
    settings: &ParserSettings,
) -> ZoneExtraction {
    if fragments.is_empty() {
        return ZoneExtraction::empty();
    }

    let mut rows = catalog
        .keys()
        .iter()
        .filter_map(|key| {
            locate_key(fragments, key).map(|location| RowDescriptor::new(key.as_str(), location))
        })
        .collect::<Vec<RowDescriptor<'_>>>();

    if rows.is_empty() {
        debug!(
            fragment_count = fragments.len(),
            "no catalog keys located; returning concatenated zone text"
        );
        return ZoneExtraction::Unstructured(concatenate_fragments(fragments));
    }

    sort_rows_top_down(&mut rows);
    compute_row_bounds(&mut rows, settings.row_tolerance);

    // A fragment sitting exactly on a shared boundary goes to the upper row.
    let mut claimed = vec![false; fragments.len()];
    let mut values_by_key = HashMap::<&str, String>::new();

    for row in &rows {
        let mut values = collect_row_values(fragments, row, settings);
        values.retain(|value| !claimed[value.fragment_index]);
        for value in &values {
            claimed[value.fragment_index] = true;
        }

        sort_reading_order(&mut values, settings.same_line_tolerance);
        values_by_key.insert(row.key, join_reading_order(&values));
    }

    let fields = catalog.assemble(&values_by_key);
    debug!(
        keys_located = rows.len(),
        fields = fields.len(),
        "positional parse complete"
    );

    ZoneExtraction::Fields(fields)
}

pub fn concatenate_fragments(fragments: &[TextFragment]) -> String {
    fragments
        .iter()
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<&str>>()
        .join(" ")
}
