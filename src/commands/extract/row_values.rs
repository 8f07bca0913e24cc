use super::key_locate::{first_word, strip_whitespace};
use super::types::{ExtractedValue, ParserSettings, RowDescriptor, TextFragment};

/// Fragments inside the row band and right of the rendered key. The key
/// fragment and echoes of its first word on the key's own line are skipped.
pub fn collect_row_values<'a>(
    fragments: &'a [TextFragment],
    row: &RowDescriptor<'_>,
    settings: &ParserSettings,
) -> Vec<ExtractedValue<'a>> {
    let key_first_word = first_word(row.key);
    let value_start_x = row.location.x
        + approximate_key_width(row.key, settings.key_char_width)
        + settings.min_value_offset;

    fragments
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != row.location.fragment_index)
        .filter_map(|(fragment_index, fragment)| {
            let anchor = fragment.finite_anchor()?;
            let text = fragment.text.trim();
            if text.is_empty() {
                return None;
            }

            let on_key_line = (anchor.y - row.y()).abs() <= settings.key_echo_tolerance;
            if on_key_line && !key_first_word.is_empty() && text.contains(key_first_word) {
                return None;
            }

            if !row.contains_y(anchor.y) || anchor.x <= value_start_x {
                return None;
            }

            Some(ExtractedValue {
                fragment_index,
                text,
                x: anchor.x,
                y: anchor.y,
            })
        })
        .collect()
}

// Glyph widths are not measured; labels are short and the offset guard
// absorbs the error.
pub fn approximate_key_width(key: &str, char_width: f64) -> f64 {
    strip_whitespace(key).chars().count() as f64 * char_width
}
