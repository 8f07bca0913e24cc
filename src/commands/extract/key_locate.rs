use tracing::debug;

use super::types::{KeyLocation, TextFragment};

type KeyMatcher = fn(&str, &str) -> bool;

// Tried in order; the first strategy with any hit wins.
const KEY_MATCHERS: [(&str, KeyMatcher); 3] = [
    ("exact", matches_exact),
    ("space_normalized", matches_space_normalized),
    ("first_keyword", matches_first_keyword),
];

pub fn locate_key(fragments: &[TextFragment], key: &str) -> Option<KeyLocation> {
    if key.trim().is_empty() {
        return None;
    }

    KEY_MATCHERS.iter().find_map(|(strategy, matcher)| {
        let location = fragments
            .iter()
            .enumerate()
            .find_map(|(fragment_index, fragment)| {
                let anchor = fragment.finite_anchor()?;
                matcher(&fragment.text, key).then_some(KeyLocation {
                    fragment_index,
                    x: anchor.x,
                    y: anchor.y,
                })
            })?;

        debug!(
            key,
            strategy,
            fragment_index = location.fragment_index,
            x = location.x,
            y = location.y,
            "located key"
        );
        Some(location)
    })
}

pub fn strip_whitespace(text: &str) -> String {
    text.chars()
        .filter(|character| !character.is_whitespace())
        .collect()
}

pub fn first_word(key: &str) -> &str {
    key.split_whitespace().next().unwrap_or_default()
}

fn matches_exact(text: &str, key: &str) -> bool {
    text.contains(key)
}

fn matches_space_normalized(text: &str, key: &str) -> bool {
    let key = strip_whitespace(key);
    !key.is_empty() && strip_whitespace(text).contains(&key)
}

fn matches_first_keyword(text: &str, key: &str) -> bool {
    let mut words = key.split_whitespace();
    let (Some(first), Some(_)) = (words.next(), words.next()) else {
        return false;
    };

    let text = text.trim();
    text == first || text.contains(first)
}
