use anyhow::{Result, bail};

use super::dispatch::ZoneSource;
use crate::cli::OcrMode;
use crate::model::{ZoneRecord, ZoneSourceProvenance};

pub fn select_zone_source(
    zone: &ZoneRecord,
    ocr_mode: OcrMode,
    ocr_min_text_chars: usize,
) -> Result<(ZoneSource, ZoneSourceProvenance)> {
    let text_char_count = if zone.fragments.is_empty() {
        zone.text.as_deref().map(non_whitespace_char_count).unwrap_or(0)
    } else {
        zone.fragments
            .iter()
            .map(|fragment| non_whitespace_char_count(&fragment.text))
            .sum()
    };
    let ocr_text = zone
        .ocr_text
        .as_deref()
        .filter(|text| non_whitespace_char_count(text) > 0);

    match (ocr_mode, ocr_text) {
        (OcrMode::Force, None) => {
            bail!("zone '{}' has no ocr_text but OCR mode is force", zone.name)
        }
        (OcrMode::Force, Some(text)) => Ok(ocr_source(text, text_char_count, "ocr_force_mode")),
        (OcrMode::Auto, Some(text)) if text_char_count < ocr_min_text_chars => {
            Ok(ocr_source(text, text_char_count, "ocr_auto_low_text"))
        }
        _ => Ok(default_source(zone, text_char_count)),
    }
}

fn ocr_source(
    text: &str,
    text_char_count: usize,
    reason: &str,
) -> (ZoneSource, ZoneSourceProvenance) {
    let ocr_char_count = non_whitespace_char_count(text);
    (
        ZoneSource::PlainText(text.to_string()),
        ZoneSourceProvenance {
            backend: "ocr".to_string(),
            reason: reason.to_string(),
            text_char_count,
            ocr_char_count: Some(ocr_char_count),
        },
    )
}

fn default_source(zone: &ZoneRecord, text_char_count: usize) -> (ZoneSource, ZoneSourceProvenance) {
    let (source, backend, reason) = if !zone.fragments.is_empty() {
        let fragments = zone
            .fragments
            .iter()
            .map(|fragment| fragment.to_fragment())
            .collect();
        let reason = if text_char_count == 0 {
            "text_layer_empty"
        } else {
            "text_layer_default"
        };
        (ZoneSource::Positioned(fragments), "text_layer", reason)
    } else if let Some(text) = &zone.text {
        (ZoneSource::PlainText(text.clone()), "plain_text", "plain_text_default")
    } else {
        (ZoneSource::Empty, "none", "no_content")
    };

    (
        source,
        ZoneSourceProvenance {
            backend: backend.to_string(),
            reason: reason.to_string(),
            text_char_count,
            ocr_char_count: None,
        },
    )
}

pub fn non_whitespace_char_count(text: &str) -> usize {
    text.chars()
        .filter(|character| !character.is_whitespace())
        .count()
}
