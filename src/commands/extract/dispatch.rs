use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use super::catalog::FieldCatalog;
use super::keyword_slice::{OcrTextCleaner, parse_keyword_slices};
use super::positional_parse::{concatenate_fragments, parse_positional};
use super::types::{ParserSettings, TextFragment, ZoneExtraction};
use crate::model::ZoneKind;

#[derive(Debug, Clone, PartialEq)]
pub enum ZoneSource {
    Positioned(Vec<TextFragment>),
    PlainText(String),
    Empty,
}

/// Shared, read-only parsing context. Holds compiled patterns only, so one
/// instance can serve any number of zones.
pub struct ZoneDispatcher {
    overview_pattern: Regex,
    cleaner: OcrTextCleaner,
}

impl ZoneDispatcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            overview_pattern: Regex::new(r"(?i)overview|general|정보|개요")
                .context("failed to compile overview zone regex")?,
            cleaner: OcrTextCleaner::new()?,
        })
    }

    /// Legacy classification for zones imported without a kind tag.
    pub fn classify(&self, zone_name: &str) -> ZoneKind {
        if self.overview_pattern.is_match(zone_name) {
            ZoneKind::Overview
        } else {
            ZoneKind::Freeform
        }
    }

    pub fn resolve_kind(&self, zone_name: &str, tag: Option<ZoneKind>) -> ZoneKind {
        tag.unwrap_or_else(|| self.classify(zone_name))
    }

    pub fn dispatch(
        &self,
        kind: ZoneKind,
        source: &ZoneSource,
        catalog: &FieldCatalog,
        settings: &ParserSettings,
    ) -> ZoneExtraction {
        match (kind, source) {
            (_, ZoneSource::Empty) => ZoneExtraction::empty(),
            (ZoneKind::Overview, ZoneSource::Positioned(fragments)) => {
                if fragments.iter().any(|fragment| fragment.finite_anchor().is_some()) {
                    parse_positional(fragments, catalog, settings)
                } else {
                    debug!("fragments carry no positions; slicing concatenated text");
                    parse_keyword_slices(&concatenate_fragments(fragments), catalog, &self.cleaner)
                }
            }
            (ZoneKind::Overview, ZoneSource::PlainText(text)) => {
                parse_keyword_slices(text, catalog, &self.cleaner)
            }
            (ZoneKind::Freeform, ZoneSource::Positioned(fragments)) => {
                ZoneExtraction::Unstructured(concatenate_fragments(fragments))
            }
            (ZoneKind::Freeform, ZoneSource::PlainText(text)) => {
                ZoneExtraction::Unstructured(self.cleaner.clean(text))
            }
        }
    }
}
