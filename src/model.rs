use serde::{Deserialize, Serialize};

use crate::commands::extract::{ParserSettings, TextFragment, ZoneExtraction};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Overview,
    Freeform,
}

impl ZoneKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Freeform => "freeform",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneFile {
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub zones: Vec<ZoneRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneRecord {
    pub name: String,
    #[serde(default)]
    pub kind: Option<ZoneKind>,
    #[serde(default)]
    pub fragments: Vec<FragmentRecord>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub ocr_text: Option<String>,
    #[serde(default)]
    pub keys: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FragmentRecord {
    pub text: String,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub transform: Option<Vec<f64>>,
}

impl FragmentRecord {
    pub fn to_fragment(&self) -> TextFragment {
        let anchor = match (self.x, self.y, self.transform.as_deref()) {
            (Some(x), Some(y), _) => Some((x, y)),
            (_, _, Some([_, _, _, _, x, y])) => Some((*x, *y)),
            _ => None,
        };

        match anchor {
            Some((x, y)) => TextFragment::positioned(self.text.clone(), x, y),
            None => TextFragment::unpositioned(self.text.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneFileEntry {
    pub filename: String,
    pub document: Option<String>,
    pub zone_count: usize,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub file_count: usize,
    pub files: Vec<ZoneFileEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSourceProvenance {
    pub backend: String,
    pub reason: String,
    pub text_char_count: usize,
    pub ocr_char_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneResultEntry {
    pub source_file: String,
    pub document: Option<String>,
    pub zone: String,
    pub kind: ZoneKind,
    pub provenance: ZoneSourceProvenance,
    pub extraction: ZoneExtraction,
    pub rendered: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractCounts {
    pub file_count: usize,
    pub zone_count: usize,
    pub overview_zone_count: usize,
    pub structured_zone_count: usize,
    pub fallback_zone_count: usize,
    pub empty_zone_count: usize,
    pub ocr_zone_count: usize,
    pub fields_extracted: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub started_at: String,
    pub completed_at: String,
    pub command: String,
    pub ocr_mode: String,
    pub settings: ParserSettings,
    pub catalog: Vec<String>,
    pub counts: ExtractCounts,
    pub zones: Vec<ZoneResultEntry>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractRunSummary {
    pub run_id: String,
    pub started_at: String,
    pub completed_at: String,
    pub ocr_mode: String,
    pub counts: ExtractCounts,
    #[serde(default)]
    pub warnings: Vec<String>,
}
