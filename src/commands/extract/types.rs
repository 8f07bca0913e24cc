use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

/// A recognized span of text. Text-layer fragments carry a baseline anchor
/// (y grows upward); raw OCR text arrives without one.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub text: String,
    pub anchor: Option<Anchor>,
}

impl TextFragment {
    pub fn positioned(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            anchor: Some(Anchor { x, y }),
        }
    }

    pub fn unpositioned(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            anchor: None,
        }
    }

    /// Anchor usable for geometry; non-finite coordinates count as absent.
    pub fn finite_anchor(&self) -> Option<Anchor> {
        self.anchor
            .filter(|anchor| anchor.x.is_finite() && anchor.y.is_finite())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyLocation {
    pub fragment_index: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowDescriptor<'k> {
    pub key: &'k str,
    pub location: KeyLocation,
    pub min_y: f64,
    pub max_y: f64,
}

impl<'k> RowDescriptor<'k> {
    pub fn new(key: &'k str, location: KeyLocation) -> Self {
        Self {
            key,
            location,
            min_y: 0.0,
            max_y: 0.0,
        }
    }

    pub fn y(&self) -> f64 {
        self.location.y
    }

    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.min_y && y <= self.max_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedValue<'a> {
    pub fragment_index: usize,
    pub text: &'a str,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedField {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum ZoneExtraction {
    Fields(Vec<ExtractedField>),
    Unstructured(String),
}

impl ZoneExtraction {
    pub fn empty() -> Self {
        Self::Unstructured(String::new())
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Fields(_))
    }

    pub fn field_count(&self) -> usize {
        match self {
            Self::Fields(fields) => fields.len(),
            Self::Unstructured(_) => 0,
        }
    }

    /// `key: value` lines in catalog order, or the fallback text verbatim.
    pub fn render(&self) -> String {
        match self {
            Self::Fields(fields) => fields
                .iter()
                .map(|field| format!("{}: {}", field.key, field.value))
                .collect::<Vec<String>>()
                .join("\n"),
            Self::Unstructured(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParserSettings {
    pub row_tolerance: f64,
    pub key_echo_tolerance: f64,
    pub min_value_offset: f64,
    pub key_char_width: f64,
    pub same_line_tolerance: f64,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            row_tolerance: 15.0,
            key_echo_tolerance: 8.0,
            min_value_offset: 20.0,
            key_char_width: 8.0,
            same_line_tolerance: 3.0,
        }
    }
}

impl ParserSettings {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("row_tolerance", self.row_tolerance),
            ("key_echo_tolerance", self.key_echo_tolerance),
            ("min_value_offset", self.min_value_offset),
            ("key_char_width", self.key_char_width),
            ("same_line_tolerance", self.same_line_tolerance),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                bail!("parser setting {name} must be a finite, non-negative number (got {value})");
            }
        }

        Ok(())
    }
}
