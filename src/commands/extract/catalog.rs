use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::types::ExtractedField;

pub const OVERVIEW_KEYS: [&str; 15] = [
    "주소",
    "위치",
    "교통",
    "용도지역",
    "대지면적",
    "연면적",
    "기준층 면적",
    "전용률",
    "건물규모",
    "준공년도",
    "구조",
    "주차사항",
    "승강기",
    "냉난방",
    "특이사항",
];

/// Ordered field labels; the order here is the output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCatalog {
    keys: Vec<String>,
}

impl FieldCatalog {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::<String>::new();
        let keys = keys
            .into_iter()
            .map(|key| key.as_ref().trim().to_string())
            .filter(|key| !key.is_empty())
            .filter(|key| seen.insert(key.clone()))
            .collect();

        Self { keys }
    }

    pub fn overview() -> Self {
        Self::new(OVERVIEW_KEYS)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let keys: Vec<String> = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse catalog {}", path.display()))?;

        let catalog = Self::new(keys);
        if catalog.is_empty() {
            bail!("catalog {} contains no usable keys", path.display());
        }

        Ok(catalog)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Orders per-key values by catalog position, dropping absent and blank values.
    pub fn assemble(&self, values: &HashMap<&str, String>) -> Vec<ExtractedField> {
        self.keys
            .iter()
            .filter_map(|key| {
                let value = values.get(key.as_str())?.trim();
                if value.is_empty() {
                    return None;
                }
                Some(ExtractedField {
                    key: key.clone(),
                    value: value.to_string(),
                })
            })
            .collect()
    }
}
