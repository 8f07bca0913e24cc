use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::{ExtractRunSummary, ZoneInventoryManifest};
use crate::util::read_json;

pub const RUN_MANIFEST_PREFIX: &str = "extract_run_";

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_dir = args.cache_root.join("manifests");
    let inventory_path = manifest_dir.join("zone_inventory.json");

    info!(cache_root = %args.cache_root.display(), "status requested");

    if inventory_path.exists() {
        let inventory: ZoneInventoryManifest = read_json(&inventory_path)?;
        info!(
            generated_at = %inventory.generated_at,
            file_count = inventory.file_count,
            "loaded inventory manifest"
        );
    } else {
        warn!(path = %inventory_path.display(), "inventory manifest missing");
    }

    match latest_run_manifest(&manifest_dir)? {
        Some(path) => {
            let summary: ExtractRunSummary = read_json(&path)?;
            info!(
                path = %path.display(),
                run_id = %summary.run_id,
                started_at = %summary.started_at,
                completed_at = %summary.completed_at,
                ocr_mode = %summary.ocr_mode,
                files = summary.counts.file_count,
                zones = summary.counts.zone_count,
                overview_zones = summary.counts.overview_zone_count,
                structured_zones = summary.counts.structured_zone_count,
                fallback_zones = summary.counts.fallback_zone_count,
                empty_zones = summary.counts.empty_zone_count,
                ocr_zones = summary.counts.ocr_zone_count,
                fields = summary.counts.fields_extracted,
                warnings = summary.warnings.len(),
                "loaded latest extract run"
            );
        }
        None => warn!(path = %manifest_dir.display(), "no extract run manifests found"),
    }

    Ok(())
}

/// Run manifests carry a compact UTC stamp, so the lexically greatest is newest.
pub fn latest_run_manifest(manifest_dir: &Path) -> Result<Option<PathBuf>> {
    if !manifest_dir.exists() {
        return Ok(None);
    }

    let entries = fs::read_dir(manifest_dir)
        .with_context(|| format!("failed to read {}", manifest_dir.display()))?;

    let mut latest: Option<PathBuf> = None;
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in {}", manifest_dir.display()))?;
        let path = entry.path();
        let is_run_manifest = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with(RUN_MANIFEST_PREFIX) && name.ends_with(".json"))
            .unwrap_or(false);

        if is_run_manifest && latest.as_ref().is_none_or(|current| path > *current) {
            latest = Some(path);
        }
    }

    Ok(latest)
}
