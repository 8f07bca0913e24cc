use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::InventoryArgs;
use crate::model::{ZoneFile, ZoneFileEntry, ZoneInventoryManifest};
use crate::util::{now_utc_string, read_json, sha256_file, write_json_pretty};

pub const ZONE_FILE_SUFFIX: &str = ".zones.json";

pub fn run(args: InventoryArgs) -> Result<()> {
    let input_dir = args
        .input_dir
        .clone()
        .unwrap_or_else(|| args.cache_root.join("zones"));
    let manifest = build_manifest(&input_dir)?;

    if args.dry_run {
        info!(
            file_count = manifest.file_count,
            source = %manifest.source_directory,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args
        .manifest_path
        .unwrap_or_else(|| args.cache_root.join("manifests").join("zone_inventory.json"));

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote inventory manifest");
    info!(file_count = manifest.file_count, "inventory completed");

    Ok(())
}

pub fn build_manifest(input_dir: &Path) -> Result<ZoneInventoryManifest> {
    let zone_paths = discover_zone_files(input_dir)?;

    if zone_paths.is_empty() {
        bail!("no zone files found in {}", input_dir.display());
    }

    let mut files = Vec::with_capacity(zone_paths.len());
    for path in zone_paths {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(ToOwned::to_owned)
            .with_context(|| format!("invalid UTF-8 filename: {}", path.display()))?;

        let zone_file: ZoneFile = read_json(&path)?;
        let sha256 = sha256_file(&path)?;

        files.push(ZoneFileEntry {
            filename,
            document: zone_file.document,
            zone_count: zone_file.zones.len(),
            sha256,
        });
    }

    Ok(ZoneInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: input_dir.display().to_string(),
        file_count: files.len(),
        files,
    })
}

/// Zone files directly inside `input_dir`, sorted by path.
pub fn discover_zone_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("failed to read {}", input_dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", input_dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let is_zone_file = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.to_ascii_lowercase().ends_with(ZONE_FILE_SUFFIX))
            .unwrap_or(false);

        if is_zone_file {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}
