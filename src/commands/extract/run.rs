use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::{info, warn};

use super::catalog::FieldCatalog;
use super::dispatch::{ZoneDispatcher, ZoneSource};
use super::source_select::select_zone_source;
use super::types::{ParserSettings, ZoneExtraction};
use crate::cli::{ExtractArgs, OcrMode};
use crate::commands::inventory::discover_zone_files;
use crate::commands::status::RUN_MANIFEST_PREFIX;
use crate::model::{
    ExtractCounts, ExtractRunManifest, ZoneFile, ZoneKind, ZoneRecord, ZoneResultEntry,
    ZoneSourceProvenance,
};
use crate::util::{now_utc_string, read_json, utc_compact_string, write_json_pretty};

#[derive(Debug, Clone)]
pub struct ZoneOutcome {
    pub kind: ZoneKind,
    pub provenance: ZoneSourceProvenance,
    pub extraction: ZoneExtraction,
}

pub fn run(args: ExtractArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let settings = settings_from_args(&args);
    settings.validate()?;

    let catalog = match &args.catalog_path {
        Some(path) => FieldCatalog::load(path)?,
        None => FieldCatalog::overview(),
    };
    let dispatcher = ZoneDispatcher::new()?;

    let input_paths = collect_input_paths(&args)?;
    if input_paths.is_empty() {
        bail!("no zone files to extract; pass --input or --input-dir");
    }

    info!(
        run_id = %run_id,
        files = input_paths.len(),
        catalog_keys = catalog.len(),
        ocr_mode = args.ocr_mode.as_str(),
        "starting extract"
    );

    let mut counts = ExtractCounts {
        file_count: input_paths.len(),
        ..ExtractCounts::default()
    };
    let mut zones = Vec::<ZoneResultEntry>::new();
    let mut warnings = Vec::<String>::new();

    for path in &input_paths {
        let zone_file: ZoneFile = read_json(path)?;
        if zone_file.zones.is_empty() {
            let message = format!("zone file {} contains no zones", path.display());
            warn!(path = %path.display(), "zone file contains no zones");
            warnings.push(message);
            continue;
        }

        for zone in &zone_file.zones {
            let outcome = extract_zone(
                &dispatcher,
                zone,
                &catalog,
                &settings,
                args.ocr_mode,
                args.ocr_min_text_chars,
            )
            .with_context(|| {
                format!("failed to extract zone '{}' from {}", zone.name, path.display())
            })?;

            let rendered = outcome.extraction.render();
            tally_zone(&mut counts, &outcome, &rendered);
            if outcome.kind == ZoneKind::Overview
                && !outcome.extraction.is_structured()
                && !rendered.is_empty()
            {
                warnings.push(format!(
                    "no catalog keys found in overview zone '{}' of {}",
                    zone.name,
                    path.display()
                ));
            }

            info!(
                zone = %zone.name,
                kind = outcome.kind.as_str(),
                backend = %outcome.provenance.backend,
                fields = outcome.extraction.field_count(),
                "extracted zone"
            );

            zones.push(ZoneResultEntry {
                source_file: path.display().to_string(),
                document: zone_file.document.clone(),
                zone: zone.name.clone(),
                kind: outcome.kind,
                provenance: outcome.provenance,
                extraction: outcome.extraction,
                rendered,
            });
        }
    }

    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        args.cache_root.join("manifests").join(format!(
            "{RUN_MANIFEST_PREFIX}{}.json",
            utc_compact_string(started_ts)
        ))
    });

    let manifest = ExtractRunManifest {
        manifest_version: 1,
        run_id,
        started_at,
        completed_at: now_utc_string(),
        command: "extract".to_string(),
        ocr_mode: args.ocr_mode.as_str().to_string(),
        settings,
        catalog: catalog.keys().to_vec(),
        counts,
        zones,
        warnings,
    };

    write_json_pretty(&manifest_path, &manifest)?;

    if args.print {
        for entry in &manifest.zones {
            println!("## {} / {}", entry.source_file, entry.zone);
            println!("{}", entry.rendered);
        }
    }

    info!(path = %manifest_path.display(), "wrote extract run manifest");
    info!(
        zones = manifest.counts.zone_count,
        structured = manifest.counts.structured_zone_count,
        fields = manifest.counts.fields_extracted,
        warnings = manifest.warnings.len(),
        "extract completed"
    );

    Ok(())
}

pub fn extract_zone(
    dispatcher: &ZoneDispatcher,
    zone: &ZoneRecord,
    catalog: &FieldCatalog,
    settings: &ParserSettings,
    ocr_mode: OcrMode,
    ocr_min_text_chars: usize,
) -> Result<ZoneOutcome> {
    let kind = dispatcher.resolve_kind(&zone.name, zone.kind);
    let (source, provenance) = select_zone_source(zone, ocr_mode, ocr_min_text_chars)?;

    let zone_catalog = zone
        .keys
        .as_ref()
        .map(FieldCatalog::new)
        .filter(|zone_catalog| !zone_catalog.is_empty());
    let extraction = dispatcher.dispatch(
        kind,
        &source,
        zone_catalog.as_ref().unwrap_or(catalog),
        settings,
    );

    if matches!(source, ZoneSource::Empty) {
        warn!(zone = %zone.name, "zone has no fragments or text");
    }

    Ok(ZoneOutcome {
        kind,
        provenance,
        extraction,
    })
}

fn tally_zone(counts: &mut ExtractCounts, outcome: &ZoneOutcome, rendered: &str) {
    counts.zone_count += 1;
    counts.fields_extracted += outcome.extraction.field_count();

    if outcome.kind == ZoneKind::Overview {
        counts.overview_zone_count += 1;
    }
    if outcome.provenance.backend == "ocr" {
        counts.ocr_zone_count += 1;
    }

    if rendered.is_empty() {
        counts.empty_zone_count += 1;
    } else if outcome.extraction.is_structured() {
        counts.structured_zone_count += 1;
    } else {
        counts.fallback_zone_count += 1;
    }
}

fn settings_from_args(args: &ExtractArgs) -> ParserSettings {
    ParserSettings {
        row_tolerance: args.row_tolerance,
        key_echo_tolerance: args.key_echo_tolerance,
        min_value_offset: args.min_value_offset,
        key_char_width: args.key_char_width,
        same_line_tolerance: args.same_line_tolerance,
    }
}

fn collect_input_paths(args: &ExtractArgs) -> Result<Vec<PathBuf>> {
    let mut paths = args.inputs.clone();

    if let Some(input_dir) = &args.input_dir {
        paths.extend(discover_zone_files(input_dir)?);
    }

    for path in &paths {
        ensure_readable_file(path)?;
    }

    paths.dedup();
    Ok(paths)
}

fn ensure_readable_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("zone file not found: {}", path.display());
    }
    Ok(())
}
