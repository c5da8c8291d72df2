//! Names command implementation

use crate::cli::{NamesArgs, NamesCommand};
use crate::config_loader::load_names;
use crate::errors::name_map_invalid;
use crate::output::OutputWriter;
use crate::output_types::{NameDefectRow, NamesCheckOutput, ResolveOutput};
use anyhow::Result;
use geodrill_core::config::LayeredConfig;
use geodrill_geo::NameTable;

pub fn execute(args: &NamesArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let names = load_names(config)?;

    match &args.command {
        NamesCommand::Check => check(&names, output),
        NamesCommand::Resolve { label } => resolve(&names, label, output),
    }
}

fn check(names: &NameTable, output: &OutputWriter) -> Result<()> {
    let defects: Vec<NameDefectRow> = names
        .closure_defects()
        .into_iter()
        .map(|(raw, target)| NameDefectRow { raw, target })
        .collect();
    let defect_count = defects.len();

    if output.is_json() {
        output.result(NamesCheckOutput {
            entries: names.len(),
            canonical_names: names.canonical_names().len(),
            defects,
        })?;
    } else {
        output.section("Name Mapping");
        output.kv("Entries", names.len());
        output.kv("Canonical names", names.canonical_names().len());
        if defect_count > 0 {
            output.section("Mappings Without a Canonical Target");
            output.table(defects);
        }
    }

    if defect_count > 0 {
        return Err(name_map_invalid(&format!(
            "{} mapping(s) point at names that do not map to themselves",
            defect_count
        ))
        .into());
    }

    if !output.is_json() {
        output.success("Every mapping ends on a canonical name");
    }
    Ok(())
}

fn resolve(names: &NameTable, label: &str, output: &OutputWriter) -> Result<()> {
    let canonical = names.resolve(label);
    let is_canonical = names.is_canonical(canonical);

    if output.is_json() {
        return output.result(ResolveOutput {
            label: label.to_string(),
            canonical: canonical.to_string(),
            is_canonical,
        });
    }

    output.kv("Label", label);
    output.kv("Canonical", canonical);
    if !is_canonical {
        output.warning("Not a known region; the label is passed through unchanged");
    }
    Ok(())
}
