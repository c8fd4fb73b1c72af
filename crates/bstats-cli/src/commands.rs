use anyhow::{Context, Result};
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL_CONDENSED;

use bstats_cli::profile::{ProfileRequest, profile_csv};
use bstats_cli::summary::print_report;
use bstats_core::MISSING_VALUE_MARKERS;
use bstats_model::{MissingScan, ProfileOptions};

use crate::cli::{OutputFormatArg, ProfileArgs};

pub fn run_profile(args: &ProfileArgs) -> Result<()> {
    let missing_scan = if args.full_missing_scan {
        MissingScan::FullColumn
    } else {
        MissingScan::FirstValue
    };
    let request = ProfileRequest {
        options: ProfileOptions::new()
            .with_significance_level(args.significance_level)
            .with_trim_ratio(args.trim_ratio)
            .with_missing_scan(missing_scan)
            .with_tag_overlap(args.tag_overlap.into()),
        sample_size: args.sample,
    };
    let report = profile_csv(&args.input, &request)?;
    match args.format {
        OutputFormatArg::Table => print_report(&report),
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(&report).context("serialize profile")?;
            println!("{json}");
        }
    }
    Ok(())
}

pub fn run_markers() {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Marker"]);
    for marker in MISSING_VALUE_MARKERS {
        table.add_row(vec![format!("{marker:?}")]);
    }
    table.add_row(vec!["null / NaN".to_string()]);
    println!("{table}");
}
