use std::path::Path;

use anyhow::Result;
use chrono::Local;
use comfy_table::{Cell, Color, Table};
use dwh_cli::pipeline::{PipelineConfig, run_pipeline};
use dwh_cli::summary::apply_table_style;
use dwh_cli::types::PipelineResult;
use dwh_ingest::{LoaderOptions, SourceCatalog};

use crate::cli::{RunArgs, SourcesArgs};

pub fn pipeline_config(args: &RunArgs) -> PipelineConfig {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let mut config = PipelineConfig::new(&args.source_root, as_of);
    config.output_dir = args.output_dir.clone();
    config.loader = LoaderOptions {
        parallel: args.parallel_load,
        fail_fast: args.fail_fast,
    };
    config.dry_run = args.dry_run;
    config
}

pub fn run_run(args: &RunArgs) -> Result<PipelineResult> {
    let config = pipeline_config(args);
    Ok(run_pipeline(&config)?)
}

pub fn run_sources(args: &SourcesArgs) -> Result<()> {
    let catalog = SourceCatalog::new(&args.source_root);
    let mut table = Table::new();
    table.set_header(vec!["Entity", "System", "Extract", "Found"]);
    apply_table_style(&mut table);
    for (entity, path) in catalog.entries() {
        table.add_row(vec![
            Cell::new(entity.as_str()),
            Cell::new(entity.system().as_str()),
            Cell::new(path.display()),
            found_cell(&path),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn found_cell(path: &Path) -> Cell {
    if path.is_file() {
        Cell::new("✓").fg(Color::Green)
    } else {
        Cell::new("missing").fg(Color::Red)
    }
}
