use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info_span;
use tsgen_config::{list_configurations, load_configuration};
use tsgen_document::JsonDocumentStore;
use tsgen_resolve::Resolver;

use tsgen_cli::pipeline::{RunOptions, run_pipeline, write_report};
use tsgen_cli::types::RunResult;

use crate::cli::{ConfigsArgs, RunArgs};
use crate::summary::apply_table_style;

pub fn run_generate(args: &RunArgs) -> Result<RunResult> {
    let span = info_span!("run", config = %args.config.display());
    let _guard = span.enter();

    let config = load_configuration(&args.config)
        .with_context(|| format!("load configuration {}", args.config.display()))?;
    let resolver = Resolver::default();
    let outcome = run_pipeline(&config, &resolver, &JsonDocumentStore, RunOptions {
        dry_run: args.dry_run,
    });

    let result = RunResult {
        config_path: args.config.clone(),
        product: config.product_label().to_string(),
        audit: outcome.audit,
        diagnostics: outcome.diagnostics,
        output_path: outcome.saved.then(|| config.output_path.clone()),
        dry_run: args.dry_run,
    };
    if let Some(path) = &args.report {
        write_report(path, &result)?;
    }
    Ok(result)
}

pub fn run_configs(args: &ConfigsArgs) -> Result<()> {
    let listing = list_configurations(&args.dir)
        .with_context(|| format!("list configurations in {}", args.dir.display()))?;
    let mut table = Table::new();
    table.set_header(vec!["#", "Product", "File"]);
    apply_table_style(&mut table);
    for (index, entry) in listing.entries.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            entry.product_name.clone(),
            entry.file_name.clone(),
        ]);
    }
    println!("{table}");
    for skipped in &listing.skipped {
        eprintln!("skipped {}: {}", skipped.file_name, skipped.reason);
    }
    Ok(())
}

pub fn run_operations() -> Result<()> {
    let resolver = Resolver::default();
    let mut table = Table::new();
    table.set_header(vec!["Name", "Kind", "Description"]);
    apply_table_style(&mut table);
    for operation in resolver.operations().operations() {
        table.add_row(vec![
            operation.name(),
            operation.kind().as_str(),
            operation.description(),
        ]);
    }
    for formatter in resolver.formatters().formatters() {
        table.add_row(vec![formatter.name(), "formatter", formatter.description()]);
    }
    println!("{table}");
    Ok(())
}
