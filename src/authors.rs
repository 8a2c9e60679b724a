use crate::cli::CommonArgs;
use crate::config::DatasetPaths;
use crate::dataset::{read_source_files_file, write_attribution_file};
use crate::mine::{Aggregator, AttributionFold, Miner};
use crate::model::{AttributionOutput, AttributionRecord, SCHEMA_VERSION};
use anyhow::{bail, Context};
use chrono::Utc;
use console::style;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, warn};

pub fn exec(common: CommonArgs, src: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let config = common.scan_config().context("Invalid scan configuration")?;
    let fetcher = common.fetcher(&config)?;
    let paths = DatasetPaths::new(&common.out_dir, &config.repo);

    let src_path = src.unwrap_or_else(|| paths.source_files());
    let sources = read_source_files_file(&src_path)
        .with_context(|| format!("Failed to load source files from {}", src_path.display()))?;
    if sources.is_empty() {
        warn!(path = %src_path.display(), "Source file list is empty; no touches will match");
    }
    info!(repository = %config.repo, sources = sources.len(), "Collecting author touches");

    let (aggregator, stats) = Miner::new(&fetcher, &config)
        .with_progress(!common.quiet)
        .run(Aggregator::attribution(sources))
        .with_context(|| format!("Error receiving data for {}", config.repo))?;

    let Aggregator::Attribution(AttributionFold { records, .. }) = aggregator else {
        bail!("attribution scan returned a different aggregation");
    };

    std::fs::create_dir_all(paths.dir())
        .with_context(|| format!("Failed to create {}", paths.dir().display()))?;
    let out = paths.authors();
    write_attribution_file(&out, &records).with_context(|| format!("Failed to write {}", out.display()))?;
    info!(path = %out.display(), rows = records.len(), "Wrote dataset");

    if json {
        output_json(&config.repo.to_string(), records)?;
    } else {
        output_summary(&records, stats.commits);
    }
    Ok(())
}

fn output_summary(records: &[AttributionRecord], commits: u64) {
    let authors: HashSet<&str> = records.iter().map(|r| r.author_name.as_str()).collect();
    let files: HashSet<&str> = records.iter().map(|r| r.path.as_str()).collect();

    println!("Scanned {} commits", style(commits).cyan());
    println!("Total number of touches on source files: {}", style(records.len()).cyan());
    println!("Files touched: {}", style(files.len()).green());
    println!("Unique authors: {}", style(authors.len()).yellow());

    let dates = records.iter().map(|r| r.author_date);
    if let (Some(first), Some(last)) = (dates.clone().min(), dates.max()) {
        println!(
            "Date range: {} to {}",
            style(first.format("%Y-%m-%d")).dim(),
            style(last.format("%Y-%m-%d")).dim()
        );
    }
}

fn output_json(repository: &str, records: Vec<AttributionRecord>) -> anyhow::Result<()> {
    let output = AttributionOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository: repository.to_string(),
        entries: records,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
