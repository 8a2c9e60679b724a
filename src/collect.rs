use crate::classify::FileClassifier;
use crate::cli::CommonArgs;
use crate::config::DatasetPaths;
use crate::dataset::write_frequency_files;
use crate::mine::{Aggregator, FrequencyFold, Miner};
use crate::model::{FrequencyMap, FrequencyOutput, SCHEMA_VERSION};
use anyhow::{bail, Context};
use chrono::Utc;
use console::style;
use tracing::{info, warn};

pub fn exec(common: CommonArgs, roots: Vec<String>, json: bool) -> anyhow::Result<()> {
    let config = common.scan_config().context("Invalid scan configuration")?;
    let fetcher = common.fetcher(&config)?;
    let paths = DatasetPaths::new(&common.out_dir, &config.repo);

    let classifier = FileClassifier::new(roots);
    info!(repository = %config.repo, roots = ?classifier.roots(), "Collecting file touches");

    let (aggregator, stats) = Miner::new(&fetcher, &config)
        .with_progress(!common.quiet)
        .run(Aggregator::frequency(classifier))
        .with_context(|| format!("Error receiving data for {}", config.repo))?;

    let Aggregator::Frequency(FrequencyFold { all, source, .. }) = aggregator else {
        bail!("frequency scan returned a different aggregation");
    };

    std::fs::create_dir_all(paths.dir())
        .with_context(|| format!("Failed to create {}", paths.dir().display()))?;
    if source.is_empty() {
        warn!("No changed path matched the source rules");
    }
    let (all_path, src_path) = (paths.all_files(), paths.source_files());
    write_frequency_files(&[
        (all_path.as_path(), all.entries()),
        (src_path.as_path(), source.entries()),
    ])
    .with_context(|| format!("Failed to write datasets to {}", paths.dir().display()))?;
    info!(
        all = %all_path.display(),
        source = %src_path.display(),
        files = all.len(),
        sources = source.len(),
        "Wrote datasets"
    );

    if json {
        output_json(&config.repo.to_string(), all, source)?;
    } else {
        output_summary(&all, &source, stats.commits, stats.pages);
    }
    Ok(())
}

fn output_summary(all: &FrequencyMap, source: &FrequencyMap, commits: u64, pages: u32) {
    println!(
        "Scanned {} commits across {} pages",
        style(commits).cyan(),
        style(pages).cyan()
    );
    println!(
        "Total number of files: {} ({} touches)",
        style(all.len()).cyan(),
        all.total_touches()
    );
    println!("Source files: {}", style(source.len()).green());
    for (label, map) in [("all files", all), ("source files", source)] {
        if let Some(top) = map.most_touched() {
            println!(
                "The file {} has been touched {} times ({})",
                style(&top.path).bold(),
                top.touches,
                label
            );
        }
    }
}

fn output_json(repository: &str, all: FrequencyMap, source: FrequencyMap) -> anyhow::Result<()> {
    let output = FrequencyOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository: repository.to_string(),
        all_files: all.into_entries(),
        source_files: source.into_entries(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
