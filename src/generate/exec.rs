use crate::config::GeneratorConfig;
use crate::history::HistoryWriter;
use super::{output_json, output_summary, HistoryGenerator};
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub fn exec(output: &Path, seed: Option<u64>, json: bool) -> anyhow::Result<()> {
    let mut config = GeneratorConfig::default();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mut generator = HistoryGenerator::new(&config).context("Failed to build file corpus")?;

    let file = File::create(output)
        .with_context(|| format!("Failed to create output file {}", output.display()))?;
    let mut writer = HistoryWriter::new(BufWriter::new(file));

    // Keep stderr quiet when the caller wants machine-readable output
    let pb = if json {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(generator.num_commits() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message("Generating commits...");
        pb
    };

    let stats = generator
        .run(&mut writer, &pb)
        .context("Failed to generate commit history")?;
    writer
        .finish()
        .with_context(|| format!("Failed to flush {}", output.display()))?;
    pb.finish_and_clear();

    let summary = generator.summarize(stats, &output.to_string_lossy());
    if json {
        output_json(&summary)?;
    } else {
        output_summary(&summary)?;
    }

    Ok(())
}
