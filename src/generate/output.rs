use crate::model::GenerationSummary;
use anyhow::Result;
use console::style;

pub fn output_json(summary: &GenerationSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

pub fn output_summary(summary: &GenerationSummary) -> Result<()> {
    println!(
        "Generated {} commits with {} unique files.",
        summary.commits, summary.unique_files
    );
    println!("{}", "─".repeat(50));
    println!("Output: {}", style(&summary.output_path).cyan());
    println!("Seed: {}", style(summary.seed).yellow());
    println!("Features: {}", summary.features);
    println!("File changes: {}", style(summary.file_changes).cyan());

    if let (Some(first), Some(last)) = (summary.first_timestamp, summary.last_timestamp) {
        println!(
            "Date range: {} to {}",
            style(first.format("%Y-%m-%d")).dim(),
            style(last.format("%Y-%m-%d")).dim()
        );
    }

    if summary.commits > 0 {
        println!("\n{}", style("Commit kinds").bold());
        for (kind, count) in &summary.kinds {
            let pct = *count as f64 * 100.0 / summary.commits as f64;
            println!("  {:<10} {:>6} {:>6.1}%", kind.as_str(), count, pct);
        }
    }

    Ok(())
}
