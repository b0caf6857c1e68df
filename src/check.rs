use crate::history::parse_history;
use crate::model::{CheckReport, Churn, CommitKind, LoggedCommit, SCHEMA_VERSION};
use crate::util::is_binary_path;
use anyhow::Context;
use chrono::Utc;
use console::style;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

pub const MAX_ADDED: u32 = 1000;
pub const MAX_DELETED: u32 = 500;

/// Violations past this many are counted but not listed.
const MAX_LISTED_VIOLATIONS: usize = 20;

pub fn exec(input: &Path, expect_commits: Option<usize>, json: bool) -> anyhow::Result<()> {
    let file = File::open(input)
        .with_context(|| format!("Failed to open history file {}", input.display()))?;
    let commits = parse_history(BufReader::new(file))
        .with_context(|| format!("Failed to parse history file {}", input.display()))?;
    debug!(commits = commits.len(), "History parsed");

    let report = validate(&commits, expect_commits, &input.to_string_lossy());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output_report(&report)?;
    }

    if !report.is_valid() {
        anyhow::bail!("{} invariant violation(s) found", report.violations.len());
    }
    Ok(())
}

pub fn validate(
    commits: &[LoggedCommit],
    expect_commits: Option<usize>,
    input_path: &str,
) -> CheckReport {
    let mut violations = Vec::new();
    let mut kinds: BTreeMap<CommitKind, usize> = BTreeMap::new();
    let mut unclassified = 0;
    let mut files: HashSet<&str> = HashSet::new();
    let mut file_changes = 0;
    let mut binary_changes = 0;
    let mut lines_added = 0u64;
    let mut lines_deleted = 0u64;

    if let Some(expected) = expect_commits {
        if commits.len() != expected {
            violations.push(format!(
                "expected {expected} commits, found {}",
                commits.len()
            ));
        }
    }

    for pair in commits.windows(2) {
        if pair[1].timestamp < pair[0].timestamp {
            violations.push(format!(
                "line {}: timestamp {} goes back before {}",
                pair[1].line, pair[1].timestamp, pair[0].timestamp
            ));
        }
    }

    for commit in commits {
        match CommitKind::from_message(&commit.message) {
            Some(kind) => *kinds.entry(kind).or_insert(0) += 1,
            None => unclassified += 1,
        }

        for change in &commit.files {
            files.insert(change.path.as_str());
            file_changes += 1;
            match (is_binary_path(&change.path), change.churn) {
                (true, Churn::Binary) => binary_changes += 1,
                (true, Churn::Lines { .. }) => violations.push(format!(
                    "commit at line {}: binary file {} reports line counts",
                    commit.line, change.path
                )),
                (false, Churn::Binary) => violations.push(format!(
                    "commit at line {}: text file {} reports binary churn",
                    commit.line, change.path
                )),
                (false, Churn::Lines { added, deleted }) => {
                    lines_added += added as u64;
                    lines_deleted += deleted as u64;
                    if added > MAX_ADDED || deleted > MAX_DELETED {
                        violations.push(format!(
                            "commit at line {}: {} churn {added}/{deleted} out of range",
                            commit.line, change.path
                        ));
                    }
                }
            }
        }
    }

    if !violations.is_empty() {
        warn!(count = violations.len(), "History failed validation");
    }

    CheckReport {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        input_path: input_path.to_string(),
        commits: commits.len(),
        unique_files: files.len(),
        file_changes,
        binary_changes,
        lines_added,
        lines_deleted,
        first_timestamp: commits.first().map(|c| c.timestamp),
        last_timestamp: commits.last().map(|c| c.timestamp),
        kinds,
        unclassified,
        violations,
    }
}

fn output_report(report: &CheckReport) -> anyhow::Result<()> {
    println!("{}", style("History Check").bold());
    println!("{}", "─".repeat(50));

    println!("Total commits: {}", style(report.commits).cyan());
    println!("Unique files: {}", style(report.unique_files).cyan());
    println!("File changes: {} ({} binary)", report.file_changes, report.binary_changes);
    println!("Total lines added: {}", style(report.lines_added).green());
    println!("Total lines deleted: {}", style(report.lines_deleted).red());

    if let (Some(first), Some(last)) = (report.first_timestamp, report.last_timestamp) {
        println!(
            "Date range: {} to {}",
            style(first.format("%Y-%m-%d")).dim(),
            style(last.format("%Y-%m-%d")).dim()
        );
    }

    if report.commits > 0 {
        println!("\n{}", style("Commit kinds").bold());
        for kind in CommitKind::ALL {
            let count = report.kinds.get(&kind).copied().unwrap_or(0);
            let pct = count as f64 * 100.0 / report.commits as f64;
            println!(
                "  {:<10} {:>6} {:>6.1}% (expected {:.0}%)",
                kind.as_str(),
                count,
                pct,
                kind.share() * 100.0
            );
        }
        if report.unclassified > 0 {
            println!("  {:<10} {:>6}", "other", report.unclassified);
        }
    }

    println!();
    if report.is_valid() {
        println!("{}", style("All invariants hold").green().bold());
    } else {
        println!(
            "{}",
            style(format!("{} violation(s)", report.violations.len())).red().bold()
        );
        for v in report.violations.iter().take(MAX_LISTED_VIOLATIONS) {
            println!("  {v}");
        }
        if report.violations.len() > MAX_LISTED_VIOLATIONS {
            println!(
                "\n... and {} more",
                report.violations.len() - MAX_LISTED_VIOLATIONS
            );
        }
    }

    Ok(())
}
