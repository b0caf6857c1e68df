//! The line-oriented history artifact.
//!
//! ```text
//! COMMIT|<sha>|<author-name>|<author-email>|<timestamp>|<message>
//! <added>\t<deleted>\t<path>
//! ```
//!
//! Each COMMIT line is followed by its change lines until the next COMMIT line.
//! Binary files carry `-` in both churn columns.

use crate::error::{HistgenError, Result};
use crate::model::{Author, Churn, Commit, FileChange, LoggedCommit};
use chrono::{DateTime, NaiveDateTime};
use std::io::{BufRead, Write};

pub const COMMIT_PREFIX: &str = "COMMIT|";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub struct HistoryWriter<W: Write> {
    out: W,
    commits: usize,
    changes: usize,
}

impl<W: Write> HistoryWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            commits: 0,
            changes: 0,
        }
    }

    pub fn write_commit(&mut self, commit: &Commit) -> Result<()> {
        writeln!(
            self.out,
            "{COMMIT_PREFIX}{}|{}|{}|{}|{}",
            commit.sha,
            commit.author.name,
            commit.author.email,
            commit.timestamp.format(TIMESTAMP_FORMAT),
            commit.message
        )?;
        for change in &commit.files {
            writeln!(self.out, "{}\t{}", change.churn, change.path)?;
        }
        self.commits += 1;
        self.changes += commit.files.len();
        Ok(())
    }

    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn changes(&self) -> usize {
        self.changes
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

pub fn parse_history<R: BufRead>(reader: R) -> Result<Vec<LoggedCommit>> {
    let mut commits: Vec<LoggedCommit> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix(COMMIT_PREFIX) {
            commits.push(parse_header(line_no, header)?);
        } else {
            let change = parse_change(line_no, line)?;
            let current = commits
                .last_mut()
                .ok_or_else(|| HistgenError::parse(line_no, "file change before any COMMIT line"))?;
            current.files.push(change);
        }
    }

    Ok(commits)
}

fn parse_header(line: usize, header: &str) -> Result<LoggedCommit> {
    let mut parts = header.splitn(5, '|');
    let mut field = |name: &str| {
        parts
            .next()
            .ok_or_else(|| HistgenError::parse(line, format!("missing {name}")))
    };
    let sha = field("sha")?;
    let name = field("author name")?;
    let email = field("author email")?;
    let timestamp = field("timestamp")?;
    let message = field("message")?;

    if sha.is_empty() || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(HistgenError::parse(line, format!("invalid sha '{sha}'")));
    }

    Ok(LoggedCommit {
        line,
        sha: sha.to_string(),
        author: Author::new(name, email),
        timestamp: parse_timestamp(line, timestamp)?,
        message: message.to_string(),
        files: Vec::new(),
    })
}

fn parse_timestamp(line: usize, input: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT) {
        return Ok(dt);
    }
    // Accept offsets and fractional seconds from hand-edited fixtures.
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.naive_utc())
        .map_err(|_| HistgenError::parse(line, format!("invalid timestamp '{input}'")))
}

fn parse_change(line: usize, text: &str) -> Result<FileChange> {
    let mut parts = text.splitn(3, '\t');
    let (added, deleted, path) = match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(d), Some(p)) if !p.is_empty() => (a, d, p),
        _ => {
            return Err(HistgenError::parse(
                line,
                "expected '<added>\\t<deleted>\\t<path>'",
            ))
        }
    };

    let churn = match (added, deleted) {
        ("-", "-") => Churn::Binary,
        ("-", _) | (_, "-") => {
            return Err(HistgenError::parse(line, "churn mixes '-' and a line count"))
        }
        (a, d) => Churn::Lines {
            added: parse_count(line, a)?,
            deleted: parse_count(line, d)?,
        },
    };

    Ok(FileChange {
        path: path.to_string(),
        churn,
    })
}

fn parse_count(line: usize, value: &str) -> Result<u32> {
    value
        .parse()
        .map_err(|_| HistgenError::parse(line, format!("invalid line count '{value}'")))
}
