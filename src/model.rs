use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Author {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitKind {
    Feat,
    Fix,
    Refactor,
    Chore,
    Merge,
}

impl CommitKind {
    pub const ALL: [CommitKind; 5] = [
        CommitKind::Feat,
        CommitKind::Fix,
        CommitKind::Refactor,
        CommitKind::Chore,
        CommitKind::Merge,
    ];

    /// Map a uniform `[0, 1)` roll onto a kind using cumulative thresholds.
    pub fn from_roll(roll: f64) -> Self {
        if roll < 0.40 {
            CommitKind::Feat
        } else if roll < 0.70 {
            CommitKind::Fix
        } else if roll < 0.85 {
            CommitKind::Refactor
        } else if roll < 0.95 {
            CommitKind::Chore
        } else {
            CommitKind::Merge
        }
    }

    /// Expected share of commits of this kind.
    pub fn share(self) -> f64 {
        match self {
            CommitKind::Feat => 0.40,
            CommitKind::Fix => 0.30,
            CommitKind::Refactor => 0.15,
            CommitKind::Chore => 0.10,
            CommitKind::Merge => 0.05,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CommitKind::Feat => "feat",
            CommitKind::Fix => "fix",
            CommitKind::Refactor => "refactor",
            CommitKind::Chore => "chore",
            CommitKind::Merge => "merge",
        }
    }

    /// Recover the kind from a generated message such as `Commit 12: Fix bug 3fa2`.
    pub fn from_message(message: &str) -> Option<Self> {
        let body = message.split_once(": ").map_or(message, |(_, rest)| rest);
        if body.starts_with("Add feature") {
            Some(CommitKind::Feat)
        } else if body.starts_with("Fix bug") {
            Some(CommitKind::Fix)
        } else if body.starts_with("Major refactoring") {
            Some(CommitKind::Refactor)
        } else if body.starts_with("Update docs/configs") {
            Some(CommitKind::Chore)
        } else if body.starts_with("Merge branch") {
            Some(CommitKind::Merge)
        } else {
            None
        }
    }
}

impl fmt::Display for CommitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lines touched in one file by one commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Churn {
    Binary,
    Lines { added: u32, deleted: u32 },
}

impl fmt::Display for Churn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Churn::Binary => write!(f, "-\t-"),
            Churn::Lines { added, deleted } => write!(f, "{added}\t{deleted}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub churn: Churn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub author: Author,
    pub timestamp: NaiveDateTime,
    pub kind: CommitKind,
    pub message: String,
    pub files: Vec<FileChange>,
}

/// A commit as read back from an artifact; the kind is inferred from the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedCommit {
    pub line: usize,
    pub sha: String,
    pub author: Author,
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub files: Vec<FileChange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub output_path: String,
    pub seed: u64,
    pub commits: usize,
    pub unique_files: usize,
    pub features: usize,
    pub file_changes: usize,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
    pub kinds: BTreeMap<CommitKind, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub commits: usize,
    pub unique_files: usize,
    pub file_changes: usize,
    pub binary_changes: usize,
    pub lines_added: u64,
    pub lines_deleted: u64,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
    pub kinds: BTreeMap<CommitKind, usize>,
    pub unclassified: usize,
    pub violations: Vec<String>,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_thresholds() {
        assert_eq!(CommitKind::from_roll(0.0), CommitKind::Feat);
        assert_eq!(CommitKind::from_roll(0.3999), CommitKind::Feat);
        assert_eq!(CommitKind::from_roll(0.40), CommitKind::Fix);
        assert_eq!(CommitKind::from_roll(0.70), CommitKind::Refactor);
        assert_eq!(CommitKind::from_roll(0.85), CommitKind::Chore);
        assert_eq!(CommitKind::from_roll(0.95), CommitKind::Merge);
        assert_eq!(CommitKind::from_roll(0.9999), CommitKind::Merge);
    }

    #[test]
    fn shares_sum_to_one() {
        let total: f64 = CommitKind::ALL.iter().map(|k| k.share()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn kind_from_message() {
        assert_eq!(CommitKind::from_message("Commit 0: Add feature 1a2b"), Some(CommitKind::Feat));
        assert_eq!(CommitKind::from_message("Commit 9: Fix bug ffff"), Some(CommitKind::Fix));
        assert_eq!(CommitKind::from_message("Commit 3: Major refactoring"), Some(CommitKind::Refactor));
        assert_eq!(CommitKind::from_message("Commit 4: Update docs/configs"), Some(CommitKind::Chore));
        assert_eq!(
            CommitKind::from_message("Commit 5: Merge branch 'feature/abcdef'"),
            Some(CommitKind::Merge)
        );
        assert_eq!(CommitKind::from_message("initial import"), None);
    }

    #[test]
    fn churn_renders_as_numstat() {
        assert_eq!(Churn::Binary.to_string(), "-\t-");
        assert_eq!(Churn::Lines { added: 12, deleted: 0 }.to_string(), "12\t0");
    }
}
