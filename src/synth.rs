//! Commit content: kind, message, touched files and churn.

use crate::corpus::{sample_indices, Corpus};
use crate::error::{HistgenError, Result};
use crate::model::{Churn, Commit, CommitKind, FileChange};
use crate::util::{hex_token, is_binary_path, random_hex};
use chrono::NaiveDateTime;
use rand::Rng;

pub const WIDESPREAD_FIX_PROBABILITY: f64 = 0.2;
pub const SMALL_CHURN_PROBABILITY: f64 = 0.9;

pub struct CommitSynthesizer<'a> {
    corpus: &'a Corpus,
}

impl<'a> CommitSynthesizer<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self { corpus }
    }

    pub fn synthesize<R: Rng>(
        &self,
        rng: &mut R,
        index: usize,
        timestamp: NaiveDateTime,
    ) -> Result<Commit> {
        let sha = random_hex(rng);
        let author = self.corpus.pick_author(rng).clone();
        let kind = CommitKind::from_roll(rng.gen::<f64>());

        let (message, indices) = match kind {
            CommitKind::Feat => {
                let feature = self.corpus.pick_feature(rng).ok_or(HistgenError::Sample {
                    requested: 1,
                    available: 0,
                })?;
                let k = rng.gen_range(1..=feature.len().max(1));
                let picked = sample_indices(rng, feature.len(), k)?
                    .into_iter()
                    .map(|i| feature.files()[i])
                    .collect();
                (format!("Commit {index}: Add feature {}", hex_token(rng, 4)), picked)
            }
            CommitKind::Fix => {
                let k = if rng.gen_bool(WIDESPREAD_FIX_PROBABILITY) {
                    rng.gen_range(5..=15)
                } else {
                    rng.gen_range(1..=3)
                };
                let picked = self.sample_pool(rng, k)?;
                (format!("Commit {index}: Fix bug {}", hex_token(rng, 4)), picked)
            }
            CommitKind::Refactor => {
                let k = rng.gen_range(10..=80);
                (format!("Commit {index}: Major refactoring"), self.sample_pool(rng, k)?)
            }
            CommitKind::Chore => {
                let k = rng.gen_range(1..=5);
                (format!("Commit {index}: Update docs/configs"), self.sample_pool(rng, k)?)
            }
            CommitKind::Merge => {
                let message = format!(
                    "Commit {index}: Merge branch 'feature/{}'",
                    hex_token(rng, 6)
                );
                let k = rng.gen_range(2..=20);
                (message, self.sample_pool(rng, k)?)
            }
        };

        let files = indices
            .into_iter()
            .map(|i| {
                let path = self.corpus.path(i);
                FileChange {
                    path: path.to_string(),
                    churn: churn_for(rng, path),
                }
            })
            .collect();

        Ok(Commit {
            sha,
            author,
            timestamp,
            kind,
            message,
            files,
        })
    }

    fn sample_pool<R: Rng>(&self, rng: &mut R, k: usize) -> Result<Vec<usize>> {
        sample_indices(rng, self.corpus.files().len(), k)
    }
}

/// Most edits are small; one in ten is large.
pub fn churn_for<R: Rng>(rng: &mut R, path: &str) -> Churn {
    if is_binary_path(path) {
        return Churn::Binary;
    }
    if rng.gen_bool(SMALL_CHURN_PROBABILITY) {
        Churn::Lines {
            added: rng.gen_range(0..=50),
            deleted: rng.gen_range(0..=20),
        }
    } else {
        Churn::Lines {
            added: rng.gen_range(100..=1000),
            deleted: rng.gen_range(50..=500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::start_date;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn corpus(seed: u64) -> Corpus {
        let mut rng = StdRng::seed_from_u64(seed);
        Corpus::build(&mut rng, 50).unwrap()
    }

    #[test]
    fn binary_files_never_get_line_counts() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..100 {
            assert_eq!(churn_for(&mut rng, "public/assets/images/File_00000000.jpg"), Churn::Binary);
        }
    }

    #[test]
    fn text_churn_stays_in_one_of_two_bands() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut large = 0;
        for _ in 0..10_000 {
            match churn_for(&mut rng, "src/api/File_00000000.ts") {
                Churn::Lines { added, deleted } if added <= 50 && deleted <= 20 => {}
                Churn::Lines { added, deleted } => {
                    assert!((100..=1000).contains(&added));
                    assert!((50..=500).contains(&deleted));
                    large += 1;
                }
                Churn::Binary => panic!("text file reported binary churn"),
            }
        }
        assert!((700..=1300).contains(&large), "large edits: {large}");
    }

    #[test]
    fn file_counts_match_kind() {
        let corpus = corpus(23);
        let synth = CommitSynthesizer::new(&corpus);
        let mut rng = StdRng::seed_from_u64(24);
        for i in 0..2_000 {
            let commit = synth.synthesize(&mut rng, i, start_date()).unwrap();
            let n = commit.files.len();
            let ok = match commit.kind {
                CommitKind::Feat => (1..=20).contains(&n),
                CommitKind::Fix => (1..=3).contains(&n) || (5..=15).contains(&n),
                CommitKind::Refactor => (10..=80).contains(&n),
                CommitKind::Chore => (1..=5).contains(&n),
                CommitKind::Merge => (2..=20).contains(&n),
            };
            assert!(ok, "{} commit touched {n} files", commit.kind);
            assert_eq!(CommitKind::from_message(&commit.message), Some(commit.kind));
            assert!(commit.message.starts_with(&format!("Commit {i}: ")));
        }
    }

    #[test]
    fn feature_commits_stay_inside_one_feature() {
        let corpus = corpus(25);
        let synth = CommitSynthesizer::new(&corpus);
        let mut rng = StdRng::seed_from_u64(26);
        let features: Vec<HashSet<&str>> = corpus
            .features()
            .iter()
            .map(|f| f.files().iter().map(|&i| corpus.path(i)).collect())
            .collect();

        let mut seen = 0;
        for i in 0..1_000 {
            let commit = synth.synthesize(&mut rng, i, start_date()).unwrap();
            if commit.kind != CommitKind::Feat {
                continue;
            }
            seen += 1;
            let paths: HashSet<&str> = commit.files.iter().map(|f| f.path.as_str()).collect();
            assert!(features.iter().any(|f| paths.is_subset(f)));
        }
        assert!(seen > 0);
    }

    #[test]
    fn no_duplicate_paths_within_a_commit() {
        let corpus = corpus(27);
        let synth = CommitSynthesizer::new(&corpus);
        let mut rng = StdRng::seed_from_u64(28);
        for i in 0..500 {
            let commit = synth.synthesize(&mut rng, i, start_date()).unwrap();
            let unique: HashSet<_> = commit.files.iter().map(|f| &f.path).collect();
            assert_eq!(unique.len(), commit.files.len());
        }
    }

    #[test]
    fn merge_message_names_a_feature_branch() {
        let corpus = corpus(29);
        let synth = CommitSynthesizer::new(&corpus);
        let mut rng = StdRng::seed_from_u64(30);
        let merge = (0..1_000)
            .map(|i| synth.synthesize(&mut rng, i, start_date()).unwrap())
            .find(|c| c.kind == CommitKind::Merge)
            .unwrap();
        let branch = merge
            .message
            .split("'feature/")
            .nth(1)
            .and_then(|rest| rest.strip_suffix('\''))
            .unwrap();
        assert_eq!(branch.len(), 6);
    }
}
