use crate::config::GeneratorConfig;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::history::HistoryWriter;
use crate::model::{Commit, CommitKind, GenerationSummary, SCHEMA_VERSION};
use crate::synth::CommitSynthesizer;
use crate::timeline::Clock;
use chrono::{NaiveDateTime, Utc};
use indicatif::ProgressBar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::io::Write;
use tracing::info;

/// Owns every piece of state for one generation run: the seeded RNG, the
/// corpus and the clock. Build one per run.
pub struct HistoryGenerator {
    seed: u64,
    rng: StdRng,
    corpus: Corpus,
    clock: Clock,
    num_commits: usize,
    index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub commits: usize,
    pub file_changes: usize,
    pub kinds: BTreeMap<CommitKind, usize>,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
}

impl RunStats {
    fn record(&mut self, commit: &Commit) {
        self.commits += 1;
        self.file_changes += commit.files.len();
        *self.kinds.entry(commit.kind).or_insert(0) += 1;
        self.first_timestamp.get_or_insert(commit.timestamp);
        self.last_timestamp = Some(commit.timestamp);
    }
}

impl HistoryGenerator {
    /// Without a configured seed one is drawn from the thread RNG and logged,
    /// so any run can be replayed.
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);
        let corpus = Corpus::build(&mut rng, config.feature_count)?;

        info!(
            seed,
            files = corpus.files().len(),
            features = corpus.features().len(),
            commits = config.num_commits,
            "Starting history generation"
        );

        Ok(Self {
            seed,
            rng,
            corpus,
            clock: Clock::new(config.start),
            num_commits: config.num_commits,
            index: 0,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn num_commits(&self) -> usize {
        self.num_commits
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn next_commit(&mut self) -> Result<Commit> {
        let timestamp = self.clock.advance(&mut self.rng)?;
        let commit =
            CommitSynthesizer::new(&self.corpus).synthesize(&mut self.rng, self.index, timestamp)?;
        self.index += 1;
        Ok(commit)
    }

    /// Generate the remaining commits, appending each one to `writer` as soon
    /// as it exists.
    pub fn run<W: Write>(
        &mut self,
        writer: &mut HistoryWriter<W>,
        pb: &ProgressBar,
    ) -> Result<RunStats> {
        let mut stats = RunStats::default();
        while self.index < self.num_commits {
            let commit = self.next_commit()?;
            writer.write_commit(&commit)?;
            stats.record(&commit);
            pb.inc(1);
        }
        info!(
            commits = stats.commits,
            file_changes = stats.file_changes,
            "History generation finished"
        );
        Ok(stats)
    }

    /// Run to completion into `out` without progress output.
    pub fn write_all<W: Write>(&mut self, out: W) -> Result<W> {
        let mut writer = HistoryWriter::new(out);
        self.run(&mut writer, &ProgressBar::hidden())?;
        writer.finish()
    }

    pub fn summarize(&self, stats: RunStats, output_path: &str) -> GenerationSummary {
        GenerationSummary {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            output_path: output_path.to_string(),
            seed: self.seed,
            commits: stats.commits,
            unique_files: self.corpus.files().len(),
            features: self.corpus.features().len(),
            file_changes: stats.file_changes,
            first_timestamp: stats.first_timestamp,
            last_timestamp: stats.last_timestamp,
            kinds: stats.kinds,
        }
    }
}
