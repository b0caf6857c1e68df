//! The static world a history is drawn from: authors, the file pool and
//! feature groupings of files that tend to change together.

use crate::config::{extensions_for, AUTHORS, DIRS, FILES_PER_DIR};
use crate::error::{HistgenError, Result};
use crate::model::Author;
use crate::util::hex_token;
use rand::seq::{index, SliceRandom};
use rand::Rng;
use tracing::debug;

/// Feature sizes, inclusive.
pub const FEATURE_SIZE: (usize, usize) = (5, 20);

/// A set of pool indices that are edited together. No duplicates within one feature.
#[derive(Debug, Clone)]
pub struct Feature {
    files: Vec<usize>,
}

impl Feature {
    pub fn files(&self) -> &[usize] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Corpus {
    authors: Vec<Author>,
    files: Vec<String>,
    features: Vec<Feature>,
}

impl Corpus {
    pub fn build<R: Rng>(rng: &mut R, feature_count: usize) -> Result<Self> {
        let authors = AUTHORS
            .iter()
            .map(|(name, email)| Author::new(*name, *email))
            .collect();
        let files = build_file_pool(rng, DIRS);
        let features = partition_features(rng, files.len(), feature_count)?;

        debug!(
            files = files.len(),
            features = features.len(),
            "Corpus built"
        );

        Ok(Self {
            authors,
            files,
            features,
        })
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn path(&self, index: usize) -> &str {
        &self.files[index]
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.iter().any(|f| f == path)
    }

    pub fn pick_author<R: Rng>(&self, rng: &mut R) -> &Author {
        &self.authors[rng.gen_range(0..self.authors.len())]
    }

    pub fn pick_feature<R: Rng>(&self, rng: &mut R) -> Option<&Feature> {
        self.features.choose(rng)
    }
}

pub fn build_file_pool<R: Rng>(rng: &mut R, dirs: &[&str]) -> Vec<String> {
    let (min, max) = FILES_PER_DIR;
    let mut files = Vec::with_capacity(dirs.len() * max);
    for dir in dirs {
        let exts = extensions_for(dir);
        let count = rng.gen_range(min..=max);
        for _ in 0..count {
            let name = hex_token(rng, 8);
            let ext = exts[rng.gen_range(0..exts.len())];
            files.push(format!("{dir}/File_{name}.{ext}"));
        }
    }
    files
}

pub fn partition_features<R: Rng>(
    rng: &mut R,
    pool_len: usize,
    count: usize,
) -> Result<Vec<Feature>> {
    let (min, max) = FEATURE_SIZE;
    (0..count)
        .map(|_| {
            let size = rng.gen_range(min..=max);
            sample_indices(rng, pool_len, size).map(|files| Feature { files })
        })
        .collect()
}

/// Draw `amount` distinct indices from `0..population`.
pub fn sample_indices<R: Rng>(rng: &mut R, population: usize, amount: usize) -> Result<Vec<usize>> {
    if amount > population {
        return Err(HistgenError::Sample {
            requested: amount,
            available: population,
        });
    }
    Ok(index::sample(rng, population, amount).into_vec())
}
