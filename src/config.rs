//! Fixed generation parameters.
//!
//! Everything that shapes the synthetic history lives here as a constant.
//! Only the seed and the output location can be chosen at run time.

use chrono::{NaiveDate, NaiveDateTime};

pub const NUM_COMMITS: usize = 10_000;
pub const FEATURE_COUNT: usize = 50;
pub const DEFAULT_OUTPUT: &str = "git-history.txt";

pub const AUTHORS: &[(&str, &str)] = &[
    ("Alice", "alice@company.com"),
    ("Bob", "bob@company.com"),
    ("Charlie", "charlie@company.com"),
    ("Dave", "dave@company.com"),
    ("Eve", "eve@company.com"),
    ("Frank", "frank@company.com"),
    ("Grace", "grace@company.com"),
    ("Heidi", "heidi@company.com"),
    ("Ivan", "ivan@company.com"),
    ("Judy", "judy@company.com"),
    ("Mallory", "mallory@company.com"),
    ("Trent", "trent@company.com"),
    ("Walter", "walter@company.com"),
    ("Peggy", "peggy@company.com"),
    ("Sybil", "sybil@company.com"),
];

pub const DIRS: &[&str] = &[
    "src/components/core",
    "src/components/ui",
    "src/components/layout",
    "src/components/forms",
    "src/components/tables",
    "src/components/charts",
    "src/hooks",
    "src/utils",
    "src/services",
    "src/api",
    "src/store",
    "src/pages/dashboard",
    "src/pages/settings",
    "src/pages/users",
    "src/pages/reports",
    "src/pages/auth",
    "src/styles/themes",
    "src/styles/mixins",
    "public/assets/images",
    "public/assets/icons",
    "public/assets/fonts",
    "tests/unit",
    "tests/e2e",
    "tests/integration",
    "docs/api",
    "docs/guides",
    "docs/architecture",
    "config",
    "scripts",
    "tools/build",
    "tools/deploy",
];

/// Files per directory, inclusive.
pub const FILES_PER_DIR: (usize, usize) = (10, 50);

/// Extensions that always report `-` churn.
pub const BINARY_EXTENSIONS: &[&str] = &["png", "jpg", "ico", "svg"];

/// Extension set for a directory, keyed by its first path segment.
pub fn extensions_for(dir: &str) -> &'static [&'static str] {
    let root = dir.split('/').next().unwrap_or(dir);
    match root {
        "src" => &["ts", "tsx", "css", "scss", "less"],
        "public" => &["png", "jpg", "svg", "ico", "json"],
        "tests" => &["ts", "tsx", "test.ts", "spec.ts"],
        "docs" => &["md", "txt"],
        "config" => &["json", "js", "ts", "yml"],
        "scripts" => &["js", "sh", "py", "rb"],
        "tools" => &["js", "ts", "go", "rs"],
        _ => &["txt"],
    }
}

pub fn start_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub num_commits: usize,
    pub feature_count: usize,
    pub start: NaiveDateTime,
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_commits(mut self, num_commits: usize) -> Self {
        self.num_commits = num_commits;
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_commits: NUM_COMMITS,
            feature_count: FEATURE_COUNT,
            start: start_date(),
            seed: None,
        }
    }
}
