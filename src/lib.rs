pub mod check;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod generate;
pub mod history;
pub mod model;
pub mod synth;
pub mod timeline;
pub mod util;

pub use config::GeneratorConfig;
pub use error::{HistgenError, Result};
pub use generate::HistoryGenerator;
