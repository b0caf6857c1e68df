pub mod exec;
pub mod generator;
pub mod output;

pub use exec::exec;
pub use generator::HistoryGenerator;
pub use output::{output_json, output_summary};
