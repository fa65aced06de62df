pub mod generator;
pub mod stats;

pub use generator::{generate_report, render_summary};
pub use stats::{category_summary, CategorySummary};
