pub mod markdown;

pub use markdown::{MarkdownReport, SprintReport};
