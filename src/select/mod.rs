//! Element selection: category filtering and metadata projection.

mod filter;
mod project;

pub use filter::filter;
pub use project::project;
