//! Shared plumbing for the fixture binaries.

mod logger;
pub use logger::LogArgs;

mod utils;
pub use utils::{print_error, print_graph};
