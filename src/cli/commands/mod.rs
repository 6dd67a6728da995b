//! CLI command implementations.

mod config;
mod doctor;
mod search;
mod serve;
mod transcript;

pub use config::run_config;
pub use doctor::run_doctor;
pub use search::run_search;
pub use serve::run_serve;
pub use transcript::run_transcript;

/// Exit status when the tool answered with an error-shaped response.
const FAILURE_EXIT_CODE: i32 = 1;
