//! Command implementations for fitclock.
//!
//! Each command returns the text to print; `main` does the printing.

mod exercise;
mod history;
mod plan;
mod profile;
mod workout;

pub use exercise::exercise;
pub use history::history;
pub use plan::plan;
pub use profile::profile;
pub use workout::workout;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, OutputFormat};
use crate::config::{validate_weight, Config, Paths};
use crate::error::FitError;

/// Everything a command needs besides its arguments.
#[derive(Debug, Clone)]
pub struct Context {
    pub paths: Paths,
    pub config: Config,
    pub format: OutputFormat,
}

impl Context {
    #[must_use]
    pub const fn new(paths: Paths, config: Config, format: OutputFormat) -> Self {
        Self {
            paths,
            config,
            format,
        }
    }

    /// Body weight for this invocation: the override if given, else the profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the weight is out of range.
    pub fn weight_kg(&self, weight_override: Option<f64>) -> Result<f64, FitError> {
        let weight_kg = weight_override.unwrap_or(self.config.profile.weight_kg);
        validate_weight(weight_kg)?;
        Ok(weight_kg)
    }
}

/// Generate shell completions.
#[must_use]
pub fn completions(shell: Shell) -> String {
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut Cli::command(), "fitclock", &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
