use std::fmt::Display;

use astgen::EmitError;
use nu_ansi_term::Color;
use tracing_subscriber::EnvFilter;

/// Process exit status, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Exit {
    Success,
    /// Some base types failed validation; everything else was written.
    Schema,
    /// At least one file could not be written.
    Io,
    /// Nothing was attempted: bad flags, configuration or grammar file.
    Config,
}

impl Exit {
    pub fn code(self) -> i32 {
        match self {
            Exit::Success => 0,
            Exit::Config => 2,
            Exit::Io => 3,
            Exit::Schema => 4,
        }
    }

    /// Status for a run that ended with the given per-artifact errors.
    /// Write failures take precedence over schema errors.
    pub fn from_errors<'a>(errors: impl IntoIterator<Item = &'a EmitError>) -> Self {
        errors
            .into_iter()
            .map(|error| if error.is_io() { Exit::Io } else { Exit::Schema })
            .max()
            .unwrap_or(Exit::Success)
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn print_error(error: impl Display) {
    eprintln!("{}", Color::Red.paint(format!("Error: {error}")));
}

/// Report a failure that happens before any artifact is attempted.
pub fn config_error(error: &anyhow::Error) -> Exit {
    print_error(format!("{error:#}"));
    Exit::Config
}
