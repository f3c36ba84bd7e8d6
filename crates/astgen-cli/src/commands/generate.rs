//! Generate command - writes one source file per base type.

use std::path::PathBuf;

use anyhow::anyhow;

use crate::args::GrammarArgs;
use crate::config::Settings;
use crate::util::{Exit, config_error, print_error};

#[derive(clap::Args)]
pub struct Args {
    /// Directory the generated files are written to. It must already exist
    pub target_dir: PathBuf,

    #[command(flatten)]
    pub grammar: GrammarArgs,
}

pub fn run(args: Args) -> Exit {
    if !args.target_dir.is_dir() {
        return config_error(&anyhow!(
            "target directory {} does not exist or is not a directory",
            args.target_dir.display()
        ));
    }
    let settings = match Settings::resolve(&args.grammar) {
        Ok(settings) => settings,
        Err(e) => return config_error(&e),
    };

    let outcomes = settings
        .emitter
        .emit_grammar(&settings.grammar, &args.target_dir);
    for outcome in &outcomes {
        match &outcome.result {
            Ok(path) => println!("generated {}", path.display()),
            Err(e) => print_error(e),
        }
    }

    let exit = Exit::from_errors(outcomes.iter().filter_map(|o| o.result.as_ref().err()));
    if exit == Exit::Success {
        println!("generated code successfully.");
    }
    exit
}
