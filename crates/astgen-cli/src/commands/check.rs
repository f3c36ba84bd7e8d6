//! Check command - validates and renders every base type in memory.

use nu_ansi_term::Color;

use crate::args::GrammarArgs;
use crate::config::Settings;
use crate::util::{Exit, config_error, print_error};

#[derive(clap::Args)]
pub struct Args {
    #[command(flatten)]
    pub grammar: GrammarArgs,
}

pub fn run(args: Args) -> Exit {
    let settings = match Settings::resolve(&args.grammar) {
        Ok(settings) => settings,
        Err(e) => return config_error(&e),
    };

    let mut failed = 0;
    let outcomes = settings.emitter.render_grammar(&settings.grammar);
    for outcome in &outcomes {
        match &outcome.result {
            Ok(_) => println!(
                "{} {} ({})",
                Color::Green.bold().paint("✓"),
                outcome.base,
                outcome.file
            ),
            Err(e) => {
                failed += 1;
                print_error(e);
            }
        }
    }

    if failed == 0 {
        println!("{} base types are valid", outcomes.len());
        Exit::Success
    } else {
        eprintln!(
            "{}",
            Color::Red.paint(format!("{failed} of {} base types failed", outcomes.len()))
        );
        Exit::Schema
    }
}
