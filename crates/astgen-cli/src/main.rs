mod args;
mod commands {
    automod::dir!(pub "src/commands");
}
mod config;
mod util;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "astgen",
    version,
    about = "Generate AST node types and visitors from a grammar"
)]
struct Cli {
    /// Log what is rendered and written (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one source file per base type into a directory
    Generate(commands::generate::Args),
    /// Validate and render every base type without writing anything
    Check(commands::check::Args),
}

fn main() {
    let cli = Cli::parse();
    util::init_logging(cli.verbose);

    let exit = match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Check(args) => commands::check::run(args),
    };
    std::process::exit(exit.code());
}
