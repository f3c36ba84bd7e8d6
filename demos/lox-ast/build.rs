use std::path::Path;

use astgen::{EmissionStyle, Emitter, SyntaxKind};
use astgen_grammar::Grammar;

fn main() {
    println!("cargo:rerun-if-changed=grammar.toml");

    let out_dir = std::env::var("OUT_DIR").unwrap();
    let grammar = Grammar::load(Path::new("grammar.toml")).unwrap();

    let emitter = Emitter::builder()
        .syntax(SyntaxKind::Rust)
        .style(EmissionStyle::Both)
        .build();
    for outcome in emitter.emit_grammar(&grammar, Path::new(&out_dir)) {
        if let Err(e) = outcome.result {
            panic!("failed to generate {}: {e}", outcome.base);
        }
    }
}
