//! The Lox syntax tree, generated by `astgen` from `grammar.toml`.

pub mod printer;
pub mod token;

pub mod expr {
    include!(concat!(env!("OUT_DIR"), "/expr.rs"));
}

pub mod stmt {
    include!(concat!(env!("OUT_DIR"), "/stmt.rs"));
}
