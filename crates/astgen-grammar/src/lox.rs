//! The Lox grammar, used when no description file is given.
//!
//! Types are written for the C# backend.

use crate::{BaseTypeSpec, Grammar};

pub fn grammar() -> Grammar {
    Grammar::new(vec![expr(), stmt()])
}

pub fn expr() -> BaseTypeSpec {
    BaseTypeSpec::new("Expr")
        .import("System.Collections.Generic")
        .variant("Assign", [("Token", "Name"), ("Expr", "Value")])
        .variant(
            "Binary",
            [("Expr", "Left"), ("Token", "Operator"), ("Expr", "Right")],
        )
        .variant(
            "Call",
            [("Expr", "Callee"), ("Token", "Paren"), ("List<Expr>", "Arguments")],
        )
        .variant("Get", [("Expr", "Object"), ("Token", "Name")])
        .variant("Grouping", [("Expr", "Expression")])
        .variant("Literal", [("object", "Value")])
        .variant(
            "Logical",
            [("Expr", "Left"), ("Token", "Operator"), ("Expr", "Right")],
        )
        .variant(
            "Set",
            [("Expr", "Object"), ("Token", "Name"), ("Expr", "Value")],
        )
        .variant("Super", [("Token", "Keyword"), ("Token", "Method")])
        .variant("This", [("Token", "Keyword")])
        .variant("Unary", [("Token", "Operator"), ("Expr", "Right")])
        .variant("Variable", [("Token", "Name")])
}

pub fn stmt() -> BaseTypeSpec {
    BaseTypeSpec::new("Stmt")
        .import("System.Collections.Generic")
        .variant("Block", [("List<Stmt>", "Statements")])
        .variant("Break", [("Token", "Keyword")])
        .variant(
            "Class",
            [
                ("Token", "Name"),
                ("VariableExpr", "SuperClass"),
                ("List<FunctionStmt>", "Methods"),
            ],
        )
        .variant("Expression", [("Expr", "Expression")])
        .variant("Execute", [("Token", "Keyword"), ("Token", "Path")])
        .variant(
            "Function",
            [("Token", "Name"), ("List<Token>", "Parameters"), ("List<Stmt>", "Body")],
        )
        .variant(
            "If",
            [("Expr", "Condition"), ("Stmt", "ThenBranch"), ("Stmt", "ElseBranch")],
        )
        .variant("Print", [("Expr", "Expression")])
        .variant("Return", [("Token", "Keyword"), ("Expr", "Value")])
        .variant("Var", [("Token", "Name"), ("Expr", "Initializer")])
        .variant("While", [("Expr", "Condition"), ("Stmt", "Body")])
}
