use astgen::{EmissionStyle, Emitter, RenderContext, SchemaError, SyntaxKind};
use astgen_grammar::{BaseTypeSpec, Grammar, lox};
use pretty_assertions::assert_eq;
use quote::ToTokens as _;

fn binary_literal() -> BaseTypeSpec {
    BaseTypeSpec::new("Expr")
        .import("crate::token::Token")
        .variant(
            "Binary",
            [("Expr", "Left"), ("Token", "Operator"), ("Expr", "Right")],
        )
        .variant("Literal", [("String", "Value")])
}

fn emitter(style: EmissionStyle) -> Emitter {
    Emitter::builder()
        .syntax(SyntaxKind::Rust)
        .style(style)
        .build()
}

fn render(spec: &BaseTypeSpec, style: EmissionStyle) -> syn::File {
    let source = emitter(style)
        .render(spec, &RenderContext::for_base(spec))
        .unwrap();
    syn::parse_file(&source).unwrap()
}

fn traits(file: &syn::File) -> Vec<(String, Vec<String>)> {
    file.items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Trait(item) => Some((
                item.ident.to_string(),
                item.items
                    .iter()
                    .filter_map(|item| match item {
                        syn::TraitItem::Fn(f) => Some(f.sig.ident.to_string()),
                        _ => None,
                    })
                    .collect(),
            )),
            _ => None,
        })
        .collect()
}

fn find_struct<'a>(file: &'a syn::File, name: &str) -> &'a syn::ItemStruct {
    file.items
        .iter()
        .find_map(|item| match item {
            syn::Item::Struct(item) if item.ident == name => Some(item),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no struct {name}"))
}

fn find_enum<'a>(file: &'a syn::File, name: &str) -> &'a syn::ItemEnum {
    file.items
        .iter()
        .find_map(|item| match item {
            syn::Item::Enum(item) if item.ident == name => Some(item),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no enum {name}"))
}

fn inherent_methods(file: &syn::File, self_ty: &str) -> Vec<String> {
    file.items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Impl(item) if item.trait_.is_none() => Some(item),
            _ => None,
        })
        .filter(|item| item.self_ty.to_token_stream().to_string() == self_ty)
        .flat_map(|item| {
            item.items.iter().filter_map(|item| match item {
                syn::ImplItem::Fn(f) => Some(f.sig.ident.to_string()),
                _ => None,
            })
        })
        .collect()
}

fn field_types(item: &syn::ItemStruct) -> Vec<(String, String)> {
    item.fields
        .iter()
        .map(|field| {
            (
                field.ident.as_ref().unwrap().to_string(),
                field.ty.to_token_stream().to_string(),
            )
        })
        .collect()
}

#[test]
fn test_starts_with_header() {
    let source = emitter(EmissionStyle::Both)
        .render(&binary_literal(), &RenderContext::for_base(&binary_literal()))
        .unwrap();
    assert!(source.starts_with("// @generated by astgen from Expr. Do not edit by hand.\n\n"));
}

#[test]
fn test_binary_literal_both() {
    let file = render(&binary_literal(), EmissionStyle::Both);

    let visits = vec![
        "visit_binary_expr".to_string(),
        "visit_literal_expr".to_string(),
    ];
    assert_eq!(
        traits(&file),
        vec![
            ("ExprVisitor".to_string(), visits.clone()),
            ("ExprTypedVisitor".to_string(), visits),
        ]
    );

    let expr = find_enum(&file, "Expr");
    let variants = expr
        .variants
        .iter()
        .map(|v| v.ident.to_string())
        .collect::<Vec<_>>();
    assert_eq!(variants, ["Binary", "Literal"]);
    assert_eq!(inherent_methods(&file, "Expr"), ["accept", "accept_typed"]);

    let binary = find_struct(&file, "BinaryExpr");
    assert_eq!(
        field_types(binary),
        vec![
            ("left".to_string(), quote::quote!(Box<Expr>).to_string()),
            ("operator".to_string(), quote::quote!(Token).to_string()),
            ("right".to_string(), quote::quote!(Box<Expr>).to_string()),
        ]
    );
    assert!(
        binary
            .fields
            .iter()
            .all(|field| matches!(field.vis, syn::Visibility::Inherited))
    );
    assert_eq!(
        inherent_methods(&file, "BinaryExpr"),
        ["new", "left", "operator", "right", "accept", "accept_typed"]
    );
    assert_eq!(
        inherent_methods(&file, "LiteralExpr"),
        ["new", "value", "accept", "accept_typed"]
    );
}

#[test]
fn test_plain_has_no_visitors() {
    let file = render(&binary_literal(), EmissionStyle::Plain);
    assert!(traits(&file).is_empty());
    assert!(inherent_methods(&file, "Expr").is_empty());
    assert_eq!(
        inherent_methods(&file, "BinaryExpr"),
        ["new", "left", "operator", "right"]
    );
}

#[test]
fn test_single_contract_styles() {
    let untyped = render(&binary_literal(), EmissionStyle::Untyped);
    let names = traits(&untyped).into_iter().map(|(name, _)| name).collect::<Vec<_>>();
    assert_eq!(names, ["ExprVisitor"]);
    assert_eq!(inherent_methods(&untyped, "Expr"), ["accept"]);

    let typed = render(&binary_literal(), EmissionStyle::Typed);
    let names = traits(&typed).into_iter().map(|(name, _)| name).collect::<Vec<_>>();
    assert_eq!(names, ["ExprTypedVisitor"]);
    assert_eq!(inherent_methods(&typed, "LiteralExpr"), ["new", "value", "accept_typed"]);
}

#[test]
fn test_collections_and_optionals() {
    let stmt = BaseTypeSpec::new("Stmt")
        .variant("Block", [("List<Stmt>", "Statements")])
        .variant(
            "If",
            [("bool", "Condition"), ("Stmt", "ThenBranch"), ("Stmt?", "ElseBranch")],
        );
    let file = render(&stmt, EmissionStyle::Both);
    assert_eq!(
        field_types(find_struct(&file, "BlockStmt")),
        vec![("statements".to_string(), quote::quote!(Vec<Stmt>).to_string())]
    );
    assert_eq!(
        field_types(find_struct(&file, "IfStmt")),
        vec![
            ("condition".to_string(), quote::quote!(bool).to_string()),
            ("then_branch".to_string(), quote::quote!(Box<Stmt>).to_string()),
            ("else_branch".to_string(), quote::quote!(Option<Box<Stmt>>).to_string()),
        ]
    );
}

#[test]
fn test_empty_variant_list() {
    let file = render(&BaseTypeSpec::new("Expr"), EmissionStyle::Both);
    assert!(find_enum(&file, "Expr").variants.is_empty());
    assert_eq!(
        traits(&file),
        vec![
            ("ExprVisitor".to_string(), Vec::<String>::new()),
            ("ExprTypedVisitor".to_string(), Vec::<String>::new()),
        ]
    );
}

#[test]
fn test_grammar_context_boxes_other_base_types() {
    let expr = BaseTypeSpec::new("Expr").variant("Literal", [("f64", "Value")]);
    let stmt = BaseTypeSpec::new("Stmt")
        .import("super::expr::Expr")
        .variant("Print", [("Expr", "Expression")]);
    let grammar = Grammar::new(vec![expr, stmt]);
    let ctx = RenderContext::from_grammar(&grammar);

    let source = emitter(EmissionStyle::Both)
        .render(grammar.get("Stmt").unwrap(), &ctx)
        .unwrap();
    let file = syn::parse_file(&source).unwrap();
    assert_eq!(
        field_types(find_struct(&file, "PrintStmt")),
        vec![("expression".to_string(), quote::quote!(Box<Expr>).to_string())]
    );
}

#[test]
fn test_csharp_imports_are_rejected() {
    let spec = lox::expr();
    let error = emitter(EmissionStyle::Both)
        .render(&spec, &RenderContext::for_base(&spec))
        .unwrap_err();
    assert!(matches!(
        error,
        SchemaError::InvalidImport { import, .. } if import == "System.Collections.Generic"
    ));
}

#[test]
fn test_invalid_field_type() {
    let spec = BaseTypeSpec::new("Expr").variant("Map", [("Dictionary<string,", "Entries")]);
    let error = emitter(EmissionStyle::Both)
        .render(&spec, &RenderContext::for_base(&spec))
        .unwrap_err();
    assert!(matches!(error, SchemaError::InvalidType { field, .. } if field == "Entries"));
}

#[test]
fn test_keyword_field_is_rejected() {
    let spec = BaseTypeSpec::new("Expr").variant("Cast", [("String", "Type")]);
    let error = emitter(EmissionStyle::Both)
        .render(&spec, &RenderContext::for_base(&spec))
        .unwrap_err();
    assert_eq!(
        error,
        SchemaError::ReservedField {
            base: "Expr".to_string(),
            variant: "Cast".to_string(),
            field: "Type".to_string(),
            reserved: "type".to_string(),
        }
    );
}

#[test]
fn test_variants_sharing_a_visit_method_are_rejected() {
    let spec = BaseTypeSpec::new("Expr")
        .variant("Abc", [("String", "Value")])
        .variant("ABC", [("String", "Value")]);
    let error = emitter(EmissionStyle::Both)
        .render(&spec, &RenderContext::for_base(&spec))
        .unwrap_err();
    assert_eq!(
        error,
        SchemaError::DispatchCollision {
            base: "Expr".to_string(),
            variant: "ABC".to_string(),
            other: "Abc".to_string(),
            method: "visit_abc_expr".to_string(),
        }
    );
    assert!(Emitter::default().render(&spec, &RenderContext::for_base(&spec)).is_ok());
}

#[test]
fn test_prelude_type_names_are_rejected() {
    let boxed = BaseTypeSpec::new("Box").variant("Item", [("String", "Value")]);
    let split = BaseTypeSpec::new("ec").variant("V", [("String", "Value")]);
    for (spec, name) in [(boxed, "Box"), (split, "Vec")] {
        let error = emitter(EmissionStyle::Plain)
            .render(&spec, &RenderContext::for_base(&spec))
            .unwrap_err();
        assert_eq!(
            error,
            SchemaError::ReservedType {
                base: spec.name.clone(),
                name: name.to_string(),
            }
        );
    }
}

#[test]
fn test_custom_derives() {
    let file = syn::parse_file(
        &Emitter::builder()
            .syntax(SyntaxKind::Rust)
            .derives(vec!["Debug".to_string(), "serde::Serialize".to_string()])
            .build()
            .render(&binary_literal(), &RenderContext::for_base(&binary_literal()))
            .unwrap(),
    )
    .unwrap();
    let attrs = find_struct(&file, "LiteralExpr")
        .attrs
        .iter()
        .map(|attr| attr.to_token_stream().to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        attrs,
        [quote::quote!(#[derive(Debug, serde::Serialize)]).to_string()]
    );
}

#[test]
fn test_emit_uses_snake_case_file() {
    let dir = tempfile::tempdir().unwrap();
    let spec = BaseTypeSpec::new("TypeExpr").variant("Named", [("String", "Name")]);
    let path = emitter(EmissionStyle::Both)
        .emit(&spec, &RenderContext::for_base(&spec), dir.path())
        .unwrap();
    assert_eq!(path, dir.path().join("type_expr.rs"));
    syn::parse_file(&std::fs::read_to_string(path).unwrap()).unwrap();
}
