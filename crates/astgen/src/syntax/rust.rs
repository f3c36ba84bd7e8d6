//! Rust backend.
//!
//! The base type becomes an enum with one tuple variant per production, and
//! each production gets its own struct. The visitor contract is kept: the
//! enum's `accept` matches exhaustively and forwards to the variant struct,
//! which calls the visitor method named after it.

use astgen_grammar::{BaseTypeSpec, FieldSpec, TypeRef, VariantSpec};
use convert_case::{Case, Casing as _};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::Syntax;
use crate::{EmissionStyle, RenderContext, SchemaError, SyntaxKind};

const KEYWORDS: &[&str] = &[
    "_", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try",
    "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Standard names the generated code uses unqualified.
const PRELUDE_TYPES: &[&str] = &["Box", "From", "Option", "Vec"];

/// Inherent methods every variant struct defines.
const METHODS: &[&str] = &["new", "accept", "accept_typed"];

#[derive(Debug, Clone)]
pub struct RustSyntax {
    derive: TokenStream,
}

impl RustSyntax {
    /// Create the backend with the derives put on every generated type.
    pub fn new<I, S>(derives: I) -> Result<Self, syn::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = derives
            .into_iter()
            .map(|derive| syn::parse_str::<syn::Path>(derive.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let derive = if paths.is_empty() {
            TokenStream::new()
        } else {
            quote!(#[derive(#(#paths),*)])
        };
        Ok(Self { derive })
    }

    /// File name of the module generated for `base`.
    pub fn module_file_name(base: &str) -> String {
        format!("{}.{}", Self::snake(base), SyntaxKind::Rust.extension())
    }

    fn snake(name: &str) -> String {
        name.to_case(Case::Snake)
    }

    fn visitor_ident(base: &str) -> Ident {
        format_ident!("{}Visitor", base)
    }

    fn typed_visitor_ident(base: &str) -> Ident {
        format_ident!("{}TypedVisitor", base)
    }

    fn visit_method(variant: &VariantSpec, base: &str) -> Ident {
        format_ident!("visit_{}", Self::snake(&variant.type_name(base)))
    }

    fn field(
        &self,
        spec: &BaseTypeSpec,
        variant: &VariantSpec,
        field: &FieldSpec,
        ctx: &RenderContext,
    ) -> Result<RustField, SchemaError> {
        let element_name = field.ty.element_name();
        let element = syn::parse_str::<syn::Type>(element_name).map_err(|error| {
            SchemaError::InvalidType {
                base: spec.name.clone(),
                variant: variant.name.clone(),
                field: field.name.clone(),
                ty: field.ty.to_string(),
                message: error.to_string(),
            }
        })?;
        let element = quote!(#element);
        let boxed = ctx.is_node(element_name);
        let ident = format_ident!("{}", Self::snake(&field.name));

        let init = if needs_conversion(&field.ty, boxed) {
            let conversion = conversion(&field.ty, quote!(#ident), boxed);
            quote!(#ident: #conversion)
        } else {
            quote!(#ident)
        };
        let (getter_ty, getter_body) = getter(&field.ty, &ident, &element, boxed);

        Ok(RustField {
            storage: storage_type(&field.ty, &element, boxed),
            param: value_type(&field.ty, &element),
            init,
            getter_ty,
            getter_body,
            ident,
        })
    }

    fn accept_methods(
        &self,
        spec: &BaseTypeSpec,
        variant: &VariantSpec,
        style: EmissionStyle,
    ) -> TokenStream {
        let visit = Self::visit_method(variant, &spec.name);
        let untyped = style.emits_untyped().then(|| {
            let visitor = Self::visitor_ident(&spec.name);
            quote! {
                pub fn accept<V: #visitor + ?Sized>(&self, visitor: &mut V) {
                    visitor.#visit(self)
                }
            }
        });
        let typed = style.emits_typed().then(|| {
            let visitor = Self::typed_visitor_ident(&spec.name);
            quote! {
                pub fn accept_typed<T, V: #visitor<T> + ?Sized>(&self, visitor: &mut V) -> T {
                    visitor.#visit(self)
                }
            }
        });
        quote!(#untyped #typed)
    }
}

struct RustField {
    ident: Ident,
    storage: TokenStream,
    param: TokenStream,
    init: TokenStream,
    getter_ty: TokenStream,
    getter_body: TokenStream,
}

/// Type as the caller sees it: constructor parameters, list elements.
fn value_type(ty: &TypeRef, element: &TokenStream) -> TokenStream {
    match ty {
        TypeRef::Named(_) => element.clone(),
        TypeRef::List(inner) => {
            let inner = value_type(inner, element);
            quote!(Vec<#inner>)
        }
        TypeRef::Optional(inner) => {
            let inner = value_type(inner, element);
            quote!(Option<#inner>)
        }
    }
}

/// Type as stored in the struct. Tree nodes are boxed unless a `Vec` already
/// provides the indirection.
fn storage_type(ty: &TypeRef, element: &TokenStream, boxed: bool) -> TokenStream {
    match ty {
        TypeRef::Named(_) if boxed => quote!(Box<#element>),
        TypeRef::Named(_) => element.clone(),
        TypeRef::List(_) => value_type(ty, element),
        TypeRef::Optional(inner) => {
            let inner = storage_type(inner, element, boxed);
            quote!(Option<#inner>)
        }
    }
}

fn needs_conversion(ty: &TypeRef, boxed: bool) -> bool {
    match ty {
        TypeRef::Named(_) => boxed,
        TypeRef::List(_) => false,
        TypeRef::Optional(inner) => needs_conversion(inner, boxed),
    }
}

fn conversion(ty: &TypeRef, expr: TokenStream, boxed: bool) -> TokenStream {
    match ty {
        TypeRef::Named(_) if boxed => quote!(Box::new(#expr)),
        TypeRef::Optional(inner) if matches!(inner.as_ref(), TypeRef::Named(_)) && boxed => {
            quote!(#expr.map(Box::new))
        }
        TypeRef::Optional(inner) if needs_conversion(inner, boxed) => {
            let inner = conversion(inner, quote!(value), boxed);
            quote!(#expr.map(|value| #inner))
        }
        _ => expr,
    }
}

fn getter(
    ty: &TypeRef,
    ident: &Ident,
    element: &TokenStream,
    boxed: bool,
) -> (TokenStream, TokenStream) {
    match ty {
        TypeRef::Named(_) => (quote!(&#element), quote!(&self.#ident)),
        TypeRef::List(inner) => {
            let inner = value_type(inner, element);
            (quote!(&[#inner]), quote!(&self.#ident))
        }
        TypeRef::Optional(inner) => match inner.as_ref() {
            TypeRef::Named(_) if boxed => {
                (quote!(Option<&#element>), quote!(self.#ident.as_deref()))
            }
            TypeRef::Named(_) => (quote!(Option<&#element>), quote!(self.#ident.as_ref())),
            TypeRef::List(list_inner) => {
                let list_inner = value_type(list_inner, element);
                (quote!(Option<&[#list_inner]>), quote!(self.#ident.as_deref()))
            }
            TypeRef::Optional(_) => {
                let storage = storage_type(ty, element, boxed);
                (quote!(&#storage), quote!(&self.#ident))
            }
        },
    }
}

impl Syntax for RustSyntax {
    type Fragment = TokenStream;

    fn file_name(&self, base: &str) -> String {
        Self::module_file_name(base)
    }

    fn is_reserved(&self, ident: &str) -> bool {
        KEYWORDS.contains(&ident)
    }

    fn member_name(&self, field: &str) -> String {
        Self::snake(field)
    }

    fn visit_name(&self, base: &str, variant: &VariantSpec) -> String {
        Self::visit_method(variant, base).to_string()
    }

    fn reserved_member(&self, _type_name: &str, field: &str) -> Option<String> {
        let member = Self::snake(field);
        (self.is_reserved(&member) || METHODS.contains(&member.as_str())).then_some(member)
    }

    fn check(&self, spec: &BaseTypeSpec, ctx: &RenderContext) -> Result<(), SchemaError> {
        self.imports(spec)?;
        let defined = std::iter::once(spec.name.clone())
            .chain(spec.variants.iter().map(|v| v.type_name(&spec.name)));
        for name in defined {
            if PRELUDE_TYPES.contains(&name.as_str()) {
                return Err(SchemaError::ReservedType {
                    base: spec.name.clone(),
                    name,
                });
            }
        }
        for variant in &spec.variants {
            if self.is_reserved(&variant.name) {
                return Err(SchemaError::ReservedType {
                    base: spec.name.clone(),
                    name: variant.name.clone(),
                });
            }
            for field in &variant.fields {
                self.field(spec, variant, field, ctx)?;
            }
        }
        Ok(())
    }

    fn imports(&self, spec: &BaseTypeSpec) -> Result<TokenStream, SchemaError> {
        let trees = spec
            .imports
            .iter()
            .map(|import| {
                syn::parse_str::<syn::UseTree>(import).map_err(|error| {
                    SchemaError::InvalidImport {
                        base: spec.name.clone(),
                        import: import.clone(),
                        message: error.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(quote! {
            #(
                #[allow(unused_imports)]
                use #trees;
            )*
        })
    }

    fn open_scope(&self, _namespace: &str) -> TokenStream {
        // The including module is the namespace.
        TokenStream::new()
    }

    fn untyped_visitor(&self, spec: &BaseTypeSpec) -> TokenStream {
        let visitor = Self::visitor_ident(&spec.name);
        let doc = format!(" Visitor over [`{}`] nodes that returns nothing.", spec.name);
        let methods = spec.variants.iter().map(|variant| {
            let visit = Self::visit_method(variant, &spec.name);
            let node = format_ident!("{}", variant.type_name(&spec.name));
            quote!(fn #visit(&mut self, node: &#node);)
        });
        quote! {
            #[doc = #doc]
            pub trait #visitor {
                #(#methods)*
            }
        }
    }

    fn typed_visitor(&self, spec: &BaseTypeSpec) -> TokenStream {
        let visitor = Self::typed_visitor_ident(&spec.name);
        let doc = format!(" Visitor over [`{}`] nodes that computes a `T`.", spec.name);
        let methods = spec.variants.iter().map(|variant| {
            let visit = Self::visit_method(variant, &spec.name);
            let node = format_ident!("{}", variant.type_name(&spec.name));
            quote!(fn #visit(&mut self, node: &#node) -> T;)
        });
        quote! {
            #[doc = #doc]
            pub trait #visitor<T> {
                #(#methods)*
            }
        }
    }

    fn base(&self, spec: &BaseTypeSpec, style: EmissionStyle) -> TokenStream {
        let base = format_ident!("{}", spec.name);
        let derive = &self.derive;
        let doc = format!(" A `{}` node, one variant per production.", spec.name);
        let variant_idents = spec
            .variants
            .iter()
            .map(|variant| format_ident!("{}", variant.name))
            .collect::<Vec<_>>();
        let node_idents = spec
            .variants
            .iter()
            .map(|variant| format_ident!("{}", variant.type_name(&spec.name)))
            .collect::<Vec<_>>();

        let dispatch = |method: TokenStream| {
            if variant_idents.is_empty() {
                quote! {
                    let _ = visitor;
                    match *self {}
                }
            } else {
                let arms = variant_idents
                    .iter()
                    .map(|variant| quote!(Self::#variant(node) => node.#method(visitor),));
                quote! {
                    match self {
                        #(#arms)*
                    }
                }
            }
        };

        let untyped = style.emits_untyped().then(|| {
            let visitor = Self::visitor_ident(&spec.name);
            let body = dispatch(quote!(accept));
            quote! {
                pub fn accept<V: #visitor + ?Sized>(&self, visitor: &mut V) {
                    #body
                }
            }
        });
        let typed = style.emits_typed().then(|| {
            let visitor = Self::typed_visitor_ident(&spec.name);
            let body = dispatch(quote!(accept_typed));
            quote! {
                pub fn accept_typed<T, V: #visitor<T> + ?Sized>(&self, visitor: &mut V) -> T {
                    #body
                }
            }
        });
        let dispatch_impl = (untyped.is_some() || typed.is_some()).then(|| {
            quote! {
                impl #base {
                    #untyped
                    #typed
                }
            }
        });

        quote! {
            #[doc = #doc]
            #derive
            pub enum #base {
                #(#variant_idents(#node_idents),)*
            }

            #dispatch_impl
        }
    }

    fn variant(
        &self,
        spec: &BaseTypeSpec,
        variant: &VariantSpec,
        style: EmissionStyle,
        ctx: &RenderContext,
    ) -> Result<TokenStream, SchemaError> {
        let base = format_ident!("{}", spec.name);
        let variant_ident = format_ident!("{}", variant.name);
        let node = format_ident!("{}", variant.type_name(&spec.name));
        let derive = &self.derive;
        let fields = variant
            .fields
            .iter()
            .map(|field| self.field(spec, variant, field, ctx))
            .collect::<Result<Vec<_>, _>>()?;

        let idents = fields.iter().map(|f| &f.ident).collect::<Vec<_>>();
        let storages = fields.iter().map(|f| &f.storage);
        let params = fields.iter().map(|f| &f.param);
        let inits = fields.iter().map(|f| &f.init);
        let getters = fields.iter().map(|f| {
            let RustField {
                ident,
                getter_ty,
                getter_body,
                ..
            } = f;
            quote! {
                pub fn #ident(&self) -> #getter_ty {
                    #getter_body
                }
            }
        });
        let accepts = self.accept_methods(spec, variant, style);

        Ok(quote! {
            #derive
            pub struct #node {
                #(#idents: #storages,)*
            }

            impl #node {
                #[allow(clippy::too_many_arguments, clippy::new_without_default)]
                pub fn new(#(#idents: #params),*) -> Self {
                    Self { #(#inits),* }
                }

                #(#getters)*

                #accepts
            }

            impl From<#node> for #base {
                fn from(node: #node) -> Self {
                    Self::#variant_ident(node)
                }
            }
        })
    }

    fn close_scope(&self, _namespace: &str) -> TokenStream {
        TokenStream::new()
    }

    fn finish(
        &self,
        spec: &BaseTypeSpec,
        fragments: Vec<TokenStream>,
    ) -> Result<String, SchemaError> {
        let generated = quote!(#(#fragments)*);
        let file = syn::parse_file(&generated.to_string()).map_err(|error| SchemaError::Render {
            base: spec.name.clone(),
            message: error.to_string(),
        })?;
        Ok(prettyplease::unparse(&file))
    }
}
