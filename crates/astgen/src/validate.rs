//! Schema checks shared by every syntax.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use astgen_grammar::BaseTypeSpec;
use regex::Regex;

use crate::SchemaError;
use crate::syntax::Syntax;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{XID_Start}_]\p{XID_Continue}*$").unwrap());

pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

pub(crate) fn validate<S: Syntax>(syntax: &S, spec: &BaseTypeSpec) -> Result<(), SchemaError> {
    let base = spec.name.as_str();
    let identifier = |name: &str| {
        if is_identifier(name) {
            Ok(())
        } else {
            Err(SchemaError::InvalidIdentifier {
                base: base.to_string(),
                name: name.to_string(),
            })
        }
    };
    let unreserved_type = |name: &str| {
        if syntax.is_reserved(name) {
            Err(SchemaError::ReservedType {
                base: base.to_string(),
                name: name.to_string(),
            })
        } else {
            Ok(())
        }
    };

    identifier(base)?;
    unreserved_type(base)?;

    let mut variants = HashSet::new();
    let mut dispatch = HashMap::new();
    for variant in &spec.variants {
        identifier(variant.name.as_str())?;
        if !variants.insert(variant.name.as_str()) {
            return Err(SchemaError::DuplicateVariant {
                base: base.to_string(),
                variant: variant.name.clone(),
            });
        }
        let method = syntax.visit_name(base, variant);
        if let Some(other) = dispatch.insert(method.clone(), variant.name.as_str()) {
            return Err(SchemaError::DispatchCollision {
                base: base.to_string(),
                variant: variant.name.clone(),
                other: other.to_string(),
                method,
            });
        }
        let type_name = variant.type_name(base);
        unreserved_type(type_name.as_str())?;

        let mut members = HashSet::new();
        for field in &variant.fields {
            identifier(field.name.as_str())?;
            let member = syntax.member_name(&field.name);
            identifier(member.as_str())?;
            if !members.insert(member) {
                return Err(SchemaError::DuplicateField {
                    base: base.to_string(),
                    variant: variant.name.clone(),
                    field: field.name.clone(),
                });
            }
            if let Some(reserved) = syntax.reserved_member(&type_name, &field.name) {
                return Err(SchemaError::ReservedField {
                    base: base.to_string(),
                    variant: variant.name.clone(),
                    field: field.name.clone(),
                    reserved,
                });
            }
            if field.ty.element_name().is_empty() {
                return Err(SchemaError::EmptyType {
                    base: base.to_string(),
                    variant: variant.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{CSharp, RustSyntax};
    use astgen_grammar::VariantSpec;

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("Expr"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("Größe"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("then branch"));
        assert!(!is_identifier("List<Expr>"));
    }

    #[test]
    fn test_duplicate_variant() {
        let spec = BaseTypeSpec::new("Expr")
            .variant("Literal", [("object", "Value")])
            .variant("Literal", [("string", "Text")]);
        assert_eq!(
            validate(&CSharp, &spec),
            Err(SchemaError::DuplicateVariant {
                base: "Expr".to_string(),
                variant: "Literal".to_string(),
            })
        );
    }

    #[test]
    fn test_dispatch_collision_after_casing() {
        let spec = BaseTypeSpec::new("Expr")
            .variant("Abc", [("object", "Value")])
            .variant("ABC", [("object", "Value")]);
        assert!(validate(&CSharp, &spec).is_ok());
        assert_eq!(
            validate(&RustSyntax::new(["Debug"]).unwrap(), &spec),
            Err(SchemaError::DispatchCollision {
                base: "Expr".to_string(),
                variant: "ABC".to_string(),
                other: "Abc".to_string(),
                method: "visit_abc_expr".to_string(),
            })
        );
    }

    #[test]
    fn test_duplicate_field_after_casing() {
        let spec = BaseTypeSpec::new("Expr").variant("Pair", [("Expr", "Left"), ("Expr", "left")]);
        assert!(validate(&CSharp, &spec).is_ok());
        assert_eq!(
            validate(&RustSyntax::new(["Debug"]).unwrap(), &spec),
            Err(SchemaError::DuplicateField {
                base: "Expr".to_string(),
                variant: "Pair".to_string(),
                field: "left".to_string(),
            })
        );
    }

    #[test]
    fn test_reserved_field() {
        let spec = BaseTypeSpec::new("Expr").variant("Literal", [("object", "object")]);
        assert_eq!(
            validate(&CSharp, &spec),
            Err(SchemaError::ReservedField {
                base: "Expr".to_string(),
                variant: "Literal".to_string(),
                field: "object".to_string(),
                reserved: "object".to_string(),
            })
        );
    }

    #[test]
    fn test_invalid_field_name() {
        let spec = BaseTypeSpec::new("Expr").variant("Literal", [("object", "2nd")]);
        assert!(matches!(
            validate(&CSharp, &spec),
            Err(SchemaError::InvalidIdentifier { name, .. }) if name == "2nd"
        ));
    }

    #[test]
    fn test_empty_type() {
        let spec = BaseTypeSpec::new("Expr").variant("Call", [("List<>", "Arguments")]);
        assert!(matches!(
            validate(&CSharp, &spec),
            Err(SchemaError::EmptyType { field, .. }) if field == "Arguments"
        ));
    }

    #[test]
    fn test_reserved_base() {
        let spec = BaseTypeSpec::new("Self");
        assert!(validate(&CSharp, &spec).is_ok());
        assert!(matches!(
            validate(&RustSyntax::new(["Debug"]).unwrap(), &spec),
            Err(SchemaError::ReservedType { .. })
        ));
    }

    #[test]
    fn test_empty_base_is_valid() {
        assert!(validate(&CSharp, &BaseTypeSpec::new("Expr")).is_ok());
        let spec = BaseTypeSpec::new("Stmt").with_variant(VariantSpec::new("Break"));
        assert!(validate(&CSharp, &spec).is_ok());
    }
}
