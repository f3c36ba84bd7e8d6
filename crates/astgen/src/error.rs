use std::path::PathBuf;

/// A base type that cannot be emitted as declared.
///
/// Every variant names the base type, and the variant/field where relevant,
/// so the offending schema entry can be located.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("`{name}` in base type `{base}` is not a valid identifier")]
    InvalidIdentifier { base: String, name: String },
    #[error("base type `{base}` declares variant `{variant}` more than once")]
    DuplicateVariant { base: String, variant: String },
    #[error("variants `{other}` and `{variant}` of base type `{base}` both dispatch to `{method}`")]
    DispatchCollision {
        base: String,
        variant: String,
        other: String,
        method: String,
    },
    #[error("variant `{variant}` of base type `{base}` declares field `{field}` more than once")]
    DuplicateField {
        base: String,
        variant: String,
        field: String,
    },
    #[error("type name `{name}` in base type `{base}` is a reserved word")]
    ReservedType { base: String, name: String },
    #[error(
        "field `{field}` of variant `{variant}` in base type `{base}` collides with reserved identifier `{reserved}`"
    )]
    ReservedField {
        base: String,
        variant: String,
        field: String,
        reserved: String,
    },
    #[error("field `{field}` of variant `{variant}` in base type `{base}` has an empty type")]
    EmptyType {
        base: String,
        variant: String,
        field: String,
    },
    #[error("import `{import}` of base type `{base}` is not valid: {message}")]
    InvalidImport {
        base: String,
        import: String,
        message: String,
    },
    #[error(
        "field `{field}` of variant `{variant}` in base type `{base}` has invalid type `{ty}`: {message}"
    )]
    InvalidType {
        base: String,
        variant: String,
        field: String,
        ty: String,
        message: String,
    },
    #[error("base type `{base}` would overwrite `{file}`, already written for `{other}`")]
    FileCollision {
        base: String,
        other: String,
        file: String,
    },
    #[error("namespace `{namespace}` of base type `{base}` is not a dotted list of identifiers")]
    InvalidNamespace { base: String, namespace: String },
    #[error("failed to render base type `{base}`: {message}")]
    Render { base: String, message: String },
}

impl SchemaError {
    /// The base type this error belongs to.
    pub fn base(&self) -> &str {
        match self {
            SchemaError::InvalidIdentifier { base, .. }
            | SchemaError::DuplicateVariant { base, .. }
            | SchemaError::DispatchCollision { base, .. }
            | SchemaError::DuplicateField { base, .. }
            | SchemaError::ReservedType { base, .. }
            | SchemaError::ReservedField { base, .. }
            | SchemaError::EmptyType { base, .. }
            | SchemaError::InvalidImport { base, .. }
            | SchemaError::InvalidType { base, .. }
            | SchemaError::FileCollision { base, .. }
            | SchemaError::InvalidNamespace { base, .. }
            | SchemaError::Render { base, .. } => base,
        }
    }
}

/// Error emitting one artifact.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl EmitError {
    pub fn is_io(&self) -> bool {
        matches!(self, EmitError::Io { .. })
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, EmitError::Schema(_))
    }
}
