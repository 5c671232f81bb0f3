use thiserror::Error;

/// Errors from the schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// JSON value did not pass schema validation.
    #[error("Validation failed against '{schema}': {}", errors.join("; "))]
    ValidationFailed {
        schema: String,
        /// Individual error messages from the validator, with instance paths.
        errors: Vec<String>,
    },

    /// The registered schema could not be compiled into a validator.
    #[error("Schema compilation error: {0}")]
    Compilation(String),
}
