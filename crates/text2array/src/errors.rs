//! # Error Types

/// Errors from text2array operations.
#[derive(Debug, thiserror::Error)]
pub enum Text2ArrayError {
    /// A size-like parameter (batch size, ...) was out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A token has no index, and the store has no unknown fallback.
    #[error("'{token}' not found in vocabulary")]
    TokenNotFound {
        /// The token that was looked up.
        token: String,
    },

    /// A sample value could not be encoded by its field's vocabulary.
    #[error("value '{value}' not found in vocab for field '{field}'")]
    ValueNotFound {
        /// The field being encoded.
        field: String,

        /// The offending value.
        value: String,
    },

    /// No vocabulary exists for the field name.
    #[error("no vocabulary found for field name '{field}'")]
    FieldVocabAbsent {
        /// The field name that was looked up.
        field: String,
    },

    /// A sample in a batch does not have the requested field.
    #[error("sample {sample} has no field '{field}'")]
    FieldMissing {
        /// The requested field.
        field: String,

        /// The position of the sample in its batch.
        sample: usize,
    },

    /// The input does not have the shape an operation requires.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Text2ArrayError {
    /// Is this one of the "not found" lookup failures?
    ///
    /// Covers [`Self::TokenNotFound`], [`Self::ValueNotFound`]
    /// and [`Self::FieldVocabAbsent`].
    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            Self::TokenNotFound { .. } | Self::ValueNotFound { .. } | Self::FieldVocabAbsent { .. }
        )
    }
}

/// Result type for text2array operations.
pub type T2AResult<T> = core::result::Result<T, Text2ArrayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_messages_are_distinct() {
        let token = Text2ArrayError::TokenNotFound {
            token: "foo".to_string(),
        };
        let value = Text2ArrayError::ValueNotFound {
            field: "ws".to_string(),
            value: "foo".to_string(),
        };
        let field = Text2ArrayError::FieldVocabAbsent {
            field: "i".to_string(),
        };

        assert_eq!(token.to_string(), "'foo' not found in vocabulary");
        assert_eq!(
            value.to_string(),
            "value 'foo' not found in vocab for field 'ws'"
        );
        assert_eq!(field.to_string(), "no vocabulary found for field name 'i'");

        assert!(token.is_lookup_error());
        assert!(value.is_lookup_error());
        assert!(field.is_lookup_error());

        assert!(!Text2ArrayError::InvalidArgument("x".to_string()).is_lookup_error());
    }
}
