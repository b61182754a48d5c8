//! # Vocabulary Options
//!
//! Per-field configuration for building a [`crate::Vocab`].
//!
//! Options load from JSON; a missing key keeps its default,
//! and `null` disables a special token:
//! ```json
//! {
//!   "default": { "min_count": 2 },
//!   "fields": { "tags": { "unk": null, "pad": "<p>" } }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{T2AResult, Text2ArrayError},
    types::FieldName,
    vocab::{CountType, FieldShape, VocabTrainer},
};

/// The default unknown token.
pub const DEFAULT_UNK_TOKEN: &str = "<unk>";

/// The default padding token.
pub const DEFAULT_PAD_TOKEN: &str = "<pad>";

/// Options for building one field's [`crate::StringStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    /// Drop tokens seen fewer than this many times.
    pub min_count: usize,

    /// Keep at most this many (non-special) tokens, most frequent first.
    pub max_size: Option<usize>,

    /// The unknown token; `None` disables the unknown fallback.
    pub unk: Option<String>,

    /// The padding token for sequence fields; `None` disables padding.
    pub pad: Option<String>,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            min_count: 1,
            max_size: None,
            unk: Some(DEFAULT_UNK_TOKEN.to_string()),
            pad: Some(DEFAULT_PAD_TOKEN.to_string()),
        }
    }
}

impl FieldOptions {
    /// Sets the minimum token count.
    pub fn with_min_count(
        self,
        min_count: usize,
    ) -> Self {
        Self { min_count, ..self }
    }

    /// Sets the maximum number of non-special tokens.
    pub fn with_max_size(
        self,
        max_size: usize,
    ) -> Self {
        Self {
            max_size: Some(max_size),
            ..self
        }
    }

    /// Sets the unknown token.
    pub fn with_unk<S: Into<String>>(
        self,
        unk: S,
    ) -> Self {
        Self {
            unk: Some(unk.into()),
            ..self
        }
    }

    /// Disables the unknown token.
    pub fn without_unk(self) -> Self {
        Self { unk: None, ..self }
    }

    /// Sets the padding token.
    pub fn with_pad<S: Into<String>>(
        self,
        pad: S,
    ) -> Self {
        Self {
            pad: Some(pad.into()),
            ..self
        }
    }

    /// Disables the padding token.
    pub fn without_pad(self) -> Self {
        Self { pad: None, ..self }
    }

    /// Check that the special tokens can be told apart.
    pub fn validate(&self) -> T2AResult<()> {
        if let (Some(unk), Some(pad)) = (&self.unk, &self.pad)
            && unk == pad
        {
            return Err(Text2ArrayError::InvalidArgument(format!(
                "unk and pad tokens must differ; both are '{unk}'"
            )));
        }
        Ok(())
    }

    /// The special tokens for a field of the given shape, in index order.
    ///
    /// Padding (sequence shapes only) comes before unknown.
    pub fn specials(
        &self,
        shape: FieldShape,
    ) -> Vec<&str> {
        let pad = self.pad.as_deref().filter(|_| shape.is_sequence());
        pad.into_iter().chain(self.unk.as_deref()).collect()
    }
}

/// Options for building a [`crate::Vocab`]; a default plus per-field overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabOptions {
    /// Options for fields without an override.
    pub default: FieldOptions,

    /// Per-field overrides.
    pub fields: IndexMap<FieldName, FieldOptions>,
}

impl VocabOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the options used for fields without an override.
    pub fn with_default(
        self,
        default: FieldOptions,
    ) -> Self {
        Self { default, ..self }
    }

    /// Sets the options for one field.
    pub fn with_field<S: Into<String>>(
        mut self,
        name: S,
        options: FieldOptions,
    ) -> Self {
        self.fields.insert(name.into(), options);
        self
    }

    /// The options in effect for `name`.
    pub fn field_options(
        &self,
        name: &str,
    ) -> &FieldOptions {
        self.fields.get(name).unwrap_or(&self.default)
    }

    /// Validate the default and every override.
    pub fn validate(&self) -> T2AResult<()> {
        self.default.validate()?;
        for options in self.fields.values() {
            options.validate()?;
        }
        Ok(())
    }

    /// Initializes a [`VocabTrainer`] from these options.
    ///
    /// ## Returns
    /// A new `VocabTrainer`; or an error if the options are invalid.
    pub fn init<C: CountType>(self) -> T2AResult<VocabTrainer<C>> {
        VocabTrainer::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = FieldOptions::default();
        assert_eq!(options.min_count, 1);
        assert_eq!(options.max_size, None);
        assert_eq!(options.unk.as_deref(), Some(DEFAULT_UNK_TOKEN));
        assert_eq!(options.pad.as_deref(), Some(DEFAULT_PAD_TOKEN));
    }

    #[test]
    fn test_specials() {
        let options = FieldOptions::default();
        assert_eq!(options.specials(FieldShape::Scalar), vec!["<unk>"]);
        assert_eq!(options.specials(FieldShape::Seq), vec!["<pad>", "<unk>"]);
        assert_eq!(
            options.specials(FieldShape::SeqOfSeq),
            vec!["<pad>", "<unk>"]
        );

        let options = FieldOptions::default().without_unk();
        assert_eq!(options.specials(FieldShape::Seq), vec!["<pad>"]);
        assert!(options.specials(FieldShape::Scalar).is_empty());

        let options = FieldOptions::default().without_pad().with_unk("UNK");
        assert_eq!(options.specials(FieldShape::Seq), vec!["UNK"]);
    }

    #[test]
    fn test_validate() {
        assert!(FieldOptions::default().validate().is_ok());
        assert!(matches!(
            FieldOptions::default().with_pad("<unk>").validate(),
            Err(Text2ArrayError::InvalidArgument(_))
        ));
        assert!(
            FieldOptions::default()
                .with_pad("<unk>")
                .without_unk()
                .validate()
                .is_ok()
        );

        let options = VocabOptions::new().with_field("w", FieldOptions::default().with_unk("<pad>"));
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_field_options() {
        let options = VocabOptions::new()
            .with_default(FieldOptions::default().with_min_count(2))
            .with_field("w", FieldOptions::default().with_max_size(1));

        assert_eq!(options.field_options("w").max_size, Some(1));
        assert_eq!(options.field_options("w").min_count, 1);
        assert_eq!(options.field_options("t").min_count, 2);
        assert_eq!(options.field_options("t").max_size, None);
    }

    #[test]
    fn test_json() {
        let options: VocabOptions = serde_json::from_str(
            r#"{"default": {"min_count": 2}, "fields": {"w": {"unk": null, "pad": "<p>"}}}"#,
        )
        .unwrap();

        assert_eq!(
            options,
            VocabOptions::new()
                .with_default(FieldOptions::default().with_min_count(2))
                .with_field("w", FieldOptions::default().without_unk().with_pad("<p>"))
        );

        let options: VocabOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, VocabOptions::default());
    }
}
