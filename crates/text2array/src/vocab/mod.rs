//! # Vocabulary
//!
//! This module provides the per-field vocabularies, their builder, and io.
//!
//! ## String Store
//!
//! Each text field is encoded by a [`StringStore`] ``{ String <-> usize }``,
//! optionally falling back to an unknown index for unseen tokens.
//!
//! ## Field Vocabulary
//!
//! The user-oriented vocabulary is [`Vocab`] ``{ FieldName -> StringStore }``:
//! * built from a corpus by [`Vocab::from_samples`] (or a [`VocabTrainer`]),
//! * applied to samples by [`Vocab::apply_to`].
//!
//! The [`FieldShape`] of each field (scalar, sequence, sequence of sequences)
//! decides which special tokens its store gets; see [`FieldOptions`].
pub mod field_shape;
pub mod field_vocab;
pub mod io;
pub mod string_store;
pub mod token_counter;
pub mod vocab_options;
pub mod vocab_trainer;
pub mod vocab_types;

#[doc(inline)]
pub use field_shape::FieldShape;
#[doc(inline)]
pub use field_vocab::{ApplyToSamples, Vocab};
#[doc(inline)]
pub use string_store::StringStore;
#[doc(inline)]
pub use token_counter::{FieldTally, SampleTokenCounter};
#[doc(inline)]
pub use vocab_options::{DEFAULT_PAD_TOKEN, DEFAULT_UNK_TOKEN, FieldOptions, VocabOptions};
#[doc(inline)]
pub use vocab_trainer::VocabTrainer;
#[doc(inline)]
pub use vocab_types::{CountType, FieldStoreMap, TokenCountMap};
