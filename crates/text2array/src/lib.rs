//! # `text2array` Text Sample Encoder
//!
//! Turn free-form NLP samples into integer-encoded arrays.
//!
//! A sample is an ordered mapping from field name to value; text fields hold
//! a string, a list of strings, or a list of lists of strings.
//!
//! See:
//! * [`samples`] for the [`Sample`] and [`FieldValue`] types.
//! * [`vocab`] to build a [`Vocab`] from a corpus, and apply it to samples.
//! * [`datasets`] to shuffle and batch samples, and pad encoded fields.
//! * [`vocab::io`] for JSON vocabulary and JSON-lines sample io.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::T2AHash{*}`` type alias machinery.
//!
//! #### feature: ``foldhash``
//!
//! As ``ahash``, but with ``foldhash``. If both are enabled, ``ahash`` wins.
//!
//! #### feature: ``indicatif``
//!
//! Implements [`progress::ProgressReporter`] for ``indicatif::ProgressBar``.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//! This is only useful for timing tracing of the library itself.
//!
//! ## Building And Applying A Vocab
//!
//! ```rust
//! use text2array::{FieldOptions, T2AResult, Vocab, VocabOptions, sample};
//!
//! fn example() -> T2AResult<()> {
//!     let samples = vec![
//!         sample! { "ws" => vec!["a", "b"], "i" => 1 },
//!         sample! { "ws" => vec!["b"], "i" => 2 },
//!     ];
//!
//!     let options = VocabOptions::new().with_default(FieldOptions::default().with_min_count(1));
//!     let vocab = Vocab::from_samples_with_options(&samples, &options)?;
//!     assert_eq!(
//!         vocab.try_get("ws")?.iter().collect::<Vec<_>>(),
//!         vec!["<pad>", "<unk>", "b", "a"]
//!     );
//!
//!     let encoded = vocab.apply_to(&samples).collect::<T2AResult<Vec<_>>>()?;
//!     assert_eq!(encoded[0], sample! { "ws" => vec![3, 2], "i" => 1 });
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
#![warn(missing_docs, unused)]

pub mod datasets;
pub mod errors;
pub mod progress;
pub mod samples;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use datasets::{Batch, Dataset, PaddedArray, StreamDataset};
#[doc(inline)]
pub use errors::{T2AResult, Text2ArrayError};
#[doc(inline)]
pub use samples::{FieldValue, Sample};
#[doc(inline)]
pub use vocab::{FieldOptions, FieldShape, StringStore, Vocab, VocabOptions, VocabTrainer};
