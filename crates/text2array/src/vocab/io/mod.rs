//! # Vocabulary IO
//!
//! ## Building, Saving And Applying A Vocab
//!
//! ```rust,no_run
//! use std::{fs::File, io::BufReader};
//!
//! use text2array::{
//!     T2AResult,
//!     Vocab,
//!     vocab::io::{read_samples_jsonl, save_vocab_path},
//! };
//!
//! fn example() -> T2AResult<()> {
//!     let reader = BufReader::new(File::open("train.jsonl")?);
//!     let samples = read_samples_jsonl(reader).collect::<T2AResult<Vec<_>>>()?;
//!
//!     let vocab = Vocab::from_samples(&samples)?;
//!     save_vocab_path(&vocab, "vocab.json")?;
//!
//!     for encoded in vocab.apply_to(&samples) {
//!         println!("{:?}", encoded?);
//!     }
//!     Ok(())
//! }
//! ```

mod sample_jsonl;
mod vocab_json;

#[doc(inline)]
pub use sample_jsonl::*;
#[doc(inline)]
pub use vocab_json::*;
