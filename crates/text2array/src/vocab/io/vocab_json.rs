//! # JSON Vocabulary IO
//!
//! A [`Vocab`] is stored as one JSON object, in field order:
//! ```json
//! {"w": {"itos": ["<unk>", "a"], "unk_index": 0}}
//! ```

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use crate::{errors::T2AResult, vocab::Vocab};

/// Load a [`Vocab`] from a JSON file.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_vocab_path<P: AsRef<Path>>(path: P) -> T2AResult<Vocab> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    read_vocab_json(reader)
}

/// Read a [`Vocab`] from a JSON [`Read`] stream.
///
/// Every store is re-validated on load.
pub fn read_vocab_json<R: Read>(reader: R) -> T2AResult<Vocab> {
    Ok(serde_json::from_reader(reader)?)
}

/// Save a [`Vocab`] to a JSON file.
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_vocab_path<P: AsRef<Path>>(
    vocab: &Vocab,
    path: P,
) -> T2AResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_vocab_json(vocab, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a [`Vocab`] to a [`Write`] writer, as pretty JSON.
pub fn write_vocab_json<W: Write>(
    vocab: &Vocab,
    writer: &mut W,
) -> T2AResult<()> {
    serde_json::to_writer_pretty(&mut *writer, vocab)?;
    writeln!(writer)?;
    Ok(())
}
