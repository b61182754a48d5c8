//! # JSON-Lines Sample IO
//!
//! One sample per line, as a JSON object; blank lines are skipped.

use std::io::{BufRead, Write};

use crate::{
    errors::{T2AResult, Text2ArrayError},
    samples::Sample,
};

/// Lazily read samples from a JSON-lines [`BufRead`] stream.
///
/// Each line is read and parsed only when the next sample is pulled.
pub fn read_samples_jsonl<R: BufRead>(reader: R) -> impl Iterator<Item = T2AResult<Sample>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(parse_sample_line(idx + 1, &line)),
            Err(err) => Some(Err(err.into())),
        })
}

fn parse_sample_line(
    line_no: usize,
    line: &str,
) -> T2AResult<Sample> {
    serde_json::from_str(line).map_err(|err| {
        Text2ArrayError::MalformedInput(format!("line {line_no}: not a sample object: {err}"))
    })
}

/// Write samples to a [`Write`] writer, one JSON object per line.
///
/// ## Returns
/// The number of samples written; or the first error, from either
/// the source or the writer.
pub fn write_samples_jsonl<I, W>(
    samples: I,
    writer: &mut W,
) -> T2AResult<usize>
where
    I: IntoIterator<Item = T2AResult<Sample>>,
    W: Write,
{
    let mut count = 0;
    for sample in samples {
        serde_json::to_writer(&mut *writer, &sample?)?;
        writeln!(writer)?;
        count += 1;
    }
    Ok(count)
}
