use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
};

use text2array::{T2AResult, Text2ArrayError};

fn squash_standard_io(path: &Option<String>) -> Option<String> {
    match path {
        Some(p) if p == "-" => None,
        Some(p) => Some(p.clone()),
        None => None,
    }
}

/// Input argument group.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Optional JSON-lines input file; "-" may be used to indicate stdin.
    #[clap(long, default_value = None)]
    pub input: Option<String>,
}

impl InputArgs {
    /// Open a reader for the input.
    pub fn open_reader(&self) -> Result<Box<dyn BufRead>, Box<dyn std::error::Error>> {
        Ok(match squash_standard_io(&self.input) {
            None => Box::new(BufReader::new(std::io::stdin().lock())),
            Some(p) => Box::new(BufReader::new(File::open(p)?)),
        })
    }
}

/// Output argument group.
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Optional output file; "-" may be used to indicate stdout.
    #[clap(long, default_value = None)]
    pub output: Option<String>,
}

impl OutputArgs {
    /// Open a writer for the output.
    pub fn open_writer(&self) -> Result<Box<dyn Write>, Box<dyn std::error::Error>> {
        Ok(match squash_standard_io(&self.output) {
            Some(p) => Box::new(BufWriter::new(File::create(p)?)),
            None => Box::new(BufWriter::new(std::io::stdout().lock())),
        })
    }
}

/// Pass items through until the first error, which is parked in `error`.
pub fn until_error<'a, T, I>(
    items: I,
    error: &'a mut Option<Text2ArrayError>,
) -> impl Iterator<Item = T> + 'a
where
    I: IntoIterator<Item = T2AResult<T>>,
    I::IntoIter: 'a,
    T: 'a,
{
    items.into_iter().map_while(move |item| match item {
        Ok(item) => Some(item),
        Err(err) => {
            *error = Some(err);
            None
        }
    })
}
