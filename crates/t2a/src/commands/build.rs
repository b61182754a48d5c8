use std::{
    fs::File,
    io::{BufReader, Write},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use text2array::{
    Vocab,
    VocabOptions,
    vocab::io::{read_samples_jsonl, write_vocab_json},
};

use crate::{
    input_output::{InputArgs, OutputArgs, until_error},
    logging::LogArgs,
};

/// Args for the build command.
#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// JSON options file: ``{"default": {...}, "fields": {"w": {...}}}``.
    #[arg(long)]
    options: Option<String>,

    /// Drop tokens seen fewer than this many times.
    #[arg(long)]
    min_count: Option<usize>,

    /// Keep at most this many tokens per field.
    #[arg(long)]
    max_size: Option<usize>,

    /// The unknown token.
    #[arg(long, conflicts_with = "no_unk")]
    unk: Option<String>,

    /// The padding token.
    #[arg(long, conflicts_with = "no_pad")]
    pad: Option<String>,

    /// Disable the unknown token.
    #[arg(long)]
    no_unk: bool,

    /// Disable the padding token.
    #[arg(long)]
    no_pad: bool,
}

impl BuildArgs {
    /// The options file, with the command line flags applied to its default.
    fn vocab_options(&self) -> Result<VocabOptions, Box<dyn std::error::Error>> {
        let mut options: VocabOptions = match &self.options {
            Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
            None => VocabOptions::default(),
        };

        let default = &mut options.default;
        if let Some(min_count) = self.min_count {
            default.min_count = min_count;
        }
        if let Some(max_size) = self.max_size {
            default.max_size = Some(max_size);
        }
        if let Some(unk) = &self.unk {
            default.unk = Some(unk.clone());
        }
        if let Some(pad) = &self.pad {
            default.pad = Some(pad.clone());
        }
        if self.no_unk {
            default.unk = None;
        }
        if self.no_pad {
            default.pad = None;
        }

        Ok(options)
    }

    /// Run the build command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(log::LevelFilter::Info)?;

        let options = self.vocab_options()?;
        log::debug!("{options:?}");

        let spinner = if self.logging.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        spinner.set_style(
            ProgressStyle::default_spinner().template("{spinner:.green} Counting samples... {pos} read")?,
        );
        spinner.enable_steady_tick(Duration::from_millis(100));

        let reader = self.input.open_reader()?;
        let mut read_error = None;
        let vocab = Vocab::from_samples_with_progress(
            until_error(read_samples_jsonl(reader), &mut read_error),
            &options,
            spinner.clone(),
        )?;
        if let Some(err) = read_error {
            return Err(err.into());
        }

        for (name, store) in &vocab {
            log::info!("{name}: {} tokens", store.len());
        }

        if let Some(path) = &self.output.output {
            log::info!("output: {}", path);
        }
        let mut writer = self.output.open_writer()?;
        write_vocab_json(&vocab, &mut writer)?;
        writer.flush()?;

        Ok(())
    }
}
