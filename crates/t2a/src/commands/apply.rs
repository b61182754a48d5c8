use std::io::Write;

use text2array::vocab::io::{load_vocab_path, read_samples_jsonl, write_samples_jsonl};

use crate::{
    input_output::{InputArgs, OutputArgs, until_error},
    logging::LogArgs,
};

/// Args for the apply command.
#[derive(clap::Args, Debug)]
pub struct ApplyArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Vocabulary JSON file, as written by ``build``.
    #[arg(long)]
    vocab: String,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl ApplyArgs {
    /// Run the apply command.
    ///
    /// Samples are streamed; the first failing sample aborts the run.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(log::LevelFilter::Warn)?;

        let vocab = load_vocab_path(&self.vocab)?;
        log::info!("loaded vocabularies for {} fields", vocab.len());

        let reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        let mut read_error = None;
        let written = write_samples_jsonl(
            vocab.apply_to(until_error(read_samples_jsonl(reader), &mut read_error)),
            &mut writer,
        );
        writer.flush()?;

        if let Some(err) = read_error {
            return Err(err.into());
        }
        log::info!("encoded {} samples", written?);

        Ok(())
    }
}
