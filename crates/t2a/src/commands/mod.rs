use crate::commands::{apply::ApplyArgs, build::BuildArgs, inspect::InspectArgs};

pub mod apply;
pub mod build;
pub mod inspect;

/// Subcommands for t2a.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Build a vocabulary from a JSON-lines corpus.
    Build(BuildArgs),

    /// Encode JSON-lines samples with a vocabulary.
    Apply(ApplyArgs),

    /// Summarize a vocabulary file.
    Inspect(InspectArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Build(cmd) => cmd.run(),
            Commands::Apply(cmd) => cmd.run(),
            Commands::Inspect(cmd) => cmd.run(),
        }
    }
}
