use text2array::vocab::io::load_vocab_path;

/// Args for the inspect command.
#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// Vocabulary JSON file, as written by ``build``.
    #[arg(long)]
    vocab: String,

    /// How many leading tokens to show per field.
    #[arg(long, default_value = "10")]
    head: usize,
}

impl InspectArgs {
    /// Run the inspect command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let vocab = load_vocab_path(&self.vocab)?;

        for (name, store) in &vocab {
            println!("\"{}\" - {} tokens", name, store.len());
            match store.unk_token() {
                Some(unk) => println!("  unk: \"{unk}\" ({})", store.unk_index().unwrap_or_default()),
                None => println!("  unk: none"),
            }
            let head: Vec<&str> = store.iter().take(self.head).collect();
            println!("  {head:?}");
        }

        Ok(())
    }
}
