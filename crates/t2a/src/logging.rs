use log::LevelFilter;
use stderrlog::Timestamp;

/// Crates whose log records reach stderr.
const LOGGED_CRATES: [&str; 2] = ["text2array", env!("CARGO_CRATE_NAME")];

/// Levels selected by each `-v`; the last repeats.
const VERBOSITY_LEVELS: [LevelFilter; 5] = [
    LevelFilter::Error,
    LevelFilter::Warn,
    LevelFilter::Info,
    LevelFilter::Debug,
    LevelFilter::Trace,
];

/// Logging setup arg group.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Raise the log level (-v errors, -vvv info, -vvvvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Prefix log lines with a timestamp.
    #[clap(short, long)]
    pub ts: bool,
}

impl LogArgs {
    /// The level selected by `-v`, or `default` without it.
    pub fn level_filter(
        &self,
        default: LevelFilter,
    ) -> LevelFilter {
        match self.verbose {
            0 => default,
            n => VERBOSITY_LEVELS[(n as usize).min(VERBOSITY_LEVELS.len()) - 1],
        }
    }

    /// Install the stderr logger for the encoder crates.
    ///
    /// Module names are shown from `debug` up, where per-field and
    /// per-sample records interleave.
    pub fn setup_logging(
        &self,
        default: LevelFilter,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let level = self.level_filter(default);

        stderrlog::new()
            .modules(LOGGED_CRATES)
            .quiet(self.quiet)
            .verbosity(level)
            .show_module_names(level >= LevelFilter::Debug)
            .timestamp(if self.ts {
                Timestamp::Second
            } else {
                Timestamp::Off
            })
            .init()?;

        Ok(())
    }
}
