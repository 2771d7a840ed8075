use std::{fs::File, io, sync::Mutex};

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Poll the playback state every X seconds
    #[clap(long, short, default_value_t = 45.0)]
    pub check_every: f64,
    /// Print per-iteration debug messages
    #[clap(long, short)]
    pub debug: bool,
    /// Run exactly one sync iteration and exit
    #[clap(long, short)]
    pub single: bool,
    /// File to write the log to. If not specified, logs will be written to stderr.
    #[clap(long, short)]
    log_file: Option<String>,
}

impl Args {
    /// Build the tracing subscriber using parameters from the command line arguments
    ///
    /// # Panics
    ///
    /// Panics if the log file cannot be opened.
    pub fn init_tracing_subscriber(&self) {
        let default_filter = if self.debug { "nowbio=debug" } else { "nowbio=info" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        let builder = tracing_subscriber::fmt().pretty().with_env_filter(filter);

        match self.log_file.as_ref() {
            None => builder.with_writer(io::stderr).init(),
            Some(f) => builder
                .with_writer(Mutex::new(File::create(f).unwrap()))
                .init(),
        }
    }
}
