use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use mrfreq::fetch::{FileSource, HttpSource};
use mrfreq::present::TextChart;
use mrfreq::standalone::{self, Args, Commands, Job, Report};
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .with_thread_ids(verbose >= 2)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let mut chart = TextChart::new(io::stdout().lock());
    let report = match args.command {
        Commands::Url { url, opts } => {
            let job = Job::from_opts(url, opts);
            debug!(?job, "starting");
            standalone::run(&job, &HttpSource::new(), &mut chart).await
        }
        Commands::File { path, opts } => {
            let job = Job::from_opts(path.to_string_lossy(), opts);
            debug!(?job, "starting");
            standalone::run(&job, &FileSource, &mut chart).await
        }
    };

    match report {
        Ok(Report { frequencies, tokens, .. }) => {
            info!(tokens, distinct = frequencies.len(), "done");
            Ok(())
        }
        Err(err) if err.is_fetch() => {
            eprintln!("Error downloading text: {:#}", anyhow::Error::from(err));
            std::process::exit(1);
        }
        Err(err) => Err(err).context("word count failed"),
    }
}
