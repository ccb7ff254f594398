use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{error, info};

use crate::fetch::{TextSource, DEFAULT_URL};
use crate::present::{top_n, ChartRenderer, FrequencyMap};
use crate::tokenize::tokenize;
use crate::workload::DEFAULT_WORKLOAD;
use crate::{workload, Error, Result};

pub mod engine;

use engine::Pipeline;

/// Number of words charted when not specified.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count words in a document downloaded over HTTP
    Url {
        /// Address of the document
        #[arg(default_value = DEFAULT_URL)]
        url: String,

        #[command(flatten)]
        opts: RunOpts,
    },
    /// Count words in a local file
    File {
        /// Path to the document
        path: PathBuf,

        #[command(flatten)]
        opts: RunOpts,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunOpts {
    /// How many of the most frequent words to chart
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// Threads in the map pool (0 = one per CPU)
    #[arg(long, default_value_t = 0)]
    pub map_workers: usize,

    /// Threads in the reduce pool (0 = one per CPU)
    #[arg(long, default_value_t = 0)]
    pub reduce_workers: usize,

    /// Name of the workload
    #[arg(short, long, default_value = DEFAULT_WORKLOAD)]
    pub workload: String,

    /// Write the full frequency mapping here as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Everything a single run needs.
#[derive(Debug, Clone)]
pub struct Job {
    pub address: String,
    pub top_n: usize,
    pub map_workers: usize,
    pub reduce_workers: usize,
    pub workload: String,
    pub output: Option<PathBuf>,
}

impl Job {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            top_n: DEFAULT_TOP_N,
            map_workers: 0,
            reduce_workers: 0,
            workload: DEFAULT_WORKLOAD.to_owned(),
            output: None,
        }
    }

    pub fn from_opts(address: impl Into<String>, opts: RunOpts) -> Self {
        Self {
            address: address.into(),
            top_n: opts.top,
            map_workers: opts.map_workers,
            reduce_workers: opts.reduce_workers,
            workload: opts.workload,
            output: opts.output,
        }
    }
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct Report {
    /// Every word and its count.
    pub frequencies: FrequencyMap,
    /// The charted entries, most frequent first.
    pub top: Vec<(String, u64)>,
    /// Number of words the tokenizer produced from the input.
    pub tokens: u64,
}

/// Fetch, count, chart, and optionally save.
///
/// The workload and worker pools are set up before anything is fetched.
/// If the fetch fails nothing else happens: no pipeline, no chart.
pub async fn run<S, R>(job: &Job, source: &S, renderer: &mut R) -> Result<Report>
where
    S: TextSource,
    R: ChartRenderer,
{
    let engine = workload::named(&job.workload)?;
    let pipeline = Pipeline::new(engine, job.map_workers, job.reduce_workers)?;

    let text = match source.fetch(&job.address).await {
        Ok(text) => text,
        Err(err) => {
            error!(address = %job.address, error = %err, "could not get input text");
            return Err(err);
        }
    };

    let words = tokenize(&text);
    let tokens = words.len() as u64;
    // the pipeline is CPU bound; keep it off the async workers
    let frequencies = tokio::task::spawn_blocking(move || pipeline.map_reduce_words(words))
        .await
        .unwrap_or_else(|join_err| std::panic::resume_unwind(join_err.into_panic()))?;

    let top = top_n(&frequencies, job.top_n);
    renderer.render(&top, job.top_n).map_err(Error::Render)?;

    if let Some(path) = &job.output {
        let json = serde_json::to_vec_pretty(&frequencies)?;
        tokio::fs::write(path, json).await.map_err(|source| Error::Output {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "wrote frequencies");
    }

    Ok(Report {
        frequencies,
        top,
        tokens,
    })
}
