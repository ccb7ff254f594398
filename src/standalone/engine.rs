use std::time::Instant;

use bytes::Bytes;
use fnv::FnvHashMap;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

use crate::error::Phase;
use crate::present::{aggregate, FrequencyMap};
use crate::tokenize::tokenize;
use crate::*;

// types related to this engine
pub type Group = (Bytes, Vec<Bytes>);
pub type Groups = Vec<Group>;

/// Builds a worker pool with `num_threads` threads; `0` lets rayon pick
/// (one per logical CPU).
pub fn build_pool(num_threads: usize, name: &'static str) -> Result<ThreadPool> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(move |i| format!("{name}-{i}"))
        .build()?;
    debug!(pool = name, threads = pool.current_num_threads(), "worker pool ready");
    Ok(pool)
}

/// Runs the map function once per word on `pool`.
///
/// The output order is whatever the pool produces. The first failing task
/// fails the whole phase and nothing is returned.
pub fn perform_map(
    words: Vec<String>,
    engine: &Workload,
    serialized_args: &Bytes,
    pool: &ThreadPool,
) -> Result<Vec<KeyValue>> {
    let map_func = engine.map_fn;
    let mapped = pool.install(|| {
        words
            .into_par_iter()
            .map(|word| {
                let input_kv = KeyValue::new(Bytes::from(word), Bytes::new());
                map_func(input_kv, serialized_args.clone())?.collect::<anyhow::Result<Vec<_>>>()
            })
            .collect::<anyhow::Result<Vec<Vec<KeyValue>>>>()
    });

    match mapped {
        Ok(chunks) => Ok(chunks.into_iter().flatten().collect()),
        Err(source) => Err(Error::Task {
            phase: Phase::Map,
            source,
        }),
    }
}

/// Groups mapped pairs by key on the calling thread.
///
/// Values keep the order they arrived in within each group.
pub fn perform_shuffle(pairs: Vec<KeyValue>) -> Groups {
    let mut intermediate_data: FnvHashMap<Bytes, Vec<Bytes>> = FnvHashMap::default();
    for KeyValue { key, value } in pairs {
        intermediate_data.entry(key).or_default().push(value);
    }
    intermediate_data.into_iter().collect()
}

/// Runs the reduce function once per group on `pool`.
pub fn perform_reduce(
    groups: Groups,
    engine: &Workload,
    serialized_args: &Bytes,
    pool: &ThreadPool,
) -> Result<Vec<KeyValue>> {
    let reduce_func = engine.reduce_fn;
    pool.install(|| {
        groups
            .into_par_iter()
            .map(|(key, values)| -> anyhow::Result<KeyValue> {
                let values = Box::new(values.into_iter());
                let out = reduce_func(key.clone(), values, serialized_args.clone())?;
                Ok(KeyValue::new(key, out))
            })
            .collect::<anyhow::Result<Vec<_>>>()
    })
    .map_err(|source| Error::Task {
        phase: Phase::Reduce,
        source,
    })
}

/// A workload plus the two worker pools it runs on.
pub struct Pipeline {
    engine: Workload,
    serialized_args: Bytes,
    map_pool: ThreadPool,
    reduce_pool: ThreadPool,
}

impl Pipeline {
    /// Sizes of `0` use the runtime default.
    pub fn new(engine: Workload, map_workers: usize, reduce_workers: usize) -> Result<Self> {
        Ok(Self {
            engine,
            serialized_args: Bytes::new(),
            map_pool: build_pool(map_workers, "map")?,
            reduce_pool: build_pool(reduce_workers, "reduce")?,
        })
    }

    /// Computes the full frequency mapping for `text`.
    ///
    /// Each phase finishes completely before the next one starts.
    pub fn map_reduce(&self, text: &str) -> Result<FrequencyMap> {
        self.map_reduce_words(tokenize(text))
    }

    /// Like [`Pipeline::map_reduce`], for text that is already tokenized.
    pub fn map_reduce_words(&self, words: Vec<String>) -> Result<FrequencyMap> {
        let started = Instant::now();
        info!(tokens = words.len(), "starting map reduce");

        let mapped = perform_map(words, &self.engine, &self.serialized_args, &self.map_pool)?;
        debug!(pairs = mapped.len(), elapsed = ?started.elapsed(), "map phase done");

        let groups = perform_shuffle(mapped);
        debug!(groups = groups.len(), elapsed = ?started.elapsed(), "shuffle phase done");

        let reduced =
            perform_reduce(groups, &self.engine, &self.serialized_args, &self.reduce_pool)?;
        debug!(keys = reduced.len(), elapsed = ?started.elapsed(), "reduce phase done");

        let frequencies = aggregate(reduced)?;
        info!(distinct = frequencies.len(), elapsed = ?started.elapsed(), "map reduce finished");
        Ok(frequencies)
    }
}
