//! Converts MapReduce application names to actual application code.
//!
//! # Example
//!
//! To get the word count application:
//! ```
//! # use mrfreq::Result;
//! use mrfreq::workload;
//! # fn main() -> Result<()> {
//! let wc = workload::named("wc")?;
//! # Ok(())
//! # }
//! ```

use crate::{Error, Result, Workload};

pub mod wc;

/// Name of the workload used when none is given.
pub const DEFAULT_WORKLOAD: &str = "wc";

/// Gets the [`Workload`] named `name`.
///
/// Returns [`None`] if no application with the given name was found.
pub fn try_named(name: &str) -> Option<Workload> {
    match name {
        "wc" => Some(Workload {
            map_fn: wc::map,
            reduce_fn: wc::reduce,
        }),
        _ => None,
    }
}

/// Gets the [`Workload`] named `name`.
///
/// Returns [`Error::UnknownWorkload`] if no application with the given name was found.
pub fn named(name: &str) -> Result<Workload> {
    try_named(name).ok_or_else(|| Error::UnknownWorkload(name.to_owned()))
}
