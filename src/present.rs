//! Turns reduced pairs into the final frequency mapping and draws the
//! most frequent words as a bar chart.

use std::collections::BTreeMap;
use std::io::{self, Write};

use itertools::Itertools;

use crate::error::Phase;
use crate::utils::{count_from_bytes, string_from_bytes};
use crate::*;

/// Word -> number of occurrences. Keys are unique.
pub type FrequencyMap = BTreeMap<String, u64>;

/// Collects the reduce output into a [`FrequencyMap`].
pub fn aggregate(reduced: Vec<KeyValue>) -> Result<FrequencyMap> {
    let mut frequencies = FrequencyMap::new();
    for KeyValue { key, value } in reduced {
        let (word, count) = string_from_bytes(key)
            .and_then(|word| Ok((word, count_from_bytes(value)?)))
            .map_err(|source| Error::Task {
                phase: Phase::Reduce,
                source,
            })?;
        if frequencies.contains_key(&word) {
            return Err(Error::DuplicateKey(word));
        }
        frequencies.insert(word, count);
    }
    Ok(frequencies)
}

/// The `n` most frequent words, highest count first.
///
/// Equal counts are ordered alphabetically so the result does not depend
/// on how the worker pools scheduled their tasks.
pub fn top_n(frequencies: &FrequencyMap, n: usize) -> Vec<(String, u64)> {
    frequencies
        .iter()
        .sorted_by(|(word_a, count_a), (word_b, count_b)| {
            count_b.cmp(count_a).then_with(|| word_a.cmp(word_b))
        })
        .take(n)
        .map(|(word, count)| (word.clone(), *count))
        .collect()
}

/// Something that can draw a ranked list of words.
pub trait ChartRenderer {
    /// Draw `entries` in the order given. `n` is the requested size, which
    /// may exceed `entries.len()`.
    fn render(&mut self, entries: &[(String, u64)], n: usize) -> io::Result<()>;
}

/// Horizontal bar chart drawn with text.
pub struct TextChart<W> {
    out: W,
    width: usize,
}

impl<W: Write> TextChart<W> {
    pub const DEFAULT_WIDTH: usize = 50;

    pub fn new(out: W) -> Self {
        Self::with_width(out, Self::DEFAULT_WIDTH)
    }

    /// `width` is the length of the longest bar.
    pub fn with_width(out: W, width: usize) -> Self {
        Self { out, width }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartRenderer for TextChart<W> {
    fn render(&mut self, entries: &[(String, u64)], n: usize) -> io::Result<()> {
        writeln!(self.out, "Top {n} Most Frequent Words")?;

        let label_width = entries
            .iter()
            .map(|(word, _)| word.chars().count())
            .chain(std::iter::once("Words".len()))
            .max()
            .unwrap_or_default();
        writeln!(self.out, "{:<label_width$} | Frequency", "Words")?;
        writeln!(self.out, "{}-+-{}", "-".repeat(label_width), "-".repeat(self.width))?;

        let max = entries.iter().map(|(_, count)| *count).max().unwrap_or(0);
        for (word, count) in entries {
            let bar = if max == 0 {
                0
            } else {
                // round up so every non-zero count gets at least one mark
                ((*count as u128 * self.width as u128).div_ceil(max as u128)) as usize
            };
            writeln!(self.out, "{word:<label_width$} | {} {count}", "#".repeat(bar))?;
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::count_to_bytes;
    use bytes::Bytes;

    fn freq(pairs: &[(&str, u64)]) -> FrequencyMap {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn aggregate_decodes_pairs() {
        let reduced = vec![
            KeyValue::new(Bytes::from("cat"), count_to_bytes(2)),
            KeyValue::new(Bytes::from("the"), count_to_bytes(5)),
        ];
        assert_eq!(aggregate(reduced).unwrap(), freq(&[("cat", 2), ("the", 5)]));
    }

    #[test]
    fn aggregate_rejects_duplicate_keys() {
        let reduced = vec![
            KeyValue::new(Bytes::from("cat"), count_to_bytes(2)),
            KeyValue::new(Bytes::from("cat"), count_to_bytes(1)),
        ];
        assert!(matches!(aggregate(reduced), Err(Error::DuplicateKey(w)) if w == "cat"));
    }

    #[test]
    fn top_n_orders_by_count_then_word() {
        let f = freq(&[("b", 2), ("a", 2), ("c", 7), ("d", 1)]);
        assert_eq!(
            top_n(&f, 3),
            vec![("c".to_string(), 7), ("a".to_string(), 2), ("b".to_string(), 2)]
        );
    }

    #[test]
    fn top_n_bounds() {
        let f = freq(&[("a", 1), ("b", 3)]);
        assert!(top_n(&f, 0).is_empty());
        assert_eq!(top_n(&f, 10).len(), 2);
        assert!(top_n(&FrequencyMap::new(), 10).is_empty());
    }

    #[test]
    fn text_chart_draws_scaled_bars() {
        let mut chart = TextChart::with_width(Vec::new(), 4);
        chart
            .render(&[("the".to_string(), 4), ("cat".to_string(), 1)], 2)
            .unwrap();
        let out = String::from_utf8(chart.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Top 2 Most Frequent Words");
        assert_eq!(lines[1], "Words | Frequency");
        assert_eq!(lines[3], "the   | #### 4");
        assert_eq!(lines[4], "cat   | # 1");
    }

    #[test]
    fn text_chart_handles_no_entries() {
        let mut chart = TextChart::new(Vec::new());
        chart.render(&[], 10).unwrap();
        let out = String::from_utf8(chart.into_inner()).unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(out.starts_with("Top 10 Most Frequent Words\n"));
    }
}
