//! A MapReduce-compatible implementation of word count.
//!
//! The map input is one word per call, carried in the key. Counts travel
//! as 8-byte big-endian integers.

use crate::utils::{count_from_bytes, count_to_bytes, string_from_bytes, string_to_bytes};
use crate::*;
use anyhow::Result;
use bytes::Bytes;

pub fn map(kv: KeyValue, _aux: Bytes) -> MapOutput {
    let word = string_from_bytes(kv.key)?;
    let key = string_to_bytes(word.to_lowercase());
    let value = count_to_bytes(1);

    Ok(Box::new(std::iter::once(Ok(KeyValue { key, value }))))
}

pub fn reduce(
    _key: Bytes,
    values: Box<dyn Iterator<Item = Bytes> + '_>,
    _aux: Bytes,
) -> Result<Bytes> {
    let mut count: u64 = 0;
    for value in values {
        count += count_from_bytes(value)?;
    }

    Ok(count_to_bytes(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_word(word: &str) -> Vec<KeyValue> {
        let kv = KeyValue::new(Bytes::from(word.to_owned()), Bytes::new());
        map(kv, Bytes::new())
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn map_folds_case_and_emits_one() {
        let out = map_word("CaT");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].key, Bytes::from_static(b"cat"));
        assert_eq!(count_from_bytes(out[0].value.clone()).unwrap(), 1);
    }

    #[test]
    fn map_rejects_invalid_utf8() {
        let kv = KeyValue::new(Bytes::from_static(&[0xff]), Bytes::new());
        assert!(map(kv, Bytes::new()).is_err());
    }

    #[test]
    fn reduce_sums_counts() {
        let values = vec![count_to_bytes(1), count_to_bytes(1), count_to_bytes(3)];
        let out = reduce(Bytes::from_static(b"cat"), Box::new(values.into_iter()), Bytes::new())
            .unwrap();
        assert_eq!(count_from_bytes(out).unwrap(), 5);
    }

    #[test]
    fn reduce_fails_on_malformed_count() {
        let values = vec![count_to_bytes(1), Bytes::from_static(b"x")];
        let out = reduce(Bytes::from_static(b"cat"), Box::new(values.into_iter()), Bytes::new());
        assert!(out.is_err());
    }
}
