//! Lazy funnelsort driver (§4.8): recursively divides the range into
//! `∛n` blocks, sorts each recursively, then merges them through the
//! lazy k-merger tree built in [`super::merger`].

use super::merger::{self, Merger};
use crate::error::{Result, SortError};
use crate::mkq::mkq_sort_slice;
use crate::view::StringView;

/// Below this range length, delegate to MKQ rather than dividing further
/// (tunable threshold, per the design's citation of the experimental
/// literature).
pub const BASE_CASE_THRESHOLD: usize = 400;

/// Sorts `arr[lo..hi)` via lazy funnelsort.
///
/// Returns [`SortError::InvalidRange`] if `lo > hi` or `hi > arr.len()`.
pub fn funnelsort<S: StringView>(arr: &mut [S], lo: usize, hi: usize) -> Result<()> {
    funnelsort_with_threshold(arr, lo, hi, BASE_CASE_THRESHOLD)
}

/// Same as [`funnelsort`], with the base-case cutoff below which the
/// recursion bottoms out into MKQ overridden instead of fixed at
/// [`BASE_CASE_THRESHOLD`]. Used by [`crate::builder::FunnelsortBuilder`].
pub fn funnelsort_with_threshold<S: StringView>(arr: &mut [S], lo: usize, hi: usize, base_case_threshold: usize) -> Result<()> {
    if lo > hi || hi > arr.len() {
        return Err(SortError::invalid_range(lo, hi, arr.len()));
    }
    fsort_range(&mut arr[lo..hi], base_case_threshold);
    Ok(())
}

fn fsort_range<S: StringView>(arr: &mut [S], base_case_threshold: usize) {
    let n = arr.len();
    if n <= base_case_threshold {
        mkq_sort_slice(arr, 0);
        return;
    }

    let b = ((n as f64).cbrt().round() as usize).max(2);
    let s = n / b;

    let mut bounds = Vec::with_capacity(b);
    let mut offset = 0;
    for _ in 0..(b - 1) {
        fsort_range(&mut arr[offset..offset + s], base_case_threshold);
        bounds.push(offset..offset + s);
        offset += s;
    }
    let leftover = n - offset;
    fsort_range(&mut arr[offset..offset + leftover], base_case_threshold);
    bounds.push(offset..offset + leftover);

    let leaves: Vec<Merger<'_, S>> = bounds
        .iter()
        .filter(|r| !r.is_empty())
        .map(|r| Merger::leaf(&arr[r.clone()]))
        .collect();

    let mut root = merger::build(leaves, n);
    root.merge();

    let mut out = Vec::with_capacity(n);
    let fallback = arr[0];
    out.resize(n, fallback);
    root.output().drain_to_array(&mut out, 0).expect("root output holds exactly n elements after merge");
    arr.copy_from_slice(&out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::compare_from;
    use std::cmp::Ordering;

    fn is_sorted(arr: &[&[u16]]) -> bool {
        arr.windows(2).all(|w| compare_from(&w[0], &w[1], 0) != Ordering::Greater)
    }

    #[test]
    fn empty_and_singleton_unchanged() {
        let mut empty: Vec<&[u16]> = vec![];
        funnelsort(&mut empty, 0, 0).unwrap();

        let x: &[u16] = &[1, 2, 3];
        let mut single = [x];
        funnelsort(&mut single, 0, 1).unwrap();
        assert_eq!(single, [x]);
    }

    #[test]
    fn invalid_range_errors() {
        let a: &[u16] = &[1];
        let mut arr = [a];
        assert!(funnelsort(&mut arr, 0, 5).is_err());
        assert!(funnelsort(&mut arr, 2, 1).is_err());
    }

    #[test]
    fn sorts_below_base_case_threshold() {
        let words: Vec<Vec<u16>> = ["j", "f", "c", "b", "i", "g", "a", "d", "e", "h"]
            .iter()
            .map(|s| s.encode_utf16().collect())
            .collect();
        let mut refs: Vec<&[u16]> = words.iter().map(|v| v.as_slice()).collect();
        funnelsort(&mut refs, 0, refs.len()).unwrap();
        let out: Vec<String> = refs.iter().map(|v| String::from_utf16(v).unwrap()).collect();
        assert_eq!(out, vec!["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
    }

    #[test]
    fn sorts_above_base_case_threshold() {
        let words: Vec<Vec<u16>> = (0..5000)
            .map(|i| format!("rec-{}", (i * 2654435761u64) % 99_991).encode_utf16().collect())
            .collect();
        let mut refs: Vec<&[u16]> = words.iter().map(|v| v.as_slice()).collect();
        funnelsort(&mut refs, 0, refs.len()).unwrap();
        assert!(is_sorted(&refs));
        assert_eq!(refs.len(), words.len());
    }

    #[test]
    fn matches_burstsort_output() {
        use crate::burst::engine::burstsort;

        let words: Vec<Vec<u16>> = (0..8000)
            .map(|i| format!("entry{}", (i * 40503u64) % 50_021).encode_utf16().collect())
            .collect();
        let mut a: Vec<&[u16]> = words.iter().map(|v| v.as_slice()).collect();
        let mut b = a.clone();

        funnelsort(&mut a, 0, a.len()).unwrap();
        burstsort(&mut b).unwrap();

        assert_eq!(a, b);
    }
}
