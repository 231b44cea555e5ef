//! Burstsort engine (§4.4-§4.6): drives insertion into a burst trie, then
//! an in-order traversal that writes every string into the output array
//! in sorted order.

use super::{compact, trie};
use crate::error::Result;
use crate::view::StringView;

/// Sorts `views` in place using the original burst-trie layout (§4.4,
/// §4.5): a tail bucket per alphabet slot as one growing array.
pub fn burstsort<S: StringView>(views: &mut [S]) -> Result<()> {
    burstsort_with_config(views, trie::THRESHOLD, 20)
}

/// Same as [`burstsort`], with the burst threshold and the
/// insertion-sort-vs-MKQ per-bucket cutoff overridden. Used by
/// [`crate::builder::BurstsortBuilder`].
pub fn burstsort_with_config<S: StringView>(views: &mut [S], threshold: usize, small_bucket_threshold: usize) -> Result<()> {
    if views.len() <= 1 {
        return Ok(());
    }
    let mut root: trie::TrieNode<S> = trie::TrieNode::new();
    for &s in views.iter() {
        trie::insert_with_threshold(&mut root, s, threshold);
    }
    let mut out = views.to_vec();
    let written = trie::traverse_with_thresholds(&root, &mut out, 0, 0, small_bucket_threshold);
    debug_assert_eq!(written, views.len());
    views.copy_from_slice(&out);
    Ok(())
}

/// Sorts `views` in place using the redesigned sub-bucket trie layout
/// (§4.6): lower peak allocation per burst, same external contract.
pub fn burstsort_compact<S: StringView>(views: &mut [S]) -> Result<()> {
    burstsort_compact_with_config(views, compact::THRESHOLD, 20)
}

/// Same as [`burstsort_compact`], with the burst threshold and the
/// insertion-sort-vs-MKQ per-bucket cutoff overridden.
pub fn burstsort_compact_with_config<S: StringView>(
    views: &mut [S],
    threshold: usize,
    small_bucket_threshold: usize,
) -> Result<()> {
    if views.len() <= 1 {
        return Ok(());
    }
    let mut root: compact::TrieNode<S> = compact::TrieNode::new();
    for &s in views.iter() {
        compact::insert_with_threshold(&mut root, s, threshold);
    }
    let mut out = views.to_vec();
    let written = compact::traverse_with_thresholds(&root, &mut out, 0, 0, small_bucket_threshold);
    debug_assert_eq!(written, views.len());
    views.copy_from_slice(&out);
    Ok(())
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
        burstsort(&mut empty).unwrap();
        assert!(empty.is_empty());

        let x: &[u16] = &[1, 2, 3];
        let mut single = [x];
        burstsort(&mut single).unwrap();
        assert_eq!(single, [x]);
    }

    #[test]
    fn sorts_literal_scenario() {
        let words: Vec<Vec<u16>> = ["c", "b", "a"].iter().map(|s| s.encode_utf16().collect()).collect();
        let mut refs: Vec<&[u16]> = words.iter().map(|v| v.as_slice()).collect();
        burstsort(&mut refs).unwrap();
        let out: Vec<String> = refs.iter().map(|v| String::from_utf16(v).unwrap()).collect();
        assert_eq!(out, vec!["a", "b", "c"]);
    }

    #[test]
    fn both_variants_agree_on_random_like_input() {
        let words: Vec<Vec<u16>> = (0..5000).map(|i| format!("str{}", (i * 2654435761u64) % 99991).encode_utf16().collect()).collect();
        let mut a: Vec<&[u16]> = words.iter().map(|v| v.as_slice()).collect();
        let mut b = a.clone();

        burstsort(&mut a).unwrap();
        burstsort_compact(&mut b).unwrap();

        assert!(is_sorted(&a));
        assert_eq!(a, b);
    }
}
