//! Burst trie, original variant (§4.4, §4.5).
//!
//! A 256-wide trie over the low byte of each code unit. Each slot holds
//! exactly one of: nothing, a growing tail bucket of strings that share
//! the path to this point, a null-bucket chain (slot 0 only, strings that
//! terminate here), or a link to a child node. Tagged as an enum rather
//! than the source's count-sign polymorphism, per the redesign note on
//! bucket slot polymorphism.

use super::NullChain;
use crate::insertion::insertion_sort;
use crate::mkq::mkq_sort_slice;
use crate::view::{alphabet_index, StringView, ALPHABET_SIZE};

/// Tail-bucket capacity steps; a bucket grows through these ceilings
/// before bursting at [`THRESHOLD`].
const GROWTH_STEPS: [usize; 6] = [16, 128, 1024, 8192, 16384, 32768];

/// A tail bucket bursts once its count reaches this many strings.
pub const THRESHOLD: usize = 8192;

/// A below-threshold bucket sorted with insertion sort instead of MKQ
/// during traversal.
const SMALL_BUCKET_THRESHOLD: usize = 20;

/// A growing array of string references sharing a trie path, below burst
/// threshold.
struct TailBucket<S> {
    items: Vec<S>,
}

impl<S: StringView> TailBucket<S> {
    fn new() -> Self {
        TailBucket { items: Vec::new() }
    }

    fn push(&mut self, s: S) {
        if self.items.len() == self.items.capacity() {
            let next = GROWTH_STEPS
                .iter()
                .copied()
                .find(|&step| step > self.items.capacity())
                .unwrap_or_else(|| self.items.capacity().saturating_mul(2).max(1));
            self.items.reserve_exact(next - self.items.len());
        }
        self.items.push(s);
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

enum Slot<S> {
    Empty,
    Tail(TailBucket<S>),
    Null(NullChain<S>),
    Child(Box<TrieNode<S>>),
}

/// A single burst-trie node: 256 slots, one per low-byte alphabet value.
pub struct TrieNode<S> {
    slots: Vec<Slot<S>>,
}

impl<S: StringView> TrieNode<S> {
    pub fn new() -> Self {
        TrieNode {
            slots: (0..ALPHABET_SIZE).map(|_| Slot::Empty).collect(),
        }
    }
}

impl<S: StringView> Default for TrieNode<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn append<S: StringView>(node: &mut TrieNode<S>, c: usize, s: S) {
    match &mut node.slots[c] {
        Slot::Empty => {
            node.slots[c] = if c == 0 {
                let mut chain = NullChain::new();
                chain.push(s);
                Slot::Null(chain)
            } else {
                let mut bucket = TailBucket::new();
                bucket.push(s);
                Slot::Tail(bucket)
            };
        }
        Slot::Tail(bucket) => bucket.push(s),
        Slot::Null(chain) => chain.push(s),
        Slot::Child(_) => unreachable!("append is only called on a non-child slot"),
    }
}

/// Redistributes the overflowing tail bucket at `node.slots[c]` one level
/// deeper into a fresh child node, keyed by each string's code unit at
/// `p + 1`, then replaces the slot with a link to that child.
fn burst<S: StringView>(node: &mut TrieNode<S>, c: usize, p: usize) {
    let old = std::mem::replace(&mut node.slots[c], Slot::Empty);
    let bucket = match old {
        Slot::Tail(bucket) => bucket,
        _ => unreachable!("burst only triggers on an overflowing tail bucket"),
    };
    let mut child = Box::new(TrieNode::new());
    for x in bucket.items {
        let cp = alphabet_index(x.at(p + 1));
        append(&mut child, cp, x);
    }
    node.slots[c] = Slot::Child(child);
}

/// Inserts `s` into the trie rooted at `root` (§4.4), bursting a tail
/// bucket at the default [`THRESHOLD`].
pub fn insert<S: StringView>(root: &mut TrieNode<S>, s: S) {
    insert_with_threshold(root, s, THRESHOLD)
}

/// Same as [`insert`], with the burst threshold overridden. Used by
/// [`crate::builder`] so callers can trade peak bucket size for fewer
/// (or more) burst operations.
pub fn insert_with_threshold<S: StringView>(root: &mut TrieNode<S>, s: S, threshold: usize) {
    let mut curr = root;
    let mut p = 0usize;
    let mut c = alphabet_index(s.at(p));

    loop {
        let is_child = matches!(&curr.slots[c], Slot::Child(_));
        if !is_child {
            break;
        }
        match &mut curr.slots[c] {
            Slot::Child(child) => curr = &mut **child,
            _ => unreachable!(),
        }
        p += 1;
        c = alphabet_index(s.at(p));
    }

    append(curr, c, s);

    while c != 0 {
        let overflowed = matches!(&curr.slots[c], Slot::Tail(bucket) if bucket.len() >= threshold);
        if !overflowed {
            break;
        }
        burst(curr, c, p);
        match &mut curr.slots[c] {
            Slot::Child(child) => curr = &mut **child,
            _ => unreachable!("burst always installs a child link"),
        }
        p += 1;
        c = alphabet_index(s.at(p));
    }
}

/// In-order traversal (§4.5): copies every stored string into
/// `out[pos..]`, sorting each tail bucket locally (insertion sort below
/// [`SMALL_BUCKET_THRESHOLD`], MKQ above), and copying null-bucket chains
/// unsorted (everything in a null bucket already compares equal up to
/// `depth`). Returns the position just past the last string written.
pub fn traverse<S: StringView>(node: &TrieNode<S>, out: &mut [S], pos: usize, depth: usize) -> usize {
    traverse_with_thresholds(node, out, pos, depth, SMALL_BUCKET_THRESHOLD)
}

/// Same as [`traverse`], with the insertion-sort-vs-MKQ cutoff for
/// per-bucket sorting overridden instead of fixed at
/// [`SMALL_BUCKET_THRESHOLD`].
pub fn traverse_with_thresholds<S: StringView>(
    node: &TrieNode<S>,
    out: &mut [S],
    mut pos: usize,
    depth: usize,
    small_bucket_threshold: usize,
) -> usize {
    for slot in &node.slots {
        match slot {
            Slot::Empty => {}
            Slot::Child(child) => {
                pos = traverse_with_thresholds(child, out, pos, depth + 1, small_bucket_threshold);
            }
            Slot::Tail(bucket) => {
                let k = bucket.len();
                out[pos..pos + k].copy_from_slice(&bucket.items);
                if k > 1 {
                    if k < small_bucket_threshold {
                        insertion_sort(&mut out[pos..pos + k], depth + 1);
                    } else {
                        mkq_sort_slice(&mut out[pos..pos + k], depth + 1);
                    }
                }
                pos += k;
            }
            Slot::Null(chain) => {
                let k = chain.len();
                chain.copy_into(&mut out[pos..pos + k]);
                pos += k;
            }
        }
    }
    pos
}

/// A bucket's payload, as handed to the parallel executor: either a
/// contiguous run to copy and sort locally, or a contiguous run to copy
/// only (a null-bucket block, already known equal up to its depth).
pub(crate) enum JobKind<'a, S> {
    CopySort(&'a [S]),
    Copy(&'a [S]),
}

/// One unit of work for the parallel bucket executor (§4.7): copy a
/// contiguous run of strings into a disjoint output slice, sorting it
/// first if it is a tail bucket.
pub(crate) struct BucketJob<'a, S> {
    pub(crate) depth: usize,
    pub(crate) kind: JobKind<'a, S>,
}

impl<'a, S> BucketJob<'a, S> {
    pub(crate) fn len(&self) -> usize {
        match &self.kind {
            JobKind::CopySort(items) | JobKind::Copy(items) => items.len(),
        }
    }
}

/// Walks the trie exactly as [`traverse`] does, but instead of sorting
/// inline, records one [`BucketJob`] per bucket in traversal order. Null
/// buckets are split one job per chain block, so large null buckets
/// parallelize across block boundaries as required by §4.7.
pub(crate) fn collect_jobs<'a, S: StringView>(node: &'a TrieNode<S>, depth: usize, jobs: &mut Vec<BucketJob<'a, S>>) {
    for slot in &node.slots {
        match slot {
            Slot::Empty => {}
            Slot::Child(child) => collect_jobs(child, depth + 1, jobs),
            Slot::Tail(bucket) => {
                jobs.push(BucketJob {
                    depth: depth + 1,
                    kind: JobKind::CopySort(&bucket.items),
                });
            }
            Slot::Null(chain) => {
                for block in chain.blocks() {
                    jobs.push(BucketJob {
                        depth,
                        kind: JobKind::Copy(block),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::compare_from;
    use std::cmp::Ordering;

    fn is_sorted(arr: &[&[u16]]) -> bool {
        arr.windows(2).all(|w| compare_from(&w[0], &w[1], 0) != Ordering::Greater)
    }

    fn build_and_traverse<'a>(words: &[&'a [u16]]) -> Vec<&'a [u16]> {
        let mut root: TrieNode<&[u16]> = TrieNode::new();
        for &w in words {
            insert(&mut root, w);
        }
        let mut out = vec![words[0]; words.len()];
        let n = traverse(&root, &mut out, 0, 0);
        assert_eq!(n, words.len());
        out
    }

    #[test]
    fn sorts_small_set() {
        let c: &[u16] = &[99];
        let b: &[u16] = &[98];
        let a: &[u16] = &[97];
        let out = build_and_traverse(&[c, b, a]);
        assert_eq!(out, vec![a, b, c]);
    }

    #[test]
    fn handles_prefixes_and_duplicates() {
        let words: Vec<Vec<u16>> = ["z", "m", "", "a", "d", "tt", "tt", "tt", "foo", "bar"]
            .iter()
            .map(|s| s.encode_utf16().collect())
            .collect();
        let refs: Vec<&[u16]> = words.iter().map(|v| v.as_slice()).collect();
        let out = build_and_traverse(&refs);
        assert!(is_sorted(&out));
        assert_eq!(out.len(), refs.len());
    }

    #[test]
    fn bursts_past_threshold() {
        let words: Vec<Vec<u16>> = (0..(THRESHOLD * 2))
            .map(|i| format!("key{:06}", i).encode_utf16().collect())
            .collect();
        let refs: Vec<&[u16]> = words.iter().map(|v| v.as_slice()).collect();
        let out = build_and_traverse(&refs);
        assert!(is_sorted(&out));
        assert_eq!(out.len(), refs.len());
    }

    #[test]
    fn all_duplicates_land_in_null_bucket() {
        let s: &[u16] = &[1, 2, 3];
        let words = vec![s; THRESHOLD * 3];
        let out = build_and_traverse(&words);
        assert_eq!(out.len(), words.len());
        assert!(out.iter().all(|&x| x == s));
    }
}
