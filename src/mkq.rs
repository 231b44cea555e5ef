//! Multikey quicksort (§4.1): three-way radix quicksort over string views,
//! pivoting on the code unit at a common-prefix depth and advancing depth
//! on the equal partition.
//!
//! This is the classic Bentley & Sedgewick "ssort3" partition (*Fast
//! Algorithms for Sorting and Searching Strings*), carried over to
//! [`StringView`] code units instead of C strings: a fat-pivot three-way
//! partition using four cursors (`le, lt, gt, ge`) so that runs of
//! equal-to-pivot elements collapse to a single vector swap instead of
//! pairwise swaps.

use crate::error::{Result, SortError};
use crate::insertion::insertion_sort;
use crate::view::{alphabet_index, StringView};

/// Below this range length, delegate to depth-aware insertion sort.
pub const INSERTION_THRESHOLD: usize = 8;

/// Above this range length, use a pseudo-median of nine for pivot
/// selection instead of a plain median of three.
const PSEUDO_MEDIAN_THRESHOLD: usize = 30;

/// No real string reaches this many code units; a `depth` beyond it is a
/// caller error rather than a value that could ever arise from recursing
/// on well-formed input.
const MAX_DEPTH: usize = u32::MAX as usize;

/// Sorts `views[lo..hi)` lexicographically, treating every view as
/// zero-padded and comparing only from code-unit index `depth` onward.
///
/// Returns [`SortError::InvalidRange`] if `lo > hi` or `hi > views.len()`.
/// Returns [`SortError::DepthTooLarge`] if `depth` exceeds [`MAX_DEPTH`].
pub fn mkq_sort<S: StringView>(views: &mut [S], lo: usize, hi: usize, depth: usize) -> Result<()> {
    mkq_sort_with_threshold(views, lo, hi, depth, INSERTION_THRESHOLD)
}

/// Same contract as [`mkq_sort`], but with the insertion-sort fallback
/// threshold (§4.1 step 1) overridden instead of fixed at
/// [`INSERTION_THRESHOLD`]. Used by [`crate::builder`] so callers can tune
/// the cutoff per call.
pub fn mkq_sort_with_threshold<S: StringView>(
    views: &mut [S],
    lo: usize,
    hi: usize,
    depth: usize,
    insertion_threshold: usize,
) -> Result<()> {
    if lo > hi || hi > views.len() {
        return Err(SortError::invalid_range(lo, hi, views.len()));
    }
    if depth > MAX_DEPTH {
        return Err(SortError::depth_too_large(depth, MAX_DEPTH));
    }
    mkq_sort_range(&mut views[lo..hi], depth, insertion_threshold);
    Ok(())
}

/// Swaps the two ranges `arr[i..i+n]` and `arr[j..j+n]` element-wise.
#[inline]
fn vecswap<S: StringView>(arr: &mut [S], mut i: usize, mut j: usize, n: usize) {
    for _ in 0..n {
        arr.swap(i, j);
        i += 1;
        j += 1;
    }
}

#[inline]
fn char_at<S: StringView>(v: &S, depth: usize) -> u16 {
    v.at(depth)
}

/// Median-of-three index selection, with a pseudo-median of nine (medians
/// of three triples spaced at eighths of the range) for larger ranges, as
/// specified in §4.1 step 2.
fn median_of_three<S: StringView>(arr: &[S], depth: usize) -> usize {
    let n = arr.len();
    let med3 = |a: usize, b: usize, c: usize| -> usize {
        let (ca, cb, cc) = (char_at(&arr[a], depth), char_at(&arr[b], depth), char_at(&arr[c], depth));
        if ca < cb {
            if cb < cc {
                b
            } else if ca < cc {
                c
            } else {
                a
            }
        } else if cb > cc {
            b
        } else if ca > cc {
            c
        } else {
            a
        }
    };

    if n <= PSEUDO_MEDIAN_THRESHOLD {
        med3(0, n / 2, n - 1)
    } else {
        let eighth = n / 8;
        let a = med3(0, eighth, 2 * eighth);
        let b = med3(n / 2 - eighth, n / 2, n / 2 + eighth);
        let c = med3(n - 1 - 2 * eighth, n - 1 - eighth, n - 1);
        med3(a, b, c)
    }
}

/// Iterative-on-the-largest-partition multikey quicksort over a slice
/// directly (no index bookkeeping needed once we have a sub-slice).
///
/// The three-way partition produces `< v`, `= v`, `> v` ranges; per the
/// design note in §9, we recurse into the two smaller ranges and loop on
/// the largest within this call, bounding stack depth to `O(log n)` even
/// on adversarial all-equal-prefix input (the case MKQ's termination
/// property in §8 is specifically concerned with).
fn mkq_sort_range<S: StringView>(mut arr: &mut [S], mut depth: usize, insertion_threshold: usize) {
    loop {
        let n = arr.len();
        if n < insertion_threshold {
            insertion_sort(arr, depth);
            return;
        }

        let pivot_idx = median_of_three(arr, depth);
        arr.swap(0, pivot_idx);
        let v = char_at(&arr[0], depth);

        // Bentley-Sedgewick fat-pivot three-way partition. `le`/`lt` start
        // at 1 (not 0): the pivot already sitting at index 0 counts as the
        // first member of the eventual equal-run, so the scan begins just
        // past it.
        let (mut le, mut lt, mut gt, mut ge) = (1usize, 1usize, n - 1, n - 1);
        loop {
            while lt <= gt {
                let c = char_at(&arr[lt], depth);
                if c > v {
                    break;
                }
                if c == v {
                    arr.swap(le, lt);
                    le += 1;
                }
                lt += 1;
            }
            while lt <= gt {
                let c = char_at(&arr[gt], depth);
                if c < v {
                    break;
                }
                if c == v {
                    arr.swap(gt, ge);
                    ge -= 1;
                }
                // Safe: this body only runs while `gt >= lt >= 1`.
                gt -= 1;
            }
            if lt > gt {
                break;
            }
            arr.swap(lt, gt);
            lt += 1;
            // Safe: we only reach here when `lt <= gt` held above.
            gt -= 1;
        }

        // Rotate the equal-to-pivot runs collected at both ends into the
        // middle, next to each other.
        let r = le.min(lt - le);
        vecswap(arr, 0, lt - r, r);
        let r = (ge - gt).min(n - ge - 1);
        vecswap(arr, lt, n - r, r);

        let lt_len = lt - le;
        let gt_len = ge - gt;
        let eq_start = lt_len;
        let eq_end = n - gt_len;
        let eq_len = eq_end - eq_start;

        // Recurse on the two smaller partitions; loop on the largest.
        // Depth for `<v`/`>v` is unchanged; `=v` advances depth by one,
        // unless the pivot itself was the zero-padding sentinel (in which
        // case every member of `=v` is already exhausted at this depth,
        // so recursing further would never terminate).
        let largest = lt_len.max(eq_len).max(gt_len);

        if largest == eq_len {
            mkq_sort_range(&mut arr[..eq_start], depth, insertion_threshold);
            mkq_sort_range(&mut arr[eq_end..], depth, insertion_threshold);
            if v == 0 {
                return;
            }
            arr = &mut arr[eq_start..eq_end];
            depth += 1;
            continue;
        }

        if largest == lt_len {
            if v != 0 {
                mkq_sort_range(&mut arr[eq_start..eq_end], depth + 1, insertion_threshold);
            }
            mkq_sort_range(&mut arr[eq_end..], depth, insertion_threshold);
            arr = &mut arr[..eq_start];
            continue;
        }

        // largest == gt_len
        mkq_sort_range(&mut arr[..eq_start], depth, insertion_threshold);
        if v != 0 {
            mkq_sort_range(&mut arr[eq_start..eq_end], depth + 1, insertion_threshold);
        }
        arr = &mut arr[eq_end..];
    }
}

/// Direct entry point used internally (burst-trie traversal, funnelsort's
/// base case) where the caller already holds a sub-slice and does not
/// need range validation.
pub(crate) fn mkq_sort_slice<S: StringView>(arr: &mut [S], depth: usize) {
    mkq_sort_range(arr, depth, INSERTION_THRESHOLD);
}

/// Convenience re-export so callers who only care about the 256-wide
/// burst-trie alphabet can see at a glance that MKQ itself does not share
/// that restriction (it compares full code units).
#[allow(dead_code)]
const _ALPHABET_NOTE: usize = {
    // MKQ partitions on the full `u16` returned by `StringView::at`; only
    // the burst trie truncates via `alphabet_index`.
    let _ = alphabet_index;
    0
};
