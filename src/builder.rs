//! Fluent configuration surface over the two sort engines.
//!
//! The bare [`crate::burstsort`] / [`crate::funnelsort`] functions use the
//! design's documented default thresholds (the burst trie's `THRESHOLD`,
//! the per-bucket insertion-sort cutoff, funnelsort's base-case cutoff).
//! `BurstsortBuilder` and `FunnelsortBuilder` let a caller override those
//! per call without reaching into the engine modules directly.

use crate::burst::{engine, trie};
use crate::error::Result;
use crate::funnel::engine as funnel_engine;
use crate::view::StringView;

/// Which burst-trie layout [`BurstsortBuilder::sort`] drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BurstVariant {
    /// The original layout (§4.4/§4.5): one growing array per tail bucket.
    #[default]
    Original,
    /// The redesigned layout (§4.6): a chain of bounded sub-buckets per
    /// tail bucket, trading locality for lower peak allocation.
    Compact,
}

/// Builds a configured call to the burst-trie sort engine.
///
/// ```
/// use burstsort::builder::BurstsortBuilder;
/// use burstsort::ByteView;
///
/// let mut words: Vec<ByteView> = ["banana", "apple", "cherry"].iter().map(|s| ByteView::from(*s)).collect();
/// BurstsortBuilder::new()
///     .threshold(1024)
///     .sort(&mut words)
///     .unwrap();
/// let sorted: Vec<&str> = words.iter().map(|v| std::str::from_utf8(v.0).unwrap()).collect();
/// assert_eq!(sorted, vec!["apple", "banana", "cherry"]);
/// ```
#[derive(Debug, Clone)]
pub struct BurstsortBuilder {
    variant: BurstVariant,
    threshold: usize,
    small_bucket_threshold: usize,
    #[cfg(feature = "parallel")]
    parallel: bool,
}

impl Default for BurstsortBuilder {
    fn default() -> Self {
        BurstsortBuilder {
            variant: BurstVariant::Original,
            threshold: trie::THRESHOLD,
            small_bucket_threshold: 20,
            #[cfg(feature = "parallel")]
            parallel: false,
        }
    }
}

impl BurstsortBuilder {
    /// Starts a new builder with the design's documented defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects which burst-trie layout to drive.
    pub fn variant(mut self, variant: BurstVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Overrides the tail-bucket burst threshold (default
    /// [`trie::THRESHOLD`] / [`crate::burst::compact::THRESHOLD`], both 8192).
    pub fn threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Overrides the cutoff below which a sorted bucket uses insertion
    /// sort instead of MKQ during traversal (default 20, per §4.5).
    pub fn small_bucket_threshold(mut self, threshold: usize) -> Self {
        self.small_bucket_threshold = threshold;
        self
    }

    /// Runs the bucket-sort phase on rayon's worker pool (§4.7) instead
    /// of single-threaded traversal. Only available with the `parallel`
    /// feature (on by default).
    #[cfg(feature = "parallel")]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sorts `views` in place with the configured thresholds.
    pub fn sort<S: StringView + SortableWithConfig>(&self, views: &mut [S]) -> Result<()> {
        S::sort_with_config(views, self)
    }
}

/// Dispatches a configured [`BurstsortBuilder::sort`] call to the right
/// engine entry point. Split out from `BurstsortBuilder` itself so the
/// `parallel` feature's extra bound (`Send + Sync`) only applies when the
/// caller actually asks for parallel execution.
#[doc(hidden)]
pub trait SortableWithConfig: StringView {
    fn sort_with_config(views: &mut [Self], builder: &BurstsortBuilder) -> Result<()>;
}

#[cfg(feature = "parallel")]
impl<S: StringView + Send + Sync> SortableWithConfig for S {
    fn sort_with_config(views: &mut [S], builder: &BurstsortBuilder) -> Result<()> {
        if builder.parallel {
            return crate::parallel::burstsort_parallel_with_config(views, builder.threshold, builder.small_bucket_threshold);
        }
        match builder.variant {
            BurstVariant::Original => engine::burstsort_with_config(views, builder.threshold, builder.small_bucket_threshold),
            BurstVariant::Compact => {
                engine::burstsort_compact_with_config(views, builder.threshold, builder.small_bucket_threshold)
            }
        }
    }
}

#[cfg(not(feature = "parallel"))]
impl<S: StringView> SortableWithConfig for S {
    fn sort_with_config(views: &mut [S], builder: &BurstsortBuilder) -> Result<()> {
        match builder.variant {
            BurstVariant::Original => engine::burstsort_with_config(views, builder.threshold, builder.small_bucket_threshold),
            BurstVariant::Compact => {
                engine::burstsort_compact_with_config(views, builder.threshold, builder.small_bucket_threshold)
            }
        }
    }
}

/// Builds a configured call to the lazy funnelsort engine.
///
/// ```
/// use burstsort::builder::FunnelsortBuilder;
/// use burstsort::ByteView;
///
/// let mut words: Vec<ByteView> = ["banana", "apple", "cherry"].iter().map(|s| ByteView::from(*s)).collect();
/// FunnelsortBuilder::new()
///     .base_case_threshold(8)
///     .sort(&mut words)
///     .unwrap();
/// let sorted: Vec<&str> = words.iter().map(|v| std::str::from_utf8(v.0).unwrap()).collect();
/// assert_eq!(sorted, vec!["apple", "banana", "cherry"]);
/// ```
#[derive(Debug, Clone)]
pub struct FunnelsortBuilder {
    base_case_threshold: usize,
}

impl Default for FunnelsortBuilder {
    fn default() -> Self {
        FunnelsortBuilder {
            base_case_threshold: funnel_engine::BASE_CASE_THRESHOLD,
        }
    }
}

impl FunnelsortBuilder {
    /// Starts a new builder with the design's documented default (400,
    /// per §4.8's citation of the experimental literature).
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the range length below which funnelsort delegates to MKQ
    /// instead of dividing further.
    pub fn base_case_threshold(mut self, threshold: usize) -> Self {
        self.base_case_threshold = threshold;
        self
    }

    /// Sorts `views` in place with the configured base-case threshold.
    pub fn sort<S: StringView>(&self, views: &mut [S]) -> Result<()> {
        let len = views.len();
        funnel_engine::funnelsort_with_threshold(views, 0, len, self.base_case_threshold)
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

    #[test]
    fn burstsort_builder_defaults_match_bare_function() {
        let words: Vec<Vec<u16>> = ["c", "b", "a"].iter().map(|s| s.encode_utf16().collect()).collect();
        let mut refs: Vec<&[u16]> = words.iter().map(|v| v.as_slice()).collect();
        BurstsortBuilder::new().sort(&mut refs).unwrap();
        assert!(is_sorted(&refs));
    }

    #[test]
    fn burstsort_builder_low_threshold_forces_bursts() {
        let words: Vec<Vec<u16>> = (0..2000).map(|i| format!("row{:05}", i).encode_utf16().collect()).collect();
        let mut refs: Vec<&[u16]> = words.iter().map(|v| v.as_slice()).collect();
        BurstsortBuilder::new().threshold(4).small_bucket_threshold(3).sort(&mut refs).unwrap();
        assert!(is_sorted(&refs));
        assert_eq!(refs.len(), words.len());
    }

    #[test]
    fn burstsort_builder_compact_variant_agrees_with_original() {
        let words: Vec<Vec<u16>> = (0..2000).map(|i| format!("row{:05}", i).encode_utf16().collect()).collect();
        let mut a: Vec<&[u16]> = words.iter().map(|v| v.as_slice()).collect();
        let mut b = a.clone();
        BurstsortBuilder::new().sort(&mut a).unwrap();
        BurstsortBuilder::new().variant(BurstVariant::Compact).threshold(32).sort(&mut b).unwrap();
        assert_eq!(a, b);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn burstsort_builder_parallel_matches_sequential() {
        let words: Vec<Vec<u16>> = (0..5000).map(|i| format!("item{:05}", (i * 911) % 4999).encode_utf16().collect()).collect();
        let mut a: Vec<&[u16]> = words.iter().map(|v| v.as_slice()).collect();
        let mut b = a.clone();
        BurstsortBuilder::new().sort(&mut a).unwrap();
        BurstsortBuilder::new().parallel(true).sort(&mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn funnelsort_builder_low_threshold_still_sorts() {
        let words: Vec<Vec<u16>> = (0..3000).map(|i| format!("entry{:05}", (i * 131) % 2999).encode_utf16().collect()).collect();
        let mut refs: Vec<&[u16]> = words.iter().map(|v| v.as_slice()).collect();
        FunnelsortBuilder::new().base_case_threshold(16).sort(&mut refs).unwrap();
        assert!(is_sorted(&refs));
        assert_eq!(refs.len(), words.len());
    }
}
