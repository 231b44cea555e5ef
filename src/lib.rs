//! # Burstsort
//!
//! `burstsort` is a library of cache-oblivious in-memory string sorting
//! algorithms. Its two central engines are:
//!
//! - [`burstsort`]: a radix-style sort built around a **burst trie**, a
//!   256-wide trie whose edges hold small buckets of strings, each bucket
//!   splitting ("bursting") into a child node once it grows past a
//!   threshold. A redesigned, lower-peak-memory layout is available as
//!   [`burstsort_compact`], and a parallel bucket-sort phase as
//!   [`burstsort_parallel`] (feature `parallel`, on by default).
//! - [`funnelsort`]: a cache-oblivious comparison sort built around a
//!   **lazy k-merger** of bounded circular buffers (the Brodal/Fagerberg/
//!   Vinther construction), recursively dividing the input into `n^(1/3)`
//!   blocks before merging them back together through the merger tree.
//!
//! Both engines delegate to [`mkq_sort`] (three-way radix quicksort,
//! "multikey quicksort") at their leaves: Burstsort uses it to sort tail
//! buckets during traversal, funnelsort uses it as its own base case below
//! a tunable range length.
//!
//! ## Key characteristics
//!
//! - **String-agnostic**: every sort is generic over [`StringView`], an
//!   immutable, zero-copy view of 16-bit code units with virtual
//!   zero-padding past the end (`at(s, d)` returns `0` once `d >= len(s)`).
//!   `&[u16]`, [`ByteView`] (bytes widened to code units), and the owned
//!   [`Utf16Key`]/[`Utf16View`] pair are provided out of the box.
//! - **Reference reordering, not data copying**: the engines move `Copy`
//!   view handles around; they never read or write through the bytes a
//!   view points at except to compare them.
//! - **No stability guarantee**: equal strings may be reordered relative
//!   to each other by either engine (§7/§8 of the design).
//! - **Whole-input, in-memory**: no streaming or external-sort support.
//!
//! ## Usage
//!
//! ```rust
//! use burstsort::{burstsort, ByteView};
//!
//! let words = ["banana", "apple", "cherry", "date"];
//! let mut views: Vec<ByteView> = words.iter().map(|s| ByteView::from(*s)).collect();
//! burstsort(&mut views).unwrap();
//!
//! let sorted: Vec<&str> = views.iter().map(|v| std::str::from_utf8(v.0).unwrap()).collect();
//! assert_eq!(sorted, vec!["apple", "banana", "cherry", "date"]);
//! ```
//!
//! For per-call threshold tuning, see [`builder::BurstsortBuilder`] and
//! [`builder::FunnelsortBuilder`].

pub mod bcb;
pub mod builder;
pub mod burst;
pub mod error;
pub mod funnel;
pub mod insertion;
pub mod mkq;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod view;

pub use burst::engine::{burstsort, burstsort_compact, burstsort_compact_with_config, burstsort_with_config};
pub use builder::{BurstVariant, BurstsortBuilder, FunnelsortBuilder};
pub use error::{Result, SortError};
pub use funnel::engine::{funnelsort, funnelsort_with_threshold};
pub use mkq::{mkq_sort, mkq_sort_with_threshold};
#[cfg(feature = "parallel")]
pub use parallel::{burstsort_parallel, burstsort_parallel_with_config};
pub use view::{compare_from, ByteView, StringView, Utf16Key, Utf16View};

/// Re-exports of the crate's most commonly used items.
pub mod prelude {
    pub use crate::builder::{BurstVariant, BurstsortBuilder, FunnelsortBuilder};
    pub use crate::error::{Result, SortError};
    pub use crate::view::{compare_from, ByteView, StringView, Utf16Key, Utf16View};
    pub use crate::{burstsort, burstsort_compact, funnelsort, mkq_sort};
    #[cfg(feature = "parallel")]
    pub use crate::burstsort_parallel;
}
