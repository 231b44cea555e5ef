//! Lazy funnelsort (§4.8, §4.9): a cache-oblivious comparison sort built
//! around a k-merger tree of bounded circular buffers.
//!
//! [`engine`] drives the recursive block division and the final drain
//! back into the caller's array; [`merger`] is the k-merger tree itself,
//! the lazy-pull scheduler that [`engine`] builds and runs.

pub mod engine;
pub mod merger;
