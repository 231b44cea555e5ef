//! Parallel bucket executor (§4.7): after the burst trie is fully built,
//! every bucket's copy (and, for tail buckets, sort) becomes an
//! independent job writing to a disjoint range of the output array.
//! Jobs are submitted to rayon's work-stealing pool and awaited via
//! `rayon::scope`'s join barrier, matching the design note that any
//! ecosystem worker pool with a fixed width and a join barrier suffices.

use crate::burst::trie::{self, BucketJob, JobKind, TrieNode};
use crate::error::{Result, SortError};
use crate::insertion::insertion_sort;
use crate::mkq::mkq_sort_slice;
use crate::view::StringView;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Mutex;

const SMALL_BUCKET_THRESHOLD: usize = 20;

/// Sorts `views` in place, building the burst trie single-threaded and
/// then running one job per bucket across a fixed-width worker pool.
///
/// Produces the same output as [`crate::burst::engine::burstsort`] on
/// every input (the disjoint-write invariant is the only concurrency
/// property the jobs depend on), but writes to disjoint output ranges
/// in parallel once the trie is built.
pub fn burstsort_parallel<S>(views: &mut [S]) -> Result<()>
where
    S: StringView + Send + Sync,
{
    burstsort_parallel_with_config(views, trie::THRESHOLD, SMALL_BUCKET_THRESHOLD)
}

/// Same as [`burstsort_parallel`], with the burst threshold and the
/// insertion-sort-vs-MKQ per-bucket cutoff overridden. Used by
/// [`crate::builder::BurstsortBuilder`].
pub fn burstsort_parallel_with_config<S>(views: &mut [S], threshold: usize, small_bucket_threshold: usize) -> Result<()>
where
    S: StringView + Send + Sync,
{
    if views.len() <= 1 {
        return Ok(());
    }

    let mut root: TrieNode<S> = TrieNode::new();
    for &s in views.iter() {
        trie::insert_with_threshold(&mut root, s, threshold);
    }

    let mut jobs: Vec<BucketJob<'_, S>> = Vec::new();
    trie::collect_jobs(&root, 0, &mut jobs);

    let mut out = views.to_vec();
    let mut slices: Vec<&mut [S]> = Vec::with_capacity(jobs.len());
    let mut remaining: &mut [S] = &mut out;
    for job in &jobs {
        let k = job.len();
        let (head, tail) = remaining.split_at_mut(k);
        slices.push(head);
        remaining = tail;
    }
    debug_assert!(remaining.is_empty(), "job sizes must cover the whole output exactly once");

    let failure: Mutex<Option<SortError>> = Mutex::new(None);
    rayon::scope(|scope| {
        for (job, slice) in jobs.iter().zip(slices.into_iter()) {
            let failure = &failure;
            scope.spawn(move |_| {
                if catch_unwind(AssertUnwindSafe(|| run_job(job, slice, small_bucket_threshold))).is_err() {
                    let mut guard = failure.lock().unwrap_or_else(|poison| poison.into_inner());
                    if guard.is_none() {
                        *guard = Some(SortError::parallel_execution_failed("bucket job panicked"));
                    }
                }
            });
        }
    });

    if let Some(err) = failure.into_inner().unwrap_or_else(|poison| poison.into_inner()) {
        return Err(err);
    }

    views.copy_from_slice(&out);
    Ok(())
}

fn run_job<S: StringView>(job: &BucketJob<'_, S>, slice: &mut [S], small_bucket_threshold: usize) {
    match job.kind {
        JobKind::CopySort(items) => {
            slice.copy_from_slice(items);
            if slice.len() > 1 {
                if slice.len() < small_bucket_threshold {
                    insertion_sort(slice, job.depth);
                } else {
                    mkq_sort_slice(slice, job.depth);
                }
            }
        }
        JobKind::Copy(items) => {
            slice.copy_from_slice(items);
        }
    }
}
