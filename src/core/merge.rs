//! Round-robin merge of per-category search result lists.
//!
//! Each category search returns its own relevance-ordered list; the merged
//! output interleaves them so no category dominates the top of the results
//! (1st result of each category, then the 2nd of each, and so on).

use std::collections::VecDeque;

/// Interleaves `lists` in the order given, taking the front element of each
/// non-empty list in turn until `limit` items have been produced or every
/// list is exhausted.
///
/// A `limit` of `None` means unbounded: the merge drains all lists. Exhausted
/// lists are skipped without stalling the scan, so the output can be shorter
/// than the limit. A limit of zero yields an empty output.
pub fn merge_round_robin<T>(lists: Vec<Vec<T>>, limit: Option<usize>) -> Vec<T> {
    let mut queues: Vec<VecDeque<T>> = lists.into_iter().map(VecDeque::from).collect();

    let available: usize = queues.iter().map(|q| q.len()).sum();
    // Terminates on exhaustion even when no limit is set; the original
    // count-only loop condition would spin forever in that case.
    let target = match limit {
        Some(limit) => limit.min(available),
        None => available,
    };

    let mut merged = Vec::with_capacity(target);
    while merged.len() < target {
        for queue in &mut queues {
            if let Some(item) = queue.pop_front() {
                merged.push(item);
                if merged.len() == target {
                    break;
                }
            }
        }
    }

    merged
}
