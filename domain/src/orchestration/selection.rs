//! Deriving a worker selection after the judge or worker count changes

use crate::core::model::ModelRegistry;

/// Reconcile a previous worker selection with a new judge and worker count.
///
/// Precedence:
/// 1. Keep previously selected workers, in their previous order, dropping
///    the judge, keys unknown to the registry and repeats.
/// 2. If that leaves too few, fill from the remaining available workers in
///    registry order.
/// 3. If it leaves too many, truncate from the end.
///
/// The result has `min(worker_count, registry.max_workers())` entries.
pub fn reconcile_selection(
    previous: &[String],
    judge: &str,
    worker_count: usize,
    registry: &ModelRegistry,
) -> Vec<String> {
    let mut selection: Vec<String> = Vec::with_capacity(worker_count);

    for key in previous {
        if key != judge && registry.contains(key) && !selection.contains(key) {
            selection.push(key.clone());
        }
    }

    if selection.len() < worker_count {
        let missing = worker_count - selection.len();
        let fill: Vec<String> = registry
            .available_workers(judge)
            .filter(|k| !selection.iter().any(|s| s == k))
            .take(missing)
            .map(str::to_string)
            .collect();
        selection.extend(fill);
    }

    selection.truncate(worker_count);
    selection
}
