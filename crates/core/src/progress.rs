//! Project progress rollup arithmetic.

/// Average task progress for a project, truncated toward zero.
///
/// Returns `None` when the project has no tasks; the caller must then leave
/// the stored project progress untouched rather than resetting it.
///
/// Inputs are already validated to `[0, 100]`, so the sum fits comfortably in
/// an `i64` and truncation equals flooring.
pub fn average_progress(task_progress: &[i32]) -> Option<i32> {
    if task_progress.is_empty() {
        return None;
    }
    let total: i64 = task_progress.iter().map(|&p| i64::from(p)).sum();
    let count = task_progress.len() as i64;
    Some((total / count) as i32)
}
