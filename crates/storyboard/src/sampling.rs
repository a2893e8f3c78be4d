//! Fragment sub-sampling against the frame budget.
//!
//! The budget is enforced only approximately: extraction always yields a
//! whole fragment's worth of frames per selected fragment, and the stride is
//! floored, so the result only tracks the budget loosely.

/// Stride between selected fragments so that extracting every selected
/// fragment yields roughly `frame_budget` frames in total.
///
/// Computed as `floor((rows * columns * num_fragments) / frame_budget)` and
/// clamped to a minimum of 1: when the budget exceeds the total cell count
/// the naive division is 0, and a stride of 0 would select nothing, so every
/// fragment is selected instead.
pub fn fragment_step(rows: u32, columns: u32, num_fragments: usize, frame_budget: usize) -> usize {
    let total_cells = rows as usize * columns as usize * num_fragments;
    (total_cells / frame_budget.max(1)).max(1)
}

/// Every `step`-th element starting at index 0, preserving order. A step
/// below 1 is treated as 1.
pub fn sub_sample<T: Clone>(items: &[T], step: usize) -> Vec<T> {
    items.iter().step_by(step.max(1)).cloned().collect()
}
