use tracing::debug;

use super::types::RowDescriptor;

/// Top of the page first. Rows on the same baseline keep their catalog order.
pub fn sort_rows_top_down(rows: &mut [RowDescriptor<'_>]) {
    rows.sort_by(|a, b| b.y().total_cmp(&a.y()));
}

/// Assigns `[min_y, max_y]` to rows sorted by descending y. Neighbouring rows
/// split at their midpoint; no band reaches more than `tolerance` past its key.
pub fn compute_row_bounds(rows: &mut [RowDescriptor<'_>], tolerance: f64) {
    let baselines = rows.iter().map(RowDescriptor::y).collect::<Vec<f64>>();

    for (index, row) in rows.iter_mut().enumerate() {
        let y = baselines[index];

        row.max_y = match index.checked_sub(1).map(|previous| baselines[previous]) {
            Some(previous_y) => midpoint(y, previous_y).min(y + tolerance),
            None => y + tolerance,
        };
        row.min_y = match baselines.get(index + 1) {
            Some(&next_y) => midpoint(y, next_y).max(y - tolerance),
            None => y - tolerance,
        };

        debug!(
            key = row.key,
            y,
            min_y = row.min_y,
            max_y = row.max_y,
            "computed row band"
        );
    }
}

fn midpoint(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}
