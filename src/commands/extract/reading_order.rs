use super::types::ExtractedValue;

/// Top-to-bottom, then left-to-right. Values whose baselines sit within
/// `same_line_tolerance` of a line's first value share that line.
pub fn sort_reading_order(values: &mut Vec<ExtractedValue<'_>>, same_line_tolerance: f64) {
    values.sort_by(|a, b| b.y.total_cmp(&a.y));

    let mut lines = Vec::<Vec<ExtractedValue<'_>>>::new();
    for value in values.drain(..) {
        match lines.last_mut() {
            Some(line) if (line[0].y - value.y).abs() <= same_line_tolerance => line.push(value),
            _ => lines.push(vec![value]),
        }
    }

    for mut line in lines {
        line.sort_by(|a, b| a.x.total_cmp(&b.x));
        values.extend(line);
    }
}

pub fn join_reading_order(values: &[ExtractedValue<'_>]) -> String {
    values
        .iter()
        .map(|value| value.text)
        .collect::<Vec<&str>>()
        .join(" ")
        .trim()
        .to_string()
}
