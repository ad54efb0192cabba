/// Sums values in a canonical order so the result does not depend on the
/// order the caller supplied them in. Non-finite inputs count as 0, and so
/// does a sum that overflows.
pub fn stable_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values
        .into_iter()
        .map(|v| if v.is_finite() { v } else { 0.0 })
        .collect();
    values.sort_by(f64::total_cmp);
    let sum: f64 = values.iter().sum();
    if sum.is_finite() { sum } else { 0.0 }
}

/// `numerator / denominator * scale`, or 0.0 when the denominator is 0.
pub fn ratio(numerator: f64, denominator: f64, scale: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let value = numerator / denominator * scale;
    if value.is_finite() { value } else { 0.0 }
}
