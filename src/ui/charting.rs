/// Compute X (sample index) and Y (WPM) bounds for the live WPM chart
pub fn compute_chart_params(samples: &[f64]) -> (f64, f64) {
    let highest_wpm = samples.iter().copied().fold(0.0_f64, f64::max);
    let last_index = samples.len().saturating_sub(1).max(1) as f64;

    (last_index, highest_wpm.ceil().max(1.0))
}

/// Chart points for a WPM series, one per rendered frame.
pub fn chart_points(samples: &[f64]) -> Vec<(f64, f64)> {
    if samples.is_empty() {
        return vec![(0.0, 0.0)];
    }
    samples
        .iter()
        .enumerate()
        .map(|(idx, wpm)| (idx as f64, *wpm))
        .collect()
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
