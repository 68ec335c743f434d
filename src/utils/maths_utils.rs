use argminmax::ArgMinMax;

/// Index of the smallest value, resolving ties to the first occurrence.
///
/// `argminmax` picks the minimum with SIMD lanes, which does not promise which
/// of several equal values it reports, so the value is looked up again with a
/// forward scan. Expects NaN-free input.
pub fn first_argmin(vec: &[f64]) -> Option<usize> {
    if vec.is_empty() {
        return None;
    }
    let candidate: usize = vec.argmin();
    let min_value = vec[candidate];
    vec.iter().position(|&v| v == min_value).or(Some(candidate))
}

/// Vertex of the parabola through `(-1, f_minus)`, `(0, f_centre)`, `(1, f_plus)`,
/// in units of grid cells relative to the centre sample.
///
/// Returns `None` when the samples have no positive curvature (flat or
/// saddle-shaped), since there is no interior minimum to move towards.
pub fn parabolic_vertex_offset(f_minus: f64, f_centre: f64, f_plus: f64) -> Option<f64> {
    let curvature = f_minus - 2.0 * f_centre + f_plus;
    if !(curvature > 0.0) || !curvature.is_finite() {
        return None;
    }
    let offset = 0.5 * (f_minus - f_plus) / curvature;
    // Centre is the discrete minimum, so the vertex lies within half a cell
    Some(offset.clamp(-0.5, 0.5))
}

/// True if the coordinates strictly increase or strictly decrease.
pub fn is_strictly_monotonic(coords: &[f64]) -> bool {
    if coords.iter().any(|c| !c.is_finite()) {
        return false;
    }
    if coords.len() < 2 {
        return true;
    }
    let increasing = coords.windows(2).all(|w| w[1] > w[0]);
    let decreasing = coords.windows(2).all(|w| w[1] < w[0]);
    increasing || decreasing
}
