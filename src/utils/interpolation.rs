// src/utils/interpolation.rs

/// Spacing-weighted average of two adjacent cell values at their common interface.
///
/// # Arguments
///
/// * `left`, `right` - Cell-centered values on either side of the interface.
/// * `dx_left`, `dx_right` - Widths of the two cells.
///
/// # Returns
///
/// * `(left * dx_left + right * dx_right) / (dx_left + dx_right)`
#[inline]
pub fn interface_average(left: f64, right: f64, dx_left: f64, dx_right: f64) -> f64 {
    (left * dx_left + right * dx_right) / (dx_left + dx_right)
}
