/// Log-log interpolation of tabulated data.
///
/// Given arrays of x and y values, interpolate on a log-log scale to find the y value at x_new.
/// If x_new is outside the range of x, returns the first or last y value.
/// All x and y values must be positive.
pub fn interpolate_log_log(x: &[f64], y: &[f64], x_new: f64) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    if x.len() == 1 || x_new <= x[0] {
        return y[0];
    }
    if x_new >= x[x.len() - 1] {
        return y[y.len() - 1];
    }

    // Binary search for interval: largest i with x[i] <= x_new
    let mut low = 0usize;
    let mut high = x.len() - 1;
    while high - low > 1 {
        let mid = (low + high) >> 1;
        if x[mid] <= x_new {
            low = mid;
        } else {
            high = mid;
        }
    }
    let (x1, x2) = (x[low], x[low + 1]);
    let (y1, y2) = (y[low], y[low + 1]);
    let slope = (y2.ln() - y1.ln()) / (x2.ln() - x1.ln());
    (y1.ln() + (x_new.ln() - x1.ln()) * slope).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_log_log_power_law() {
        // y = x^-2 is a straight line in log-log space
        let x = [0.5, 1.0, 4.0];
        let y = [4.0, 1.0, 1.0 / 16.0];
        assert!((interpolate_log_log(&x, &y, 2.0) - 0.25).abs() < 1e-12);
        assert_eq!(interpolate_log_log(&x, &y, 1.0), 1.0);
    }

    #[test]
    fn test_interpolate_log_log_clamps() {
        let x = [1.0, 2.0];
        let y = [3.0, 5.0];
        assert_eq!(interpolate_log_log(&x, &y, 0.1), 3.0);
        assert_eq!(interpolate_log_log(&x, &y, 10.0), 5.0);
        assert!(interpolate_log_log(&[], &[], 1.0).is_nan());
    }
}
