//! Aggregate helpers for per-day usage series.

/// Mean over the full series (idle days included).
pub fn mean(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values
        .iter()
        .map(|&v| {
            let diff = v as f64 - avg;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Median over active (non-zero) days only, so idle days do not dilute it.
pub fn median_nonzero(values: &[u32]) -> f64 {
    let mut active: Vec<u32> = values.iter().copied().filter(|&v| v > 0).collect();
    if active.is_empty() {
        return 0.0;
    }
    active.sort_unstable();
    let mid = active.len() / 2;
    if active.len() % 2 == 0 {
        (active[mid - 1] as f64 + active[mid] as f64) / 2.0
    } else {
        active[mid] as f64
    }
}

#[cfg(test)]
mod tests {
    use super::{mean, median_nonzero, std_dev};

    #[test]
    fn mean_covers_idle_days() {
        assert_eq!(mean(&[10, 0, 0, 10]), 5.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn std_dev_is_population_form() {
        assert_eq!(std_dev(&[2, 2, 2]), 0.0);
        let sd = std_dev(&[0, 10]);
        assert!((sd - 5.0).abs() < 1e-9);
    }

    #[test]
    fn median_skips_idle_days() {
        assert_eq!(median_nonzero(&[0, 0, 5, 0, 15]), 10.0);
        assert_eq!(median_nonzero(&[0, 0, 0]), 0.0);
        assert_eq!(median_nonzero(&[0, 7, 0]), 7.0);
    }
}
