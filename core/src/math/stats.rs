pub struct StatsHelper;

impl StatsHelper {
    /// Mean of the middle 50% of the sorted input.
    ///
    /// Quartile bounds truncate (`n/4`, `n*3/4`), so short inputs may
    /// leave an empty subrange, which averages to zero. The truncating
    /// bounds are load-bearing for trilateration stability and must
    /// not be swapped for an interpolating quartile formula.
    pub fn interquartile_mean(values: &[f64]) -> f64 {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let from = sorted.len() / 4;
        let to = sorted.len() * 3 / 4;
        Self::average(&sorted[from..to])
    }

    pub fn average(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interquartile_mean_truncates_quartile_bounds() {
        // n = 8: from 2, to 6, mean of 3..=6.
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        assert_eq!(StatsHelper::interquartile_mean(&values), 4.5);
    }

    #[test]
    fn interquartile_mean_empty_yields_zero() {
        assert_eq!(StatsHelper::interquartile_mean(&[]), 0.0);
    }

    #[test]
    fn interquartile_mean_short_inputs_follow_truncation() {
        // n = 2: [0, 1) keeps the smaller element.
        assert_eq!(StatsHelper::interquartile_mean(&[9.0, 3.0]), 3.0);
        // n = 1: [0, 0) is empty.
        assert_eq!(StatsHelper::interquartile_mean(&[7.0]), 0.0);
    }

    #[test]
    fn interquartile_mean_ignores_input_order() {
        let shuffled = [8.0, 1.0, 5.0, 4.0, 2.0, 7.0, 3.0, 6.0];
        assert_eq!(StatsHelper::interquartile_mean(&shuffled), 4.5);
    }

    #[test]
    fn average_empty_yields_zero() {
        assert_eq!(StatsHelper::average(&[]), 0.0);
        assert_eq!(StatsHelper::average(&[2.0, 4.0]), 3.0);
    }
}
