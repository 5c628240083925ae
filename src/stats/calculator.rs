//! Statistics Calculator Module
//! Median and spread of the age at death from per-age-group death counts.

use statrs::statistics::{Data, Median, Statistics};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("No deaths to summarise")]
    EmptySample,
}

/// Median age at death with the population standard deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MedianAge {
    pub median: f64,
    pub std_dev: f64,
    /// Number of deaths in the sample.
    pub count: usize,
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Expand (age, deaths) weights into one age value per death.
    pub fn expand_weighted(weights: &[(f64, u64)]) -> Vec<f64> {
        let total: u64 = weights.iter().map(|(_, n)| n).sum();
        let mut ages = Vec::with_capacity(total as usize);
        for &(age, deaths) in weights {
            ages.extend(std::iter::repeat(age).take(deaths as usize));
        }
        ages
    }

    /// Median and population standard deviation (NumPy `median`/`std`
    /// compatible) of the weighted ages.
    pub fn median_age(weights: &[(f64, u64)]) -> Result<MedianAge, StatsError> {
        let ages = Self::expand_weighted(weights);
        if ages.is_empty() {
            return Err(StatsError::EmptySample);
        }

        let count = ages.len();
        let std_dev = ages.iter().population_std_dev();
        let median = Data::new(ages).median();

        Ok(MedianAge {
            median,
            std_dev,
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn expands_weights_in_order() {
        let ages = StatsCalculator::expand_weighted(&[(22.5, 2), (47.5, 0), (90.0, 1)]);
        assert_eq!(ages, vec![22.5, 22.5, 90.0]);
    }

    #[test]
    fn odd_sample_median_and_population_std() {
        let stats = StatsCalculator::median_age(&[(22.5, 1), (90.0, 2)]).unwrap();
        assert_eq!(stats.count, 3);
        assert!(close(stats.median, 90.0));
        assert!(close(stats.std_dev, 1012.5_f64.sqrt()));
    }

    #[test]
    fn even_sample_median_averages_middle_pair() {
        let stats = StatsCalculator::median_age(&[(0.5, 1), (7.5, 1)]).unwrap();
        assert!(close(stats.median, 4.0));
        assert!(close(stats.std_dev, 3.5));
    }

    #[test]
    fn empty_sample_is_an_error() {
        assert_eq!(
            StatsCalculator::median_age(&[(22.5, 0)]),
            Err(StatsError::EmptySample)
        );
    }
}
