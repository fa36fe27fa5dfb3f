use std::str::FromStr;

use anyhow::{anyhow, bail};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};
use statrs::statistics::Statistics;

/// Arithmetic mean; `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().mean()
}

/// Sample standard deviation (`n - 1` denominator); `NaN` below two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    values.iter().std_dev()
}

/// How the critical value of a confidence interval around a mean is chosen.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntervalMethod {
    /// Student's t with `n - 1` degrees of freedom.
    #[default]
    StudentT,
    /// Standard normal quantile; only sensible for many runs.
    Normal,
}

impl IntervalMethod {
    /// Two-sided critical value for `n` samples at significance `alpha`.
    pub fn critical_value(&self, n: usize, alpha: f64) -> anyhow::Result<f64> {
        let p = 1.0 - alpha / 2.0;
        match self {
            IntervalMethod::StudentT => {
                let freedom = match n.checked_sub(1) {
                    Some(dof) if dof > 0 => dof,
                    _ => bail!("a t critical value needs at least two samples, got {}", n),
                };
                let dist = StudentsT::new(0.0, 1.0, freedom as f64)
                    .map_err(|e| anyhow!("failed to create t-distribution: {}", e))?;
                Ok(dist.inverse_cdf(p))
            }
            IntervalMethod::Normal => {
                let dist = Normal::new(0.0, 1.0)
                    .map_err(|e| anyhow!("failed to create normal distribution: {}", e))?;
                Ok(dist.inverse_cdf(p))
            }
        }
    }
}

impl FromStr for IntervalMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student_t" | "t" | "students_t" => Ok(IntervalMethod::StudentT),
            "normal" | "z" => Ok(IntervalMethod::Normal),
            _ => Err(format!(
                "Unknown interval method: {}. Valid options are: student_t, normal",
                s
            )),
        }
    }
}

/// Two-sided interval around a mean.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    /// Confidence level, `1 - alpha`.
    pub level: f64,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Confidence interval for the mean of `values`:
///
/// mean ± c · s / sqrt(n)
///
/// where `s` is the sample standard deviation and `c` the critical value of
/// `method` at `1 - alpha / 2`.
///
/// # Arguments
///
/// * `values` - At least two finite samples.
/// * `alpha` - Significance level in (0, 1).
/// * `method` - Distribution used for the critical value.
pub fn confidence_interval(
    values: &[f64],
    alpha: f64,
    method: IntervalMethod,
) -> anyhow::Result<ConfidenceInterval> {
    if values.len() < 2 {
        bail!(
            "a confidence interval needs at least two samples, got {}",
            values.len()
        );
    }
    if !(alpha > 0.0 && alpha < 1.0) {
        bail!("alpha must lie in (0, 1), got {}", alpha);
    }

    let n = values.len();
    let center = mean(values);
    let std_err = sample_std_dev(values) / (n as f64).sqrt();
    let margin = method.critical_value(n, alpha)? * std_err;

    if !margin.is_finite() || !center.is_finite() {
        bail!("confidence interval is not finite (mean {}, margin {})", center, margin);
    }

    Ok(ConfidenceInterval {
        lower: center - margin,
        upper: center + margin,
        level: 1.0 - alpha,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_sample_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&v) - 5.0).abs() < 1e-12);
        // sum of squares 32, n - 1 = 7
        assert!((sample_std_dev(&v) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn student_t_interval_matches_table_value() {
        // t(0.975, 4) = 2.776
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ci = confidence_interval(&v, 0.05, IntervalMethod::StudentT).unwrap();
        let expected = 2.776 * sample_std_dev(&v) / 5f64.sqrt();
        assert!((ci.upper - 3.0 - expected).abs() < 1e-2);
        assert!((ci.level - 0.95).abs() < 1e-12);
        assert!(ci.contains(3.0));
    }

    #[test]
    fn normal_interval_is_narrower_than_student_t() {
        let v = [0.9, 1.1, 1.0, 0.95];
        let t = confidence_interval(&v, 0.1, IntervalMethod::StudentT).unwrap();
        let z = confidence_interval(&v, 0.1, IntervalMethod::Normal).unwrap();
        assert!(z.width() < t.width());
    }

    #[test]
    fn constant_values_give_degenerate_interval() {
        let ci = confidence_interval(&[0.5, 0.5, 0.5], 0.05, IntervalMethod::StudentT).unwrap();
        assert_eq!(ci.lower, 0.5);
        assert_eq!(ci.upper, 0.5);
    }

    #[test]
    fn rejects_single_sample_and_bad_alpha() {
        assert!(confidence_interval(&[1.0], 0.05, IntervalMethod::StudentT).is_err());
        assert!(confidence_interval(&[1.0, 2.0], 1.0, IntervalMethod::StudentT).is_err());
        assert!(confidence_interval(&[1.0, 2.0], 0.0, IntervalMethod::Normal).is_err());
    }

    #[test]
    fn interval_method_from_str() {
        assert_eq!("student_t".parse(), Ok(IntervalMethod::StudentT));
        assert_eq!("Normal".parse(), Ok(IntervalMethod::Normal));
        assert!("bootstrap".parse::<IntervalMethod>().is_err());
    }
}
