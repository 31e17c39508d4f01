//! Baseline vs Candidate Comparison
//!
//! Compares elapsed-time samples of two variants: speedup on medians,
//! relative change on means and Cohen's d on the cleaned samples.

use crate::outliers::OutlierMethod;
use crate::summary::compute_summary;

/// Result of comparing two sample sets
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    /// `baseline median / candidate median` (>1.0 means the candidate is faster)
    pub speedup: f64,
    /// `(candidate mean - baseline mean) / baseline mean`, in percent
    pub relative_change: f64,
    /// Cohen's d; 0.0 unless both sides have at least two samples
    pub effect_size: f64,
    /// Effect size interpretation
    pub effect_interpretation: EffectInterpretation,
}

/// Interpretation of effect size magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectInterpretation {
    /// |d| < 0.2
    Negligible,
    /// 0.2 <= |d| < 0.5
    Small,
    /// 0.5 <= |d| < 0.8
    Medium,
    /// |d| >= 0.8
    Large,
}

impl std::fmt::Display for EffectInterpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectInterpretation::Negligible => write!(f, "negligible"),
            EffectInterpretation::Small => write!(f, "small"),
            EffectInterpretation::Medium => write!(f, "medium"),
            EffectInterpretation::Large => write!(f, "large"),
        }
    }
}

/// Comparison input errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComparisonError {
    #[error("Baseline samples are empty")]
    EmptyBaseline,
    #[error("Candidate samples are empty")]
    EmptyCandidate,
    #[error("Candidate median is zero; speedup is undefined")]
    ZeroCandidate,
}

/// Compare two sample sets
pub fn compare_distributions(
    baseline: &[f64],
    candidate: &[f64],
    outlier_method: OutlierMethod,
) -> Result<ComparisonResult, ComparisonError> {
    if baseline.is_empty() {
        return Err(ComparisonError::EmptyBaseline);
    }
    if candidate.is_empty() {
        return Err(ComparisonError::EmptyCandidate);
    }

    let baseline_stats = compute_summary(baseline, outlier_method);
    let candidate_stats = compute_summary(candidate, outlier_method);

    if candidate_stats.median <= 0.0 {
        return Err(ComparisonError::ZeroCandidate);
    }

    let speedup = baseline_stats.median / candidate_stats.median;

    let observed_diff = candidate_stats.mean - baseline_stats.mean;
    let relative_change = if baseline_stats.mean > 0.0 {
        (observed_diff / baseline_stats.mean) * 100.0
    } else {
        0.0
    };

    let effect_size = if baseline.len() >= 2 && candidate.len() >= 2 {
        let n1 = baseline_stats.sample_count as f64;
        let n2 = candidate_stats.sample_count as f64;
        let var1 = baseline_stats.std_dev.powi(2);
        let var2 = candidate_stats.std_dev.powi(2);
        let pooled_std = (((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / (n1 + n2 - 2.0)).sqrt();
        if pooled_std > 0.0 {
            observed_diff / pooled_std
        } else {
            0.0
        }
    } else {
        0.0
    };

    Ok(ComparisonResult {
        speedup,
        relative_change,
        effect_size,
        effect_interpretation: interpret_effect_size(effect_size),
    })
}

fn interpret_effect_size(d: f64) -> EffectInterpretation {
    let abs_d = d.abs();
    if abs_d < 0.2 {
        EffectInterpretation::Negligible
    } else if abs_d < 0.5 {
        EffectInterpretation::Small
    } else if abs_d < 0.8 {
        EffectInterpretation::Medium
    } else {
        EffectInterpretation::Large
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twice_as_fast() {
        let baseline = vec![2.0, 2.1, 1.9, 2.0, 2.0];
        let candidate = vec![1.0, 1.05, 0.95, 1.0, 1.0];
        let result = compare_distributions(&baseline, &candidate, OutlierMethod::None).unwrap();

        assert!((result.speedup - 2.0).abs() < 1e-12);
        assert!((result.relative_change + 50.0).abs() < 1.0);
        assert!(result.effect_size < -0.8);
        assert_eq!(result.effect_interpretation, EffectInterpretation::Large);
    }

    #[test]
    fn test_single_samples() {
        let result = compare_distributions(&[3.0], &[1.5], OutlierMethod::tukey()).unwrap();
        assert!((result.speedup - 2.0).abs() < 1e-12);
        assert_eq!(result.effect_size, 0.0);
        assert_eq!(result.effect_interpretation, EffectInterpretation::Negligible);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            compare_distributions(&[], &[1.0], OutlierMethod::None).unwrap_err(),
            ComparisonError::EmptyBaseline
        );
        assert_eq!(
            compare_distributions(&[1.0], &[], OutlierMethod::None).unwrap_err(),
            ComparisonError::EmptyCandidate
        );
        assert_eq!(
            compare_distributions(&[1.0], &[0.0], OutlierMethod::None).unwrap_err(),
            ComparisonError::ZeroCandidate
        );
    }

    #[test]
    fn test_effect_interpretation() {
        assert_eq!(interpret_effect_size(0.1), EffectInterpretation::Negligible);
        assert_eq!(interpret_effect_size(-0.3), EffectInterpretation::Small);
        assert_eq!(interpret_effect_size(0.6), EffectInterpretation::Medium);
        assert_eq!(EffectInterpretation::Large.to_string(), "large");
    }
}
