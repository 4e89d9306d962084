// Summary statistics over the altitude series
use super::i18n::UiText;
use serde::Serialize;

const UNSTABLE_THRESHOLD: f64 = 2.5;
const FAIR_THRESHOLD: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stability {
    Good,
    Fair,
    Unstable,
}

impl Stability {
    /// Classify by mean absolute difference between successive samples.
    pub fn classify(mean_abs_diff: f64) -> Self {
        if mean_abs_diff > UNSTABLE_THRESHOLD {
            Stability::Unstable
        } else if mean_abs_diff > FAIR_THRESHOLD {
            Stability::Fair
        } else {
            Stability::Good
        }
    }

    pub fn label(&self) -> UiText {
        match self {
            Stability::Good => UiText::StabilityGood,
            Stability::Fair => UiText::StabilityFair,
            Stability::Unstable => UiText::StabilityUnstable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AltitudeStats {
    pub peak: Option<f64>,
    pub average: Option<f64>,
    pub stability: Option<Stability>,
}

pub fn compute_stats(values: &[f64]) -> AltitudeStats {
    if values.is_empty() {
        return AltitudeStats::default();
    }

    let peak = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let average = values.iter().sum::<f64>() / values.len() as f64;

    let mean_abs_diff = if values.len() > 1 {
        let diff_sum: f64 = values.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
        diff_sum / (values.len() - 1) as f64
    } else {
        0.0
    };

    AltitudeStats {
        peak: Some(peak),
        average: Some(average),
        stability: Some(Stability::classify(mean_abs_diff)),
    }
}
