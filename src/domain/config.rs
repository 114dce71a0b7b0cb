use super::errors::FlowError;
use super::value_objects::SolverBackend;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How cost and travel time combine into an edge's objective coefficient
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum ObjectiveWeighting {
    /// cost × minutes
    #[default]
    Product,
    /// α·cost + β·minutes
    Linear { cost: f64, time: f64 },
    /// cost alone, travel times ignored
    CostOnly,
}

impl ObjectiveWeighting {
    /// Whether coefficients depend on travel time
    pub fn requires_weight(&self) -> bool {
        match self {
            ObjectiveWeighting::Product => true,
            ObjectiveWeighting::Linear { time, .. } => *time != 0.0,
            ObjectiveWeighting::CostOnly => false,
        }
    }

    /// Objective coefficient of an edge; `None` when a needed weight is missing
    pub fn coefficient(&self, cost: f64, minutes: Option<f64>) -> Option<f64> {
        let minutes = match minutes {
            Some(m) => m,
            None if self.requires_weight() => return None,
            None => 0.0,
        };
        Some(match self {
            ObjectiveWeighting::Product => cost * minutes,
            ObjectiveWeighting::Linear {
                cost: alpha,
                time: beta,
            } => alpha * cost + beta * minutes,
            ObjectiveWeighting::CostOnly => cost,
        })
    }
}

/// What to do with an edge whose travel time could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPolicy {
    /// Keep it unresolved; compiling an objective that needs it fails the run
    #[default]
    Fail,
    /// Substitute a flagged constant, in minutes
    Fallback(f64),
}

/// Configuration of one optimization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub backend: SolverBackend,
    /// Wall-clock limit around the solve, in seconds
    pub time_limit_secs: Option<f64>,
    /// Flows at or below this are reported as zero
    pub tolerance: f64,
    /// Decimal places used when displaying flows
    pub display_precision: usize,
    /// Routing lookups in flight at once
    pub max_concurrent_lookups: usize,
    pub weighting: ObjectiveWeighting,
    pub weight_policy: WeightPolicy,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            backend: SolverBackend::Auto,
            time_limit_secs: None,
            tolerance: 1e-6,
            display_precision: 2,
            max_concurrent_lookups: 8,
            weighting: ObjectiveWeighting::Product,
            weight_policy: WeightPolicy::Fail,
        }
    }
}

impl OptimizerConfig {
    pub fn with_backend(mut self, backend: SolverBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_secs = Some(limit.as_secs_f64());
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_display_precision(mut self, precision: usize) -> Self {
        self.display_precision = precision;
        self
    }

    pub fn with_max_concurrent_lookups(mut self, limit: usize) -> Self {
        self.max_concurrent_lookups = limit;
        self
    }

    pub fn with_weighting(mut self, weighting: ObjectiveWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    pub fn with_weight_policy(mut self, policy: WeightPolicy) -> Self {
        self.weight_policy = policy;
        self
    }

    /// Solve limit; `None` also for limits `validate` rejects
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    pub fn validate(&self) -> Result<(), FlowError> {
        let mut errors = Vec::new();

        if let Some(secs) = self.time_limit_secs {
            if !secs.is_finite() || secs <= 0.0 {
                errors.push(format!("time limit must be positive, got {}", secs));
            } else if Duration::try_from_secs_f64(secs).is_err() {
                errors.push(format!("time limit of {} s is too large", secs));
            }
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            errors.push(format!("tolerance must be non-negative, got {}", self.tolerance));
        }
        if self.max_concurrent_lookups == 0 {
            errors.push("max_concurrent_lookups must be at least 1".to_string());
        }
        if let ObjectiveWeighting::Linear { cost, time } = self.weighting {
            if !(cost.is_finite() && time.is_finite() && cost >= 0.0 && time >= 0.0) {
                errors.push(format!(
                    "linear weighting coefficients must be non-negative, got cost={} time={}",
                    cost, time
                ));
            }
        }
        if let WeightPolicy::Fallback(minutes) = self.weight_policy {
            if !minutes.is_finite() || minutes < 0.0 {
                errors.push(format!("fallback travel time must be non-negative, got {}", minutes));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FlowError::Config(errors.join("; ")))
        }
    }
}
