//! Planner configuration

use crate::metrics::Locale;
use cluster_interference::{OutageMethod, QuadratureSettings};

/// Input file read when no path is given
pub const DEFAULT_INPUT_FILE: &str = "initial.json";

/// Report file written when no path is given
pub const DEFAULT_OUTPUT_FILE: &str = "out.json";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlannerConfig {
    /// Language of report labels
    pub locale: Locale,
    /// Evaluation of the outage probability tail
    pub outage_method: OutageMethod,
    /// Used only with [`OutageMethod::Quadrature`]
    pub quadrature: QuadratureSettings,
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn outage_method(mut self, method: OutageMethod) -> Self {
        self.outage_method = method;
        self
    }

    pub fn quadrature(mut self, settings: QuadratureSettings) -> Self {
        self.quadrature = settings;
        self
    }
}
