//! Network Planner
//!
//! First-approximation planning of an LTE-like cellular network from one
//! JSON parameter file. The report combines three calculators:
//!
//! | Section | Crate | Values |
//! |---------|-------|--------|
//! | Cluster | `cluster-interference` | q, σₑ², relative interference, outage % |
//! | Spatial sizing | `network-sizing` | channels, bandwidth, Erlang load, base stations, radius |
//! | Link budget | `link-budget` | margins, EIRP, sensitivity, COST231-Hata loss |
//!
//! Computation is fail-fast: the first error from any calculator aborts the
//! report and no partial output is produced.

use cluster_interference::ClusterError;
use link_budget::LinkBudgetError;
use network_sizing::SizingError;
use std::fmt;
use thiserror::Error;

pub mod config;
pub mod input;
pub mod metrics;
pub mod report;

pub use config::{PlannerConfig, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE};
pub use input::{load_input, InputRecord};
pub use metrics::{Locale, Metric, Section};
pub use report::{plan, OutputReport, ReportAssembler};

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Cannot read input")]
    Io(#[from] std::io::Error),
    #[error("Malformed input")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Cluster(#[from] ClusterError),
    #[error(transparent)]
    Sizing(#[from] SizingError),
    #[error(transparent)]
    LinkBudget(#[from] LinkBudgetError),
    #[error("Duplicate report label: {0}")]
    DuplicateLabel(String),
    #[error("{metric} is not finite: {value}")]
    NonFiniteMetric { metric: Metric, value: f64 },
}

pub type Result<T> = std::result::Result<T, PlannerError>;

/// Failure classes of a planning run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingOrMalformedInput,
    UnsupportedConfiguration,
    InvalidParameter,
    NumericalNonconvergence,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MissingOrMalformedInput => "missing or malformed input",
            ErrorKind::UnsupportedConfiguration => "unsupported configuration",
            ErrorKind::InvalidParameter => "invalid parameter",
            ErrorKind::NumericalNonconvergence => "numerical nonconvergence",
        };
        f.write_str(name)
    }
}

impl PlannerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlannerError::Io(_) | PlannerError::Json(_) => ErrorKind::MissingOrMalformedInput,
            PlannerError::Cluster(err) => match err {
                ClusterError::UnsupportedSectorCount(_) | ClusterError::UnknownOutageMethod(_) => {
                    ErrorKind::UnsupportedConfiguration
                }
                ClusterError::InvalidParameter { .. } | ClusterError::DegenerateGeometry { .. } => {
                    ErrorKind::InvalidParameter
                }
                ClusterError::NumericalNonconvergence { .. }
                | ClusterError::NonFiniteIntegrand { .. } => ErrorKind::NumericalNonconvergence,
            },
            PlannerError::Sizing(_) => ErrorKind::InvalidParameter,
            PlannerError::LinkBudget(err) => match err {
                LinkBudgetError::UnsupportedCityType(_) => ErrorKind::UnsupportedConfiguration,
                LinkBudgetError::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            },
            PlannerError::DuplicateLabel(_) => ErrorKind::UnsupportedConfiguration,
            PlannerError::NonFiniteMetric { .. } => ErrorKind::InvalidParameter,
        }
    }
}
