//! Cluster Interference Library
//!
//! Co-channel interference statistics for a frequency reuse cluster.
//!
//! # Computation chain
//!
//! ```text
//! q      = √(3·K)                                   interferer attenuation
//! βᵢ     = f(q, sectors)                             interference coefficients
//! σₑ²    = 1/a · ln(1 + (e^{a·σ²} − 1) · Σβᵢ² / (Σβᵢ)²)
//! β      = β_last · e^{a·(σ² − σₑ²)/2}               relative interference level
//! x₁     = (10·lg(1/β) − C/I) / √(σ² + σₑ²)
//! P_out  = 100 · Q(x₁)                               percent
//! ```
//!
//! `K` is the cluster size, `σ` the shadowing deviation in dB, `C/I` the
//! protection ratio target and `a = 0.053` the log-normal conversion
//! constant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod normal;
pub mod quadrature;

pub use quadrature::QuadratureSettings;

/// Log-normal conversion constant, (ln 10 / 10)²
pub const SHADOWING_FACTOR: f64 = 0.053;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    #[error("Unsupported sector count per cell: {0} (expected 1, 3 or 6)")]
    UnsupportedSectorCount(u32),
    #[error("Unknown outage method: {0} (expected erfc or quadrature)")]
    UnknownOutageMethod(String),
    #[error("Invalid parameter for {metric}: {input} = {value}")]
    InvalidParameter {
        metric: &'static str,
        input: &'static str,
        value: f64,
    },
    #[error("Degenerate cluster geometry: {count} interference coefficients sum to zero")]
    DegenerateGeometry { count: usize },
    #[error("Outage integral did not converge within {evaluations} evaluations")]
    NumericalNonconvergence { evaluations: usize },
    #[error("Outage integrand is not finite at x = {at}")]
    NonFiniteIntegrand { at: f64 },
}

pub type Result<T> = std::result::Result<T, ClusterError>;

/// Sectorization of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectorLayout {
    /// Omnidirectional cell
    Omni,
    /// Three 120° sectors
    ThreeSector,
    /// Six 60° sectors
    SixSector,
}

impl SectorLayout {
    /// Number of co-channel interferers seen by one sector
    pub fn interferer_count(&self) -> usize {
        match self {
            SectorLayout::Omni => 6,
            SectorLayout::ThreeSector => 2,
            SectorLayout::SixSector => 1,
        }
    }
}

impl TryFrom<u32> for SectorLayout {
    type Error = ClusterError;

    fn try_from(sectors: u32) -> Result<Self> {
        match sectors {
            1 => Ok(SectorLayout::Omni),
            3 => Ok(SectorLayout::ThreeSector),
            6 => Ok(SectorLayout::SixSector),
            other => Err(ClusterError::UnsupportedSectorCount(other)),
        }
    }
}

/// How the Gaussian tail of the outage probability is evaluated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutageMethod {
    /// Complementary error function
    #[default]
    ClosedForm,
    /// Adaptive quadrature over the semi-infinite interval
    Quadrature,
}

impl fmt::Display for OutageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutageMethod::ClosedForm => write!(f, "erfc"),
            OutageMethod::Quadrature => write!(f, "quadrature"),
        }
    }
}

impl FromStr for OutageMethod {
    type Err = ClusterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "erfc" | "closed-form" => Ok(OutageMethod::ClosedForm),
            "quadrature" | "quad" => Ok(OutageMethod::Quadrature),
            _ => Err(ClusterError::UnknownOutageMethod(s.to_string())),
        }
    }
}

/// Reuse distance ratio and the interference coefficients it implies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterGeometry {
    /// Reuse distance ratio D/R
    pub q: f64,
    /// Normalized co-channel interference powers βᵢ
    pub coefficients: Vec<f64>,
}

impl ClusterGeometry {
    pub fn count(&self) -> usize {
        self.coefficients.len()
    }

    /// The coefficient used as the reference interferer (last in the set)
    pub fn dominant(&self) -> Option<f64> {
        self.coefficients.last().copied()
    }
}

/// Fixed configuration of a cluster analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Cells per reuse cluster
    pub cluster_dim: u32,
    /// Shadowing standard deviation σ, dB
    pub tetta: f64,
    pub layout: SectorLayout,
    /// Required carrier-to-interference ratio, dB
    pub target_ratio_db: f64,
}

impl ClusterConfig {
    /// Build from a raw sector count, rejecting layouts outside {1, 3, 6}
    pub fn new(cluster_dim: u32, tetta: f64, sectors: u32, target_ratio_db: f64) -> Result<Self> {
        Ok(Self {
            cluster_dim,
            tetta,
            layout: SectorLayout::try_from(sectors)?,
            target_ratio_db,
        })
    }
}

/// All cluster metrics from one pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterferenceSummary {
    pub geometry: ClusterGeometry,
    /// σₑ², dB²
    pub deviation: f64,
    pub relative_level: f64,
    /// Normalized protection margin x₁
    pub threshold: f64,
    /// Percent of locations where C/I falls below target
    pub outage_probability_pct: f64,
}

#[derive(Debug, Clone)]
pub struct ClusterAnalyzer {
    config: ClusterConfig,
    method: OutageMethod,
    quadrature: QuadratureSettings,
}

impl ClusterAnalyzer {
    pub fn new(config: ClusterConfig) -> Result<Self> {
        if config.cluster_dim == 0 {
            return Err(ClusterError::InvalidParameter {
                metric: "interferer attenuation",
                input: "cluster_dim",
                value: 0.0,
            });
        }
        if !(config.tetta.is_finite() && config.tetta > 0.0) {
            return Err(ClusterError::InvalidParameter {
                metric: "interference deviation",
                input: "tetta",
                value: config.tetta,
            });
        }
        if !config.target_ratio_db.is_finite() {
            return Err(ClusterError::InvalidParameter {
                metric: "outage probability",
                input: "signal_to_noise_ratio",
                value: config.target_ratio_db,
            });
        }

        Ok(Self {
            config,
            method: OutageMethod::default(),
            quadrature: QuadratureSettings::default(),
        })
    }

    pub fn with_outage_method(mut self, method: OutageMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_quadrature(mut self, settings: QuadratureSettings) -> Self {
        self.quadrature = settings;
        self
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    pub fn outage_method(&self) -> OutageMethod {
        self.method
    }

    /// q = √(3·K)
    pub fn attenuation_of_interferers(&self) -> f64 {
        (3.0 * self.config.cluster_dim as f64).sqrt()
    }

    pub fn interference_coefficients(&self) -> ClusterGeometry {
        let q = self.attenuation_of_interferers();
        let coefficients = match self.config.layout {
            SectorLayout::Omni => {
                let near = (q - 1.0).powi(-4);
                let far = (q + 1.0).powi(-4);
                vec![near, near, near, near, far, far]
            }
            SectorLayout::ThreeSector => vec![(q + 0.7).powi(-4), q.powi(-4)],
            SectorLayout::SixSector => vec![(q + 1.0).powi(-4)],
        };
        ClusterGeometry { q, coefficients }
    }

    /// σₑ², the log-domain variance of the summed interference
    pub fn interference_deviation(&self) -> Result<f64> {
        self.deviation_of(&self.interference_coefficients())
    }

    pub fn relative_interference_level(&self) -> Result<f64> {
        let geometry = self.interference_coefficients();
        let deviation = self.deviation_of(&geometry)?;
        self.relative_level_of(&geometry, deviation)
    }

    /// x₁, the protection margin in units of the combined deviation
    pub fn outage_threshold(&self) -> Result<f64> {
        let geometry = self.interference_coefficients();
        let deviation = self.deviation_of(&geometry)?;
        let level = self.relative_level_of(&geometry, deviation)?;
        self.threshold_of(level, deviation)
    }

    /// Probability, in percent, that C/I drops below the target
    pub fn outage_probability(&self) -> Result<f64> {
        let threshold = self.outage_threshold()?;
        self.tail_percent(threshold)
    }

    /// Run the whole chain once
    pub fn evaluate(&self) -> Result<InterferenceSummary> {
        let geometry = self.interference_coefficients();
        let deviation = self.deviation_of(&geometry)?;
        let relative_level = self.relative_level_of(&geometry, deviation)?;
        let threshold = self.threshold_of(relative_level, deviation)?;
        let outage_probability_pct = self.tail_percent(threshold)?;

        Ok(InterferenceSummary {
            geometry,
            deviation,
            relative_level,
            threshold,
            outage_probability_pct,
        })
    }

    fn deviation_of(&self, geometry: &ClusterGeometry) -> Result<f64> {
        let sum: f64 = geometry.coefficients.iter().sum();
        let sum_of_squares: f64 = geometry.coefficients.iter().map(|b| b * b).sum();
        let squared_sum = sum * sum;

        if !(squared_sum > 0.0 && squared_sum.is_finite()) {
            return Err(ClusterError::DegenerateGeometry {
                count: geometry.count(),
            });
        }

        let tetta = self.config.tetta;
        let spread = (SHADOWING_FACTOR * tetta * tetta).exp() - 1.0;
        Ok((1.0 + spread * sum_of_squares / squared_sum).ln() / SHADOWING_FACTOR)
    }

    fn relative_level_of(&self, geometry: &ClusterGeometry, deviation: f64) -> Result<f64> {
        let dominant = geometry
            .dominant()
            .ok_or(ClusterError::DegenerateGeometry { count: 0 })?;
        let tetta = self.config.tetta;
        Ok(dominant * (SHADOWING_FACTOR * (tetta * tetta - deviation) / 2.0).exp())
    }

    fn threshold_of(&self, level: f64, deviation: f64) -> Result<f64> {
        if !(level > 0.0 && level.is_finite()) {
            return Err(ClusterError::InvalidParameter {
                metric: "outage probability",
                input: "relative interference level",
                value: level,
            });
        }

        let tetta = self.config.tetta;
        let spread = (tetta * tetta + deviation).sqrt();
        if !(spread > 0.0) {
            return Err(ClusterError::InvalidParameter {
                metric: "outage probability",
                input: "tetta",
                value: tetta,
            });
        }

        Ok((10.0 * (1.0 / level).log10() - self.config.target_ratio_db) / spread)
    }

    fn tail_percent(&self, threshold: f64) -> Result<f64> {
        let tail = match self.method {
            OutageMethod::ClosedForm => normal::upper_tail(threshold),
            OutageMethod::Quadrature => normal::upper_tail_by_quadrature(threshold, &self.quadrature)?,
        };
        Ok(100.0 * tail)
    }
}
