//! Network Sizing Library
//!
//! Spatial dimensioning of a cellular network: frequency channel count,
//! minimum bandwidth, per-sector traffic from the Erlang-B approximation,
//! subscriber density, base station count and hexagonal coverage radius.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod erlang;

pub use erlang::{offered_load, BlockingRegime};

/// Subscribers served by one base station
pub const SUBSCRIBERS_PER_BASE_STATION: f64 = 25_000.0 + 3_000.0 * 7.0;

/// √3
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Area-to-radius factor of a hexagonal cell, 2 / (3/√3) = 2/√3
pub const HEX_AREA_FACTOR: f64 = 2.0 / SQRT_3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    #[error("Invalid parameter for {metric}: {input} = {value}")]
    InvalidParameter {
        metric: &'static str,
        input: &'static str,
        value: f64,
    },
    #[error("No base stations for {subscribers_total} subscribers ({base_stations:.3} rounds to zero)")]
    NoBaseStations {
        subscribers_total: u64,
        base_stations: f64,
    },
}

pub type Result<T> = std::result::Result<T, SizingError>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingConfig {
    pub sectors_per_cell: u32,
    pub radio_channels_per_sector: u32,
    /// Cells per reuse cluster
    pub cluster_dim: u32,
    /// Traffic channels per sector
    pub traffic_channels: u32,
    /// Admissible call blocking probability, 0 < p < 1
    pub blocking_probability: f64,
    pub subscribers_total: u64,
}

/// Per-run inputs that are not part of the sizing configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingInputs {
    /// Bandwidth occupied by one frequency channel
    pub channel_bandwidth: f64,
    pub channels_per_carrier: u32,
    /// Erlangs per subscriber in the busy hour
    pub busy_hour_activity: f64,
    pub land_area: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingSummary {
    pub minimum_bandwidth: f64,
    pub total_frequency_channels: u64,
    pub subscribers_per_cell: f64,
    pub sector_telephone_load: f64,
    pub conversation_channels_per_sector: f64,
    pub total_base_stations: f64,
    pub coverage_radius: f64,
}

#[derive(Debug, Clone)]
pub struct NetworkSizer {
    config: SizingConfig,
}

impl NetworkSizer {
    pub fn new(config: SizingConfig) -> Result<Self> {
        let counts = [
            ("sectors per cell", "cell_sectors_num", config.sectors_per_cell),
            ("radio channels per sector", "sector_radio_chan", config.radio_channels_per_sector),
            ("total frequency channels", "cluster_dim", config.cluster_dim),
            ("sector telephone load", "traffic_transmission_ch_num", config.traffic_channels),
        ];
        for (metric, input, value) in counts {
            if value == 0 {
                return Err(SizingError::InvalidParameter {
                    metric,
                    input,
                    value: 0.0,
                });
            }
        }

        let p = config.blocking_probability;
        if !(p > 0.0 && p < 1.0) {
            return Err(SizingError::InvalidParameter {
                metric: "sector telephone load",
                input: "call_blocking_admissible_prob",
                value: p,
            });
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &SizingConfig {
        &self.config
    }

    /// Duplex frequency channels for the whole cluster
    pub fn total_frequency_channels(&self) -> u64 {
        self.config.sectors_per_cell as u64 * self.config.cluster_dim as u64 * 2
    }

    pub fn minimum_bandwidth(&self, channel_bandwidth: f64) -> Result<f64> {
        if !(channel_bandwidth > 0.0 && channel_bandwidth.is_finite()) {
            return Err(SizingError::InvalidParameter {
                metric: "minimum bandwidth",
                input: "one_fq_ch_bandwith",
                value: channel_bandwidth,
            });
        }
        Ok(self.total_frequency_channels() as f64 * channel_bandwidth)
    }

    /// Passed through unchanged; the per-carrier figure is used as the
    /// sector figure.
    pub fn conversation_channels_per_sector(&self, channels_per_carrier: u32) -> f64 {
        channels_per_carrier as f64
    }

    /// Erlangs carried by one sector
    pub fn sector_telephone_load(&self) -> Result<f64> {
        erlang::offered_load(self.config.traffic_channels, self.config.blocking_probability)
    }

    pub fn subscribers_per_cell(&self, busy_hour_activity: f64) -> Result<f64> {
        if !(busy_hour_activity > 0.0 && busy_hour_activity.is_finite()) {
            return Err(SizingError::InvalidParameter {
                metric: "subscribers per cell",
                input: "busy_hour_activity",
                value: busy_hour_activity,
            });
        }
        let load = self.sector_telephone_load()?;
        Ok(load / busy_hour_activity * self.config.cluster_dim as f64)
    }

    /// Fractional; rounding is left to the caller
    pub fn total_base_stations(&self) -> f64 {
        self.config.subscribers_total as f64 / SUBSCRIBERS_PER_BASE_STATION
    }

    pub fn coverage_radius(&self, land_area: f64) -> Result<f64> {
        if !(land_area > 0.0 && land_area.is_finite()) {
            return Err(SizingError::InvalidParameter {
                metric: "coverage radius",
                input: "land_area",
                value: land_area,
            });
        }

        let base_stations = self.total_base_stations();
        if base_stations.round() == 0.0 {
            return Err(SizingError::NoBaseStations {
                subscribers_total: self.config.subscribers_total,
                base_stations,
            });
        }

        Ok((HEX_AREA_FACTOR * (land_area / base_stations)).sqrt())
    }

    pub fn evaluate(&self, inputs: &SizingInputs) -> Result<SizingSummary> {
        Ok(SizingSummary {
            minimum_bandwidth: self.minimum_bandwidth(inputs.channel_bandwidth)?,
            total_frequency_channels: self.total_frequency_channels(),
            subscribers_per_cell: self.subscribers_per_cell(inputs.busy_hour_activity)?,
            sector_telephone_load: self.sector_telephone_load()?,
            conversation_channels_per_sector: self
                .conversation_channels_per_sector(inputs.channels_per_carrier),
            total_base_stations: self.total_base_stations(),
            coverage_radius: self.coverage_radius(inputs.land_area)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config() -> SizingConfig {
        SizingConfig {
            sectors_per_cell: 3,
            radio_channels_per_sector: 2,
            cluster_dim: 7,
            traffic_channels: 14,
            blocking_probability: 0.02,
            subscribers_total: 600_000,
        }
    }

    fn sizer() -> NetworkSizer {
        NetworkSizer::new(config()).unwrap()
    }

    #[test]
    fn test_constants() {
        assert_eq!(SUBSCRIBERS_PER_BASE_STATION, 46_000.0);
        assert_relative_eq!(HEX_AREA_FACTOR, 2.0 / 3.0_f64.sqrt(), max_relative = 1e-15);
    }

    #[test]
    fn test_channels_and_bandwidth() {
        let s = sizer();
        assert_eq!(s.total_frequency_channels(), 42);
        assert_relative_eq!(s.minimum_bandwidth(0.2).unwrap(), 8.4, max_relative = 1e-12);
        assert!(s.minimum_bandwidth(0.0).is_err());
    }

    #[test]
    fn test_conversation_channels_pass_through() {
        assert_eq!(sizer().conversation_channels_per_sector(8), 8.0);
    }

    #[test]
    fn test_subscribers_per_cell() {
        let s = sizer();
        assert_relative_eq!(s.subscribers_per_cell(0.025).unwrap(), 2_374.040_753_000_604, max_relative = 1e-9);
        assert!(s.subscribers_per_cell(0.0).is_err());
    }

    #[test]
    fn test_base_stations_and_radius() {
        let s = sizer();
        assert_relative_eq!(s.total_base_stations(), 600_000.0 / 46_000.0);
        assert_relative_eq!(s.coverage_radius(1500.0).unwrap(), 11.523_478_724_483_068, max_relative = 1e-9);
    }

    #[test]
    fn test_radius_without_base_stations() {
        let s = NetworkSizer::new(SizingConfig {
            subscribers_total: 20_000,
            ..config()
        })
        .unwrap();
        let err = s.coverage_radius(1500.0).unwrap_err();
        assert!(matches!(err, SizingError::NoBaseStations { subscribers_total: 20_000, .. }));
    }

    #[test]
    fn test_radius_rejects_bad_area() {
        assert!(sizer().coverage_radius(-1.0).is_err());
        assert!(sizer().coverage_radius(f64::INFINITY).is_err());
    }

    #[test]
    fn test_invalid_config() {
        let zero_channels = SizingConfig {
            traffic_channels: 0,
            ..config()
        };
        assert!(matches!(
            NetworkSizer::new(zero_channels),
            Err(SizingError::InvalidParameter { input: "traffic_transmission_ch_num", .. })
        ));

        let certain_blocking = SizingConfig {
            blocking_probability: 1.0,
            ..config()
        };
        assert!(NetworkSizer::new(certain_blocking).is_err());
    }

    #[test]
    fn test_evaluate() {
        let summary = sizer()
            .evaluate(&SizingInputs {
                channel_bandwidth: 0.2,
                channels_per_carrier: 8,
                busy_hour_activity: 0.025,
                land_area: 1500.0,
            })
            .unwrap();
        assert_eq!(summary.total_frequency_channels, 42);
        assert_relative_eq!(summary.sector_telephone_load, 8.478_716_975_002_158, max_relative = 1e-9);
        assert_eq!(summary.conversation_channels_per_sector, 8.0);
    }
}
