//! Link Budget Library
//!
//! Point-to-point radio link budget between a base station (BS) and a
//! mobile station (MS). Every operation is a pure formula over its
//! arguments; all levels and losses are in dB/dBm with losses entered as
//! signed figures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod propagation;

pub use propagation::{antenna_height_correction, cost231_hata};

/// Thermal noise density at 290 K, dBm/Hz
pub const THERMAL_NOISE_DBM_HZ: f64 = -174.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinkBudgetError {
    #[error("Unsupported city type code: {0} (expected 1, 2 or 3)")]
    UnsupportedCityType(u32),
    #[error("Invalid parameter for {metric}: {input} = {value} (must be positive)")]
    InvalidParameter {
        metric: &'static str,
        input: &'static str,
        value: f64,
    },
}

pub type Result<T> = std::result::Result<T, LinkBudgetError>;

/// City size category of the propagation environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CityType {
    Small,
    Medium,
    Large,
}

impl CityType {
    /// Metropolitan correction C of the COST231-Hata model, dB
    pub fn hata_constant(&self) -> f64 {
        match self {
            CityType::Small | CityType::Medium => 0.0,
            CityType::Large => 3.0,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            CityType::Small => 1,
            CityType::Medium => 2,
            CityType::Large => 3,
        }
    }
}

impl TryFrom<u32> for CityType {
    type Error = LinkBudgetError;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            1 => Ok(CityType::Small),
            2 => Ok(CityType::Medium),
            3 => Ok(CityType::Large),
            other => Err(LinkBudgetError::UnsupportedCityType(other)),
        }
    }
}

/// A figure quoted for both ends of the link
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationPair {
    pub base_station: f64,
    pub mobile_station: f64,
}

impl StationPair {
    pub fn new(base_station: f64, mobile_station: f64) -> Self {
        Self {
            base_station,
            mobile_station,
        }
    }

    /// Same figure at both ends
    pub fn symmetric(value: f64) -> Self {
        Self::new(value, value)
    }
}

impl From<(f64, f64)> for StationPair {
    fn from((base_station, mobile_station): (f64, f64)) -> Self {
        Self::new(base_station, mobile_station)
    }
}

/// Allowed propagation loss per direction, dB
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkLosses {
    /// BS → MS
    pub downlink: f64,
    /// MS → BS
    pub uplink: f64,
}

pub(crate) fn ensure_positive(metric: &'static str, input: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(LinkBudgetError::InvalidParameter {
            metric,
            input,
            value,
        })
    }
}

/// Margin for building penetration, body loss and location coverage
pub fn line_loss_margin(building_loss: f64, body_loss: f64, location_margin: f64) -> f64 {
    building_loss + body_loss + location_margin
}

/// Maximum allowed path loss in each direction
pub fn total_losses(eirp: StationPair, sensitivity: StationPair, margin: StationPair) -> LinkLosses {
    LinkLosses {
        downlink: eirp.base_station - sensitivity.mobile_station - margin.base_station,
        uplink: eirp.mobile_station - sensitivity.base_station - margin.mobile_station,
    }
}

/// P = −174 + 10·lg(Δf) + C/N + NF, dBm
pub fn receiver_sensitivity(bandwidth_hz: f64, c_over_n_db: f64, noise_figure_db: f64) -> Result<f64> {
    let bandwidth = ensure_positive("receiver sensitivity", "bandwidth", bandwidth_hz)?;
    Ok(THERMAL_NOISE_DBM_HZ + 10.0 * bandwidth.log10() + c_over_n_db + noise_figure_db)
}

/// Signal level needed at the antenna for 50% location probability
pub fn required_signal_power(
    sensitivity: f64,
    antenna_gain: f64,
    feeder_loss: f64,
    diplexer_loss: f64,
) -> f64 {
    sensitivity - antenna_gain + feeder_loss + diplexer_loss
}

/// Equivalent isotropically radiated power
///
/// `pattern_reduction` is zero on boresight.
pub fn eirp(
    tx_power: f64,
    antenna_gain: f64,
    feeder_loss: f64,
    duplex_loss: f64,
    diplexer_loss: f64,
    pattern_reduction: f64,
) -> f64 {
    tx_power + antenna_gain + feeder_loss + duplex_loss + diplexer_loss + pattern_reduction
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    #[test]
    fn test_city_type_codes() {
        assert_eq!(CityType::try_from(1).unwrap(), CityType::Small);
        assert_eq!(CityType::try_from(2).unwrap(), CityType::Medium);
        assert_eq!(CityType::try_from(3).unwrap(), CityType::Large);
        assert_eq!(CityType::try_from(0), Err(LinkBudgetError::UnsupportedCityType(0)));
        assert_eq!(CityType::try_from(4), Err(LinkBudgetError::UnsupportedCityType(4)));

        for city in [CityType::Small, CityType::Medium, CityType::Large] {
            assert_eq!(CityType::try_from(city.code()).unwrap(), city);
        }
    }

    #[test]
    fn test_line_loss_margin() {
        assert_eq!(line_loss_margin(15.0, 3.0, 7.0), 25.0);
    }

    #[test]
    fn test_total_losses_directions() {
        let losses = total_losses(
            StationPair::new(55.0, 30.0),
            StationPair::new(-104.0, -102.0),
            StationPair::symmetric(25.0),
        );
        assert_eq!(losses.downlink, 132.0);
        assert_eq!(losses.uplink, 109.0);
    }

    #[test]
    fn test_receiver_sensitivity() {
        let s = receiver_sensitivity(200_000.0, 9.0, 5.0).unwrap();
        assert_abs_diff_eq!(s, -107.0, epsilon = 0.1);
        assert_relative_eq!(s, -106.989_700_043_360_19, max_relative = 1e-12);
    }

    #[test]
    fn test_receiver_sensitivity_rejects_zero_bandwidth() {
        let err = receiver_sensitivity(0.0, 9.0, 5.0).unwrap_err();
        assert_eq!(
            err,
            LinkBudgetError::InvalidParameter {
                metric: "receiver sensitivity",
                input: "bandwidth",
                value: 0.0,
            }
        );
    }

    #[test]
    fn test_eirp_and_required_power() {
        assert_eq!(eirp(43.0, 18.0, -3.0, -1.0, -0.5, 0.0), 56.5);
        assert_relative_eq!(
            required_signal_power(-106.989_700_043_360_19, 18.0, -3.0, -0.5),
            -128.489_700_043_360_2,
            max_relative = 1e-12
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn fuzz_eirp_round_trip(
            power in -30.0f64..60.0,
            gain in 0.0f64..25.0,
            feeder in -6.0f64..0.0,
            diplexer in -2.0f64..0.0,
        ) {
            let radiated = eirp(power, gain, feeder, 0.0, diplexer, 0.0);
            let recovered = required_signal_power(radiated, gain, -feeder, -diplexer);
            prop_assert!((recovered - power).abs() < 1e-9);
        }

        #[test]
        fn fuzz_sensitivity_tracks_bandwidth(bw in 1.0e3f64..1.0e8) {
            let narrow = receiver_sensitivity(bw, 9.0, 5.0).unwrap();
            let wide = receiver_sensitivity(bw * 10.0, 9.0, 5.0).unwrap();
            prop_assert!((wide - narrow - 10.0).abs() < 1e-9);
        }
    }
}
