//! COST231-Hata propagation model
//!
//! ```text
//! A(h)  small/medium city: (1.1·lg f − 0.7)·h − (1.56·lg f − 0.8)
//! A(h)  large city:        3.2·(lg(11.75·h))² − 4.97
//! L     = 46.3 + 33.91·lg f − 13.82·lg h_tx − A + (44.9 − 6.55·lg h_tx)·lg d + C
//! ```
//!
//! `f` in MHz, heights in metres, `d` in km; `C` is 0 dB for small and
//! medium cities and 3 dB for large ones.

use crate::{ensure_positive, CityType, Result};

/// Mobile antenna height correction factor A(h), dB
pub fn antenna_height_correction(
    frequency_mhz: f64,
    rx_height_m: f64,
    city_type: CityType,
) -> Result<f64> {
    const METRIC: &str = "antenna height correction";
    let f = ensure_positive(METRIC, "radio_frequency", frequency_mhz)?;
    let h = ensure_positive(METRIC, "receiving_antenna_height", rx_height_m)?;

    let correction = match city_type {
        CityType::Small | CityType::Medium => {
            (1.1 * f.log10() - 0.7) * h - (1.56 * f.log10() - 0.8)
        }
        CityType::Large => 3.2 * (11.75 * h).log10().powi(2) - 4.97,
    };
    Ok(correction)
}

/// Median path loss between base and mobile station, dB
pub fn cost231_hata(
    height_correction: f64,
    frequency_mhz: f64,
    tx_height_m: f64,
    distance_km: f64,
    city_type: CityType,
) -> Result<f64> {
    const METRIC: &str = "COST231-Hata path loss";
    let f = ensure_positive(METRIC, "radio_frequency", frequency_mhz)?;
    let h_tx = ensure_positive(METRIC, "transmitting_antenna_height", tx_height_m)?;
    let d = ensure_positive(METRIC, "distance_between_antennas", distance_km)?;

    Ok(46.3 + 33.91 * f.log10() - 13.82 * h_tx.log10() - height_correction
        + (44.9 - 6.55 * h_tx.log10()) * d.log10()
        + city_type.hata_constant())
}
