//! Erlang-B offered load approximation
//!
//! Inverts the Erlang-B blocking formula for the traffic a group of `N`
//! channels carries at blocking probability `p`. With
//! `x = p·√(Nπ/2)` the approximation has two regimes split at `x = 1`,
//! i.e. `p = √(2/(Nπ))`:
//!
//! ```text
//! x ≤ 1:  A = N·(1 − √(1 − x^{1/N}))
//! x > 1:  A = N + √(π/2 + 2N·lg x) − √(π/2)
//! ```
//!
//! Both branches evaluate to exactly `N` at `x = 1`.

use crate::{Result, SizingError};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockingRegime {
    Low,
    High,
}

/// Blocking probability at which the two regimes meet
pub fn regime_boundary(channels: u32) -> f64 {
    (2.0 / (channels as f64 * PI)).sqrt()
}

pub fn regime(channels: u32, blocking_probability: f64) -> BlockingRegime {
    if blocking_probability <= regime_boundary(channels) {
        BlockingRegime::Low
    } else {
        BlockingRegime::High
    }
}

/// Offered traffic, in Erlangs, carried by `channels` at the given blocking
pub fn offered_load(channels: u32, blocking_probability: f64) -> Result<f64> {
    if channels == 0 {
        return Err(SizingError::InvalidParameter {
            metric: "sector telephone load",
            input: "traffic_transmission_ch_num",
            value: 0.0,
        });
    }
    if !(blocking_probability > 0.0 && blocking_probability < 1.0) {
        return Err(SizingError::InvalidParameter {
            metric: "sector telephone load",
            input: "call_blocking_admissible_prob",
            value: blocking_probability,
        });
    }

    let n = channels as f64;
    let x = blocking_probability * (n * FRAC_PI_2).sqrt();

    let load = match regime(channels, blocking_probability) {
        BlockingRegime::Low => low_blocking_load(n, x),
        BlockingRegime::High => high_blocking_load(n, x)?,
    };

    if load.is_finite() && load >= 0.0 {
        Ok(load)
    } else {
        Err(SizingError::InvalidParameter {
            metric: "sector telephone load",
            input: "call_blocking_admissible_prob",
            value: blocking_probability,
        })
    }
}

fn low_blocking_load(n: f64, x: f64) -> f64 {
    // x may round a hair above 1 right at the boundary
    let headroom = (1.0 - x.powf(1.0 / n)).max(0.0);
    n * (1.0 - headroom.sqrt())
}

fn high_blocking_load(n: f64, x: f64) -> Result<f64> {
    if !(x > 0.0) {
        return Err(SizingError::InvalidParameter {
            metric: "sector telephone load",
            input: "call_blocking_admissible_prob",
            value: x,
        });
    }
    let radicand = FRAC_PI_2 + 2.0 * n * x.log10();
    if radicand < 0.0 {
        return Err(SizingError::InvalidParameter {
            metric: "sector telephone load",
            input: "call_blocking_admissible_prob",
            value: x,
        });
    }
    Ok(n + radicand.sqrt() - FRAC_PI_2.sqrt())
}
