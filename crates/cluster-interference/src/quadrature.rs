//! Adaptive Simpson quadrature
//!
//! Finite intervals are integrated directly. Semi-infinite intervals
//! `[a, ∞)` are mapped onto `[0, 1]` with `x = a + t / (1 - t)`, so the
//! integrand must decay faster than `1/x²`.
//!
//! Every run has a hard evaluation budget. Running out of budget is
//! reported as [`ClusterError::NumericalNonconvergence`] instead of
//! looping further.

use crate::{ClusterError, Result};

/// Quadrature settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureSettings {
    /// Absolute error tolerance over the whole interval
    pub tolerance: f64,
    /// Maximum number of integrand evaluations
    pub max_evaluations: usize,
    /// Panels are never accepted above this depth
    pub min_depth: u32,
    /// Panels are accepted unconditionally at this depth
    pub max_depth: u32,
}

impl Default for QuadratureSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_evaluations: 200_000,
            min_depth: 4,
            max_depth: 50,
        }
    }
}

impl QuadratureSettings {
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = n;
        self
    }
}

/// Integral estimate with the number of integrand evaluations spent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrature {
    pub value: f64,
    pub evaluations: usize,
}

struct Panel {
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
    tolerance: f64,
    depth: u32,
}

/// Counts evaluations and rejects non-finite samples
struct Sampler<F> {
    f: F,
    evaluations: usize,
    budget: usize,
}

impl<F: Fn(f64) -> f64> Sampler<F> {
    fn sample(&mut self, x: f64) -> Result<f64> {
        if self.evaluations >= self.budget {
            return Err(ClusterError::NumericalNonconvergence {
                evaluations: self.evaluations,
            });
        }
        self.evaluations += 1;

        let y = (self.f)(x);
        if y.is_finite() {
            Ok(y)
        } else {
            Err(ClusterError::NonFiniteIntegrand { at: x })
        }
    }
}

fn simpson(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}

/// Integrate `f` over the finite interval `[a, b]`
pub fn integrate<F>(f: F, a: f64, b: f64, settings: &QuadratureSettings) -> Result<Quadrature>
where
    F: Fn(f64) -> f64,
{
    if !a.is_finite() {
        return Err(ClusterError::InvalidParameter {
            metric: "quadrature",
            input: "lower bound",
            value: a,
        });
    }
    if !b.is_finite() {
        return Err(ClusterError::InvalidParameter {
            metric: "quadrature",
            input: "upper bound",
            value: b,
        });
    }
    if a == b {
        return Ok(Quadrature {
            value: 0.0,
            evaluations: 0,
        });
    }

    let mut sampler = Sampler {
        f,
        evaluations: 0,
        budget: settings.max_evaluations,
    };

    let m = 0.5 * (a + b);
    let fa = sampler.sample(a)?;
    let fm = sampler.sample(m)?;
    let fb = sampler.sample(b)?;

    let mut stack = vec![Panel {
        a,
        b,
        fa,
        fm,
        fb,
        whole: simpson(a, b, fa, fm, fb),
        tolerance: settings.tolerance,
        depth: 0,
    }];
    let mut total = 0.0;

    while let Some(panel) = stack.pop() {
        let m = 0.5 * (panel.a + panel.b);
        let flm = sampler.sample(0.5 * (panel.a + m))?;
        let frm = sampler.sample(0.5 * (m + panel.b))?;

        let left = simpson(panel.a, m, panel.fa, flm, panel.fm);
        let right = simpson(m, panel.b, panel.fm, frm, panel.fb);
        let delta = left + right - panel.whole;

        let converged = panel.depth >= settings.min_depth && delta.abs() <= 15.0 * panel.tolerance;
        if converged || panel.depth >= settings.max_depth {
            // Richardson extrapolation of the two-panel estimate
            total += left + right + delta / 15.0;
            continue;
        }

        let tolerance = 0.5 * panel.tolerance;
        let depth = panel.depth + 1;
        stack.push(Panel {
            a: m,
            b: panel.b,
            fa: panel.fm,
            fm: frm,
            fb: panel.fb,
            whole: right,
            tolerance,
            depth,
        });
        stack.push(Panel {
            a: panel.a,
            b: m,
            fa: panel.fa,
            fm: flm,
            fb: panel.fm,
            whole: left,
            tolerance,
            depth,
        });
    }

    Ok(Quadrature {
        value: total,
        evaluations: sampler.evaluations,
    })
}

/// Integrate `f` over `[lower, ∞)`
pub fn integrate_to_infinity<F>(f: F, lower: f64, settings: &QuadratureSettings) -> Result<Quadrature>
where
    F: Fn(f64) -> f64,
{
    if !lower.is_finite() {
        return Err(ClusterError::InvalidParameter {
            metric: "quadrature",
            input: "lower bound",
            value: lower,
        });
    }

    integrate(
        |t: f64| {
            if t >= 1.0 {
                return 0.0;
            }
            let span = 1.0 - t;
            f(lower + t / span) / (span * span)
        },
        0.0,
        1.0,
        settings,
    )
}
