//! Closed-form energy and silver growth between transactions.
//!
//! The ledger only writes a planet when a transaction touches it. Between
//! transactions the planet evolves by deterministic formulas that the client
//! evaluates itself:
//!
//! - **Energy** follows the world's [`GrowthModel`]: logistic growth toward
//!   `energy_cap` (the ledger's formula) or capped doubling.
//! - **Silver** accumulates linearly at `silver_growth` per second up to
//!   `silver_cap`. Only silver mines have a non-zero rate.
//!
//! Unowned and paused planets do not grow. Zero energy stays zero.
//!
//! # Determinism
//!
//! Growth is always evaluated from the planet's [`GrowthCheckpoint`], never
//! from a previous client-side advance. Advancing to `t2` directly and
//! advancing to `t1` then `t2` therefore produce bit-identical planets.
//!
//! [`GrowthCheckpoint`]: umbra_types::GrowthCheckpoint

use umbra_types::{GrowthModel, Planet, WorldConstants};

/// Bring `planet` forward to `to_time`.
///
/// Returns the planet unchanged when `to_time` is not after
/// `planet.last_updated`. Otherwise every field is recomputed from the
/// growth checkpoint, clamped to `[0, cap]`, and `last_updated` becomes
/// `to_time`.
pub fn advance(planet: &Planet, to_time: u64, constants: &WorldConstants) -> Planet {
    if to_time <= planet.last_updated {
        return planet.clone();
    }

    let origin = planet.growth_origin();
    let elapsed = to_time.saturating_sub(origin.time);
    let mut next = planet.clone();

    if planet.is_paused() {
        next.energy = clamp_to_cap(planet.energy, planet.energy_cap);
        next.silver = clamp_to_cap(planet.silver, planet.silver_cap);
    } else {
        next.energy = energy_after(planet, origin.energy, elapsed, constants.growth);
        next.silver = silver_after(planet, origin.silver, elapsed);
    }
    next.last_updated = to_time;
    next.checkpoint = Some(origin);

    tracing::trace!(
        planet = %planet.location_id,
        from = planet.last_updated,
        to = to_time,
        energy = next.energy,
        silver = next.silver,
        "advanced planet"
    );

    next
}

/// Clamp a quantity into `[0, cap]`. NaN becomes zero.
pub fn clamp_to_cap(value: f64, cap: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, cap.max(0.0))
}

fn energy_after(planet: &Planet, start: f64, elapsed: u64, model: GrowthModel) -> f64 {
    let cap = planet.energy_cap;
    if start <= 0.0 || !planet.has_owner() {
        return clamp_to_cap(start, cap);
    }

    let dt = secs_f64(elapsed);
    let grown = match model {
        GrowthModel::Logistic => logistic(start, cap, planet.energy_growth, dt),
        GrowthModel::Doubling { period_secs } => doubling(start, period_secs, dt),
    };
    clamp_to_cap(grown, cap)
}

// Plain multiply-add: the ledger rounds each step, and a fused `mul_add`
// can differ from it in the last bit.
#[allow(clippy::suboptimal_flops)]
fn silver_after(planet: &Planet, start: f64, elapsed: u64) -> f64 {
    if !planet.has_owner() {
        return clamp_to_cap(start, planet.silver_cap);
    }
    let grown = planet.silver_growth * secs_f64(elapsed) + start;
    clamp_to_cap(grown, planet.silver_cap)
}

/// `cap / (1 + (cap / start - 1) * e^(-4 * rate * dt / cap))`
#[allow(clippy::suboptimal_flops)]
fn logistic(start: f64, cap: f64, rate: f64, dt: f64) -> f64 {
    if cap <= 0.0 {
        return 0.0;
    }
    let decay = (-4.0 * rate * dt / cap).exp();
    let denominator = decay * (cap / start - 1.0) + 1.0;
    cap / denominator
}

/// `start * 2^(dt / period)`
fn doubling(start: f64, period_secs: u64, dt: f64) -> f64 {
    if period_secs == 0 {
        return f64::INFINITY;
    }
    start * (dt / secs_f64(period_secs)).exp2()
}

#[allow(clippy::cast_precision_loss)]
fn secs_f64(secs: u64) -> f64 {
    // Exact for any span below 2^53 seconds.
    secs as f64
}
