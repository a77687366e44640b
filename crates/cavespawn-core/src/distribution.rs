//! Height-dependent spawn probability curves.
//!
//! The configured base chance for a difficulty is attenuated by how deep a
//! spawn sits inside the configured `[min_y, max_y]` range. Every curve is a
//! pure function of its inputs and the result is always clamped into
//! `[0, max(0, base)]`: a curve may weaken the base chance but never exceed
//! it, and never goes negative.
//!
//! With `depth = max_y - y` and `span = max_y - min_y`:
//!
//! | Curve         | Effective chance              |
//! |---------------|-------------------------------|
//! | `Constant`    | `base`                        |
//! | `Linear`      | `base * depth / span`         |
//! | `Hyperbolic`  | `base * (depth / span)^2`     |
//! | `Logarithmic` | `base * log_span(depth)`      |
//!
//! `depth / span` is 1 at the floor of the range and 0 at the top.

use cavespawn_types::SpawnDistribution;

use crate::math::{clamp, log_base};

/// Compute the effective spawn chance at height `y`.
///
/// `base` is the per-difficulty chance from configuration. A degenerate
/// range (`min_y == max_y`) treats the height fraction as `1.0` so no curve
/// divides by zero.
pub fn effective_chance(
    kind: SpawnDistribution,
    base: f64,
    y: f64,
    min_y: i32,
    max_y: i32,
) -> f64 {
    let depth = f64::from(max_y) - y;
    let span = f64::from(max_y) - f64::from(min_y);

    let scaled = match kind {
        SpawnDistribution::Constant => base,
        SpawnDistribution::Linear => base * height_fraction(depth, span),
        SpawnDistribution::Hyperbolic => base * height_fraction(depth, span).powi(2),
        SpawnDistribution::Logarithmic => base * log_depth(depth, span),
    };

    clamp(scaled, 0.0, base.max(0.0))
}

/// Fraction of the range lying above `y`: 0 at the top, 1 at the floor.
fn height_fraction(depth: f64, span: f64) -> f64 {
    if span <= 0.0 { 1.0 } else { depth / span }
}

/// Logarithm of the depth below the top of the range, in base `span`.
///
/// A degenerate range counts as full depth everywhere. Otherwise zero at or
/// above the top of the range, and a span of 1 has no usable logarithm base,
/// so any positive depth counts as full depth.
fn log_depth(depth: f64, span: f64) -> f64 {
    if span <= 0.0 {
        1.0
    } else if depth <= 0.0 {
        0.0
    } else if span <= 1.0 {
        1.0
    } else {
        log_base(depth, span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN_Y: i32 = -64;
    const MAX_Y: i32 = -8;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn heights() -> impl Iterator<Item = f64> {
        (MIN_Y..=MAX_Y).map(f64::from)
    }

    const ALL: [SpawnDistribution; 4] = [
        SpawnDistribution::Constant,
        SpawnDistribution::Linear,
        SpawnDistribution::Hyperbolic,
        SpawnDistribution::Logarithmic,
    ];

    #[test]
    fn result_stays_within_zero_and_base() {
        for kind in ALL {
            for base in [0.0, 0.05, 0.1, 0.5, 1.0] {
                // Include heights outside the range on both sides.
                for y in (MIN_Y - 20..=MAX_Y + 20).map(f64::from) {
                    let chance = effective_chance(kind, base, y, MIN_Y, MAX_Y);
                    assert!(chance >= 0.0, "{kind} base={base} y={y} gave {chance}");
                    assert!(chance <= base, "{kind} base={base} y={y} gave {chance}");
                }
            }
        }
    }

    #[test]
    fn negative_base_never_goes_negative() {
        for kind in ALL {
            assert!(approx(effective_chance(kind, -0.3, -40.0, MIN_Y, MAX_Y), 0.0));
        }
    }

    #[test]
    fn constant_is_base_everywhere() {
        for y in heights() {
            assert!(approx(
                effective_chance(SpawnDistribution::Constant, 0.1, y, MIN_Y, MAX_Y),
                0.1
            ));
        }
    }

    #[test]
    fn linear_is_full_at_floor_and_zero_at_top() {
        let floor = effective_chance(SpawnDistribution::Linear, 0.1, -64.0, MIN_Y, MAX_Y);
        let top = effective_chance(SpawnDistribution::Linear, 0.1, -8.0, MIN_Y, MAX_Y);
        assert!(approx(floor, 0.1));
        assert!(approx(top, 0.0));
    }

    #[test]
    fn linear_midpoint_is_half() {
        let mid = effective_chance(SpawnDistribution::Linear, 0.5, -36.0, MIN_Y, MAX_Y);
        assert!(approx(mid, 0.25));
    }

    #[test]
    fn linear_is_non_increasing_with_height() {
        let mut previous = f64::INFINITY;
        for y in heights() {
            let chance = effective_chance(SpawnDistribution::Linear, 0.5, y, MIN_Y, MAX_Y);
            assert!(chance <= previous, "increase at y={y}");
            previous = chance;
        }
    }

    #[test]
    fn hyperbolic_is_square_of_linear_fraction() {
        for y in heights() {
            let fraction = (f64::from(MAX_Y) - y) / f64::from(MAX_Y - MIN_Y);
            let expected = 0.5 * fraction * fraction;
            let chance = effective_chance(SpawnDistribution::Hyperbolic, 0.5, y, MIN_Y, MAX_Y);
            assert!(approx(chance, expected), "y={y}: {chance} != {expected}");
        }
    }

    #[test]
    fn hyperbolic_never_exceeds_linear() {
        for y in heights() {
            let linear = effective_chance(SpawnDistribution::Linear, 0.5, y, MIN_Y, MAX_Y);
            let hyper = effective_chance(SpawnDistribution::Hyperbolic, 0.5, y, MIN_Y, MAX_Y);
            assert!(hyper <= linear, "y={y}");
        }
    }

    #[test]
    fn hyperbolic_squares_signed_fraction_just_above_top() {
        // y = -7.5 still belongs to block -8, so the engine can ask for it.
        let chance = effective_chance(SpawnDistribution::Hyperbolic, 0.5, -7.5, MIN_Y, MAX_Y);
        let fraction = -0.5 / 56.0;
        assert!(chance > 0.0);
        assert!(approx(chance, 0.5 * fraction * fraction));
    }

    #[test]
    fn logarithmic_is_full_at_floor_and_zero_at_top() {
        let floor = effective_chance(SpawnDistribution::Logarithmic, 0.2, -64.0, MIN_Y, MAX_Y);
        let top = effective_chance(SpawnDistribution::Logarithmic, 0.2, -8.0, MIN_Y, MAX_Y);
        assert!(approx(floor, 0.2));
        assert!(approx(top, 0.0));
    }

    #[test]
    fn logarithmic_rises_quickly_below_top() {
        // log_56(8) is a little over half.
        let chance = effective_chance(SpawnDistribution::Logarithmic, 1.0, -16.0, MIN_Y, MAX_Y);
        assert!(approx(chance, 8.0_f64.ln() / 56.0_f64.ln()));
        let linear = effective_chance(SpawnDistribution::Linear, 1.0, -16.0, MIN_Y, MAX_Y);
        assert!(chance > linear);
    }

    #[test]
    fn logarithmic_within_one_block_of_top_is_zero() {
        let chance = effective_chance(SpawnDistribution::Logarithmic, 1.0, -8.5, MIN_Y, MAX_Y);
        assert!(approx(chance, 0.0));
    }

    #[test]
    fn below_floor_uses_full_base() {
        for kind in ALL {
            let chance = effective_chance(kind, 0.3, -100.0, MIN_Y, MAX_Y);
            assert!(approx(chance, 0.3), "{kind} gave {chance}");
        }
    }

    #[test]
    fn degenerate_range_uses_full_fraction() {
        // Both heights sit in block -20, the only block of the range.
        for kind in ALL {
            for y in [-20.0, -19.5] {
                let chance = effective_chance(kind, 0.4, y, -20, -20);
                assert!(chance.is_finite());
                assert!(approx(chance, 0.4), "{kind} at y={y} gave {chance}");
            }
        }
    }

    #[test]
    fn unit_span_logarithm_is_guarded() {
        let chance = effective_chance(SpawnDistribution::Logarithmic, 0.4, -9.0, -9, -8);
        assert!(approx(chance, 0.4));
    }
}
