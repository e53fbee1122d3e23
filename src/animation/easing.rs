//! Eased approach curves for growth
//!
//! Each frame a value closes a fixed fraction of the gap to its target, so
//! motion is fast at first and slows as it arrives.

/// Advance `current` toward `target` by `rate` of the remaining gap.
///
/// The step is floored at `min_step` and the result clamped at `target`, so
/// with a positive floor the target is reached in a bounded number of steps.
pub fn approach(current: f64, target: f64, rate: f64, min_step: f64) -> f64 {
    if current >= target {
        return current;
    }
    let step = ((target - current) * rate).max(min_step);
    (current + step).min(target)
}

/// Asymptotic ease with no floor; never overshoots
pub fn ease_toward(current: f64, target: f64, rate: f64) -> f64 {
    if current >= target {
        return current;
    }
    current + (target - current) * rate
}

/// Upper bound on the number of [`approach`] steps needed to cover `distance`
pub fn steps_to_reach(distance: f64, rate: f64, min_step: f64) -> usize {
    if distance <= 0.0 {
        return 0;
    }
    // Geometric phase until a step would fall below the floor, then linear
    let threshold = min_step / rate;
    let mut remaining = distance;
    let mut steps = 0;
    while remaining > threshold {
        remaining -= remaining * rate;
        steps += 1;
    }
    // One spare step absorbs floating-point rounding at the phase boundary
    steps + (remaining / min_step).ceil() as usize + 1
}
