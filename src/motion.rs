//! Animation math: easing, the stat-counter progression, and the hero fade.

/// Classic cubic ease-out over a 0..=1 progress value.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Current value of a 0→target counter animation. The final frame snaps
/// exactly to `target` so rounding never leaves the counter one short.
pub fn counter_value(target: u64, elapsed_ms: f64, duration_ms: f64) -> (u64, bool) {
    if duration_ms <= 0.0 || elapsed_ms >= duration_ms {
        return (target, true);
    }
    let progress = (elapsed_ms / duration_ms).clamp(0.0, 1.0);
    let value = ((target as f64) * ease_out_cubic(progress)).floor() as u64;
    (value.min(target), false)
}

/// Thousands grouping with '.' separators, as the es-ES site renders counts.
pub fn format_grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Hero opacity for the parallax fade: fully opaque until 100px of scroll,
/// linearly fading to transparent at 400px.
pub fn hero_opacity(scroll_y: f64) -> f64 {
    const FADE_START: f64 = 100.0;
    const FADE_END: f64 = 400.0;

    if scroll_y <= FADE_START {
        return 1.0;
    }
    (1.0 - (scroll_y - FADE_START) / (FADE_END - FADE_START)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_cubic_hits_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5, "ease-out front-loads progress");
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }

    #[test]
    fn counter_snaps_to_target_at_the_end() {
        let (v, done) = counter_value(1500, 2000.0, 2000.0);
        assert_eq!(v, 1500);
        assert!(done);

        let (v, done) = counter_value(1500, 2500.0, 2000.0);
        assert_eq!(v, 1500);
        assert!(done);
    }

    #[test]
    fn counter_is_monotonic_and_bounded() {
        let mut last = 0;
        for step in 0..=20 {
            let (v, _) = counter_value(1000, f64::from(step) * 100.0, 2000.0);
            assert!(v >= last);
            assert!(v <= 1000);
            last = v;
        }
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        assert_eq!(counter_value(42, 0.0, 0.0), (42, true));
    }

    #[test]
    fn grouping_uses_dots() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1000), "1.000");
        assert_eq!(format_grouped(1234567), "1.234.567");
    }

    #[test]
    fn hero_opacity_ramp() {
        assert_eq!(hero_opacity(0.0), 1.0);
        assert_eq!(hero_opacity(100.0), 1.0);
        assert!((hero_opacity(250.0) - 0.5).abs() < 1e-9);
        assert_eq!(hero_opacity(400.0), 0.0);
        assert_eq!(hero_opacity(1000.0), 0.0);
    }
}
