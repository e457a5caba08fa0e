use std::time::Duration;

pub const FADE_STEP: f64 = 0.08;
pub const FADE_TICK_INTERVAL: Duration = Duration::from_millis(16);
/// First tick at which `opacity_at_tick` reaches 1.0.
pub const FADE_TICKS_TO_OPAQUE: u32 = 13;

/// Opacity of the main surface after `tick` animation steps.
pub fn opacity_at_tick(tick: u32) -> f64 {
    if tick >= FADE_TICKS_TO_OPAQUE {
        return 1.0;
    }
    (f64::from(tick) * FADE_STEP).min(1.0)
}

pub fn is_opaque(opacity: f64) -> bool {
    opacity >= 1.0
}

/// Tick counter for one fade; yields opacity values until it reaches 1.0, inclusive.
#[derive(Debug, Clone, Default)]
pub struct FadeProgress {
    tick: u32,
    done: bool,
}

impl FadeProgress {
    /// Opacity reached by the last yielded step.
    pub fn opacity(&self) -> f64 {
        opacity_at_tick(self.tick)
    }
}

impl Iterator for FadeProgress {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }
        self.tick += 1;
        let opacity = opacity_at_tick(self.tick);
        self.done = is_opaque(opacity);
        Some(opacity)
    }
}

/// Script applying `opacity` to the document root of a webview.
pub fn opacity_script(opacity: f64) -> String {
    format!(
        "(function(){{var r=document.documentElement;if(r){{r.style.opacity='{:.2}';}}}})();",
        opacity.clamp(0.0, 1.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_starts_at_zero_and_first_step_is_small() {
        assert_eq!(opacity_at_tick(0), 0.0);
        let first = opacity_at_tick(1);
        assert!(first > 0.0 && first <= FADE_STEP);
    }

    #[test]
    fn fade_sequence_is_non_decreasing_and_ends_exactly_at_one() {
        let sequence: Vec<f64> = FadeProgress::default().collect();

        assert_eq!(sequence.len(), FADE_TICKS_TO_OPAQUE as usize);
        assert!(sequence.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(sequence.last().copied(), Some(1.0));
        assert!(sequence[..sequence.len() - 1].iter().all(|value| *value < 1.0));
    }

    #[test]
    fn opacity_is_clamped_after_completion() {
        assert_eq!(opacity_at_tick(FADE_TICKS_TO_OPAQUE), 1.0);
        assert_eq!(opacity_at_tick(500), 1.0);
    }

    #[test]
    fn fade_progress_stops_yielding_once_opaque() {
        let mut progress = FadeProgress::default();
        for _ in 0..FADE_TICKS_TO_OPAQUE {
            assert!(progress.next().is_some());
        }
        assert_eq!(progress.next(), None);
        assert_eq!(progress.tick, FADE_TICKS_TO_OPAQUE);
        assert_eq!(progress.opacity(), 1.0);
    }

    #[test]
    fn total_fade_duration_is_about_two_hundred_ms() {
        let total = FADE_TICK_INTERVAL * FADE_TICKS_TO_OPAQUE;
        assert!(total >= Duration::from_millis(190) && total <= Duration::from_millis(220));
    }

    #[test]
    fn opacity_script_formats_two_decimals() {
        assert!(opacity_script(0.08).contains("'0.08'"));
        assert!(opacity_script(3.0).contains("'1.00'"));
    }
}
