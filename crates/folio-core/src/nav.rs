//! Section-navigation rules: the bounded retry schedule for missing scroll
//! targets, per-section scroll offsets, and the scroll-spy picker.

use crate::constants::*;

/// Bounded retry schedule with growing delays. Each `next()` yields the
/// delay to wait before the following attempt, `None` once exhausted;
/// at that point the caller logs a warning and falls back to a plain
/// URL-fragment update.
#[derive(Clone, Debug)]
pub struct RetrySchedule {
    tries_left: u32,
    delay_ms: f64,
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl RetrySchedule {
    pub fn new() -> Self {
        Self {
            tries_left: NAV_RETRY_TRIES,
            delay_ms: NAV_RETRY_INITIAL_MS,
        }
    }

    pub fn next(&mut self) -> Option<f64> {
        if self.tries_left == 0 {
            return None;
        }
        self.tries_left -= 1;
        let delay = self.delay_ms;
        self.delay_ms = (self.delay_ms * NAV_RETRY_GROWTH).min(NAV_RETRY_MAX_MS);
        Some(delay)
    }
}

/// Scroll offset for a section: header height minus the section's extra.
pub fn scroll_offset(header_height: f32, extra: Option<f32>) -> f32 {
    header_height - extra.unwrap_or(NAV_DEFAULT_EXTRA_OFFSET)
}

/// Vertical probe line for the scroll spy.
pub fn probe_line(header_height: f32, viewport_height: f32) -> f32 {
    header_height + viewport_height * NAV_PROBE_FRACTION
}

/// Picks the section whose top edge is nearest the probe line; ties go to
/// the earlier section. Returns `None` for an empty list.
pub fn active_section(section_tops: &[f32], probe_y: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, top) in section_tops.iter().enumerate() {
        if !top.is_finite() {
            continue;
        }
        let dist = (top - probe_y).abs();
        match best {
            Some((_, bd)) if dist >= bd => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_schedule_is_bounded_and_growing() {
        let mut sched = RetrySchedule::new();
        let mut delays = Vec::new();
        while let Some(d) = sched.next() {
            delays.push(d);
        }
        assert_eq!(delays.len() as u32, NAV_RETRY_TRIES);
        for pair in delays.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert!(delays.iter().all(|&d| d <= NAV_RETRY_MAX_MS));
        assert_eq!(delays[0], NAV_RETRY_INITIAL_MS);
        // Exhausted schedules stay exhausted.
        assert!(sched.next().is_none());
    }

    #[test]
    fn active_section_picks_nearest_with_earlier_tie() {
        let tops = [-400.0, 10.0, 500.0];
        assert_eq!(active_section(&tops, 0.0), Some(1));
        assert_eq!(active_section(&tops, 255.0), Some(1)); // equidistant: earlier wins
        assert_eq!(active_section(&tops, 490.0), Some(2));
        assert_eq!(active_section(&[], 0.0), None);
    }

    #[test]
    fn non_finite_tops_are_ignored() {
        let tops = [f32::NAN, 100.0];
        assert_eq!(active_section(&tops, 0.0), Some(1));
    }
}
