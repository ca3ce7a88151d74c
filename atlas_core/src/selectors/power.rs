//! Power index - a single 0-100 reading of cumulative narrative momentum.

use atlas_data::{Event, Year};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base score used when the caller supplies none.
pub const DEFAULT_POWER_BASE: i32 = 48;

/// Qualitative band of a power score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerLabel {
    Peak,
    Rising,
    Contested,
    Declining,
}

impl PowerLabel {
    /// Band a clamped score. Thresholds are inclusive lower bounds, checked top-down.
    pub fn for_score(score: u8) -> Self {
        if score >= 75 {
            PowerLabel::Peak
        } else if score >= 60 {
            PowerLabel::Rising
        } else if score >= 45 {
            PowerLabel::Contested
        } else {
            PowerLabel::Declining
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerLabel::Peak => "Peak",
            PowerLabel::Rising => "Rising",
            PowerLabel::Contested => "Contested",
            PowerLabel::Declining => "Declining",
        }
    }
}

impl fmt::Display for PowerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score and label shown by the index indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerIndex {
    pub score: u8,
    pub label: PowerLabel,
}

/// Sum the deltas of every event concluded by `active_year` onto `base`.
///
/// Events still running at `active_year` do not count yet. Opposition events
/// are skipped unless `include_opposition` is set. The result is clamped to
/// `[0, 100]`.
pub fn compute_power_index(
    events: &[Event],
    active_year: Year,
    include_opposition: bool,
    base: i32,
) -> PowerIndex {
    let total: i64 = events
        .iter()
        .filter(|e| e.year_end <= active_year)
        .filter(|e| include_opposition || !e.is_opposition())
        .map(|e| i64::from(e.power_delta))
        .sum();

    let score = (i64::from(base) + total).clamp(0, 100) as u8;

    PowerIndex {
        score,
        label: PowerLabel::for_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_data::EventType;

    fn scenario() -> Vec<Event> {
        vec![
            Event::new("e1", "Bridge", 1925, 1930)
                .with_type(EventType::Build)
                .with_power_delta(10),
            Event::new("e2", "Protest", 1935, 1940)
                .with_type(EventType::Opposition)
                .with_power_delta(-30),
        ]
    }

    #[test]
    fn test_concluded_events_only() {
        let index = compute_power_index(&scenario(), 1935, false, DEFAULT_POWER_BASE);
        assert_eq!(index.score, 58);
        assert_eq!(index.label, PowerLabel::Contested);
    }

    #[test]
    fn test_opposition_included() {
        let index = compute_power_index(&scenario(), 1945, true, DEFAULT_POWER_BASE);
        assert_eq!(index.score, 28);
        assert_eq!(index.label, PowerLabel::Declining);
    }

    #[test]
    fn test_opposition_excluded_after_conclusion() {
        let index = compute_power_index(&scenario(), 1945, false, DEFAULT_POWER_BASE);
        assert_eq!(index.score, 58);
    }

    #[test]
    fn test_running_event_does_not_count() {
        // e1 starts before 1929 but has not ended.
        let index = compute_power_index(&scenario(), 1929, true, DEFAULT_POWER_BASE);
        assert_eq!(index.score, 48);
        assert_eq!(index.label, PowerLabel::Contested);
    }

    #[test]
    fn test_score_is_clamped() {
        let events = vec![
            Event::new("up", "Up", 1930, 1930).with_power_delta(i32::MAX),
            Event::new("up2", "Up again", 1930, 1930).with_power_delta(i32::MAX),
        ];
        assert_eq!(compute_power_index(&events, 1930, true, 48).score, 100);

        let events = vec![Event::new("down", "Down", 1930, 1930).with_power_delta(i32::MIN)];
        assert_eq!(compute_power_index(&events, 1930, true, 48).score, 0);
        assert_eq!(compute_power_index(&[], 1930, true, -5).score, 0);
    }

    #[test]
    fn test_monotonic_in_base() {
        let events = scenario();
        for include_opposition in [false, true] {
            let mut previous = 0;
            for base in -150..=150 {
                let score = compute_power_index(&events, 1945, include_opposition, base).score;
                assert!(score >= previous);
                assert!(score <= 100);
                previous = score;
            }
        }
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(PowerLabel::for_score(100), PowerLabel::Peak);
        assert_eq!(PowerLabel::for_score(75), PowerLabel::Peak);
        assert_eq!(PowerLabel::for_score(74), PowerLabel::Rising);
        assert_eq!(PowerLabel::for_score(60), PowerLabel::Rising);
        assert_eq!(PowerLabel::for_score(59), PowerLabel::Contested);
        assert_eq!(PowerLabel::for_score(45), PowerLabel::Contested);
        assert_eq!(PowerLabel::for_score(44), PowerLabel::Declining);
        assert_eq!(PowerLabel::for_score(0), PowerLabel::Declining);
        assert_eq!(PowerLabel::Rising.to_string(), "Rising");
    }
}
