use chrono::{Datelike, NaiveDate};

/// Default planning year when none is configured.
pub const DEFAULT_PLANNING_YEAR: i32 = 2026;

/// Smallest width (in percent) a Gantt bar is drawn with, so zero-length
/// features stay visible and clickable.
pub const MIN_BAR_WIDTH_PCT: f64 = 1.0;

/// Width floor used by the waterfall overview.
pub const MIN_WATERFALL_WIDTH_PCT: f64 = 0.8;

/// One quarter of the planning year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quarter {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The fixed four-quarter window every timeline position is measured against.
///
/// Positions are percentages in `[0, 100]`: `window_start` maps to 0 and the
/// last quarter's end date maps to 100. Dates are calendar days treated as
/// midnight-UTC instants, so no timezone conversion happens in either
/// direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningWindow {
    year: i32,
    quarters: Vec<Quarter>,
}

/// Quarter bounds never fall on Feb 29, so they exist in every year
/// `for_year` accepts (1..=9999) and the fallback is never taken.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

impl PlanningWindow {
    /// Build the Q1–Q4 window for a calendar year (clamped to 1..=9999).
    pub fn for_year(year: i32) -> Self {
        let year = year.clamp(1, 9999);
        let bounds = [
            ((1, 1), (3, 31)),
            ((4, 1), (6, 30)),
            ((7, 1), (9, 30)),
            ((10, 1), (12, 31)),
        ];
        let quarters = bounds
            .iter()
            .enumerate()
            .map(|(i, ((sm, sd), (em, ed)))| Quarter {
                label: format!("Q{} {}", i + 1, year),
                start: ymd(year, *sm, *sd),
                end: ymd(year, *em, *ed),
            })
            .collect();
        Self { year, quarters }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn quarters(&self) -> &[Quarter] {
        &self.quarters
    }

    /// First day of the first quarter.
    pub fn start(&self) -> NaiveDate {
        self.quarters[0].start
    }

    /// Last day of the last quarter.
    pub fn end(&self) -> NaiveDate {
        self.quarters[self.quarters.len() - 1].end
    }

    fn total_days(&self) -> f64 {
        (self.end() - self.start()).num_days() as f64
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }

    /// Horizontal position of a date in percent. Absent dates sit at 0.
    pub fn position_of(&self, date: Option<NaiveDate>) -> f64 {
        let Some(date) = date else {
            return 0.0;
        };
        let days = (date - self.start()).num_days() as f64;
        (days / self.total_days() * 100.0).clamp(0.0, 100.0)
    }

    /// Bar width in percent, floored at [`MIN_BAR_WIDTH_PCT`].
    pub fn width_of(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> f64 {
        self.width_with_floor(start, end, MIN_BAR_WIDTH_PCT)
    }

    /// Bar width in percent with a caller-supplied minimum. Returns 0 when
    /// either endpoint is missing.
    pub fn width_with_floor(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        floor: f64,
    ) -> f64 {
        if start.is_none() || end.is_none() {
            return 0.0;
        }
        (self.position_of(end) - self.position_of(start)).max(floor)
    }

    /// Inverse of [`position_of`](Self::position_of), rounded to the nearest day.
    pub fn date_of(&self, percent: f64) -> NaiveDate {
        let clamped = percent.clamp(0.0, 100.0);
        let days = (clamped / 100.0 * self.total_days()).round() as i64;
        self.start() + chrono::Duration::days(days)
    }

    /// First day of each month in the window, used for month headers.
    pub fn month_starts(&self) -> Vec<NaiveDate> {
        (1..=12).map(|m| ymd(self.year, m, 1)).collect()
    }

    /// Position of today's marker, only when strictly inside the window.
    pub fn today_marker(&self, today: NaiveDate) -> Option<f64> {
        let pct = self.position_of(Some(today));
        (pct > 0.0 && pct < 100.0).then_some(pct)
    }

    /// Quarter label containing the date, if any.
    pub fn quarter_of(&self, date: NaiveDate) -> Option<&Quarter> {
        if date.year() != self.year {
            return None;
        }
        self.quarters
            .iter()
            .find(|q| date >= q.start && date <= q.end)
    }
}

impl Default for PlanningWindow {
    fn default() -> Self {
        Self::for_year(DEFAULT_PLANNING_YEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_quarters_cover_the_year() {
        let window = PlanningWindow::for_year(2026);
        let labels: Vec<_> = window.quarters().iter().map(|q| q.label.as_str()).collect();
        assert_eq!(labels, ["Q1 2026", "Q2 2026", "Q3 2026", "Q4 2026"]);
        assert_eq!(window.start(), d(2026, 1, 1));
        assert_eq!(window.end(), d(2026, 12, 31));
    }

    #[test]
    fn test_out_of_range_years_are_clamped_to_real_dates() {
        let early = PlanningWindow::for_year(-40);
        assert_eq!(early.year(), 1);
        assert_eq!(early.start(), d(1, 1, 1));
        assert_eq!(early.end(), d(1, 12, 31));

        let late = PlanningWindow::for_year(123_456);
        assert_eq!(late.year(), 9999);
        assert_eq!(late.start(), d(9999, 1, 1));
        assert_eq!(late.end(), d(9999, 12, 31));
        for quarter in late.quarters() {
            assert!(quarter.start < quarter.end);
        }
    }

    #[test]
    fn test_position_of_missing_date_is_zero() {
        let window = PlanningWindow::default();
        assert_eq!(window.position_of(None), 0.0);
    }

    #[test]
    fn test_position_clamps_outside_window() {
        let window = PlanningWindow::default();
        assert_eq!(window.position_of(Some(d(2025, 6, 1))), 0.0);
        assert_eq!(window.position_of(Some(d(2027, 3, 1))), 100.0);
        assert_eq!(window.position_of(Some(d(2026, 1, 1))), 0.0);
        assert_eq!(window.position_of(Some(d(2026, 12, 31))), 100.0);
    }

    #[test]
    fn test_round_trip_every_day_of_window() {
        let window = PlanningWindow::default();
        let mut day = window.start();
        while day <= window.end() {
            let pct = window.position_of(Some(day));
            assert_eq!(window.date_of(pct), day, "round trip failed for {day}");
            day += chrono::Duration::days(1);
        }
    }

    #[test]
    fn test_width_requires_both_dates() {
        let window = PlanningWindow::default();
        assert_eq!(window.width_of(Some(d(2026, 2, 1)), None), 0.0);
        assert_eq!(window.width_of(None, Some(d(2026, 2, 1))), 0.0);
    }

    #[test]
    fn test_width_has_visible_floor() {
        let window = PlanningWindow::default();
        let same = Some(d(2026, 5, 5));
        assert_eq!(window.width_of(same, same), MIN_BAR_WIDTH_PCT);
        assert_eq!(
            window.width_with_floor(same, same, MIN_WATERFALL_WIDTH_PCT),
            MIN_WATERFALL_WIDTH_PCT
        );
    }

    #[test]
    fn test_width_is_linear_difference() {
        let window = PlanningWindow::default();
        let start = Some(d(2026, 2, 1));
        let end = Some(d(2026, 4, 1));
        let expected = window.position_of(end) - window.position_of(start);
        assert!((window.width_of(start, end) - expected).abs() < 1e-9);
        assert!((expected - 59.0 / 364.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_date_of_clamps_input() {
        let window = PlanningWindow::default();
        assert_eq!(window.date_of(-20.0), window.start());
        assert_eq!(window.date_of(140.0), window.end());
    }

    #[test]
    fn test_today_marker_only_inside_window() {
        let window = PlanningWindow::default();
        assert!(window.today_marker(d(2026, 7, 1)).is_some());
        assert!(window.today_marker(d(2026, 1, 1)).is_none());
        assert!(window.today_marker(d(2027, 1, 10)).is_none());
    }

    #[test]
    fn test_quarter_of() {
        let window = PlanningWindow::default();
        assert_eq!(window.quarter_of(d(2026, 8, 15)).unwrap().label, "Q3 2026");
        assert!(window.quarter_of(d(2025, 8, 15)).is_none());
    }
}
