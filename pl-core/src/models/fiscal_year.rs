use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of fiscal years shown on the dashboard.
pub const WINDOW_LEN: usize = 10;

/// Whether a fiscal year reports historical figures or a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YearKind {
    Actual,
    Planned,
}

impl YearKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Actual => "actual",
            Self::Planned => "planned",
        }
    }

    pub fn is_planned(&self) -> bool {
        matches!(self, Self::Planned)
    }
}

impl fmt::Display for YearKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed ten-year window `[start, start + 9]` and the last actual year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastWindow {
    pub start: i32,
    pub cutover_year: i32,
}

impl Default for ForecastWindow {
    fn default() -> Self {
        Self {
            start: 2019,
            cutover_year: 2023,
        }
    }
}

impl ForecastWindow {
    pub fn new(
        start: i32,
        cutover_year: i32,
    ) -> Self {
        Self {
            start,
            cutover_year,
        }
    }

    /// Last fiscal year in the window, or `None` if it does not fit in `i32`.
    pub fn checked_end(&self) -> Option<i32> {
        self.start.checked_add(WINDOW_LEN as i32 - 1)
    }

    /// Last fiscal year in the window. Saturates at `i32::MAX` for a window
    /// that [`checked_end`](Self::checked_end) rejects.
    pub fn end(&self) -> i32 {
        self.start.saturating_add(WINDOW_LEN as i32 - 1)
    }

    pub fn contains(
        &self,
        year: i32,
    ) -> bool {
        (self.start..=self.end()).contains(&year)
    }

    /// Fiscal year at a zero-based window position.
    pub fn year_at(
        &self,
        index: usize,
    ) -> Option<i32> {
        if index < WINDOW_LEN {
            self.start.checked_add(index as i32)
        } else {
            None
        }
    }

    /// Zero-based window position of a fiscal year.
    pub fn index_of(
        &self,
        year: i32,
    ) -> Option<usize> {
        self.contains(year).then(|| (year - self.start) as usize)
    }

    /// Years at or before the cutover are actual, later years are planned.
    pub fn kind_of(
        &self,
        year: i32,
    ) -> YearKind {
        if year <= self.cutover_year {
            YearKind::Actual
        } else {
            YearKind::Planned
        }
    }

    /// `(index, year)` pairs in window order.
    pub fn years(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        (0..WINDOW_LEN).filter_map(|index| self.year_at(index).map(|year| (index, year)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_window_spans_2019_to_2028() {
        let window = ForecastWindow::default();

        assert_eq!(window.start, 2019);
        assert_eq!(window.end(), 2028);
        assert_eq!(window.cutover_year, 2023);
    }

    #[test]
    fn kind_of_splits_at_cutover() {
        let window = ForecastWindow::default();

        assert_eq!(window.kind_of(2019), YearKind::Actual);
        assert_eq!(window.kind_of(2023), YearKind::Actual);
        assert_eq!(window.kind_of(2024), YearKind::Planned);
        assert_eq!(window.kind_of(2028), YearKind::Planned);
    }

    #[test]
    fn year_at_and_index_of_are_inverse() {
        let window = ForecastWindow::default();

        for (index, year) in window.years() {
            assert_eq!(window.year_at(index), Some(year));
            assert_eq!(window.index_of(year), Some(index));
        }
    }

    #[test]
    fn lookups_outside_window_return_none() {
        let window = ForecastWindow::default();

        assert_eq!(window.year_at(10), None);
        assert_eq!(window.index_of(2018), None);
        assert_eq!(window.index_of(2029), None);
    }

    #[test]
    fn years_yields_ten_consecutive_years() {
        let years: Vec<i32> = ForecastWindow::new(2000, 2004)
            .years()
            .map(|(_, y)| y)
            .collect();

        assert_eq!(years, (2000..2010).collect::<Vec<_>>());
    }

    #[test]
    fn window_past_i32_max_does_not_overflow() {
        let window = ForecastWindow::new(i32::MAX - 3, i32::MAX - 3);

        assert_eq!(window.checked_end(), None);
        assert_eq!(window.end(), i32::MAX);
        assert_eq!(window.year_at(3), Some(i32::MAX));
        assert_eq!(window.year_at(4), None);
        assert_eq!(window.years().count(), 4);
        assert_eq!(window.index_of(i32::MAX), Some(3));
    }
}
