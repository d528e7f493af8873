//! Layout calculation for the timeline canvas.
//!
//! This module derives the time axis from the settings window and the
//! swimlane count: the month-aligned window, month/day totals, canvas
//! dimensions and the date-to-x mapping. These are pure functions of
//! their inputs; invalid windows degrade to defaults instead of failing,
//! so the renderer always has something to draw.

use chrono::{Datelike, Months, NaiveDate};

use crate::model::TimelineSettings;

/// Width of one month column in logical pixels.
pub const MONTH_WIDTH: f32 = 120.0;
/// Height of one swimlane band.
pub const LANE_HEIGHT: f32 = 80.0;
/// Height of the month header row.
pub const HEADER_HEIGHT: f32 = 60.0;
/// Width of the reserved year-label column on the right.
pub const YEAR_COLUMN_WIDTH: f32 = 60.0;
/// Uniform outer padding.
pub const PADDING: f32 = 20.0;

/// Layout descriptor consumed by the scene renderer.
///
/// Positions follow the original chart's uniform fractional mapping: a
/// date's x is its day offset over the whole window's day count, scaled
/// to the full month-grid width. Months of different lengths therefore
/// occupy equal-width columns while day positions inside them are linear
/// over the full span rather than calendar-exact; this quirk is kept for
/// compatibility with existing renders.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    /// First day of the start month.
    pub window_start: NaiveDate,
    /// Last day of the end month.
    pub window_end: NaiveDate,
    pub total_months: i32,
    pub total_days: i64,
    pub lane_count: usize,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl TimelineLayout {
    /// Computes the layout for a settings window and swimlane count.
    ///
    /// A missing or cleared start date falls back to `today`; a missing
    /// end date falls back to December 31 of `today`'s year. The month
    /// and day totals are floored at 1 so even a single-day or inverted
    /// window yields a drawable layout.
    pub fn compute(settings: &TimelineSettings, lane_count: usize, today: NaiveDate) -> Self {
        let start = settings.start_date.unwrap_or(today);
        let end = settings
            .end_date
            .unwrap_or_else(|| year_end(today.year()));

        let window_start = start_of_month(start);
        let window_end = end_of_month(end);

        let total_months = months_between(window_start, window_end).max(0) + 1;
        let total_months = total_months.max(1);
        let total_days = ((window_end - window_start).num_days() + 1).max(1);

        let canvas_width =
            PADDING + total_months as f32 * MONTH_WIDTH + YEAR_COLUMN_WIDTH + PADDING;
        let canvas_height = HEADER_HEIGHT + lane_count as f32 * LANE_HEIGHT + PADDING;

        Self {
            window_start,
            window_end,
            total_months,
            total_days,
            lane_count,
            canvas_width,
            canvas_height,
        }
    }

    /// Maps a date to an x coordinate.
    ///
    /// Dates outside the window map to coordinates outside the chart
    /// area; callers that want clipping rely on the surface bounds.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        let days = (date - self.window_start).num_days() as f32;
        PADDING + days / self.total_days as f32 * self.chart_width()
    }

    /// Width of the month grid (excludes padding and the year column).
    pub fn chart_width(&self) -> f32 {
        self.total_months as f32 * MONTH_WIDTH
    }

    /// Height of the swimlane grid area.
    pub fn grid_height(&self) -> f32 {
        self.lane_count as f32 * LANE_HEIGHT
    }

    /// Left edge of month column `index`.
    pub fn month_x(&self, index: i32) -> f32 {
        PADDING + index as f32 * MONTH_WIDTH
    }

    /// Top edge of the swimlane band at `index` (in sorted lane order).
    pub fn lane_top(&self, index: usize) -> f32 {
        HEADER_HEIGHT + index as f32 * LANE_HEIGHT
    }

    /// First day of each month column, in window order.
    pub fn months(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let start = self.window_start;
        (0..self.total_months as u32).map(move |i| start + Months::new(i))
    }

    /// Distinct calendar years spanned by the window, in window order.
    pub fn years(&self) -> Vec<i32> {
        let mut years = Vec::new();
        for month in self.months() {
            if years.last() != Some(&month.year()) {
                years.push(month.year());
            }
        }
        years
    }
}

/// Whole months from `start` to `end`, ignoring days (both are already
/// month-aligned when called from `compute`).
fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32
}

fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(next_month) => next_month.pred_opt().unwrap_or(date),
        None => date,
    }
}

fn year_end(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap()
}
