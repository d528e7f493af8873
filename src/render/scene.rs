//! Scene rendering: turns a timeline snapshot into drawing operations.
//!
//! Layers paint in a fixed order, each fully before the next: background,
//! month header, year column, swimlane bands, projects, current-date
//! marker, outer border. The renderer makes no layout decisions beyond
//! text-fit measurement; all positions come from [`TimelineLayout`].
//!
//! Projects with a missing required date are skipped silently: a chart
//! with a half-edited project in it must still render.

use chrono::NaiveDate;
use egui::Color32;

use crate::color::{hex_to_color32, with_alpha};
use crate::layout::{TimelineLayout, HEADER_HEIGHT, LANE_HEIGHT, MONTH_WIDTH, PADDING, YEAR_COLUMN_WIDTH};
use crate::model::{Project, ProjectKind, Swimlane, TimelineData, TimelineSettings};
use crate::render::surface::{PixelSurface, TextAlign};
use crate::render::text::FontSpec;

/// Alpha applied to swimlane band backgrounds.
const LANE_BAND_ALPHA: u8 = 0x10;
/// Bar label must fit with this much slack or it is omitted entirely.
const LABEL_FIT_MARGIN: f32 = 10.0;
/// Minimum drawn bar width, so a zero-length range stays visible.
const MIN_BAR_WIDTH: f32 = 2.0;
const BAR_HEIGHT: f32 = 20.0;
const BAR_CORNER_RADIUS: f32 = 3.0;
/// Vertical spacing between stacked year labels.
const YEAR_LABEL_SPACING: f32 = 30.0;

/// Renders the full scene onto `surface`, which the caller has already
/// sized to the layout's canvas at the desired scale.
///
/// Pure with respect to its inputs: the same snapshot, layout, `today`
/// and surface scale always produce the same pixels.
pub fn render_scene(
    surface: &mut PixelSurface,
    layout: &TimelineLayout,
    data: &TimelineData,
    today: NaiveDate,
) {
    let settings = &data.settings;
    let grid_color = hex_to_color32(&settings.grid_color);
    let text_color = hex_to_color32(&settings.text_color);

    surface.fill(hex_to_color32(&settings.background_color));

    draw_month_header(surface, layout, settings, grid_color, text_color);

    if settings.show_year_labels {
        draw_year_labels(surface, layout, text_color);
    }

    let lanes = data.sorted_swimlanes();
    for (index, lane) in lanes.iter().enumerate() {
        draw_lane(surface, layout, settings, lane, index, grid_color, text_color);
    }
    for (index, lane) in lanes.iter().enumerate() {
        let lane_top = layout.lane_top(index);
        for project in data.projects_in_lane(lane.id) {
            draw_project(surface, layout, project, lane_top, text_color);
        }
    }

    if settings.show_current_date {
        draw_current_date_marker(surface, layout, settings, today);
    }

    surface.stroke_rect(
        PADDING,
        HEADER_HEIGHT,
        layout.chart_width(),
        layout.grid_height(),
        2.0,
        grid_color,
    );
}

/// Month labels across the top, with a vertical grid line per column
/// boundary when the grid is enabled.
fn draw_month_header(
    surface: &mut PixelSurface,
    layout: &TimelineLayout,
    settings: &TimelineSettings,
    grid_color: Color32,
    text_color: Color32,
) {
    for (i, month) in layout.months().enumerate() {
        let x = layout.month_x(i as i32);

        let label = settings.month_format.label(month);
        surface.draw_text(
            x + MONTH_WIDTH / 2.0,
            14.0,
            TextAlign::Center,
            &label,
            FontSpec::regular(12.0),
            text_color,
        );

        if settings.show_grid {
            surface.line_segment(x, HEADER_HEIGHT, x, layout.canvas_height, 1.0, grid_color);
        }
    }
}

/// One label per distinct calendar year, stacked in the reserved
/// right-hand column.
fn draw_year_labels(surface: &mut PixelSurface, layout: &TimelineLayout, text_color: Color32) {
    for (i, year) in layout.years().iter().enumerate() {
        surface.draw_text(
            layout.canvas_width - YEAR_COLUMN_WIDTH + 10.0,
            HEADER_HEIGHT + 18.0 + i as f32 * YEAR_LABEL_SPACING,
            TextAlign::Left,
            &year.to_string(),
            FontSpec::bold(14.0),
            text_color,
        );
    }
}

/// Tinted band, name, top grid line and quarter-month tick marks for one
/// swimlane.
fn draw_lane(
    surface: &mut PixelSurface,
    layout: &TimelineLayout,
    settings: &TimelineSettings,
    lane: &Swimlane,
    index: usize,
    grid_color: Color32,
    text_color: Color32,
) {
    let y = layout.lane_top(index);
    let band_color = with_alpha(hex_to_color32(&lane.color), LANE_BAND_ALPHA);
    surface.fill_rect(PADDING, y, layout.chart_width(), LANE_HEIGHT, band_color);

    surface.draw_text(
        PADDING + 10.0,
        y + 10.0,
        TextAlign::Left,
        &lane.name,
        FontSpec::bold(12.0),
        text_color,
    );

    if settings.show_grid {
        surface.line_segment(PADDING, y, PADDING + layout.chart_width(), y, 1.0, grid_color);
    }

    for month in 0..layout.total_months {
        let month_left = layout.month_x(month);
        for tick in 0..4 {
            let tick_x = month_left + tick as f32 * MONTH_WIDTH / 4.0;
            surface.line_segment(
                tick_x,
                y + LANE_HEIGHT - 10.0,
                tick_x,
                y + LANE_HEIGHT - 5.0,
                0.5,
                grid_color,
            );
        }
    }
}

/// A single project: rounded bar for a range, triangle marker for a
/// milestone. Skipped silently when a required date is missing.
fn draw_project(
    surface: &mut PixelSurface,
    layout: &TimelineLayout,
    project: &Project,
    lane_top: f32,
    text_color: Color32,
) {
    let color = hex_to_color32(&project.color);

    match project.kind {
        ProjectKind::Range {
            start: Some(start),
            end: Some(end),
        } => {
            let start_x = layout.date_to_x(start);
            let end_x = layout.date_to_x(end);
            let width = (end_x - start_x).max(MIN_BAR_WIDTH);
            let bar_y = lane_top + LANE_HEIGHT / 2.0 - BAR_HEIGHT / 2.0;

            surface.fill_rounded_rect(start_x, bar_y, width, BAR_HEIGHT, BAR_CORNER_RADIUS, color);

            // The label is all-or-nothing: omitted when it does not fit,
            // never truncated.
            let label_font = FontSpec::regular(11.0);
            if surface.measure_text(&project.name, label_font) < width - LABEL_FIT_MARGIN {
                surface.draw_text(
                    (start_x + end_x) / 2.0,
                    bar_y + 4.0,
                    TextAlign::Center,
                    &project.name,
                    label_font,
                    Color32::WHITE,
                );
            }
        }
        ProjectKind::Milestone {
            delivery: Some(delivery),
        } => {
            let x = layout.date_to_x(delivery);
            let center_y = lane_top + LANE_HEIGHT / 2.0;

            surface.fill_triangle(
                [
                    (x - 8.0, center_y - 8.0),
                    (x + 8.0, center_y - 8.0),
                    (x, center_y + 12.0),
                ],
                color,
            );

            surface.draw_text(
                x,
                center_y + 14.0,
                TextAlign::Center,
                &project.name,
                FontSpec::regular(10.0),
                text_color,
            );
        }
        // Required dates not filled in yet.
        _ => {}
    }
}

/// Vertical rule at today's position, when enabled and inside the
/// window.
fn draw_current_date_marker(
    surface: &mut PixelSurface,
    layout: &TimelineLayout,
    settings: &TimelineSettings,
    today: NaiveDate,
) {
    if today < layout.window_start || today > layout.window_end {
        return;
    }

    let x = layout.date_to_x(today);
    surface.line_segment(
        x,
        HEADER_HEIGHT,
        x,
        HEADER_HEIGHT + layout.grid_height(),
        1.5,
        hex_to_color32(&settings.current_date_color),
    );
}
