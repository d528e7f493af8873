use chrono::NaiveDate;
use lanes::layout::{HEADER_HEIGHT, LANE_HEIGHT, PADDING};
use lanes::{
    safe_parse, format_for_edit, validate_range,
    PixelSurface, RenderHost, ScaledRenderer, TimelineLayout,
    Project, ProjectKind, Swimlane, TimelineData, TimelineSettings,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn quarter_settings() -> TimelineSettings {
    TimelineSettings {
        start_date: Some(date(2024, 1, 1)),
        end_date: Some(date(2024, 3, 31)),
        title: "Q1".to_string(),
        show_current_date: false,
        ..TimelineSettings::default()
    }
}

fn dev_lane() -> Swimlane {
    Swimlane {
        id: 1,
        name: "Dev".to_string(),
        color: "#3B82F6".to_string(),
        order: 0,
    }
}

fn range_project(id: u64, name: &str, start: NaiveDate, end: NaiveDate) -> Project {
    Project {
        id,
        name: name.to_string(),
        swimlane_id: 1,
        kind: ProjectKind::Range {
            start: Some(start),
            end: Some(end),
        },
        color: "#EF4444".to_string(),
        description: String::new(),
    }
}

/// A day far outside every test window, so the current-date marker can
/// never interfere with pixel probes.
fn far_today() -> NaiveDate {
    date(2030, 6, 1)
}

#[test]
fn test_round_trip_law_across_bounds() {
    let mut day = date(1900, 1, 1);
    let step = chrono::Days::new(4931);
    while day <= date(2100, 12, 31) {
        let text = format_for_edit(Some(day));
        assert_eq!(safe_parse(&text), Some(day), "round trip failed for {}", text);
        day = day.checked_add_days(step).unwrap();
    }
}

#[test]
fn test_validate_range_agrees_with_ordering_and_bounds() {
    let candidates = [
        date(1899, 6, 1),
        date(1900, 1, 1),
        date(2024, 2, 29),
        date(2100, 12, 31),
        date(2101, 1, 1),
    ];
    for start in candidates {
        for end in candidates {
            let ok = validate_range(Some(start), Some(end)).is_ok();
            let expected = start <= end
                && start >= date(1900, 1, 1)
                && end <= date(2100, 12, 31);
            assert_eq!(ok, expected, "start={} end={}", start, end);
        }
    }
}

#[test]
fn test_layout_is_never_degenerate() {
    let windows = [
        (None, None),
        (Some(date(2024, 5, 10)), Some(date(2024, 5, 10))),
        (Some(date(2024, 9, 1)), Some(date(2024, 2, 1))),
        (Some(date(2024, 1, 1)), None),
    ];
    for (start, end) in windows {
        let settings = TimelineSettings {
            start_date: start,
            end_date: end,
            ..TimelineSettings::default()
        };
        let layout = TimelineLayout::compute(&settings, 3, date(2024, 6, 15));
        assert!(layout.total_months >= 1);
        assert!(layout.total_days >= 1);
    }
}

#[test]
fn test_quarter_scenario_bar_positions() {
    let layout = TimelineLayout::compute(&quarter_settings(), 1, far_today());
    assert_eq!(layout.total_months, 3);

    // Project Alpha: Jan 15 .. Feb 10 of a 91-day window.
    let left = layout.date_to_x(date(2024, 1, 15));
    let right = layout.date_to_x(date(2024, 2, 10));
    let chart_width = layout.chart_width();
    assert!((left - (PADDING + 14.0 / 91.0 * chart_width)).abs() < 1e-3);
    assert!((right - (PADDING + 40.0 / 91.0 * chart_width)).abs() < 1e-3);
}

#[test]
fn test_rendering_is_deterministic() {
    let data = TimelineData {
        projects: vec![
            range_project(10, "Alpha", date(2024, 1, 15), date(2024, 2, 10)),
            Project {
                id: 11,
                name: "Ship it".to_string(),
                swimlane_id: 1,
                kind: ProjectKind::Milestone {
                    delivery: Some(date(2024, 3, 1)),
                },
                color: "#10B981".to_string(),
                description: String::new(),
            },
        ],
        swimlanes: vec![dev_lane()],
        settings: quarter_settings(),
    };

    let mut host = RenderHost::new();
    let first = host.render_for_export(&data, far_today(), 2.0);
    let second = host.render_for_export(&data, far_today(), 2.0);
    assert_eq!(first.dimensions(), second.dimensions());
    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn test_export_render_scales_exactly() {
    let surface = PixelSurface::new(400.0, 200.0, 4.0);
    assert_eq!((surface.width_px(), surface.height_px()), (1600, 800));

    let data = TimelineData {
        projects: vec![],
        swimlanes: vec![dev_lane()],
        settings: quarter_settings(),
    };
    let layout = TimelineLayout::compute(&data.settings, 1, far_today());

    let mut host = RenderHost::new();
    let image = host.render_for_export(&data, far_today(), 4.0);
    assert_eq!(image.width(), (layout.canvas_width * 4.0).round() as u32);
    assert_eq!(image.height(), (layout.canvas_height * 4.0).round() as u32);
    assert_eq!(host.current_scale(), 4.0);
}

#[test]
fn test_interactive_render_restores_display_scale() {
    let data = TimelineData {
        projects: vec![],
        swimlanes: vec![dev_lane()],
        settings: quarter_settings(),
    };

    let mut host = RenderHost::new();
    host.render_interactive(&data, far_today(), 1.0);
    let display_px = (host.surface().width_px(), host.surface().height_px());

    let _ = host.render_for_export(&data, far_today(), 4.0);
    assert_eq!(host.current_scale(), 4.0);

    host.render_interactive(&data, far_today(), 1.0);
    assert_eq!(host.current_scale(), 1.0);
    assert_eq!(
        (host.surface().width_px(), host.surface().height_px()),
        display_px
    );
}

#[test]
fn test_zero_length_range_renders_visible_bar() {
    let data = TimelineData {
        projects: vec![range_project(10, "", date(2024, 2, 1), date(2024, 2, 1))],
        swimlanes: vec![dev_lane()],
        settings: quarter_settings(),
    };

    let mut host = RenderHost::new();
    let image = host.render_for_export(&data, far_today(), 1.0);

    let bar = image
        .pixels()
        .filter(|p| p.0 == [0xef, 0x44, 0x44, 0xff])
        .count();
    assert!(bar > 0, "zero-length range must still paint a bar");
}

#[test]
fn test_overlong_label_is_omitted_not_truncated() {
    // Two-day bar, a handful of pixels wide; the name cannot fit.
    let data = TimelineData {
        projects: vec![range_project(
            10,
            "An impossibly long project name that cannot fit",
            date(2024, 2, 1),
            date(2024, 2, 3),
        )],
        swimlanes: vec![dev_lane()],
        settings: quarter_settings(),
    };
    let layout = TimelineLayout::compute(&data.settings, 1, far_today());

    let mut host = RenderHost::new();
    let image = host.render_for_export(&data, far_today(), 1.0);

    // The bar interior must contain nothing but the bar color: the
    // label is dropped entirely rather than truncated into the bar.
    let x0 = layout.date_to_x(date(2024, 2, 1)).round() as u32;
    let x1 = layout.date_to_x(date(2024, 2, 3)).round() as u32;
    let bar_top = (HEADER_HEIGHT + LANE_HEIGHT / 2.0 - 10.0).round() as u32;
    for x in x0 + 1..x1.saturating_sub(1) {
        for y in bar_top + 3..bar_top + 17 {
            assert_eq!(
                image.get_pixel(x, y).0,
                [0xef, 0x44, 0x44, 0xff],
                "unexpected label pixel at ({x}, {y})"
            );
        }
    }
}

#[test]
fn test_milestone_outside_window_does_not_panic() {
    let data = TimelineData {
        projects: vec![Project {
            id: 10,
            name: "Far future".to_string(),
            swimlane_id: 1,
            kind: ProjectKind::Milestone {
                delivery: Some(date(2031, 6, 1)),
            },
            color: "#10B981".to_string(),
            description: String::new(),
        }],
        swimlanes: vec![dev_lane()],
        settings: quarter_settings(),
    };

    let layout = TimelineLayout::compute(&data.settings, 1, far_today());
    let x = layout.date_to_x(date(2031, 6, 1));
    assert!(x.is_finite());
    assert!(x > layout.canvas_width);

    let mut host = RenderHost::new();
    let image = host.render_for_export(&data, far_today(), 1.0);
    assert!(image.width() > 0 && image.height() > 0);
}

#[test]
fn test_projects_with_missing_dates_are_skipped_silently() {
    let data = TimelineData {
        projects: vec![
            Project {
                id: 10,
                name: "Half edited".to_string(),
                swimlane_id: 1,
                kind: ProjectKind::Range {
                    start: Some(date(2024, 2, 1)),
                    end: None,
                },
                color: "#EF4444".to_string(),
                description: String::new(),
            },
            Project {
                id: 11,
                name: "No delivery".to_string(),
                swimlane_id: 1,
                kind: ProjectKind::Milestone { delivery: None },
                color: "#EF4444".to_string(),
                description: String::new(),
            },
        ],
        swimlanes: vec![dev_lane()],
        settings: quarter_settings(),
    };

    let mut host = RenderHost::new();
    let image = host.render_for_export(&data, far_today(), 1.0);

    let bar = image
        .pixels()
        .filter(|p| p.0 == [0xef, 0x44, 0x44, 0xff])
        .count();
    assert_eq!(bar, 0, "incomplete projects must not be drawn");
}

#[test]
fn test_background_is_always_painted() {
    let data = TimelineData {
        projects: vec![],
        swimlanes: vec![dev_lane()],
        settings: quarter_settings(),
    };

    let mut host = RenderHost::new();
    let image = host.render_for_export(&data, far_today(), 1.0);

    // Corner pixel outside every layer: pure background.
    assert_eq!(image.get_pixel(0, 0).0, [0xff, 0xff, 0xff, 0xff]);
    // Output is never transparent.
    assert!(image.pixels().all(|p| p.0[3] == 0xff));
}
