pub mod color;
pub mod dates;
pub mod export;
pub mod layout;
pub mod model;
pub mod render;

// Export data model
pub use model::{
    MonthFormat, Project, ProjectKind, Swimlane,
    TimelineData, TimelineSettings,
};

// Export date normalization
pub use dates::{
    format_for_edit, parse_value, safe_parse,
    validate_range, validate_range_text, DateRangeError,
};

// Export layout calculation
pub use layout::TimelineLayout;

// Export rendering
pub use render::{
    render_scene, FontSpec, PixelSurface, RenderHost,
    ScaledRenderer, TextAlign, EXPORT_SCALE_FACTOR,
};

// Export PNG serialization
pub use export::{default_export_dir, export_file_name, ExportCoordinator, ExportResult};

// Export color helpers
pub use color::{adjust_brightness, color32_to_hex, hex_to_color32, with_alpha};
