//! High-resolution PNG export.
//!
//! The render itself runs synchronously on the caller's thread (the
//! surface has exactly one mutator); only the PNG encoding and file
//! write happen on a background thread so the GUI stays responsive.
//! A busy flag refuses re-entry for the duration of an in-flight export,
//! which keeps the second render path off the shared surface while its
//! resolution is still set to the export scale.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::Context as _;
use chrono::NaiveDate;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::model::TimelineData;
use crate::render::{RenderHost, ScaledRenderer, EXPORT_SCALE_FACTOR};

/// Outcome of a completed export operation.
pub enum ExportResult {
    /// The PNG was written to the given path.
    Saved(PathBuf),
    /// The export failed; the message is already logged.
    Failed(String),
    /// No export has finished since the last check.
    None,
}

/// Coordinates export renders and background PNG serialization.
pub struct ExportCoordinator {
    /// Shared busy flag; set for the whole render + encode + write span.
    exporting: Arc<Mutex<bool>>,

    /// Channel receiver for the in-flight export's result.
    receiver: Option<Receiver<Result<PathBuf, String>>>,
}

impl ExportCoordinator {
    pub fn new() -> Self {
        Self {
            exporting: Arc::new(Mutex::new(false)),
            receiver: None,
        }
    }

    /// Whether an export is currently in flight.
    pub fn is_exporting(&self) -> bool {
        *self.exporting.lock().unwrap()
    }

    /// Renders the chart at the export scale and writes it to `path` as
    /// a lossless PNG.
    ///
    /// Refused (silently, the button is disabled anyway) while a
    /// previous export is still running. Call `check_completion()` once
    /// per frame to observe the outcome.
    pub fn start_export(
        &mut self,
        host: &mut RenderHost,
        data: &TimelineData,
        today: NaiveDate,
        path: PathBuf,
        ctx: &egui::Context,
    ) {
        if self.is_exporting() {
            return;
        }

        let image = host.render_for_export(data, today, EXPORT_SCALE_FACTOR);

        let (sender, receiver) = channel();
        self.receiver = Some(receiver);
        *self.exporting.lock().unwrap() = true;

        let exporting = Arc::clone(&self.exporting);
        let ctx_handle = ctx.clone();

        thread::spawn(move || {
            let result = write_png(&image, &path)
                .map(|_| path)
                .map_err(|e| e.to_string());

            match &result {
                Ok(path) => tracing::info!(path = %path.display(), "timeline exported"),
                Err(message) => tracing::error!(error = %message, "timeline export failed"),
            }

            let _ = sender.send(result);
            *exporting.lock().unwrap() = false;
            ctx_handle.request_repaint();
        });
    }

    /// Checks whether the in-flight export has finished.
    pub fn check_completion(&mut self) -> ExportResult {
        if let Some(receiver) = &self.receiver {
            if let Ok(result) = receiver.try_recv() {
                self.receiver = None;
                return match result {
                    Ok(path) => ExportResult::Saved(path),
                    Err(message) => ExportResult::Failed(message),
                };
            }
        }
        ExportResult::None
    }
}

impl Default for ExportCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the output file name: the chart title with whitespace runs
/// collapsed to underscores, suffixed with the export date.
pub fn export_file_name(title: &str, date: NaiveDate) -> String {
    let stem: Vec<&str> = title.split_whitespace().collect();
    let stem = if stem.is_empty() {
        "timeline".to_string()
    } else {
        stem.join("_")
    };
    format!("{}_{}.png", stem, date.format("%Y-%m-%d"))
}

/// Directory offered as the default export location.
pub fn default_export_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Writes the raster as an RGBA PNG at best compression.
fn write_png(image: &RgbaImage, path: &Path) -> anyhow::Result<()> {
    if image.width() == 0 || image.height() == 0 {
        anyhow::bail!("render surface is empty");
    }

    let file = File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, CompressionType::Best, FilterType::Adaptive);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .with_context(|| format!("encoding {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_export_file_name_replaces_whitespace() {
        assert_eq!(
            export_file_name("Project Timeline 2024", date(2024, 3, 5)),
            "Project_Timeline_2024_2024-03-05.png"
        );
        assert_eq!(
            export_file_name("  spaced\tout  title ", date(2024, 3, 5)),
            "spaced_out_title_2024-03-05.png"
        );
    }

    #[test]
    fn test_export_file_name_empty_title() {
        assert_eq!(
            export_file_name("", date(2024, 12, 1)),
            "timeline_2024-12-01.png"
        );
    }

    #[test]
    fn test_write_png_round_trip() {
        let path = std::env::temp_dir().join("lanes_export_test.png");
        let _ = std::fs::remove_file(&path);

        let mut image = RgbaImage::new(16, 8);
        image.put_pixel(3, 3, image::Rgba([255, 0, 0, 255]));
        write_png(&image, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (16, 8));
        assert_eq!(decoded.get_pixel(3, 3).0, [255, 0, 0, 255]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_write_png_rejects_empty_image() {
        let image = RgbaImage::new(0, 0);
        let path = std::env::temp_dir().join("lanes_export_empty.png");
        assert!(write_png(&image, &path).is_err());
    }

    #[test]
    fn test_coordinator_starts_idle() {
        let mut coordinator = ExportCoordinator::new();
        assert!(!coordinator.is_exporting());
        assert!(matches!(coordinator.check_completion(), ExportResult::None));
    }
}
