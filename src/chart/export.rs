//! Export rendered charts to image, PDF, HTML and JSON files

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use charming::{Chart, HtmlRenderer, ImageRenderer, renderer::ImageFormat};
use chrono::{DateTime, Utc};
use printpdf::{Image, ImageTransform, Mm, PdfDocument, image_crate};
use serde_json::Value;

use super::{CHART_HEIGHT, CHART_WIDTH, RenderError};
use crate::settings::Settings;

/// A4 landscape, in millimetres
const PDF_PAGE_MM: (f32, f32) = (297.0, 210.0);
const PDF_MARGIN_MM: f32 = 10.0;
const MM_PER_INCH: f32 = 25.4;

/// Output format for an exported chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Svg,
    /// Rendered PNG on an A4 landscape page
    Pdf,
    Html,
    /// Chart option object as JSON
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
        }
    }
}

/// Result of exporting one format
#[derive(Debug)]
pub struct ExportOutcome {
    pub format: ExportFormat,
    pub path: PathBuf,
    pub result: Result<(), RenderError>,
}

/// `{base}_{YYYY-MM-DDTHH-MM-SS}.{ext}` in UTC
pub fn export_filename(base: &str, format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "{}_{}.{}",
        base,
        at.format("%Y-%m-%dT%H-%M-%S"),
        format.extension()
    )
}

/// Write the chart once per requested format. Every format is attempted
/// and reported on its own.
pub fn export_chart(
    chart: &Chart,
    formats: &[ExportFormat],
    dir: &Path,
    base: &str,
    settings: &Settings,
    at: DateTime<Utc>,
) -> Vec<ExportOutcome> {
    formats
        .iter()
        .map(|&format| {
            let path = dir.join(export_filename(base, format, at));
            let result = write_format(chart, format, &path, base, settings);
            match &result {
                Ok(()) => tracing::info!("exported {}", path.display()),
                Err(e) => tracing::warn!("{} export failed: {}", format.extension(), e),
            }
            ExportOutcome {
                format,
                path,
                result,
            }
        })
        .collect()
}

fn write_format(
    chart: &Chart,
    format: ExportFormat,
    path: &Path,
    title: &str,
    settings: &Settings,
) -> Result<(), RenderError> {
    let path_str = path.to_string_lossy();
    match format {
        ExportFormat::Png | ExportFormat::Jpeg => {
            let image_format = if format == ExportFormat::Png {
                ImageFormat::Png
            } else {
                ImageFormat::Jpeg
            };
            let mut renderer = ImageRenderer::new(CHART_WIDTH, CHART_HEIGHT);
            renderer
                .save_format(image_format, chart, &*path_str)
                .map_err(|e| RenderError::Save(e.to_string()))
        }
        ExportFormat::Svg => {
            let mut renderer = ImageRenderer::new(CHART_WIDTH, CHART_HEIGHT);
            renderer.save(chart, &*path_str).map_err(|e| RenderError::Save(e.to_string()))
        }
        ExportFormat::Pdf => write_pdf(chart, path, title),
        ExportFormat::Html => {
            // CSS pixels
            let mut renderer = HtmlRenderer::new(title, 1200, 600);
            renderer.save(chart, &*path_str).map_err(|e| RenderError::Save(e.to_string()))
        }
        ExportFormat::Json => {
            let option = option_json(chart, settings)?;
            let text = serde_json::to_string_pretty(&option)?;
            std::fs::write(path, text).map_err(|source| RenderError::Write {
                path: path_str.to_string(),
                source,
            })
        }
    }
}

/// Render to PNG and place it centered on a single PDF page
fn write_pdf(chart: &Chart, path: &Path, title: &str) -> Result<(), RenderError> {
    let mut renderer = ImageRenderer::new(CHART_WIDTH, CHART_HEIGHT);
    let png = renderer
        .render_format(ImageFormat::Png, chart)
        .map_err(|e| RenderError::Save(e.to_string()))?;
    let decoded =
        image_crate::load_from_memory(&png).map_err(|e| RenderError::Save(e.to_string()))?;
    // PDF image XObjects here carry no alpha channel
    let image = Image::from_dynamic_image(&image_crate::DynamicImage::ImageRgb8(decoded.to_rgb8()));

    let (page_width, page_height) = PDF_PAGE_MM;
    let (doc, page, layer) = PdfDocument::new(title, Mm(page_width), Mm(page_height), "chart");
    let layer = doc.get_page(page).get_layer(layer);

    // Scale so the chart spans the page between the side margins
    let dpi = CHART_WIDTH as f32 * MM_PER_INCH / (page_width - 2.0 * PDF_MARGIN_MM);
    let image_height = CHART_HEIGHT as f32 * MM_PER_INCH / dpi;
    image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(PDF_MARGIN_MM)),
            translate_y: Some(Mm((page_height - image_height) / 2.0)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );

    let file = File::create(path).map_err(|source| RenderError::Write {
        path: path.to_string_lossy().to_string(),
        source,
    })?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| RenderError::Save(e.to_string()))
}

/// The chart option object with the configured animation duration
pub fn option_json(chart: &Chart, settings: &Settings) -> Result<Value, RenderError> {
    let mut option = serde_json::to_value(chart)?;
    if let Value::Object(map) = &mut option {
        map.insert(
            "animationDuration".to_string(),
            Value::from(settings.animation_duration_ms()),
        );
    }
    Ok(option)
}
