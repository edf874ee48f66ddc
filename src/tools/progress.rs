//! Weight progress tools
//!
//! Logging body weight, reading the history back, and rendering it as a PNG
//! line chart.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use super::resolve_date;
use crate::db::Database;
use crate::models::WeightEntry;

pub const CHART_WIDTH: u32 = 1000;
pub const CHART_HEIGHT: u32 = 500;

/// Response for get_weight_history
#[derive(Debug, Serialize)]
pub struct WeightHistoryResponse {
    pub entries: Vec<WeightEntry>,
    pub total: usize,
    pub latest: Option<f64>,
    /// Latest minus earliest entry, once there are at least two
    pub change: Option<f64>,
}

/// Response for export_weight_chart
#[derive(Debug, Serialize)]
pub struct WeightChartResponse {
    pub file_path: String,
    pub points: usize,
    pub width: u32,
    pub height: u32,
}

/// Record a body weight in kg for a date (today when absent)
pub fn log_weight(db: &Database, date: Option<&str>, weight: f64) -> Result<WeightEntry, String> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(format!("weight must be positive, got {}", weight));
    }
    let date = resolve_date(date)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let entry = WeightEntry::create(&conn, &date, weight)
        .map_err(|e| format!("Failed to log weight: {}", e))?;

    info!(date = %entry.date, weight = entry.weight, "Weight logged");
    Ok(entry)
}

pub fn get_weight_history(db: &Database) -> Result<WeightHistoryResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let entries = WeightEntry::history(&conn)
        .map_err(|e| format!("Failed to load weight history: {}", e))?;

    let latest = entries.last().map(|e| e.weight);
    let change = match (entries.first(), entries.last()) {
        (Some(first), Some(last)) if entries.len() > 1 => Some(last.weight - first.weight),
        _ => None,
    };

    Ok(WeightHistoryResponse {
        total: entries.len(),
        latest,
        change,
        entries,
    })
}

/// Draw weight over time into an RGB buffer
///
/// Falls back to an unlabeled chart when no system font can be loaded.
pub fn generate_weight_chart(
    entries: &[WeightEntry],
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    if entries.is_empty() {
        return Err("No data to chart".to_string());
    }

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    if let Err(e) = draw_weight_chart(&mut buffer, entries, (width, height), true) {
        warn!(error = %e, "Labeled chart failed, drawing without text");
        draw_weight_chart(&mut buffer, entries, (width, height), false)?;
    }

    Ok(buffer)
}

fn draw_weight_chart(
    buffer: &mut [u8],
    entries: &[WeightEntry],
    size: (u32, u32),
    labeled: bool,
) -> Result<(), String> {
    use plotters::prelude::*;

    let root = BitMapBackend::with_buffer(buffer, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let y_min = entries.iter().map(|e| e.weight).fold(f64::INFINITY, f64::min) - 2.0;
    let y_max = entries.iter().map(|e| e.weight).fold(f64::NEG_INFINITY, f64::max) + 2.0;
    let x_max = (entries.len() as i32 - 1).max(1);
    let label_area: (u32, u32) = if labeled { (40, 50) } else { (0, 0) };

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(20)
        .x_label_area_size(label_area.0)
        .y_label_area_size(label_area.1);
    if labeled {
        builder.caption("Weight Progress", ("sans-serif", 24));
    }
    let mut chart = builder
        .build_cartesian_2d(0..x_max, y_min.max(0.0)..y_max)
        .map_err(|e| e.to_string())?;

    if labeled {
        chart
            .configure_mesh()
            .x_labels(entries.len().min(10))
            .x_label_formatter(&|x| {
                entries
                    .get(*x as usize)
                    .map(|e| e.date.split('-').skip(1).collect::<Vec<_>>().join("/"))
                    .unwrap_or_default()
            })
            .x_desc("Date")
            .y_desc("Weight (kg)")
            .draw()
            .map_err(|e| e.to_string())?;
    }

    let points: Vec<(i32, f64)> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (i as i32, e.weight))
        .collect();

    chart
        .draw_series(LineSeries::new(points.clone(), BLUE.stroke_width(2)))
        .map_err(|e| e.to_string())?;

    chart
        .draw_series(points.iter().map(|(x, y)| Circle::new((*x, *y), 4, BLUE.filled())))
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())?;
    Ok(())
}

/// Render the full weight history to a PNG file
pub fn export_weight_chart(db: &Database, file_path: &str) -> Result<WeightChartResponse, String> {
    let entries = {
        let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
        WeightEntry::history(&conn).map_err(|e| format!("Failed to load weight history: {}", e))?
    };

    let buffer = generate_weight_chart(&entries, CHART_WIDTH, CHART_HEIGHT)?;
    let img = image::RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, buffer)
        .ok_or_else(|| "Chart buffer has the wrong size".to_string())?;

    if let Some(parent) = Path::new(file_path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    img.save_with_format(file_path, image::ImageFormat::Png)
        .map_err(|e| format!("Failed to write chart: {}", e))?;

    info!(file_path, points = entries.len(), "Weight chart exported");

    Ok(WeightChartResponse {
        file_path: file_path.to_string(),
        points: entries.len(),
        width: CHART_WIDTH,
        height: CHART_HEIGHT,
    })
}
