use crate::core::recorder::Record;
use crate::error::{BatbenchError, Result};
use chrono::{DateTime, Duration, Local};
use plotters::prelude::*;
use std::path::Path;

const CHART_SIZE: (u32, u32) = (1200, 600);

/// Render the drain chart: battery percentage over time, one line per
/// experimental condition, written as a PNG.
pub fn render(records: &[Record], path: &Path) -> Result<()> {
    let first = records
        .first()
        .ok_or_else(|| BatbenchError::chart("no records to plot"))?;
    let last = records.last().ok_or_else(|| BatbenchError::chart("no records to plot"))?;

    let x_start = first.timestamp;
    // Widen a degenerate single-instant range so the axis stays valid
    let x_end = if last.timestamp > x_start {
        last.timestamp
    } else {
        x_start + Duration::minutes(1)
    };

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Battery Drain Test", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d(x_start..x_end, 0i32..100i32)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("Battery Percentage")
        .x_label_formatter(&|ts: &DateTime<Local>| ts.format("%H:%M").to_string())
        .x_label_style(("sans-serif", 14).into_font().transform(FontTransform::Rotate90))
        .draw()
        .map_err(draw_err)?;

    let series: [(bool, &RGBColor, &str); 2] = [
        (true, &RED, "ACS Running"),
        (false, &BLUE, "ACS Not Running"),
    ];

    for (flag, color, label) in series {
        let points: Vec<(DateTime<Local>, i32)> = records
            .iter()
            .filter(|r| r.service_running == flag)
            .map(|r| (r.timestamp, r.battery as i32))
            .collect();

        if points.is_empty() {
            continue;
        }

        chart
            .draw_series(LineSeries::new(points, color))
            .map_err(draw_err)?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

fn draw_err<E: std::fmt::Display>(e: E) -> BatbenchError {
    BatbenchError::chart(e.to_string())
}
