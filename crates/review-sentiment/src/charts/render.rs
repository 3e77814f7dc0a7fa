//! PNG rendering with plotters.

use super::data::{CategoryShare, ChartData};
use plotters::prelude::*;
use std::error::Error;
use std::f64::consts::PI;
use std::path::Path;

type DrawResult = std::result::Result<(), Box<dyn Error>>;

const SIZE: (u32, u32) = (1000, 600);

/// Line chart of the rolling average against the record index.
pub(crate) fn draw_sentiment_trend(data: &ChartData, record_count: usize, path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = record_count.saturating_sub(1).max(1) as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption("Sentiment Trends Over Time", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..x_max, 0.0..100.0)?;

    chart
        .configure_mesh()
        .x_desc("Index")
        .y_desc("Satisfaction Percentage")
        .axis_desc_style(("sans-serif", 18))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            data.trend.iter().map(|&(index, value)| (index as f64, value)),
            &BLUE,
        ))?
        .label("Sentiment Rolling Average")
        .legend(|(x, y)| PathElement::new([(x, y), (x + 20, y)], &BLUE));

    chart
        .configure_series_labels()
        .background_style(&WHITE)
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Bar chart of mean satisfaction per brand.
pub(crate) fn draw_brand_sentiment(averages: &[(String, f64)], path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let brands: Vec<String> = averages.iter().map(|(brand, _)| brand.clone()).collect();
    let mut chart = ChartBuilder::on(&root)
        .caption("Average Sentiment Per Brand", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..brands.len() as u32).into_segmented(), 0.0..100.0)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(brands.len())
        .x_desc("Brand")
        .y_desc("Average Satisfaction Percentage")
        .axis_desc_style(("sans-serif", 18))
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) => brands.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(RGBColor(135, 206, 235).filled())
            .margin(15)
            .data(averages.iter().enumerate().map(|(i, (_, mean))| (i as u32, *mean))),
    )?;

    root.present()?;
    Ok(())
}

/// Pie chart of review category proportions with one-decimal percent labels.
pub(crate) fn draw_review_distribution(shares: &[CategoryShare], path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let area = root.titled("Sentiment Distribution", ("sans-serif", 30))?;

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.38;

    // Start at twelve o'clock and go clockwise.
    let mut start = -PI / 2.0;
    for (idx, share) in shares.iter().enumerate() {
        let sweep = share.percent / 100.0 * 2.0 * PI;
        let color = Palette99::pick(idx);

        area.draw(&Polygon::new(
            wedge_points(center, radius, start, sweep),
            color.filled(),
        ))?;

        let middle = start + sweep / 2.0;
        let label_pos = point_on_circle(center, radius * 1.15, middle);
        area.draw(&Text::new(
            format!("{} {:.1}%", share.category, share.percent),
            (label_pos.0 - 40, label_pos.1 - 8),
            ("sans-serif", 16),
        ))?;

        start += sweep;
    }

    root.present()?;
    Ok(())
}

/// Outline of one pie slice as a polygon.
fn wedge_points(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep.abs() / (2.0 * PI)) * 120.0).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = start + sweep * step as f64 / steps as f64;
        points.push(point_on_circle(center, radius, angle));
    }
    points
}

fn point_on_circle(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 + (radius * angle.sin()).round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wedge_points_start_at_center() {
        let points = wedge_points((100, 100), 50.0, 0.0, PI / 2.0);
        assert_eq!(points[0], (100, 100));
        assert_eq!(points[1], (150, 100));
        assert_eq!(*points.last().unwrap(), (100, 150));
    }

    #[test]
    fn test_full_circle_wedge() {
        let points = wedge_points((0, 0), 10.0, 0.0, 2.0 * PI);
        assert_eq!(points.len(), 122);
        assert_eq!(points[1], *points.last().unwrap());
    }
}
