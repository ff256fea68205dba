//! Static Chart Renderer
//! Writes the league bar chart to a PNG file with plotters.
//!
//! Layout:
//! 1. Title centered on top
//! 2. One colored bar per league with its value printed above
//! 3. Axis titles "Liga" / "Qtd de GREENS"

use crate::charts::ChartSpec;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const FONT: &str = "sans-serif";
const TITLE_SIZE: u32 = 24;
const AXIS_TITLE_SIZE: u32 = 20;
const LABEL_SIZE: u32 = 14;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to render")]
    Empty,
    #[error("Drawing failed: {0}")]
    Draw(String),
}

fn draw_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Draw(err.to_string())
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render `chart` into a PNG of `width` x `height` pixels at `path`.
    pub fn render_bar_chart_png(
        chart: &ChartSpec,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        if chart.bars.is_empty() {
            return Err(RenderError::Empty);
        }

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let slots = chart.bars.len();
        let labels: Vec<String> = chart.bars.iter().map(|b| b.label.clone()).collect();
        let y_top = chart.y_top();
        // Histogram margin is in pixels per slot
        let plot_width = width.saturating_sub(140);
        let gap_px = ((plot_width as f64 / slots as f64) * chart.bar_gap / 2.0) as u32;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, (FONT, TITLE_SIZE))
            .margin(40)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d((0..slots).into_segmented(), 0f64..y_top)
            .map_err(draw_err)?;

        let x_formatter = |seg: &SegmentValue<usize>| match seg {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        };

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(slots)
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .axis_desc_style((FONT, AXIS_TITLE_SIZE))
            .label_style((FONT, LABEL_SIZE))
            .x_label_formatter(&x_formatter)
            .draw()
            .map_err(draw_err)?;

        for (i, bar) in chart.bars.iter().enumerate() {
            let Some(value) = bar.value else {
                continue;
            };
            let color = RGBColor(bar.color.r(), bar.color.g(), bar.color.b());

            ctx.draw_series(
                Histogram::vertical(&ctx)
                    .style(color.filled())
                    .margin(gap_px)
                    .data(std::iter::once((i, value))),
            )
            .map_err(draw_err)?;

            ctx.draw_series(std::iter::once(Text::new(
                bar.text.clone(),
                (SegmentValue::CenterOf(i), value + y_top * 0.03),
                (FONT, LABEL_SIZE).into_font(),
            )))
            .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{BarSpec, ChartPlotter};

    fn chart_spec(values: &[Option<f64>]) -> ChartSpec {
        let bars = values
            .iter()
            .enumerate()
            .map(|(i, v)| BarSpec {
                label: format!("L{}", i),
                value: *v,
                text: v.map(|v| v.to_string()).unwrap_or_default(),
                color: ChartPlotter::get_category_color(i),
            })
            .collect();
        ChartSpec {
            title: "Melhores ligas - 11/2021".into(),
            x_label: "Liga".into(),
            y_label: "Qtd de GREENS".into(),
            bars,
            bar_gap: 0.15,
        }
    }

    #[test]
    fn writes_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");

        let chart = chart_spec(&[Some(7.0), Some(3.0), None]);

        ChartRenderer::render_bar_chart_png(&chart, &path, 800, 600).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn empty_chart_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");

        let err =
            ChartRenderer::render_bar_chart_png(&chart_spec(&[]), &path, 800, 600).unwrap_err();

        assert!(matches!(err, RenderError::Empty));
        assert!(!path.exists());
    }
}
