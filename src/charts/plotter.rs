//! Chart Plotter Module
//! Interactive league bar chart and record table using egui_plot.

use crate::data::Record;
use egui::{Align2, Color32, RichText};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoint, Text};

/// Pastel qualitative palette, one entry per league
pub const PALETTE: [Color32; 11] = [
    Color32::from_rgb(102, 197, 204),
    Color32::from_rgb(246, 207, 113),
    Color32::from_rgb(248, 156, 116),
    Color32::from_rgb(220, 176, 242),
    Color32::from_rgb(135, 197, 95),
    Color32::from_rgb(158, 185, 243),
    Color32::from_rgb(254, 136, 177),
    Color32::from_rgb(201, 219, 116),
    Color32::from_rgb(139, 224, 164),
    Color32::from_rgb(180, 151, 231),
    Color32::from_rgb(179, 179, 179),
];

const CHART_HEIGHT: f32 = 420.0;
const TITLE_SIZE: f32 = 24.0;
const LABEL_SIZE: f32 = 14.0;

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub label: String,
    /// Bar height. `None` draws no bar for the category.
    pub value: Option<f64>,
    /// Value label drawn above the bar
    pub text: String,
    pub color: Color32,
}

/// Backend-independent bar chart description.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<BarSpec>,
    /// Fraction of each category slot left empty
    pub bar_gap: f64,
}

impl ChartSpec {
    /// Largest present bar value.
    pub fn max_value(&self) -> Option<f64> {
        self.bars
            .iter()
            .filter_map(|b| b.value)
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    /// Top of the value axis with headroom for the value labels.
    pub fn y_top(&self) -> f64 {
        match self.max_value() {
            Some(max) if max > 0.0 => max * 1.15,
            _ => 1.0,
        }
    }
}

/// Draws the dashboard chart and table with egui widgets.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for the n-th distinct category, cycling through the palette.
    pub fn get_category_color(category_index: usize) -> Color32 {
        PALETTE[category_index % PALETTE.len()]
    }

    /// Draw the bar chart. X-axis: league, Y-axis: GREEN count.
    pub fn draw_bar_chart(ui: &mut egui::Ui, chart: &ChartSpec) {
        ui.label(RichText::new(&chart.title).size(TITLE_SIZE).strong());
        ui.add_space(6.0);

        let labels: Vec<String> = chart.bars.iter().map(|b| b.label.clone()).collect();
        let slots = chart.bars.len();
        let width = 1.0 - chart.bar_gap;
        let y_top = chart.y_top();

        Plot::new("green_bar_chart")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .x_axis_label(RichText::new(&chart.x_label).size(LABEL_SIZE))
            .y_axis_label(RichText::new(&chart.y_label).size(LABEL_SIZE))
            .include_x(-0.5)
            .include_x(slots as f64 - 0.5)
            .include_y(0.0)
            .include_y(y_top)
            // One tick per category slot
            .x_grid_spacer(move |_input| {
                (0..slots)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx < 0.0 || (mark.value - idx).abs() > 1e-6 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                // One series per color so repeated leagues share a legend entry
                let mut series: Vec<(String, Color32, Vec<Bar>)> = Vec::new();

                for (i, bar) in chart.bars.iter().enumerate() {
                    let Some(value) = bar.value else {
                        continue;
                    };

                    let elem = Bar::new(i as f64, value)
                        .width(width)
                        .fill(bar.color)
                        .name(&bar.label);

                    match series.iter_mut().find(|(_, c, _)| *c == bar.color) {
                        Some((_, _, bars)) => bars.push(elem),
                        None => series.push((bar.label.clone(), bar.color, vec![elem])),
                    }

                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(i as f64, value + y_top * 0.01),
                            RichText::new(&bar.text).size(LABEL_SIZE),
                        )
                        .anchor(Align2::CENTER_BOTTOM)
                        .color(Color32::BLACK),
                    );
                }

                for (name, color, bars) in series {
                    plot_ui.bar_chart(BarChart::new(bars).name(name).color(color));
                }
            });
    }

    /// Draw the selected records as a striped table.
    pub fn draw_records_table(ui: &mut egui::Ui, columns: &[String], records: &[Record]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id("league_table"))
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for column in columns {
                            ui.label(RichText::new(column).strong().size(12.0));
                        }
                        ui.end_row();

                        for record in records {
                            for cell in &record.cells {
                                ui.label(RichText::new(cell).size(12.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
