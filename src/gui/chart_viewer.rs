//! Chart Viewer Widget
//! Central panel showing the selected records and their bar chart.

use crate::binder::{Layout, View};
use crate::charts::{ChartPlotter, ChartSpec};
use crate::data::Record;
use egui::{RichText, ScrollArea};

const SECTION_SPACING: f32 = 15.0;

/// Table of the current selection above the bar chart.
pub struct ChartViewer {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
    /// Empty until the first recompute
    pub chart: Option<ChartSpec>,
}

impl ChartViewer {
    pub fn new(layout: &Layout) -> Self {
        Self {
            columns: layout.columns.clone(),
            records: layout.table.clone(),
            chart: layout.chart.clone(),
        }
    }

    pub fn set_view(&mut self, view: View) {
        self.records = view.records;
        self.chart = Some(view.chart);
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ChartPlotter::draw_records_table(ui, &self.columns, &self.records);
                ui.add_space(SECTION_SPACING);

                match &self.chart {
                    Some(chart) if !chart.bars.is_empty() => {
                        ChartPlotter::draw_bar_chart(ui, chart)
                    }
                    _ => {
                        ui.centered_and_justified(|ui| {
                            ui.label(RichText::new("No Data").size(20.0));
                        });
                    }
                }
            });
    }
}
