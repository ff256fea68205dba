//! View Binder
//! Declares the dashboard layout and maps a slider value to the table rows
//! and bar chart shown for it. Pure projection of the loaded dataset.

use crate::charts::{BarSpec, ChartPlotter, ChartSpec};
use crate::config::AppConfig;
use crate::data::{format_value, Dataset, Record};
use std::sync::Arc;

pub const HEADING: &str = "Dashboard";
pub const PROMPT: &str = "Selecione o número de ligas para visualizar:";
pub const X_LABEL: &str = "Liga";
pub const Y_LABEL: &str = "Qtd de GREENS";
pub const BAR_GAP: f64 = 0.15;

/// Integer slider bounds, initial value and tick marks.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderSpec {
    pub min: usize,
    pub max: usize,
    pub value: usize,
    pub marks: Vec<(usize, String)>,
}

impl SliderSpec {
    pub fn clamp(&self, n: usize) -> usize {
        n.clamp(self.min, self.max)
    }
}

/// Initial page: slider, table of the default selection, empty chart slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub heading: &'static str,
    pub prompt: &'static str,
    pub slider: SliderSpec,
    pub columns: Vec<String>,
    pub table: Vec<Record>,
    pub chart: Option<ChartSpec>,
}

/// Table rows and chart for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub selection: usize,
    pub records: Vec<Record>,
    pub chart: ChartSpec,
}

/// Binds the immutable dataset to the dashboard controls.
#[derive(Debug, Clone)]
pub struct ViewBinder {
    dataset: Arc<Dataset>,
    title: String,
    max_selection: usize,
    default_selection: usize,
}

impl ViewBinder {
    pub fn new(dataset: Arc<Dataset>, config: &AppConfig) -> Self {
        Self {
            dataset,
            title: config.title.clone(),
            max_selection: config.max_selection,
            default_selection: config.default_selection,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Slider declared over [1, min(max_selection, rows)].
    pub fn build_layout(&self) -> Layout {
        let max = self.max_selection.min(self.dataset.len()).max(1);
        let value = self.default_selection.clamp(1, max);
        let marks = (1..=max).map(|i| (i, i.to_string())).collect();

        Layout {
            heading: HEADING,
            prompt: PROMPT,
            slider: SliderSpec {
                min: 1,
                max,
                value,
                marks,
            },
            columns: self.dataset.columns().to_vec(),
            table: self.dataset.head(value).to_vec(),
            chart: None,
        }
    }

    /// Top `n` records and their bar chart.
    ///
    /// `n` is clamped to [1, rows] so out-of-range values never index past
    /// the dataset. An empty dataset gives an empty view.
    pub fn recompute(&self, n: usize) -> View {
        let n = n.clamp(1, self.dataset.len().max(1));
        let records = self.dataset.head(n).to_vec();
        let chart = self.build_chart(&records);

        View {
            selection: n,
            records,
            chart,
        }
    }

    fn build_chart(&self, records: &[Record]) -> ChartSpec {
        let mut categories: Vec<String> = Vec::new();
        let mut bars = Vec::with_capacity(records.len());

        for (rank, record) in records.iter().enumerate() {
            let label = if self.dataset.has_liga() {
                record.liga.clone()
            } else {
                format!("#{}", rank + 1)
            };

            // One color per distinct league, in order of first appearance
            let category = match categories.iter().position(|c| c == &label) {
                Some(idx) => idx,
                None => {
                    categories.push(label.clone());
                    categories.len() - 1
                }
            };

            bars.push(BarSpec {
                text: record.green.map(format_value).unwrap_or_default(),
                value: record.green,
                color: ChartPlotter::get_category_color(category),
                label,
            });
        }

        ChartSpec {
            title: self.title.clone(),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            bars,
            bar_gap: BAR_GAP,
        }
    }
}
