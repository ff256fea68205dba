//! Green Board Main Application
//! Main window with control panel and chart viewer.

use crate::binder::ViewBinder;
use crate::charts::ChartRenderer;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use tracing::{debug, error, info, warn};

const EXPORT_WIDTH: u32 = 1400;
const EXPORT_HEIGHT: u32 = 1000;

/// Main application window.
pub struct DashboardApp {
    binder: ViewBinder,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, binder: ViewBinder) -> Self {
        let layout = binder.build_layout();
        let initial = layout.slider.value;

        let mut app = Self {
            control_panel: ControlPanel::new(&layout),
            chart_viewer: ChartViewer::new(&layout),
            binder,
        };

        // Fill the chart placeholder with the default selection
        app.handle_selection_changed(initial);
        app
    }

    fn handle_selection_changed(&mut self, n: usize) {
        let view = self.binder.recompute(n);
        debug!(
            selection = view.selection,
            rows = view.records.len(),
            "recomputed view"
        );

        self.control_panel.export_enabled = !view.chart.bars.is_empty();
        self.chart_viewer.set_view(view);
    }

    /// Render the current chart to a PNG chosen by the user
    fn handle_export_png(&mut self) {
        let Some(chart) = self.chart_viewer.chart.clone() else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("melhores_ligas.png")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match ChartRenderer::render_bar_chart_png(
            &chart,
            &output_path,
            EXPORT_WIDTH,
            EXPORT_HEIGHT,
        ) {
            Ok(()) => {
                info!("Exported chart to {}", output_path.display());
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                if let Err(e) = open::that(&output_path) {
                    warn!("could not open {}: {}", output_path.display(), e);
                }
            }
            Err(e) => {
                error!("PNG export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| match self.control_panel.show(ui) {
                    ControlPanelAction::SelectionChanged(n) => self.handle_selection_changed(n),
                    ControlPanelAction::ExportPng => self.handle_export_png(),
                    ControlPanelAction::None => {}
                });
            });

        // Central panel - Table and Chart
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
