//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{BarSpec, ChartPlotter, ChartSpec};
pub use renderer::ChartRenderer;
