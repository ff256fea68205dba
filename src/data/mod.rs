//! Data module - CSV loading and the sorted dataset

mod dataset;
mod loader;

pub use dataset::{format_value, Dataset, Record};
pub use loader::load_and_sort;
