pub mod app;
pub mod input;
pub mod ui;

pub use app::{App, WidgetSet};
