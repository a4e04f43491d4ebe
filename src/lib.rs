pub mod api;
pub mod charts;
pub mod dashboard;
pub mod format;
pub mod logging;
pub mod model;
pub mod render;
pub mod state;
pub mod tui;
pub mod view;
