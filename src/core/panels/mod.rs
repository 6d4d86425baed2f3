pub mod panel_models;

pub use panel_models::{error_panel, Panel, PanelField, Tone};
