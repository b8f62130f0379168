pub mod gui_app;
pub mod picker;
pub mod settings;
pub mod telemetry;
