pub mod iced_ui;
pub mod picker_view;

pub use iced_ui::run_iced_app;
pub use picker_view::image_picker;
