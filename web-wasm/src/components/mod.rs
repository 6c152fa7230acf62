pub mod footer;
pub mod header;
pub mod image_preview;
pub mod loading_indicator;
pub mod result_panel;
pub mod upload_form;
