use std::path::PathBuf;

use tracing::debug;

use super::error::PickerError;

/// Extensions offered by the platform picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "webp"];

/// Read a file the platform dropped onto the window.
pub async fn read_dropped_file(path: PathBuf) -> Result<Vec<u8>, PickerError> {
    tokio::fs::read(&path)
        .await
        .map_err(|err| PickerError::Io(format!("{}: {err}", path.display())))
}

/// Open the platform image picker and return the chosen file's bytes, or `None` if the
/// user dismissed it.
pub async fn pick_image_payload() -> Option<Vec<u8>> {
    let file = rfd::AsyncFileDialog::new()
        .set_title("Select Image")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
        .await?;
    debug!(file = %file.file_name(), "picked image");
    Some(file.read().await)
}
