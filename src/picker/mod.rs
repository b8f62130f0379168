//! Drop-ingest and thumbnail generation for the image picker.
//!
//! [`DropTarget`] owns the preview state and decodes incoming payloads. Each accepted
//! drop yields a [`ThumbnailJob`] that the owner runs in the background and hands back
//! through [`DropTarget::complete_thumbnail`].

mod config;
mod error;
mod source;
mod state;
mod surface;
mod thumbnail;

pub use config::{ImageCallback, PickerConfig};
pub use error::PickerError;
pub use source::{IMAGE_EXTENSIONS, pick_image_payload, read_dropped_file};
pub use state::{Bounds, Generation, Preview, PreviewState};
pub use surface::{DropOutcome, DropTarget, VisualState};
pub use thumbnail::{ThumbnailJob, ThumbnailOutcome, fit_within, generate_thumbnail, render_thumbnail};
