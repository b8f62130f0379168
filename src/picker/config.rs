use std::fmt;
use std::sync::Arc;

use iced::Color;
use image::DynamicImage;

/// Consumer callback, invoked with the full-resolution image on every accepted drop.
pub type ImageCallback = Arc<dyn Fn(Arc<DynamicImage>) + Send + Sync>;

/// Caller-supplied presentation and callback for a [`DropTarget`](super::DropTarget).
#[derive(Clone)]
pub struct PickerConfig {
    title: String,
    subtitle: String,
    icon: String,
    accent: Color,
    on_image_change: ImageCallback,
}

impl PickerConfig {
    pub fn new<F>(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        icon: impl Into<String>,
        accent: Color,
        on_image_change: F,
    ) -> Self
    where
        F: Fn(Arc<DynamicImage>) + Send + Sync + 'static,
    {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            icon: icon.into(),
            accent,
            on_image_change: Arc::new(on_image_change),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn accent(&self) -> Color {
        self.accent
    }

    pub(crate) fn notify(&self, image: Arc<DynamicImage>) {
        (self.on_image_change)(image);
    }
}

impl fmt::Debug for PickerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerConfig")
            .field("title", &self.title)
            .field("subtitle", &self.subtitle)
            .field("icon", &self.icon)
            .field("accent", &self.accent)
            .finish_non_exhaustive()
    }
}
