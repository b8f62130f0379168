use std::sync::Arc;

use image::{DynamicImage, GenericImageView};

/// Monotonic token identifying one accepted drop.
///
/// Thumbnail results are applied only while their generation is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Target size, in pixels, taken from the picker's rendered bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Bounds from a layout size in logical pixels, rounded to whole pixels.
    pub fn from_size(size: iced::Size) -> Self {
        Self {
            width: size.width.max(0.0).round() as u32,
            height: size.height.max(0.0).round() as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The image currently shown by the picker.
#[derive(Debug, Clone)]
pub enum Preview {
    /// Full-resolution decode, shown until the thumbnail for the same drop lands.
    Full(Arc<DynamicImage>),
    Thumbnail(Arc<DynamicImage>),
}

impl Preview {
    pub fn image(&self) -> &Arc<DynamicImage> {
        match self {
            Preview::Full(image) | Preview::Thumbnail(image) => image,
        }
    }

    pub fn is_thumbnail(&self) -> bool {
        matches!(self, Preview::Thumbnail(_))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image().dimensions()
    }
}

/// Transient UI state owned by one drop target.
#[derive(Debug, Clone, Default)]
pub struct PreviewState {
    pub(crate) preview: Option<Preview>,
    pub(crate) is_loading: bool,
    pub(crate) generation: Generation,
}

impl PreviewState {
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }
}
