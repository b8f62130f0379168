use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{AbortHandle, Abortable, BoxFuture, abortable};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use super::error::PickerError;
use super::state::{Bounds, Generation};

/// Largest size that fits `(width, height)` inside `bounds` without changing the aspect
/// ratio. Images that already fit keep their size. Returns `None` for empty bounds.
pub fn fit_within((width, height): (u32, u32), bounds: Bounds) -> Option<(u32, u32)> {
    if bounds.is_empty() || width == 0 || height == 0 {
        return None;
    }
    if width <= bounds.width && height <= bounds.height {
        return Some((width, height));
    }

    let scale = (bounds.width as f64 / width as f64).min(bounds.height as f64 / height as f64);
    let fitted_w = ((width as f64 * scale).round() as u32).clamp(1, bounds.width);
    let fitted_h = ((height as f64 * scale).round() as u32).clamp(1, bounds.height);
    Some((fitted_w, fitted_h))
}

/// Downscale `image` to fit `bounds`. Blocking; see [`generate_thumbnail`].
pub fn render_thumbnail(image: &DynamicImage, bounds: Bounds) -> Result<DynamicImage, PickerError> {
    let (width, height) = image.dimensions();
    let (fitted_w, fitted_h) = fit_within((width, height), bounds).ok_or(PickerError::EmptyBounds)?;
    if (fitted_w, fitted_h) == (width, height) {
        return Ok(image.clone());
    }
    Ok(image.resize_exact(fitted_w, fitted_h, FilterType::Triangle))
}

/// Render a thumbnail on the blocking pool so the UI thread never waits on resampling.
pub async fn generate_thumbnail(image: Arc<DynamicImage>, bounds: Bounds) -> Result<DynamicImage, PickerError> {
    tokio::task::spawn_blocking(move || render_thumbnail(&image, bounds))
        .await
        .map_err(|err| PickerError::Thumbnail(err.to_string()))?
}

/// Result of a [`ThumbnailJob`], handed back to the owning drop target.
#[derive(Debug, Clone)]
pub enum ThumbnailOutcome {
    Ready {
        generation: Generation,
        result: Result<Arc<DynamicImage>, PickerError>,
    },
    /// The job was superseded by a newer drop or its target was torn down.
    Cancelled { generation: Generation },
}

impl ThumbnailOutcome {
    pub fn generation(&self) -> Generation {
        match self {
            ThumbnailOutcome::Ready { generation, .. } | ThumbnailOutcome::Cancelled { generation } => *generation,
        }
    }
}

/// Deferred thumbnail work for one accepted drop.
///
/// Nothing runs until [`ThumbnailJob::run`] is polled. The issuing drop target keeps the
/// abort handle and cancels the job when a newer drop arrives.
pub struct ThumbnailJob {
    generation: Generation,
    bounds: Bounds,
    task: Abortable<BoxFuture<'static, Result<DynamicImage, PickerError>>>,
}

impl ThumbnailJob {
    pub(crate) fn new(generation: Generation, image: Arc<DynamicImage>, bounds: Bounds) -> (Self, AbortHandle) {
        let (task, handle) = abortable(generate_thumbnail(image, bounds).boxed());
        (
            Self {
                generation,
                bounds,
                task,
            },
            handle,
        )
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub async fn run(self) -> ThumbnailOutcome {
        let generation = self.generation;
        match self.task.await {
            Ok(result) => ThumbnailOutcome::Ready {
                generation,
                result: result.map(Arc::new),
            },
            Err(_aborted) => ThumbnailOutcome::Cancelled { generation },
        }
    }
}

impl fmt::Debug for ThumbnailJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThumbnailJob")
            .field("generation", &self.generation)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn fits_landscape_into_picker_bounds() {
        assert_eq!(fit_within((4000, 3000), Bounds::new(300, 250)), Some((300, 225)));
    }

    #[test]
    fn fits_portrait_by_height() {
        assert_eq!(fit_within((1000, 2000), Bounds::new(300, 250)), Some((125, 250)));
    }

    #[test]
    fn small_images_are_not_upscaled() {
        assert_eq!(fit_within((120, 80), Bounds::new(300, 250)), Some((120, 80)));
    }

    #[test]
    fn extreme_aspect_keeps_one_pixel() {
        assert_eq!(fit_within((10_000, 1), Bounds::new(300, 250)), Some((300, 1)));
    }

    #[test]
    fn empty_bounds_have_no_fit() {
        assert_eq!(fit_within((640, 480), Bounds::new(0, 250)), None);
        let image = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
        assert_eq!(render_thumbnail(&image, Bounds::new(300, 0)), Err(PickerError::EmptyBounds));
    }

    #[tokio::test]
    async fn generates_off_thread() {
        let image = Arc::new(DynamicImage::ImageRgba8(RgbaImage::new(800, 600)));
        let thumb = generate_thumbnail(image, Bounds::new(300, 250)).await.expect("thumbnail");
        assert_eq!(thumb.dimensions(), (300, 225));
    }

    #[tokio::test]
    async fn aborted_job_reports_cancellation() {
        let image = Arc::new(DynamicImage::ImageRgba8(RgbaImage::new(8, 8)));
        let (job, handle) = ThumbnailJob::new(Generation::default().next(), image, Bounds::new(4, 4));
        handle.abort();
        match job.run().await {
            ThumbnailOutcome::Cancelled { generation } => assert_eq!(generation.value(), 1),
            other => panic!("expected cancellation, got {other:?}"),
        }
    }
}
