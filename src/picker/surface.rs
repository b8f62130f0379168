use std::sync::Arc;

use bytesize::ByteSize;
use futures::future::AbortHandle;
use image::{DynamicImage, GenericImageView};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::config::PickerConfig;
use super::error::PickerError;
use super::state::{Bounds, Preview, PreviewState};
use super::thumbnail::{ThumbnailJob, ThumbnailOutcome};

/// Acceptance signal returned to the platform drop mechanism.
#[derive(Debug)]
pub enum DropOutcome {
    /// The payload decoded. The caller schedules the job and feeds its outcome back
    /// through [`DropTarget::complete_thumbnail`].
    Accepted(ThumbnailJob),
    Rejected(PickerError),
}

impl DropOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, DropOutcome::Accepted(_))
    }

    pub fn into_job(self) -> Option<ThumbnailJob> {
        match self {
            DropOutcome::Accepted(job) => Some(job),
            DropOutcome::Rejected(_) => None,
        }
    }
}

/// What the surface should draw underneath the loading overlay.
#[derive(Debug, Clone, Copy)]
pub enum VisualState<'a> {
    Empty,
    Previewing(&'a DynamicImage),
}

/// Region that accepts dropped or picked image payloads and owns the preview state.
///
/// All mutation happens through `&mut self`, so the owner's thread is the only writer.
/// Background thumbnail work reports back via [`DropTarget::complete_thumbnail`].
pub struct DropTarget {
    config: PickerConfig,
    state: PreviewState,
    in_flight: Option<AbortHandle>,
    targeted: bool,
    observers: watch::Sender<PreviewState>,
}

impl DropTarget {
    pub fn new(config: PickerConfig) -> Self {
        let state = PreviewState::default();
        let (observers, _) = watch::channel(state.clone());
        Self {
            config,
            state,
            in_flight: None,
            targeted: false,
            observers,
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn visual_state(&self) -> VisualState<'_> {
        match &self.state.preview {
            Some(preview) => VisualState::Previewing(preview.image()),
            None => VisualState::Empty,
        }
    }

    /// Observe every state transition. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<PreviewState> {
        self.observers.subscribe()
    }

    pub fn is_targeted(&self) -> bool {
        self.targeted
    }

    pub fn set_targeted(&mut self, targeted: bool) {
        self.targeted = targeted;
    }

    /// Ingest a drop. Only the first payload is considered.
    ///
    /// On success the callback sees the full-resolution image before the thumbnail job
    /// exists. On failure nothing changes.
    pub fn accept_drop<I, P>(&mut self, payloads: I, bounds: Bounds) -> DropOutcome
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        self.targeted = false;

        let Some(payload) = payloads.into_iter().next() else {
            debug!("drop rejected: no payloads");
            return DropOutcome::Rejected(PickerError::EmptyDrop);
        };
        let bytes = payload.as_ref();

        let image = match image::load_from_memory(bytes) {
            Ok(image) => Arc::new(image),
            Err(err) => {
                debug!(size = %ByteSize::b(bytes.len() as u64), "drop rejected: {err}");
                return DropOutcome::Rejected(PickerError::Decode(err.to_string()));
            }
        };

        let (width, height) = image.dimensions();
        info!(
            width,
            height,
            size = %ByteSize::b(bytes.len() as u64),
            "accepted dropped image"
        );

        self.supersede_in_flight();
        self.state.preview = Some(Preview::Full(Arc::clone(&image)));
        self.config.notify(Arc::clone(&image));

        self.state.is_loading = true;
        self.publish();

        let (job, handle) = ThumbnailJob::new(self.state.generation, image, bounds);
        self.in_flight = Some(handle);
        DropOutcome::Accepted(job)
    }

    /// Apply a finished thumbnail job. Returns `false` when the outcome belongs to a
    /// superseded drop and was discarded.
    pub fn complete_thumbnail(&mut self, outcome: ThumbnailOutcome) -> bool {
        if outcome.generation() != self.state.generation {
            debug!(
                stale = outcome.generation().value(),
                current = self.state.generation.value(),
                "discarding superseded thumbnail"
            );
            return false;
        }

        self.in_flight = None;
        match outcome {
            ThumbnailOutcome::Ready { result: Ok(thumbnail), .. } => {
                let (width, height) = thumbnail.dimensions();
                debug!(width, height, "thumbnail ready");
                self.state.preview = Some(Preview::Thumbnail(thumbnail));
            }
            ThumbnailOutcome::Ready { result: Err(err), .. } => {
                warn!("keeping full-resolution preview: {err}");
            }
            ThumbnailOutcome::Cancelled { .. } => {}
        }
        self.state.is_loading = false;
        self.publish();
        true
    }

    /// Swap the configuration. Any in-flight thumbnail is superseded and its result will
    /// be discarded; the current preview stays.
    pub fn reconfigure(&mut self, config: PickerConfig) {
        self.config = config;
        self.supersede_in_flight();
        self.state.is_loading = false;
        self.publish();
    }

    fn supersede_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.state.generation = self.state.generation.next();
    }

    fn publish(&self) {
        self.observers.send_replace(self.state.clone());
    }
}

impl Drop for DropTarget {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for DropTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropTarget")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("targeted", &self.targeted)
            .finish_non_exhaustive()
    }
}
