use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use iced::widget::image::Handle;
use iced::widget::{Space, column, container, text};
use iced::{Alignment, Color, Element, Length, Size, Subscription, Task, Theme, event, window};
use image::{DynamicImage, GenericImageView};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::picker_view::image_picker;
use crate::picker::{DropOutcome, DropTarget, Generation, PickerConfig, PickerError, PreviewState, ThumbnailOutcome};
use crate::settings::Settings;

const SCREEN_TITLE: &str = "Image Picker 🏞️";
const FALLBACK_ACCENT: Color = Color {
    r: 0.0,
    g: 0.478,
    b: 1.0,
    a: 1.0,
};

pub fn run_iced_app(settings: Settings) -> iced::Result {
    let window_size = settings.window_size();
    let accent = settings.accent_color().unwrap_or_else(|err| {
        warn!("{err}; using the default accent");
        FALLBACK_ACCENT
    });
    iced::application("Image Picker", PickerDemo::update, PickerDemo::view)
        .subscription(PickerDemo::subscription)
        .theme(PickerDemo::theme)
        .window_size(window_size)
        .run_with(move || PickerDemo::new(settings, accent))
}

struct PickerDemo {
    settings: Settings,
    picker: DropTarget,
    preview_rx: watch::Receiver<PreviewState>,
    preview_handle: Option<Handle>,
    /// Which preview `preview_handle` should show; pending renders for other keys are stale.
    preview_key: Option<PreviewKey>,
    window_size: Size,
    is_picking: bool,
    /// Open until the first file of a drop gesture lands; winit reports each file separately.
    accepting_drop: bool,
    received: Arc<AtomicUsize>,
    status_text: String,
}

#[derive(Debug, Clone)]
enum Message {
    PickPressed,
    PickFinished(Option<Vec<u8>>),
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    PayloadRead(Result<Vec<u8>, PickerError>),
    ThumbnailFinished(ThumbnailOutcome),
    PreviewReady(PreviewKey, Option<Handle>),
    WindowResized(Size),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PreviewKey {
    generation: Generation,
    thumbnail: bool,
}

impl PreviewKey {
    fn of(state: &PreviewState) -> Option<Self> {
        state.preview().map(|preview| PreviewKey {
            generation: state.generation(),
            thumbnail: preview.is_thumbnail(),
        })
    }
}

/// Convert a preview to GPU-ready RGBA on the blocking pool.
async fn render_preview_task(image: Arc<DynamicImage>) -> Option<Handle> {
    tokio::task::spawn_blocking(move || {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Handle::from_rgba(width, height, rgba.into_raw())
    })
    .await
    .map_err(|err| warn!("preview render failed: {err}"))
    .ok()
}

/// Build the picker configuration for the demo. The callback only counts deliveries; a
/// real consumer would upload or store the image.
fn demo_config(settings: &Settings, accent: Color, received: Arc<AtomicUsize>) -> PickerConfig {
    PickerConfig::new(
        settings.title.clone(),
        settings.subtitle.clone(),
        settings.icon.clone(),
        accent,
        move |image: Arc<DynamicImage>| {
            let (width, height) = image.dimensions();
            let count = received.fetch_add(1, Ordering::SeqCst) + 1;
            info!(width, height, count, "image changed");
        },
    )
}

impl PickerDemo {
    fn new(settings: Settings, accent: Color) -> (Self, Task<Message>) {
        let received = Arc::new(AtomicUsize::new(0));
        let picker = DropTarget::new(demo_config(&settings, accent, Arc::clone(&received)));
        let preview_rx = picker.subscribe();

        (
            PickerDemo {
                window_size: settings.window_size(),
                settings,
                picker,
                preview_rx,
                preview_handle: None,
                preview_key: None,
                is_picking: false,
                accepting_drop: true,
                received,
                status_text: "Drop an image or tap the picker".to_string(),
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::PickPressed => {
                if self.is_picking {
                    return Task::none();
                }
                self.is_picking = true;
                Task::perform(crate::picker::pick_image_payload(), Message::PickFinished)
            }
            Message::PickFinished(Some(payload)) => {
                self.is_picking = false;
                self.ingest(vec![payload])
            }
            Message::PickFinished(None) => {
                self.is_picking = false;
                Task::none()
            }
            Message::FileHovered => {
                self.accepting_drop = true;
                self.picker.set_targeted(true);
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.accepting_drop = true;
                self.picker.set_targeted(false);
                Task::none()
            }
            Message::FileDropped(path) => self.file_dropped(path).unwrap_or_else(Task::none),
            Message::PayloadRead(Ok(payload)) => self.ingest(vec![payload]),
            Message::PayloadRead(Err(err)) => {
                warn!("{err}");
                Task::none()
            }
            Message::ThumbnailFinished(outcome) => {
                self.picker.complete_thumbnail(outcome);
                Task::none()
            }
            Message::PreviewReady(key, handle) => {
                if self.preview_key == Some(key) {
                    self.preview_handle = handle;
                } else {
                    debug!(?key, "dropping stale preview render");
                }
                Task::none()
            }
            Message::WindowResized(size) => {
                self.window_size = size;
                Task::none()
            }
        };
        Task::batch([task, self.refresh_preview()])
    }

    /// Start reading a dropped file. Only the first file of a gesture is taken; the rest
    /// are ignored until the next hover.
    fn file_dropped(&mut self, path: PathBuf) -> Option<Task<Message>> {
        self.picker.set_targeted(false);
        if !self.accepting_drop {
            debug!(path = %path.display(), "ignoring extra file in drop");
            return None;
        }
        self.accepting_drop = false;
        debug!(path = %path.display(), "file dropped");
        Some(Task::perform(crate::picker::read_dropped_file(path), Message::PayloadRead))
    }

    fn ingest(&mut self, payloads: Vec<Vec<u8>>) -> Task<Message> {
        let bounds = self.settings.picker_bounds(self.window_size);
        match self.picker.accept_drop(payloads, bounds) {
            DropOutcome::Accepted(job) => {
                self.status_text = format!("Images received: {}", self.received.load(Ordering::SeqCst));
                Task::perform(job.run(), Message::ThumbnailFinished)
            }
            DropOutcome::Rejected(err) => {
                debug!("{err}");
                Task::none()
            }
        }
    }

    /// Schedule a preview render when the picker published a new preview. The current
    /// handle stays on screen until the render for the new key lands.
    fn refresh_preview(&mut self) -> Task<Message> {
        if !self.preview_rx.has_changed().unwrap_or(false) {
            return Task::none();
        }
        let state = self.preview_rx.borrow_and_update();
        let key = PreviewKey::of(&state);
        if key == self.preview_key {
            return Task::none();
        }
        self.preview_key = key;
        match (key, state.preview()) {
            (Some(key), Some(preview)) => {
                let image = Arc::clone(preview.image());
                Task::perform(render_preview_task(image), move |handle| Message::PreviewReady(key, handle))
            }
            _ => {
                self.preview_handle = None;
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let picker = container(image_picker(
            &self.picker,
            self.preview_handle.as_ref(),
            Message::PickPressed,
        ))
        .width(Length::Fill)
        .max_width(self.settings.max_width)
        .height(Length::Fixed(self.settings.max_height));

        let content = column![
            text(SCREEN_TITLE).size(28),
            Space::with_height(self.settings.top_padding),
            picker,
            text(&self.status_text).size(12),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .width(Length::Fill);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(self.settings.content_padding)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            iced::Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            iced::Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            iced::Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            iced::Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
            _ => None,
        })
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}
