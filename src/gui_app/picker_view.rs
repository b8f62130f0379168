use iced::widget::image::Handle;
use iced::widget::{center, column, container, image, mouse_area, stack, text};
use iced::{Alignment, Border, Color, ContentFit, Element, Length, Padding, Theme};

use crate::picker::{DropTarget, VisualState};

const CORNER_RADIUS: f32 = 15.0;
const PREVIEW_PADDING: f32 = 15.0;
const SUBTITLE_GRAY: Color = Color {
    r: 0.56,
    g: 0.56,
    b: 0.58,
    a: 1.0,
};

/// Draws a [`DropTarget`]: placeholder or preview, with the loading overlay on top.
///
/// `preview` is the rendered handle for the target's current image; it is cached by the
/// caller so the pixels are converted once per state change rather than once per frame.
pub fn image_picker<'a, Message: Clone + 'a>(
    target: &'a DropTarget,
    preview: Option<&'a Handle>,
    on_tap: Message,
) -> Element<'a, Message> {
    let config = target.config();
    let accent = config.accent();

    let base: Element<'a, Message> = match (target.visual_state(), preview) {
        (VisualState::Previewing(_), Some(handle)) => container(
            image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .padding(PREVIEW_PADDING)
        .clip(true)
        .into(),
        _ => center(
            column![
                text(config.icon()).size(40).color(accent),
                container(text(config.title()).size(16)).padding(Padding {
                    top: 15.0,
                    right: 0.0,
                    bottom: 0.0,
                    left: 0.0,
                }),
                text(config.subtitle()).size(12).color(SUBTITLE_GRAY),
            ]
            .spacing(4)
            .align_x(Alignment::Center),
        )
        .into(),
    };

    let mut layers = stack![base];
    if target.is_loading() {
        layers = layers.push(center(
            container(text("Loading…").size(12))
                .padding(10)
                .style(loading_style),
        ));
    }

    let targeted = target.is_targeted();
    let surface = container(layers)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| surface_style(accent, targeted));

    mouse_area(surface).on_press(on_tap).into()
}

fn surface_style(accent: Color, targeted: bool) -> container::Style {
    container::Style {
        background: Some(Color { a: if targeted { 0.2 } else { 0.08 }, ..accent }.into()),
        border: Border {
            color: accent,
            width: if targeted { 2.0 } else { 1.0 },
            radius: CORNER_RADIUS.into(),
        },
        ..Default::default()
    }
}

fn loading_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Color { a: 0.85, ..palette.background.weak.color }.into()),
        border: Border {
            radius: 5.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
