use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use drop_image_picker::picker::{Bounds, DropOutcome, DropTarget, PickerConfig, ThumbnailOutcome, VisualState};
use drop_image_picker::settings::Settings;
use iced::Color;
use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage};

fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40])))
        .write_to(&mut Cursor::new(&mut buffer), format)
        .expect("encode fixture");
    buffer
}

fn target_with_log() -> (DropTarget, Arc<Mutex<Vec<(u32, u32)>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let config = PickerConfig::new(
        "Drag & Drop Image",
        "Tap to add an Image",
        "⬆",
        Color::from_rgb8(0, 122, 255),
        move |image: Arc<DynamicImage>| sink.lock().unwrap().push(image.dimensions()),
    );
    (DropTarget::new(config), log)
}

#[tokio::test]
async fn large_photo_is_thumbnailed_to_picker_bounds() {
    let (mut target, log) = target_with_log();
    let bounds = Settings::default().picker_bounds(iced::Size::new(420.0, 640.0));
    assert_eq!(bounds, Bounds::new(300, 250));

    let job = target
        .accept_drop([encoded(4000, 3000, ImageFormat::Png)], bounds)
        .into_job()
        .expect("png should be accepted");

    assert_eq!(*log.lock().unwrap(), vec![(4000, 3000)]);
    assert!(target.is_loading());
    match target.visual_state() {
        VisualState::Previewing(image) => assert_eq!(image.dimensions(), (4000, 3000)),
        VisualState::Empty => panic!("full image should be previewed while loading"),
    }

    assert!(target.complete_thumbnail(job.run().await));
    assert!(!target.is_loading());
    let preview = target.state().preview().expect("preview");
    assert!(preview.is_thumbnail());
    assert_eq!(preview.dimensions(), (300, 225));
}

#[test]
fn non_image_blob_is_rejected_without_side_effects() {
    let (mut target, log) = target_with_log();
    let before = target.state().generation();

    let outcome = target.accept_drop([vec![0x13u8; 512]], Bounds::new(300, 250));

    assert!(!outcome.is_accepted());
    assert!(log.lock().unwrap().is_empty());
    assert!(matches!(target.visual_state(), VisualState::Empty));
    assert!(!target.is_loading());
    assert_eq!(target.state().generation(), before);
}

#[tokio::test]
async fn rejected_drop_keeps_previous_preview() {
    let (mut target, _) = target_with_log();
    let job = target
        .accept_drop([encoded(50, 50, ImageFormat::Png)], Bounds::new(20, 20))
        .into_job()
        .unwrap();
    target.complete_thumbnail(job.run().await);

    let outcome = target.accept_drop([b"GIF89a but truncated".to_vec()], Bounds::new(20, 20));
    assert!(matches!(outcome, DropOutcome::Rejected(_)));
    let preview = target.state().preview().expect("preview survives");
    assert!(preview.is_thumbnail());
    assert_eq!(preview.dimensions(), (20, 20));
}

#[tokio::test]
async fn two_quick_drops_fire_two_callbacks_and_latest_wins() {
    let (mut target, log) = target_with_log();
    let first = target
        .accept_drop([encoded(600, 300, ImageFormat::Png)], Bounds::new(60, 60))
        .into_job()
        .unwrap();
    let second = target
        .accept_drop([encoded(300, 600, ImageFormat::Jpeg)], Bounds::new(60, 60))
        .into_job()
        .unwrap();

    // Completion order is reversed on purpose: the newer job lands first.
    let newer = second.run().await;
    let older = first.run().await;
    assert!(target.complete_thumbnail(newer));
    assert!(!target.complete_thumbnail(older));

    assert_eq!(*log.lock().unwrap(), vec![(600, 300), (300, 600)]);
    assert_eq!(target.state().preview().unwrap().dimensions(), (30, 60));
    assert!(!target.is_loading());
}

#[tokio::test]
async fn callback_runs_before_thumbnail_job_exists() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut target = DropTarget::new(PickerConfig::new("t", "s", "i", Color::BLACK, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let outcome = target.accept_drop([encoded(10, 10, ImageFormat::Bmp)], Bounds::new(5, 5));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let job = outcome.into_job().unwrap();
    assert_eq!(job.generation(), target.state().generation());
    assert!(target.complete_thumbnail(job.run().await));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn teardown_cancels_in_flight_job() {
    let (mut target, _) = target_with_log();
    let job = target
        .accept_drop([encoded(32, 32, ImageFormat::Png)], Bounds::new(8, 8))
        .into_job()
        .unwrap();
    drop(target);
    assert!(matches!(job.run().await, ThumbnailOutcome::Cancelled { .. }));
}
