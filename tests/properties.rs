use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use drop_image_picker::picker::{Bounds, DropTarget, PickerConfig, fit_within};
use iced::Color;
use proptest::prelude::*;

fn counting_target() -> (DropTarget, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let target = DropTarget::new(PickerConfig::new("t", "s", "i", Color::BLACK, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    (target, calls)
}

proptest! {
    #[test]
    fn acceptance_matches_callback(payload in proptest::collection::vec(any::<u8>(), 0..256)) {
        let (mut target, calls) = counting_target();
        let decodable = image::load_from_memory(&payload).is_ok();

        let accepted = target.accept_drop([payload], Bounds::new(64, 64)).is_accepted();

        prop_assert_eq!(accepted, decodable);
        prop_assert_eq!(calls.load(Ordering::SeqCst), usize::from(accepted));
        prop_assert_eq!(target.is_loading(), accepted);
        prop_assert_eq!(target.state().preview().is_some(), accepted);
    }

    #[test]
    fn fitted_size_stays_inside_bounds(
        width in 1u32..10_000,
        height in 1u32..10_000,
        max_w in 1u32..2_000,
        max_h in 1u32..2_000,
    ) {
        let (fit_w, fit_h) = fit_within((width, height), Bounds::new(max_w, max_h)).unwrap();

        prop_assert!(fit_w >= 1 && fit_h >= 1);
        prop_assert!(fit_w <= max_w && fit_h <= max_h);
        prop_assert!(fit_w <= width && fit_h <= height);
        // One side touches the bounds unless the image already fit.
        if width > max_w || height > max_h {
            prop_assert!(fit_w == max_w || fit_h == max_h);
        }
    }
}
