/// Failures along the drop-ingest and thumbnail paths.
///
/// Variants carry rendered messages rather than source errors so the type stays `Clone`
/// and can travel inside UI messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickerError {
    #[error("drop carried no payloads")]
    EmptyDrop,

    #[error("payload is not a decodable image: {0}")]
    Decode(String),

    #[error("thumbnail bounds have a zero-sized side")]
    EmptyBounds,

    #[error("thumbnail generation failed: {0}")]
    Thumbnail(String),

    #[error("failed to read payload: {0}")]
    Io(String),
}
