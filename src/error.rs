/// Errors raised at the image codec boundary
///
/// Luminance conversion, threshold search and binarization cannot fail;
/// only reading/decoding the input and encoding the output can.
#[derive(Debug, thiserror::Error)]
pub enum BinarizeError {
    /// Reading or decoding the input failed
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// Encoding the binarized output failed
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

/// Result alias for codec operations
pub type Result<T> = std::result::Result<T, BinarizeError>;
