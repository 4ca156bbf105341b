//! Photo relay error types.
//!
//! The `Display` text of every upload failure is written for the person
//! filling in the form and is shown to them verbatim.

/// Errors from validating or relaying a photo.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Filename has no extension or one outside the allow-list. No request sent.
    #[error("Unsupported image format. Please upload PNG, JPG, JPEG, GIF, or WEBP files.")]
    UnsupportedFormat { filename: String },

    /// The uploaded file has no content. No request sent.
    #[error("Uploaded photo is empty. Please select a valid image.")]
    EmptyFile,

    /// Transport failure: connect error, timeout, non-2xx status, or a body
    /// that is not JSON.
    #[error("Unable to upload the photo at the moment. {source}")]
    Transport { source: reqwest::Error },

    /// The image host answered but reported failure.
    #[error("Image upload failed: {message}")]
    Rejected { message: String },

    /// The image host reported success without a hosted URL.
    #[error("Could not retrieve the uploaded photo URL from the image host.")]
    MissingUrl,

    /// The HTTP client could not be constructed.
    #[error("failed to initialise image host client: {source}")]
    Init { source: reqwest::Error },
}

impl RelayError {
    /// Whether a request reached (or was attempted against) the image host.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Rejected { .. } | Self::MissingUrl
        )
    }
}
