//! Uploaded photo and the extension allow-list.

/// Extensions accepted by the relay, lowercase.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// A photo received from the submission form.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    /// Client-supplied filename, used only for the extension check.
    pub filename: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for PhotoUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoUpload")
            .field("filename", &self.filename)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl PhotoUpload {
    /// Build an upload from a filename and its content.
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Whether `filename` ends in an allowed extension, compared case-insensitively.
///
/// The extension is everything after the last dot; a name without a dot is
/// rejected.
pub fn is_allowed_filename(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
