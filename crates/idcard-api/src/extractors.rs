//! # Submission Form Extraction
//!
//! Reads the multipart submission body into text fields and an optional
//! photo. Extraction never fails: a body that is not multipart reads as an
//! empty form, and a stream that breaks part-way (malformed, or over the
//! body limit) keeps the text read so far and drops the photo. The normal
//! field and photo checks then turn either case into a notice.
//!
//! A part counts as the photo only when it is named `photo_file` and carries
//! a filename. When a name repeats, the first occurrence wins.

use std::collections::HashMap;

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use idcard_relay::PhotoUpload;

/// Name of the multipart part carrying the photo.
pub const PHOTO_FIELD: &str = "photo_file";

/// Parsed submission body.
#[derive(Debug, Default)]
pub struct SubmissionForm {
    text: HashMap<String, String>,
    /// The attached photo, if any.
    pub photo: Option<PhotoUpload>,
}

impl SubmissionForm {
    /// Raw value of a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }
}

/// Read a submission body.
///
/// Handlers should use:
/// ```ignore
/// async fn handler(body: Result<Multipart, MultipartRejection>) -> ... {
///     let form = read_submission_form(body).await;
/// }
/// ```
pub async fn read_submission_form(result: Result<Multipart, MultipartRejection>) -> SubmissionForm {
    let mut form = SubmissionForm::default();
    let mut multipart = match result {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "submission body is not multipart");
            return form;
        }
    };

    if let Err(err) = read_parts(&mut multipart, &mut form).await {
        tracing::debug!(reason = %err.body_text(), "submission body truncated, photo discarded");
        form.photo = None;
    }
    form
}

async fn read_parts(
    multipart: &mut Multipart,
    form: &mut SubmissionForm,
) -> Result<(), MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match field.file_name().map(str::to_owned) {
            Some(filename) if name == PHOTO_FIELD => {
                let bytes = field.bytes().await?;
                if form.photo.is_none() {
                    form.photo = Some(PhotoUpload::new(filename, bytes.to_vec()));
                }
            }
            Some(_) => {
                // Unexpected file part; drain it so the stream can advance.
                field.bytes().await?;
            }
            None => {
                let value = field.text().await?;
                form.text.entry(name).or_insert(value);
            }
        }
    }
    Ok(())
}
