//! Multipart form model
//!
//! Uploads are described by an inspectable list of fields rather than an
//! opaque wire body. The HTTP layer converts this model into an actual
//! multipart body at dispatch time; field order is insertion order, so the
//! encoded form is deterministic.

/// One field of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    /// A plain text field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// A file field carrying picture bytes.
    File {
        /// Field name (e.g. `photo`, `picture`).
        name: String,
        /// File name reported to the server.
        file_name: String,
        /// Raw file content.
        content: Vec<u8>,
        /// MIME type of the content.
        mime_type: String,
    },
}

impl FormField {
    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// An ordered multipart form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadForm {
    fields: Vec<FormField>,
}

impl UploadForm {
    /// Creates an empty form.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FormField::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Appends a file field.
    #[must_use]
    pub fn file(mut self, name: impl Into<String>, file_name: impl Into<String>, media: MediaFile) -> Self {
        self.fields.push(FormField::File {
            name: name.into(),
            file_name: file_name.into(),
            content: media.content,
            mime_type: media.mime_type,
        });
        self
    }

    /// Returns the fields in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Consumes the form and returns its fields.
    #[must_use]
    pub fn into_fields(self) -> Vec<FormField> {
        self.fields
    }

    /// Returns whether the form has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// In-memory picture content for an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Raw file content.
    pub content: Vec<u8>,
    /// MIME type of the content.
    pub mime_type: String,
}

impl MediaFile {
    /// Creates a media file from raw bytes, guessing the MIME type from the
    /// given file name.
    #[must_use]
    pub fn from_bytes(file_name: &str, content: Vec<u8>) -> Self {
        let mime_type = mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .to_string();
        Self { content, mime_type }
    }

    /// Overrides the MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Returns whether the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fields_keep_insertion_order() {
        let form = UploadForm::new()
            .text("type", "passport")
            .text("side", "front")
            .file("picture", "front.jpeg", MediaFile::from_bytes("f.jpg", vec![1, 2, 3]));

        let names: Vec<&str> = form.fields().iter().map(FormField::name).collect();
        assert_eq!(names, vec!["type", "side", "picture"]);
    }

    #[test]
    fn test_media_mime_guessed_from_file_name() {
        let media = MediaFile::from_bytes("selfie.png", vec![0]);
        assert_eq!(media.mime_type, "image/png");

        let media = MediaFile::from_bytes("selfie.unknown", vec![0]);
        assert_eq!(media.mime_type, "application/octet-stream");
    }

    #[test]
    fn test_media_mime_override() {
        let media = MediaFile::from_bytes("blob", vec![0]).with_mime_type("image/jpeg");
        assert_eq!(media.mime_type, "image/jpeg");
    }
}
