//! Multipart form container

use std::path::Path;

use crate::error::HttpError;
use crate::response::Response;

/// A file to be uploaded as a multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    name: String,
    content: Vec<u8>,
    mime: Option<String>,
}

impl FileAttachment {
    /// Create an attachment from in-memory bytes
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            mime: None,
        }
    }

    /// Set the part's content type
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Read an attachment from disk, named after the final path component
    pub async fn from_path(path: impl AsRef<Path>) -> Response<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, content))
    }

    /// File name sent with the part
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File contents
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content type, if one was set
    pub fn mime(&self) -> Option<&str> {
        self.mime.as_deref()
    }
}

/// Value held by a form entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// Plain text field
    Text(String),
    /// File part
    File(FileAttachment),
}

/// One entry of a [`FormData`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEntry {
    /// Field name; `None` when no file tag was set, transmitted as an empty name
    pub field: Option<String>,
    /// Entry value
    pub value: FormValue,
}

/// Ordered multipart form body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<FormEntry>,
}

impl FormData {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file under `field`
    pub fn append_file(&mut self, field: Option<&str>, file: FileAttachment) {
        self.entries.push(FormEntry {
            field: field.map(str::to_string),
            value: FormValue::File(file),
        });
    }

    /// Append a text field
    pub fn append_text(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.entries.push(FormEntry {
            field: Some(field.into()),
            value: FormValue::Text(value.into()),
        });
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[FormEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the form has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert into a reqwest multipart form
    pub(crate) fn into_multipart(self) -> Response<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for entry in self.entries {
            let field = entry.field.unwrap_or_default();
            form = match entry.value {
                FormValue::Text(text) => form.text(field, text),
                FormValue::File(file) => {
                    let mut part =
                        reqwest::multipart::Part::bytes(file.content).file_name(file.name);
                    if let Some(mime) = file.mime {
                        part = part
                            .mime_str(&mime)
                            .map_err(|e| HttpError::Build(format!("Invalid mime type: {}", e)))?;
                    }
                    form.part(field, part)
                }
            };
        }
        Ok(form)
    }
}
