use std::fmt;

use crate::error::CoreError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// The single file handle of an analysis submission: a PDF legal pack or
/// a ZIP of PDFs.
#[derive(Clone, PartialEq, Eq)]
pub struct PackFile {
    file_name: String,
    content_type: &'static str,
    bytes: Vec<u8>,
}

impl PackFile {
    /// Wrap file contents, deriving the content type from the extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, CoreError> {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name)
            .ok_or_else(|| CoreError::UnsupportedPackType(file_name.clone()))?;
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Split into `(file_name, content_type, bytes)` for upload.
    pub fn into_parts(self) -> (String, &'static str, Vec<u8>) {
        (self.file_name, self.content_type, self.bytes)
    }
}

impl fmt::Debug for PackFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn content_type_for(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some(PDF_CONTENT_TYPE),
        "zip" => Some(ZIP_CONTENT_TYPE),
        _ => None,
    }
}
