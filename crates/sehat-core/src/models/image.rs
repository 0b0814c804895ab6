/// Media type used when the client did not declare one.
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// An uploaded medical image, held in memory for the duration of a request.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub bytes: Vec<u8>,
    /// Declared media type, e.g. `image/png`.
    pub media_type: String,
    pub file_name: Option<String>,
}

impl ImageAttachment {
    pub fn new(bytes: Vec<u8>, media_type: Option<&str>, file_name: Option<&str>) -> Self {
        let media_type = media_type
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(FALLBACK_MEDIA_TYPE)
            .to_ascii_lowercase();

        Self {
            bytes,
            media_type,
            file_name: file_name.map(str::to_string),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Image bytes are omitted so logging an attachment never dumps the payload.
impl std::fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("len", &self.bytes.len())
            .field("media_type", &self.media_type)
            .field("file_name", &self.file_name)
            .finish()
    }
}
