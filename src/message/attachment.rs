/*
 * Copyright Stalwart Labs Ltd. See the COPYING
 * file at the top-level directory of this distribution.
 *
 * Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
 * https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
 * <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
 * option. This file may not be copied, modified, or distributed
 * except according to those terms.
 */

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use uuid::Uuid;

pub const DISPOSITION_ATTACHMENT: &str = "attachment";

/// A file attached to a message, already base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub content: String,
    pub content_type: Option<String>,
    pub filename: String,
    pub disposition: &'static str,
    pub content_id: String,
}

impl Attachment {
    /// Creates an attachment from raw bytes with a fresh content id.
    pub fn new(filename: impl Into<String>, content_type: Option<String>, data: &[u8]) -> Self {
        Attachment {
            content: STANDARD.encode(data),
            content_type,
            filename: filename.into(),
            disposition: DISPOSITION_ATTACHMENT,
            content_id: Uuid::new_v4().to_string(),
        }
    }

    /// Reads a regular file and packages it as an attachment.
    ///
    /// The MIME type is guessed from the file extension and left unset
    /// when the extension is unknown.
    pub fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(crate::Error::NotFound(path.to_path_buf()));
        }

        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content_type = mime_guess::from_path(path)
            .first_raw()
            .map(str::to_string);

        log::debug!(
            "Attaching {:?} ({} bytes, {})",
            filename,
            data.len(),
            content_type.as_deref().unwrap_or("unknown type")
        );

        Ok(Attachment::new(filename, content_type, &data))
    }
}
