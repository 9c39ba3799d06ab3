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

//! # sendgrid-cli
//!
//! _sendgrid-cli_ composes a single transactional e-mail and hands it to the
//! SendGrid v3 Mail Send API. It includes the following features:
//!
//! - Recipients given as free text (`"Jane Doe jane@example.com"`) for To, Cc and Bcc.
//! - HTML bodies given inline or read from disk with the `file:` prefix.
//! - Any number of file attachments, base64 encoded with a guessed MIME type.
//! - Dynamic templates with JSON template data.
//!
//! ## Usage Example
//!
//! ```rust
//!     let message = Compose::new()
//!         .from("John Doe john@example.com")
//!         .to("Jane Doe jane@example.com")
//!         .cc("james@test.com")
//!         .subject("Hi!")
//!         .body("file:./hello.html")
//!         .attach("./pretzels.png");
//!
//!     let response = SendGridClient::new("SG.secret")
//!         .send(message)
//!         .await
//!         .unwrap();
//! ```
//!
//! ## License
//!
//! Licensed under either of
//!
//!  * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//!  * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.
//!

pub mod config;
pub mod http;
pub mod message;

use std::{fmt::Display, path::PathBuf};

pub use config::Config;
pub use http::{sendgrid::SendGridClient, Response, Transport};
pub use message::{
    address::Address, attachment::Attachment, compose::Compose, IntoMessage, Message,
};

#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// A body file or attachment does not exist.
    NotFound(PathBuf),

    /// Malformed template data.
    Parse(serde_json::Error),

    /// The request could not be delivered to the API.
    Transport(String),

    /// The API answered with a non-success status.
    Rejected { status: u16, body: String },

    /// Missing API key.
    MissingCredentials,

    /// Missing message sender.
    MissingMailFrom,

    /// Missing message recipients.
    MissingRcptTo,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::NotFound(path) => write!(f, "File not found: {}", path.display()),
            Error::Parse(e) => write!(f, "Invalid template data: {}", e),
            Error::Transport(e) => write!(f, "Transport error: {}", e),
            Error::Rejected { status, body } if body.is_empty() => {
                write!(f, "Rejected with status {}", status)
            }
            Error::Rejected { status, body } => {
                write!(f, "Rejected with status {}: {}", status, body)
            }
            Error::MissingCredentials => write!(f, "Missing API key"),
            Error::MissingMailFrom => write!(f, "Missing message sender"),
            Error::MissingRcptTo => write!(f, "Missing message recipients"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}
