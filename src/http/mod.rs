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

use crate::message::IntoMessage;

pub mod sendgrid;

/// Reply returned by a delivery API once a message has been accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status_code: u16,
    pub message_id: Option<String>,
}

/// A delivery API able to accept one message at a time.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send<'x>(&self, message: impl IntoMessage<'x>) -> crate::Result<Response>;
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use crate::{
        message::{address::Address, IntoMessage},
        Compose, Error, Message,
    };

    use super::{Response, Transport};

    /// Keeps every message it is asked to send.
    #[derive(Default)]
    struct RecordingTransport {
        pub sent: RefCell<Vec<Message<'static>>>,
    }

    impl Transport for RecordingTransport {
        async fn send<'x>(&self, message: impl IntoMessage<'x>) -> crate::Result<Response> {
            let message = message.into_message()?;
            self.sent.borrow_mut().push(message.into_owned());
            Ok(Response {
                status_code: 202,
                message_id: None,
            })
        }
    }

    #[tokio::test]
    async fn injected_transport() {
        let transport = RecordingTransport::default();

        let response = transport
            .send(
                Compose::new()
                    .from("john@example.com")
                    .to("Jane Doe jane@example.com")
                    .subject("Hi!")
                    .body("<p>Hi</p>"),
            )
            .await
            .unwrap();
        assert_eq!(response.status_code, 202);

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].rcpt_to, vec![Address::new("Jane Doe", "jane@example.com")]);
        assert_eq!(sent[0].html_body.as_deref(), Some("<p>Hi</p>"));
    }

    #[tokio::test]
    async fn nothing_sent_on_assembly_failure() {
        let transport = RecordingTransport::default();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.zip");

        let result = transport
            .send(
                Compose::new()
                    .from("john@example.com")
                    .to("jane@example.com")
                    .subject("Hi!")
                    .attach(&missing),
            )
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert!(transport.sent.borrow().is_empty());
    }
}
