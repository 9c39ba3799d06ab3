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

use std::borrow::Cow;

use serde::Serialize;

use crate::{
    message::{address::Address, attachment::Attachment, IntoMessage, Message, TemplateData},
    Config,
};

use super::{Response, Transport};

pub const DEFAULT_API_URL: &str = "https://api.sendgrid.com";
const MAIL_SEND_PATH: &str = "/v3/mail/send";
const MESSAGE_ID_HEADER: &str = "x-message-id";

#[derive(Debug, Serialize)]
#[doc(hidden)]
struct Request<'x> {
    personalizations: Vec<Personalization<'x>>,
    from: Email<'x>,
    subject: &'x str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    content: Vec<Content<'x>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<AttachmentPart<'x>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_id: Option<&'x str>,
}

#[derive(Debug, Serialize)]
struct Personalization<'x> {
    to: Vec<Email<'x>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cc: Vec<Email<'x>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bcc: Vec<Email<'x>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dynamic_template_data: Option<&'x TemplateData>,
}

#[derive(Debug, Serialize)]
struct Email<'x> {
    email: &'x str,
    #[serde(skip_serializing_if = "is_empty")]
    name: &'x str,
}

#[derive(Debug, Serialize)]
struct Content<'x> {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: &'x str,
}

#[derive(Debug, Serialize)]
struct AttachmentPart<'x> {
    content: &'x str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    content_type: Option<&'x str>,
    filename: &'x str,
    disposition: &'x str,
    content_id: &'x str,
}

fn is_empty(value: &&str) -> bool {
    value.is_empty()
}

impl<'x> From<&'x Address<'_>> for Email<'x> {
    fn from(address: &'x Address<'_>) -> Self {
        Email {
            email: address.email.as_ref(),
            name: address.name.as_ref(),
        }
    }
}

impl<'x> From<&'x Attachment> for AttachmentPart<'x> {
    fn from(attachment: &'x Attachment) -> Self {
        AttachmentPart {
            content: &attachment.content,
            content_type: attachment.content_type.as_deref(),
            filename: &attachment.filename,
            disposition: attachment.disposition,
            content_id: &attachment.content_id,
        }
    }
}

impl<'x> From<&'x Message<'_>> for Request<'x> {
    fn from(message: &'x Message<'_>) -> Self {
        Request {
            personalizations: vec![Personalization {
                to: message.rcpt_to.iter().map(Into::into).collect(),
                cc: message.cc.iter().map(Into::into).collect(),
                bcc: message.bcc.iter().map(Into::into).collect(),
                dynamic_template_data: message.template_data.as_ref(),
            }],
            from: (&message.mail_from).into(),
            subject: message.subject.as_ref(),
            content: message
                .html_body
                .as_deref()
                .map(|value| Content {
                    content_type: "text/html",
                    value,
                })
                .into_iter()
                .collect(),
            attachments: message.attachments.iter().map(Into::into).collect(),
            template_id: message.template_id.as_deref(),
        }
    }
}

/// SendGrid v3 Mail Send client.
pub struct SendGridClient<'x> {
    api_key: Cow<'x, str>,
    url: String,
    client: reqwest::Client,
}

impl<'x> From<&'x str> for SendGridClient<'x> {
    fn from(api_key: &'x str) -> Self {
        Self::new(api_key)
    }
}

impl<'x> From<String> for SendGridClient<'x> {
    fn from(api_key: String) -> Self {
        Self::new(api_key)
    }
}

impl<'x> From<&'x Config> for SendGridClient<'x> {
    fn from(config: &'x Config) -> Self {
        Self::new(config.api_key.as_str()).api_url(&config.api_url)
    }
}

impl<'x> SendGridClient<'x> {
    /// Creates a new SendGrid client with the specified API key.
    pub fn new(api_key: impl Into<Cow<'x, str>>) -> Self {
        Self {
            api_key: api_key.into(),
            url: format!("{}{}", DEFAULT_API_URL, MAIL_SEND_PATH),
            client: reqwest::Client::new(),
        }
    }

    /// Points the client at a different API base URL.
    pub fn api_url(mut self, base_url: &str) -> Self {
        self.url = format!("{}{}", base_url.trim_end_matches('/'), MAIL_SEND_PATH);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends a message via SendGrid.
    pub async fn send<'y>(&self, message: impl IntoMessage<'y>) -> crate::Result<Response> {
        let message = message.into_message()?;
        let request = Request::from(&message);

        log::debug!(
            "Posting message with {} recipient(s), {} attachment(s) to {}",
            message.recipient_count(),
            message.attachments.len(),
            self.url
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let message_id = response
                .headers()
                .get(MESSAGE_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            log::debug!("Accepted with status {} (id {:?})", status, message_id);

            Ok(Response {
                status_code: status.as_u16(),
                message_id,
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Rejected with status {}: {}", status, body);

            Err(crate::Error::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

impl Transport for SendGridClient<'_> {
    async fn send<'y>(&self, message: impl IntoMessage<'y>) -> crate::Result<Response> {
        SendGridClient::send(self, message).await
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::{
        message::attachment::Attachment, Compose, Config, Error, Message, Response, Transport,
    };

    use super::{Request, SendGridClient, DEFAULT_API_URL};

    #[test]
    fn request_payload() {
        let message = Message::new("Ops Team ops@example.com", ["Jane Doe jane@x.com"], "Hi!")
            .to("james@test.com")
            .cc("Carbon cc@example.com")
            .html_body("<p>Hi</p>")
            .attachment(Attachment {
                content: "AQIDBA==".into(),
                content_type: Some("image/png".into()),
                filename: "pretzels.png".into(),
                disposition: "attachment",
                content_id: "cid-1".into(),
            })
            .attachment(Attachment {
                content: "AA==".into(),
                content_type: None,
                filename: "blob".into(),
                disposition: "attachment",
                content_id: "cid-2".into(),
            });

        assert_eq!(
            serde_json::to_value(Request::from(&message)).unwrap(),
            json!({
                "personalizations": [{
                    "to": [
                        {"email": "jane@x.com", "name": "Jane Doe"},
                        {"email": "james@test.com"}
                    ],
                    "cc": [{"email": "cc@example.com", "name": "Carbon"}]
                }],
                "from": {"email": "ops@example.com", "name": "Ops Team"},
                "subject": "Hi!",
                "content": [{"type": "text/html", "value": "<p>Hi</p>"}],
                "attachments": [
                    {
                        "content": "AQIDBA==",
                        "type": "image/png",
                        "filename": "pretzels.png",
                        "disposition": "attachment",
                        "content_id": "cid-1"
                    },
                    {
                        "content": "AA==",
                        "filename": "blob",
                        "disposition": "attachment",
                        "content_id": "cid-2"
                    }
                ]
            })
        );
    }

    #[test]
    fn template_payload() {
        let data = json!({"name": "Jane"}).as_object().cloned().unwrap();
        let message = Message::new("ops@example.com", ["jane@x.com"], "Welcome")
            .bcc("audit@example.com")
            .template_id("d-1234")
            .template_data(data);

        assert_eq!(
            serde_json::to_value(Request::from(&message)).unwrap(),
            json!({
                "personalizations": [{
                    "to": [{"email": "jane@x.com"}],
                    "bcc": [{"email": "audit@example.com"}],
                    "dynamic_template_data": {"name": "Jane"}
                }],
                "from": {"email": "ops@example.com"},
                "subject": "Welcome",
                "template_id": "d-1234"
            })
        );
    }

    #[test]
    fn api_url() {
        assert_eq!(
            SendGridClient::new("key").url(),
            format!("{}/v3/mail/send", DEFAULT_API_URL)
        );
        assert_eq!(
            SendGridClient::new("key")
                .api_url("http://localhost:8080/")
                .url(),
            "http://localhost:8080/v3/mail/send"
        );

        let config = Config {
            api_key: "key".into(),
            api_url: "http://localhost:9090".into(),
        };
        assert_eq!(
            SendGridClient::from(&config).url(),
            "http://localhost:9090/v3/mail/send"
        );
    }

    #[tokio::test]
    async fn send_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .and(header("authorization", "Bearer SG.test"))
            .and(body_json(json!({
                "personalizations": [{"to": [{"email": "jane@example.com", "name": "Jane Doe"}]}],
                "from": {"email": "john@example.com"},
                "subject": "Hi!",
                "content": [{"type": "text/html", "value": "<p>Hi</p>"}]
            })))
            .respond_with(ResponseTemplate::new(202).insert_header("x-message-id", "abc123"))
            .expect(1)
            .mount(&server)
            .await;

        let response = SendGridClient::new("SG.test")
            .api_url(&server.uri())
            .send(
                Compose::new()
                    .from("john@example.com")
                    .to("Jane Doe jane@example.com")
                    .subject("Hi!")
                    .body("<p>Hi</p>"),
            )
            .await
            .unwrap();

        assert_eq!(
            response,
            Response {
                status_code: 202,
                message_id: Some("abc123".into()),
            }
        );
    }

    #[tokio::test]
    async fn send_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"errors":[{"message":"unauthorized"}]}"#),
            )
            .mount(&server)
            .await;

        let client = SendGridClient::new("SG.wrong").api_url(&server.uri());
        match Transport::send(&client, Message::new("a@x.com", ["b@x.com"], "Hi")).await {
            Err(Error::Rejected { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("unauthorized"));
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn nothing_posted_without_recipients() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202))
            .expect(0)
            .mount(&server)
            .await;

        let result = SendGridClient::new("SG.test")
            .api_url(&server.uri())
            .send(Compose::new().from("john@example.com").subject("Hi!"))
            .await;
        assert!(matches!(result, Err(Error::MissingRcptTo)));
    }

    #[tokio::test]
    async fn send_unreachable() {
        let result = SendGridClient::new("SG.test")
            .api_url("http://127.0.0.1:1")
            .send(Message::new("a@x.com", ["b@x.com"], "Hi"))
            .await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
