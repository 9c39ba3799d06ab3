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

use std::{borrow::Cow, io::ErrorKind, path::Path};

use super::{
    address::{parse_recipients, Address},
    attachment::Attachment,
    IntoMessage, Message, TemplateData,
};

/// Body values starting with this prefix name a file holding the HTML body.
pub const BODY_FILE_PREFIX: &str = "file:";

/// Raw, unparsed message input as typed on the command line.
///
/// Nothing is read from disk until the value is turned into a [`Message`].
#[derive(Debug, Default, Clone)]
pub struct Compose<'x> {
    pub from: &'x str,
    pub to: Vec<&'x str>,
    pub cc: Vec<&'x str>,
    pub bcc: Vec<&'x str>,
    pub subject: &'x str,
    pub body: Option<&'x str>,
    pub attachments: Vec<&'x Path>,
    pub template_id: Option<&'x str>,
    pub template_data: Option<&'x str>,
}

impl<'x> Compose<'x> {
    pub fn new() -> Self {
        Compose::default()
    }

    pub fn from(mut self, token: &'x str) -> Self {
        self.from = token;
        self
    }

    pub fn to(mut self, token: &'x str) -> Self {
        self.to.push(token);
        self
    }

    pub fn cc(mut self, token: &'x str) -> Self {
        self.cc.push(token);
        self
    }

    pub fn bcc(mut self, token: &'x str) -> Self {
        self.bcc.push(token);
        self
    }

    pub fn subject(mut self, subject: &'x str) -> Self {
        self.subject = subject;
        self
    }

    /// Literal HTML, or `file:<path>` to read the body from disk.
    pub fn body(mut self, body: &'x str) -> Self {
        self.body = Some(body);
        self
    }

    pub fn attach<P: AsRef<Path> + ?Sized>(mut self, path: &'x P) -> Self {
        self.attachments.push(path.as_ref());
        self
    }

    pub fn template_id(mut self, template_id: &'x str) -> Self {
        self.template_id = Some(template_id);
        self
    }

    /// Template data as a JSON object.
    pub fn template_data(mut self, data: &'x str) -> Self {
        self.template_data = Some(data);
        self
    }
}

impl<'x> IntoMessage<'x> for Compose<'x> {
    fn into_message(self) -> crate::Result<Message<'x>> {
        let html_body = self.body.map(resolve_body).transpose()?;

        let attachments = self
            .attachments
            .into_iter()
            .map(Attachment::from_path)
            .collect::<crate::Result<Vec<_>>>()?;

        let template_data = self
            .template_data
            .map(parse_template_data)
            .transpose()?;

        Message {
            mail_from: Address::parse(self.from),
            rcpt_to: parse_recipients(self.to),
            cc: parse_recipients(self.cc),
            bcc: parse_recipients(self.bcc),
            subject: self.subject.into(),
            html_body,
            template_id: self.template_id.map(Into::into),
            template_data,
            attachments,
        }
        .into_message()
    }
}

/// Returns the body verbatim, or the contents of the named file when the
/// body starts with `file:`.
pub fn resolve_body(body: &str) -> crate::Result<Cow<'_, str>> {
    match body.strip_prefix(BODY_FILE_PREFIX) {
        Some(path) => std::fs::read_to_string(path)
            .map(Cow::Owned)
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => crate::Error::NotFound(path.into()),
                _ => err.into(),
            }),
        None => Ok(Cow::Borrowed(body)),
    }
}

pub fn parse_template_data(data: &str) -> crate::Result<TemplateData> {
    serde_json::from_str(data).map_err(Into::into)
}
