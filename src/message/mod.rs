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

use serde_json::{Map, Value};

pub mod address;
pub mod attachment;
pub mod compose;

use address::Address;
use attachment::Attachment;

/// Template data merged into a dynamic template at send time.
pub type TemplateData = Map<String, Value>;

#[derive(Debug, Default, Clone)]
pub struct Message<'x> {
    pub mail_from: Address<'x>,
    pub rcpt_to: Vec<Address<'x>>,
    pub cc: Vec<Address<'x>>,
    pub bcc: Vec<Address<'x>>,
    pub subject: Cow<'x, str>,
    pub html_body: Option<Cow<'x, str>>,
    pub template_id: Option<Cow<'x, str>>,
    pub template_data: Option<TemplateData>,
    pub attachments: Vec<Attachment>,
}

impl<'x> Message<'x> {
    /// Create a new message
    pub fn new<T, U>(from: T, to: U, subject: impl Into<Cow<'x, str>>) -> Self
    where
        T: Into<Address<'x>>,
        U: IntoIterator<Item = T>,
    {
        Message {
            mail_from: from.into(),
            rcpt_to: to.into_iter().map(Into::into).collect(),
            subject: subject.into(),
            ..Default::default()
        }
    }

    /// Create a new empty message.
    pub fn empty() -> Self {
        Message::default()
    }

    /// Set the sender of the message.
    pub fn from(mut self, address: impl Into<Address<'x>>) -> Self {
        self.mail_from = address.into();
        self
    }

    /// Add a message recipient.
    pub fn to(mut self, address: impl Into<Address<'x>>) -> Self {
        self.rcpt_to.push(address.into());
        self
    }

    /// Add a carbon copy recipient.
    pub fn cc(mut self, address: impl Into<Address<'x>>) -> Self {
        self.cc.push(address.into());
        self
    }

    /// Add a blind carbon copy recipient.
    pub fn bcc(mut self, address: impl Into<Address<'x>>) -> Self {
        self.bcc.push(address.into());
        self
    }

    /// Set the message subject.
    pub fn subject(mut self, subject: impl Into<Cow<'x, str>>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the HTML body.
    pub fn html_body(mut self, body: impl Into<Cow<'x, str>>) -> Self {
        self.html_body = Some(body.into());
        self
    }

    /// Set the dynamic template to render this message with.
    pub fn template_id(mut self, template_id: impl Into<Cow<'x, str>>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Set the dynamic template data.
    pub fn template_data(mut self, data: TemplateData) -> Self {
        self.template_data = Some(data);
        self
    }

    /// Append an attachment.
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn into_owned(self) -> Message<'static> {
        Message {
            mail_from: self.mail_from.into_owned(),
            rcpt_to: self.rcpt_to.into_iter().map(Address::into_owned).collect(),
            cc: self.cc.into_iter().map(Address::into_owned).collect(),
            bcc: self.bcc.into_iter().map(Address::into_owned).collect(),
            subject: self.subject.into_owned().into(),
            html_body: self.html_body.map(|body| body.into_owned().into()),
            template_id: self.template_id.map(|id| id.into_owned().into()),
            template_data: self.template_data,
            attachments: self.attachments,
        }
    }

    /// Number of envelope recipients across To, Cc and Bcc.
    pub fn recipient_count(&self) -> usize {
        self.rcpt_to.len() + self.cc.len() + self.bcc.len()
    }
}

pub trait IntoMessage<'x> {
    fn into_message(self) -> crate::Result<Message<'x>>;
}

impl<'x> IntoMessage<'x> for Message<'x> {
    fn into_message(self) -> crate::Result<Message<'x>> {
        if self.mail_from.email.trim().is_empty() {
            Err(crate::Error::MissingMailFrom)
        } else if self.rcpt_to.is_empty() {
            Err(crate::Error::MissingRcptTo)
        } else {
            Ok(self)
        }
    }
}
