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

/// An e-mail address with an optional display name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Address<'x> {
    pub email: Cow<'x, str>,
    pub name: Cow<'x, str>,
}

impl<'x> Address<'x> {
    pub fn new(name: impl Into<Cow<'x, str>>, email: impl Into<Cow<'x, str>>) -> Self {
        Address {
            email: email.into(),
            name: name.into(),
        }
    }

    /// Parses a free text recipient such as `"Jane Doe jane@example.com"`.
    ///
    /// The input is split on single spaces. The last token is the address and
    /// anything before it, joined back with single spaces, is the display name.
    /// The address itself is not validated.
    pub fn parse(token: &'x str) -> Self {
        match token.rsplit_once(' ') {
            Some((name, email)) => Address {
                email: email.into(),
                name: name.into(),
            },
            None => Address {
                email: token.into(),
                name: Cow::Borrowed(""),
            },
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn into_owned(self) -> Address<'static> {
        Address {
            email: self.email.into_owned().into(),
            name: self.name.into_owned().into(),
        }
    }
}

impl<'x> From<&'x str> for Address<'x> {
    fn from(token: &'x str) -> Self {
        Address::parse(token)
    }
}

impl<'x> From<&'x String> for Address<'x> {
    fn from(token: &'x String) -> Self {
        Address::parse(token.as_str())
    }
}

impl<'x> From<String> for Address<'x> {
    fn from(token: String) -> Self {
        Address::parse(&token).into_owned()
    }
}

impl<'x> From<(&'x str, &'x str)> for Address<'x> {
    fn from((name, email): (&'x str, &'x str)) -> Self {
        Address::new(name, email)
    }
}

/// Parses every recipient token, preserving input order.
pub fn parse_recipients<'x, T>(tokens: T) -> Vec<Address<'x>>
where
    T: IntoIterator<Item = &'x str>,
{
    tokens.into_iter().map(Address::parse).collect()
}
