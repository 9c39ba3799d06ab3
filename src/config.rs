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

use crate::http::sendgrid::DEFAULT_API_URL;

pub const API_KEY_VAR: &str = "SENDGRID_API_KEY";
pub const API_URL_VAR: &str = "SENDGRID_API_URL";

/// Settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
}

impl Config {
    /// Loads a `.env` file from the working directory, if any, then reads
    /// the settings from the process environment. Variables that are already
    /// set are never overridden by the file.
    pub fn load() -> crate::Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from {}", path.display()),
            Err(err) if err.not_found() => (),
            Err(err) => log::warn!("Ignoring .env file: {}", err),
        }
        Self::from_env()
    }

    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> crate::Result<Self> {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(crate::Error::MissingCredentials)?;
        let api_url = lookup(API_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Config { api_key, api_url })
    }
}
