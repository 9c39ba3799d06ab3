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

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use sendgrid_cli::{Compose, Config, Response, SendGridClient, Transport};

/// Send an e-mail through SendGrid.
///
/// Recipients may carry a display name before the address,
/// e.g. "Jane Doe jane@example.com".
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Specify sender address
    #[arg(short = 'f', long)]
    from_address: String,

    /// Specify recipient(s)
    #[arg(short = 't', long, required = true)]
    to_address: Vec<String>,

    /// Specify carbon copy recipient(s)
    #[arg(short = 'c', long)]
    cc_address: Vec<String>,

    /// Specify blind carbon copy recipient(s)
    #[arg(long)]
    bcc_address: Vec<String>,

    /// Specify subject
    #[arg(short = 's', long)]
    subject: String,

    /// Specify message body (HTML), or file:<path> to read it from disk
    #[arg(short = 'b', long)]
    body: Option<String>,

    /// Specify an attachment
    #[arg(short = 'a', long)]
    attach: Vec<PathBuf>,

    /// Specify a template ID
    #[arg(short = 'i', long)]
    template_id: Option<String>,

    /// Specify template data (JSON object)
    #[arg(short = 'd', long)]
    template_data: Option<String>,
}

impl Args {
    fn compose(&self) -> Compose<'_> {
        Compose {
            from: &self.from_address,
            to: self.to_address.iter().map(String::as_str).collect(),
            cc: self.cc_address.iter().map(String::as_str).collect(),
            bcc: self.bcc_address.iter().map(String::as_str).collect(),
            subject: &self.subject,
            body: self.body.as_deref(),
            attachments: self.attach.iter().map(PathBuf::as_path).collect(),
            template_id: self.template_id.as_deref(),
            template_data: self.template_data.as_deref(),
        }
    }
}

async fn run(transport: &impl Transport, args: &Args) -> sendgrid_cli::Result<Response> {
    transport.send(args.compose()).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::init();

    let result = match Config::load() {
        Ok(config) => run(&SendGridClient::from(&config), &args).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(response) => {
            log::info!(
                "Accepted with status {}, message id {}",
                response.status_code,
                response.message_id.as_deref().unwrap_or("unknown")
            );
            println!("Email sent successfully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("Email not sent, error follows '{}'", err);
            ExitCode::FAILURE
        }
    }
}
