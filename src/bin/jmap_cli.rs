// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::process::exit;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use env_logger::Env;
use jmap_client::capabilities::SUBMISSION;
use jmap_client::config::Settings;
use jmap_client::methods::{
    Comparator, EmailFilterCondition, EmailQueryArguments, Filter, GetArguments, QueryArguments,
};
use jmap_client::{Client, HttpTransport, JmapResult};
use log::{error, info};

#[derive(Parser, Debug)]
#[command(name = "jmap-cli", about = "Talk to a JMAP mail server")]
struct Cli {
    /// Path to a settings file (TOML)
    #[arg(short, long, env = "JMAP_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the accounts and capabilities of the session
    Session,
    /// List mailboxes of the default account
    Mailboxes,
    /// List email ids, newest first
    Query {
        /// Restrict to one mailbox id
        #[arg(long)]
        mailbox: Option<String>,
        #[arg(long, default_value_t = 20)]
        limit: u64,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::new(cli.config.as_deref()).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {}", err);
        exit(1);
    });
    env_logger::Builder::from_env(Env::default().default_filter_or(settings.log.level.as_str())).init();

    let http_client = match reqwest::Client::builder()
        .user_agent(concat!("jmap-cli/", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(http_client) => http_client,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            exit(1);
        }
    };

    let mut transport = HttpTransport::with_client(http_client);
    if let Some(secs) = settings.timeout_secs {
        transport = transport.with_timeout(Duration::from_secs(secs));
    }

    let client = match Client::from_settings(&settings, Arc::new(transport)) {
        Ok(client) => client,
        Err(e) => {
            error!("Invalid client settings: {}", e);
            exit(1);
        }
    };

    if let Err(e) = run(&client, cli.command).await {
        error!("{}", e);
        exit(1);
    }
}

async fn run(client: &Client, command: Command) -> JmapResult<()> {
    client.fetch_session().await?;
    info!("Session ready");

    match command {
        Command::Session => {
            let session = client.get_session()?;
            println!("username: {}", session.username);
            println!("apiUrl:   {}", session.api_url);
            println!("accounts:");
            for (id, account) in session.accounts.iter() {
                let access = if account.is_read_only { "read-only" } else { "read-write" };
                println!("  {}  {} ({})", id, account.name, access);
            }
            println!("capabilities:");
            for urn in session.capabilities.keys() {
                println!("  {}", urn);
            }
            if !session.has_capability(SUBMISSION) {
                println!("(sending mail is not supported by this server)");
            }
        }
        Command::Mailboxes => {
            let response = client.mailbox_get(GetArguments::default()).await?;
            for mailbox in response.list {
                println!(
                    "{:<24} {:<32} {}",
                    mailbox.id.unwrap_or_default(),
                    mailbox.name.unwrap_or_default(),
                    mailbox.role.unwrap_or_default()
                );
            }
        }
        Command::Query { mailbox, limit } => {
            let filter = mailbox.map(|id| {
                Filter::Condition(EmailFilterCondition {
                    in_mailbox: Some(id),
                    ..Default::default()
                })
            });
            let args = EmailQueryArguments {
                query: QueryArguments {
                    filter,
                    sort: Some(vec![Comparator::descending("receivedAt")]),
                    limit: Some(limit),
                    ..Default::default()
                },
                collapse_threads: None,
            };
            let response = client.email_query(args).await?;
            for id in response.ids {
                println!("{}", id);
            }
        }
    }
    Ok(())
}
