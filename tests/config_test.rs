// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::env;
use std::fs;
use std::sync::Arc;

use jmap_client::config::Settings;
use jmap_client::{Client, HttpTransport};
use serial_test::serial;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "JMAP_SESSION_URL",
    "JMAP_ACCESS_TOKEN",
    "JMAP_API_URL",
    "JMAP_ACCOUNT_ID",
    "JMAP_LOG_LEVEL",
    "JMAP_TIMEOUT_SECS",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

fn write_config(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("jmap.toml");
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
#[serial]
fn loads_settings_from_file() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
session_url = "https://jmap.example.com/.well-known/jmap"
access_token = "file-token"
default_account_id = "u42"
timeout_secs = 15

[http_headers]
x-client = "jmap-cli"

[log]
level = "debug"
"#,
    );

    let settings = Settings::new(Some(&path)).unwrap();

    assert_eq!(settings.session_url, "https://jmap.example.com/.well-known/jmap");
    assert_eq!(settings.access_token, "file-token");
    assert_eq!(settings.default_account_id.as_deref(), Some("u42"));
    assert_eq!(settings.timeout_secs, Some(15));
    assert_eq!(settings.http_headers.get("x-client").map(String::as_str), Some("jmap-cli"));
    assert_eq!(settings.log.level, "debug");
    assert!(settings.overridden_api_url.is_none());
}

#[test]
#[serial]
fn environment_overrides_file() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
session_url = "https://file.example.com/.well-known/jmap"
access_token = "file-token"
"#,
    );

    env::set_var("JMAP_ACCESS_TOKEN", "env-token");
    env::set_var("JMAP_API_URL", "https://api.example.com/jmap");
    env::set_var("JMAP_LOG_LEVEL", "warn");
    env::set_var("JMAP_TIMEOUT_SECS", "30");

    let settings = Settings::new(Some(&path)).unwrap();
    clear_env();

    assert_eq!(settings.session_url, "https://file.example.com/.well-known/jmap");
    assert_eq!(settings.access_token, "env-token");
    assert_eq!(settings.overridden_api_url.as_deref(), Some("https://api.example.com/jmap"));
    assert_eq!(settings.log.level, "warn");
    assert_eq!(settings.timeout_secs, Some(30));
}

#[test]
#[serial]
fn environment_alone_is_enough() {
    clear_env();
    env::set_var("JMAP_SESSION_URL", "https://env.example.com/.well-known/jmap");

    let settings = Settings::new(None).unwrap();
    clear_env();

    assert_eq!(settings.session_url, "https://env.example.com/.well-known/jmap");
    assert_eq!(settings.access_token, "");
    assert_eq!(settings.log.level, "info");
    assert!(settings.timeout_secs.is_none());
}

#[test]
#[serial]
fn missing_session_url_is_an_error() {
    clear_env();
    assert!(Settings::new(None).is_err());
}

#[test]
#[serial]
fn settings_build_a_client() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
session_url = "https://jmap.example.com/.well-known/jmap"
access_token = "abc"
overridden_api_url = "https://jmap.example.com/api"

[http_headers]
x-trace = "on"
"#,
    );

    let settings = Settings::new(Some(&path)).unwrap();
    let client = Client::from_settings(&settings, Arc::new(HttpTransport::new())).unwrap();

    let headers = client.http_headers();
    assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer abc"));
    assert_eq!(headers.get("x-trace").map(String::as_str), Some("on"));
}
