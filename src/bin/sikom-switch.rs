// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diagnostic tool: switch one group on or off against the live API.
//!
//! # Usage
//!
//! ```bash
//! sikom-switch <groupId> <on|off>
//! ```
//!
//! Credentials come from `SIKOM_USERNAME` / `SIKOM_PASSWORD`, optionally
//! provided through a `.env.local` file in the working directory.
//! `SIKOM_BASE_URL` overrides the API host.
//!
//! Exits with 0 on success and 1 on any failure.

use std::env;
use std::process::ExitCode;

use sikom_lib::settings::{self, EnvSettings};
use sikom_lib::{ClientConfig, ControlRequest, GroupId, SwitchMode};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "sikom_lib=info,sikom_switch=info";

fn print_usage(program: &str) {
    eprintln!("Usage: {program} <groupId> <on|off>");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {program} 361177 on");
    eprintln!("  {program} 361177 off");
    eprintln!();
    eprintln!("Configuration:");
    eprintln!("  Create a .env.local file with:");
    eprintln!("    SIKOM_USERNAME=your-username");
    eprintln!("    SIKOM_PASSWORD=your-password");
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("sikom-switch", String::as_str);

    if args.len() != 3 {
        print_usage(program);
        return ExitCode::FAILURE;
    }

    let group_id: GroupId = match args[1].parse() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mode = match args[2].to_lowercase().as_str() {
        "on" => SwitchMode::On,
        "off" => SwitchMode::Off,
        _ => {
            eprintln!("Error: command must be \"on\" or \"off\"");
            return ExitCode::FAILURE;
        }
    };

    let env_settings = match EnvSettings::new().with_env_file(".env.local") {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: failed to read .env.local: {e}");
            return ExitCode::FAILURE;
        }
    };

    let credentials = match settings::resolve_credentials(&env_settings) {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage(program);
            return ExitCode::FAILURE;
        }
    };

    let mut config = ClientConfig::new();
    if let Ok(base_url) = env::var("SIKOM_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    let suffix = if config.password_policy().appends_suffix() {
        "enabled"
    } else {
        "disabled"
    };

    let client = match config.into_client(env_settings) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Device {group_id} - turn {}", mode.to_string().to_uppercase());
    println!();
    println!("Request:");
    println!("  URL:    {}", client.request_builder().url(group_id, mode));
    println!("  Method: GET");
    println!("  Auth:   Basic (username: {}, suffix: {suffix})", credentials.username);
    println!("  Headers:");
    println!("    Authorization: Basic ***");
    println!("    Content-Type: application/json");
    println!();

    match client.control(ControlRequest::new(group_id, mode)).await {
        Ok(_) => {
            println!("SUCCESS - device {group_id} turned {mode}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("FAILED - {e}");
            ExitCode::FAILURE
        }
    }
}
