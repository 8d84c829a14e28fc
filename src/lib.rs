// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `sikom_lib` - switch Sikom device groups on and off.
//!
//! This library wraps the single control call of the Connome BPAPI:
//! `GET /api/Device/{id}/AddProperty/switch_mode/{0|1}/` with Basic
//! authentication. It resolves credentials from a host-provided settings
//! reader, builds the request, performs it, and classifies the answer.
//!
//! # Success policy
//!
//! - Non-2xx HTTP statuses fail with [`Error::Http`]
//! - A `Data.bpapi_status` other than `ok`/`success` fails with
//!   [`Error::Application`]
//! - A 2xx response whose body is not JSON is accepted
//!
//! Nothing is retried and nothing is cached between calls.
//!
//! # Quick Start
//!
//! ```no_run
//! use sikom_lib::{ClientConfig, GroupId};
//! use sikom_lib::settings::EnvSettings;
//!
//! #[tokio::main]
//! async fn main() -> sikom_lib::Result<()> {
//!     // Reads SIKOM_USERNAME / SIKOM_PASSWORD
//!     let client = ClientConfig::new().into_client(EnvSettings::new())?;
//!
//!     client.group_on(GroupId::new(361_177)).await?;
//!     client.group_off(GroupId::new(361_177)).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Running host actions
//!
//! ```no_run
//! use sikom_lib::action::Action;
//! use sikom_lib::settings::MemorySettings;
//! use sikom_lib::SikomClient;
//!
//! # async fn example() -> sikom_lib::Result<()> {
//! let settings = MemorySettings::new()
//!     .with("username", "alice")
//!     .with("password", "secret");
//! let client = SikomClient::new(settings)?;
//!
//! let payload = serde_json::json!({ "groupId": 361177 });
//! client.run_action("group-on".parse::<Action>()?, &payload).await?;
//! # Ok(())
//! # }
//! ```

pub mod action;
mod client;
pub mod error;
pub mod request;
pub mod response;
pub mod settings;
pub mod types;

pub use action::{Action, ActionArgs};
pub use client::{ClientConfig, SikomClient};
pub use error::{Error, Result, ValueError};
pub use request::{ControlRequest, EndpointStyle, PasswordPolicy, PreparedRequest};
pub use response::{Outcome, VendorResponse};
pub use settings::{Credentials, EnvSettings, MemorySettings, SettingsReader};
pub use types::{GroupId, SwitchMode};
