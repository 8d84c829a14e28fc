// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for group control.
//!
//! Each type is validated at construction time, so once a request holds
//! one of these values it can be placed on the wire without further checks.
//!
//! # Types
//!
//! - [`GroupId`] - Vendor-assigned numeric group/device handle
//! - [`SwitchMode`] - On/Off power state (`1`/`0` on the wire)

mod group_id;
mod switch_mode;

pub use group_id::GroupId;
pub use switch_mode::SwitchMode;
