// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Typed client for JMAP mail servers (RFC 8620 / RFC 8621).

#[macro_use]
mod macros;

// --- Modules ---
pub mod capabilities;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod methods;
pub mod session;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use error::{JmapError, JmapResult};
pub use transport::{HttpTransport, Transport, TransportError};

pub mod prelude {
    // Config
    pub use crate::config::Settings;

    // Client
    pub use crate::client::{Client, ClientBuilder};
    pub use crate::envelope::{MethodError, MethodErrorKind};
    pub use crate::error::{JmapError, JmapResult};
    pub use crate::methods::*;
    pub use crate::session::{Account, Session, SessionState};
    pub use crate::transport::{HttpTransport, Transport, TransportError};

    // Common Libs
    pub use log::{debug, error, info, trace, warn};
    pub use std::sync::Arc;
}
