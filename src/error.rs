// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::envelope::MethodError;
use crate::transport::TransportError;

/// Result type for client operations
pub type JmapResult<T> = Result<T, JmapError>;

#[derive(Debug, Error)]
pub enum JmapError {
    #[error("Undefined session, call fetch_session and wait for its resolution")]
    SessionNotInitialized,

    #[error("No account available for this session")]
    NoAccountAvailable,

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Method error: {0}")]
    Method(MethodError),

    #[error("Could not decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not encode {context}: {source}")]
    Encode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Server returned no method response")]
    MissingMethodResponse,

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl JmapError {
    pub(crate) fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        JmapError::Decode { context: context.into(), source }
    }

    pub(crate) fn encode(context: impl Into<String>, source: serde_json::Error) -> Self {
        JmapError::Encode { context: context.into(), source }
    }

    /// True for errors raised locally before any request went out.
    pub fn is_precondition(&self) -> bool {
        matches!(self, JmapError::SessionNotInitialized | JmapError::NoAccountAvailable)
    }

    /// The protocol-level error, if the server answered with one.
    pub fn method_error(&self) -> Option<&MethodError> {
        match self {
            JmapError::Method(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MethodError> for JmapError {
    fn from(err: MethodError) -> Self {
        JmapError::Method(err)
    }
}
