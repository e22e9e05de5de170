// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! JMAP client: session discovery plus the single dispatch path every typed
//! method goes through.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info, warn};
use serde_json::Value;
use url::Url;

use crate::capabilities::resolve_using;
use crate::config::Settings;
use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::error::{JmapError, JmapResult};
use crate::methods::*;
use crate::session::{Session, SessionState};
use crate::transport::Transport;

pub const ACCEPT_HEADER: &str = "application/json;jmapVersion=rfc-8621";

/// Collects construction options for a [`Client`].
pub struct ClientBuilder {
    session_url: String,
    access_token: String,
    transport: Arc<dyn Transport>,
    overridden_api_url: Option<String>,
    http_headers: HashMap<String, String>,
    default_account_id: Option<String>,
}

impl ClientBuilder {
    pub fn new(
        session_url: impl Into<String>,
        access_token: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            session_url: session_url.into(),
            access_token: access_token.into(),
            transport,
            overridden_api_url: None,
            http_headers: HashMap::new(),
            default_account_id: None,
        }
    }

    /// Send method calls here instead of the session's `apiUrl`.
    pub fn overridden_api_url(mut self, url: impl Into<String>) -> Self {
        self.overridden_api_url = Some(url.into());
        self
    }

    /// Extra headers for every request. They win over the defaults.
    pub fn http_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.http_headers.extend(headers);
        self
    }

    pub fn http_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.http_headers.insert(name.into(), value.into());
        self
    }

    /// Account used when arguments leave `accountId` unset. Without it the
    /// first account of the session is used.
    pub fn default_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.default_account_id = Some(account_id.into());
        self
    }

    pub fn build(self) -> JmapResult<Client> {
        validate_url(&self.session_url)?;
        if let Some(url) = &self.overridden_api_url {
            validate_url(url)?;
        }

        let mut headers = HashMap::new();
        headers.insert("Accept".to_string(), ACCEPT_HEADER.to_string());
        headers.insert("Authorization".to_string(), format!("Bearer {}", self.access_token));
        for (name, value) in self.http_headers {
            // Header names are case-insensitive; drop the default it replaces.
            headers.retain(|existing: &String, _| !existing.eq_ignore_ascii_case(&name));
            headers.insert(name, value);
        }

        Ok(Client {
            transport: self.transport,
            http_headers: headers,
            session_url: self.session_url,
            overridden_api_url: self.overridden_api_url,
            default_account_id: self.default_account_id,
            state: RwLock::new(SessionState::Uninitialized),
        })
    }
}

fn validate_url(url: &str) -> JmapResult<()> {
    Url::parse(url).map(|_| ()).map_err(|e| JmapError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Typed JMAP client.
///
/// Starts uninitialized; [`Client::fetch_session`] must succeed before
/// anything that needs the session (account ids, the session `apiUrl`).
pub struct Client {
    transport: Arc<dyn Transport>,
    http_headers: HashMap<String, String>,
    session_url: String,
    overridden_api_url: Option<String>,
    default_account_id: Option<String>,
    state: RwLock<SessionState>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("session_url", &self.session_url)
            .field("overridden_api_url", &self.overridden_api_url)
            .field("default_account_id", &self.default_account_id)
            .field("ready", &self.snapshot().is_ready())
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn builder(
        session_url: impl Into<String>,
        access_token: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> ClientBuilder {
        ClientBuilder::new(session_url, access_token, transport)
    }

    pub fn from_settings(settings: &Settings, transport: Arc<dyn Transport>) -> JmapResult<Self> {
        let mut builder = ClientBuilder::new(&settings.session_url, &settings.access_token, transport)
            .http_headers(settings.http_headers.clone());
        if let Some(url) = &settings.overridden_api_url {
            builder = builder.overridden_api_url(url);
        }
        if let Some(account_id) = &settings.default_account_id {
            builder = builder.default_account_id(account_id);
        }
        builder.build()
    }

    pub fn http_headers(&self) -> &HashMap<String, String> {
        &self.http_headers
    }

    fn snapshot(&self) -> SessionState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    // --- Session ---

    /// Download the session document and make it current.
    ///
    /// Calling it again replaces the stored session wholesale.
    pub async fn fetch_session(&self) -> JmapResult<()> {
        info!("Fetching JMAP session from {}", self.session_url);
        let body = self.transport.get(&self.session_url, &self.http_headers).await?;
        let session: Session = serde_json::from_value(body).map_err(|e| JmapError::decode("session", e))?;
        debug!(
            "Session fetched: {} account(s), {} capability(ies), apiUrl {}",
            session.accounts.len(),
            session.capabilities.len(),
            session.api_url
        );

        *self.state.write().unwrap_or_else(PoisonError::into_inner) = SessionState::Ready(Arc::new(session));
        Ok(())
    }

    pub fn get_session(&self) -> JmapResult<Arc<Session>> {
        self.snapshot().session()
    }

    pub fn get_account_ids(&self) -> JmapResult<Vec<String>> {
        Ok(self.get_session()?.account_ids())
    }

    pub fn get_first_account_id(&self) -> JmapResult<String> {
        first_account_id(&self.snapshot())
    }

    // --- Dispatch ---

    /// Run one method call and unwrap its response.
    ///
    /// Every named method below is a thin wrapper over this.
    pub async fn request<M: Method>(&self, args: M::Arguments) -> JmapResult<M::Response> {
        let state = self.snapshot();

        let api_url = match &self.overridden_api_url {
            Some(url) => url.clone(),
            None => state.session()?.api_url.clone(),
        };
        let using = resolve_using(&state);
        let args = with_default_account_id(args, || match &self.default_account_id {
            Some(account_id) => Ok(account_id.clone()),
            None => first_account_id(&state),
        })?;

        let arguments = serde_json::to_value(&args).map_err(|e| JmapError::encode(M::NAME, e))?;
        let envelope = RequestEnvelope::single(using, M::NAME, arguments);
        let body = serde_json::to_value(&envelope).map_err(|e| JmapError::encode("request envelope", e))?;

        debug!("Dispatching {} to {}", M::NAME, api_url);
        let raw = self.transport.post(&api_url, &body, &self.http_headers).await?;
        let response: ResponseEnvelope =
            serde_json::from_value(raw).map_err(|e| JmapError::decode("response envelope", e))?;

        if let SessionState::Ready(session) = &state {
            if let Some(known) = &session.state {
                if !response.session_state.is_empty() && *known != response.session_state {
                    info!("Server session state moved from {} to {}", known, response.session_state);
                }
            }
        }

        if let Some(created_ids) = &response.created_ids {
            debug!("{} created {} object(s)", M::NAME, created_ids.len());
        }

        let payload = response.into_first_payload().map_err(|e| {
            if let Some(method_error) = e.method_error() {
                warn!("{} failed: {}", M::NAME, method_error);
            }
            e
        })?;

        decode_payload::<M>(payload)
    }

    // --- Mailbox ---

    pub async fn mailbox_get(&self, args: GetArguments) -> JmapResult<GetResponse<Mailbox>> {
        self.request::<MailboxGet>(args).await
    }

    pub async fn mailbox_changes(&self, args: ChangesArguments) -> JmapResult<ChangesResponse> {
        self.request::<MailboxChanges>(args).await
    }

    pub async fn mailbox_query(&self, args: MailboxQueryArguments) -> JmapResult<QueryResponse> {
        self.request::<MailboxQuery>(args).await
    }

    pub async fn mailbox_set(&self, args: MailboxSetArguments) -> JmapResult<SetResponse<Mailbox>> {
        self.request::<MailboxSet>(args).await
    }

    // --- Email ---

    pub async fn email_get(&self, args: EmailGetArguments) -> JmapResult<GetResponse<Email>> {
        self.request::<EmailGet>(args).await
    }

    pub async fn email_changes(&self, args: ChangesArguments) -> JmapResult<ChangesResponse> {
        self.request::<EmailChanges>(args).await
    }

    pub async fn email_query(&self, args: EmailQueryArguments) -> JmapResult<QueryResponse> {
        self.request::<EmailQuery>(args).await
    }

    pub async fn email_set(&self, args: SetArguments<Email>) -> JmapResult<SetResponse<Email>> {
        self.request::<EmailSet>(args).await
    }

    // --- EmailSubmission ---

    pub async fn email_submission_get(&self, args: GetArguments) -> JmapResult<GetResponse<EmailSubmission>> {
        self.request::<EmailSubmissionGet>(args).await
    }

    pub async fn email_submission_changes(&self, args: ChangesArguments) -> JmapResult<ChangesResponse> {
        self.request::<EmailSubmissionChanges>(args).await
    }

    pub async fn email_submission_set(
        &self,
        args: EmailSubmissionSetArguments,
    ) -> JmapResult<SetResponse<EmailSubmission>> {
        self.request::<EmailSubmissionSet>(args).await
    }

    // --- Identity ---

    pub async fn identity_get(&self, args: GetArguments) -> JmapResult<GetResponse<Identity>> {
        self.request::<IdentityGet>(args).await
    }
}

fn first_account_id(state: &SessionState) -> JmapResult<String> {
    state
        .session()?
        .first_account_id()
        .map(str::to_string)
        .ok_or(JmapError::NoAccountAvailable)
}

fn decode_payload<M: Method>(payload: Value) -> JmapResult<M::Response> {
    serde_json::from_value(payload).map_err(|e| JmapError::decode(M::NAME, e))
}
