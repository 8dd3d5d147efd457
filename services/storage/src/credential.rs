// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{self, Debug};

use gcsign_core::utils::Redact;
use gcsign_core::{Context, Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::key::PrivateKey;
use crate::oauth2::TokenExchange;

/// Credentials authorize a storage request.
///
/// A bearer credential is sent verbatim in the `Authorization` header. A service
/// account credential signs every request and travels in the query string instead.
#[derive(Clone)]
pub enum Credentials {
    /// An already formed `Authorization` header value such as `Bearer ya29.xxx`.
    Bearer(String),
    /// A service account identity with its RSA private key.
    ServiceAccount {
        /// The service account email used as `GoogleAccessId`.
        access_id: String,
        /// The key signing the canonical string.
        private_key: PrivateKey,
    },
}

impl Credentials {
    /// Create a bearer credential from a full header value.
    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials::Bearer(token.into())
    }

    /// Create a service account credential from an access id and a PEM or DER key.
    pub fn service_account(access_id: impl Into<String>, private_key: &[u8]) -> Result<Self> {
        Ok(Credentials::ServiceAccount {
            access_id: access_id.into(),
            private_key: PrivateKey::parse(private_key)?,
        })
    }

    /// The bearer header value, if this is a bearer credential.
    pub fn bearer_token(&self) -> Option<&str> {
        match self {
            Credentials::Bearer(token) => Some(token),
            Credentials::ServiceAccount { .. } => None,
        }
    }

    /// The service account identity, if this is a service account credential.
    pub fn access_id(&self) -> Option<&str> {
        match self {
            Credentials::Bearer(_) => None,
            Credentials::ServiceAccount { access_id, .. } => Some(access_id),
        }
    }

    /// The signing key, if this is a service account credential.
    pub fn private_key(&self) -> Option<&PrivateKey> {
        match self {
            Credentials::Bearer(_) => None,
            Credentials::ServiceAccount { private_key, .. } => Some(private_key),
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Bearer(token) => f
                .debug_tuple("Bearer")
                .field(&Redact::from(token))
                .finish(),
            Credentials::ServiceAccount {
                access_id,
                private_key,
            } => f
                .debug_struct("ServiceAccount")
                .field("access_id", access_id)
                .field("private_key", private_key)
                .finish(),
        }
    }
}

/// ClientIdentity is the part of an OAuth client JSON needed to refresh a token.
#[derive(Clone, Serialize)]
pub struct ClientIdentity {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Long lived refresh token.
    pub refresh_token: String,
}

impl Debug for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("client_id", &self.client_id)
            .field("client_secret", &Redact::from(&self.client_secret))
            .field("refresh_token", &Redact::from(&self.refresh_token))
            .finish()
    }
}

/// AccessToken is the response of the OAuth2 token endpoint.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccessToken {
    /// The short lived token.
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
    /// Granted scopes.
    pub scope: String,
    /// Token scheme, normally `Bearer`.
    pub token_type: String,
    /// OpenID token, when requested.
    pub id_token: String,
}

impl AccessToken {
    /// Format the token as an `Authorization` header value.
    ///
    /// The endpoint always reports a type in practice; `Bearer` is assumed when it doesn't.
    pub fn bearer_token(&self) -> String {
        let token_type = match self.token_type.trim() {
            "" => "Bearer",
            v => v,
        };
        format!("{token_type} {}", self.access_token)
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &Redact::from(&self.access_token))
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("token_type", &self.token_type)
            .field("id_token", &Redact::from(&self.id_token))
            .finish()
    }
}

/// Fields shared by service account and authorized user JSON files.
#[derive(Default, Deserialize)]
#[serde(default)]
struct CredentialsFile {
    client_id: Option<String>,
    client_secret: Option<String>,
    refresh_token: Option<String>,
    client_email: Option<String>,
    private_key: Option<String>,
}

/// Parse a service account or authorized user JSON document into credentials.
///
/// A document with a non-empty `refresh_token` is exchanged for an access token
/// through `exchange`. Every other document is treated as a service account.
pub async fn parse_credentials_json(
    ctx: &Context,
    raw: &[u8],
    exchange: &TokenExchange,
) -> Result<Credentials> {
    let file: CredentialsFile =
        serde_json::from_slice(raw).map_err(|e| Error::malformed_json().with_source(e))?;

    match file.refresh_token.filter(|v| !v.is_empty()) {
        Some(refresh_token) => {
            debug!("credentials json carries a refresh token, exchanging it");
            let identity = ClientIdentity {
                client_id: file.client_id.unwrap_or_default(),
                client_secret: file.client_secret.unwrap_or_default(),
                refresh_token,
            };
            let token = exchange.exchange(ctx, &identity).await?;
            Ok(Credentials::bearer(token.bearer_token()))
        }
        None => {
            debug!("credentials json is a service account");
            Credentials::service_account(
                file.client_email.unwrap_or_default(),
                file.private_key.unwrap_or_default().as_bytes(),
            )
        }
    }
}
