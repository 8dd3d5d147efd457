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

use async_trait::async_trait;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method, StatusCode, Uri};
use log::{debug, warn};
use serde::Deserialize;

use gcsign_core::{Context, Error, ProvideCredential, RequestTimeout, Result};

use crate::config::Config;
use crate::constants::X_VAULT_TOKEN;
use crate::credential::Credentials;

#[derive(Default, Deserialize)]
#[serde(default)]
struct VaultResponse {
    data: VaultData,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct VaultData {
    token: Option<String>,
}

/// VaultCredentialProvider fetches an access token stored in a Vault secret.
///
/// The source is only triggered when address, token and key are all set. Values
/// missing from the config are read from `VAULT_ADDR`, `VAULT_TOKEN` and `VAULT_KEY`
/// unless environment access is disabled.
#[derive(Debug, Clone)]
pub struct VaultCredentialProvider {
    config: Config,
}

impl VaultCredentialProvider {
    /// Create a new VaultCredentialProvider.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    async fn fetch(&self, ctx: &Context, address: &str, token: &str, key: &str) -> Result<Credentials> {
        let uri: Uri = address.parse().map_err(|e| {
            Error::config_invalid(format!("unable to parse Vault address [{address}]")).with_source(e)
        })?;
        let (Some(scheme), Some(authority)) = (uri.scheme_str(), uri.authority()) else {
            return Err(Error::config_invalid(format!(
                "Vault address [{address}] must contain a scheme and a host"
            )));
        };

        let mut token = HeaderValue::from_str(token)
            .map_err(|e| Error::config_invalid("invalid Vault token").with_source(e))?;
        token.set_sensitive(true);

        let mut req = http::Request::builder()
            .method(Method::GET)
            .uri(format!(
                "{scheme}://{authority}/v1/{}",
                key.trim_start_matches('/')
            ))
            .header(X_VAULT_TOKEN, token)
            .body(Bytes::new())?;
        if let Some(timeout) = self.config.timeout {
            req.extensions_mut().insert(RequestTimeout(timeout));
        }

        debug!("fetching access token from Vault at {}", req.uri());
        let resp = ctx.http_send(req).await.map_err(|e| {
            Error::unexpected("unable to connect to the configured Vault server").with_source(e)
        })?;

        match resp.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!("Vault server rejected the token with {}", resp.status());
                return Err(Error::credential_denied(
                    "the Vault token does not have permission to read the secret",
                ));
            }
            status => {
                warn!("Vault server responded with {status}");
                return Err(Error::unexpected(format!(
                    "unexpected status from the Vault server [{}]",
                    status.as_u16()
                )));
            }
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !content_type.eq_ignore_ascii_case("application/json") {
            return Err(Error::unexpected(format!(
                "unknown Content-Type [{content_type}] returned from the Vault server"
            )));
        }

        if resp.body().is_empty() {
            return Err(Error::unexpected(
                "zero-length response returned from the Vault server",
            ));
        }

        let parsed: VaultResponse = serde_json::from_slice(resp.body()).map_err(|e| {
            Error::unexpected("unable to parse response body from the Vault server").with_source(e)
        })?;

        let token = parsed
            .data
            .token
            .as_deref()
            .map(|v| v.trim_matches(|c| c == '.' || c == ' '))
            .unwrap_or_default();
        if token.is_empty() {
            return Err(Error::unexpected(
                "no access token was returned from the Vault server",
            ));
        }

        Ok(Credentials::bearer(format!("Bearer {token}")))
    }
}

#[async_trait]
impl ProvideCredential for VaultCredentialProvider {
    type Credential = Credentials;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = if self.config.disable_env {
            self.config.clone()
        } else {
            self.config.clone().merge_env(ctx)
        };

        let non_empty = |v: &Option<String>| v.clone().filter(|v| !v.is_empty());
        let (Some(address), Some(token), Some(key)) = (
            non_empty(&config.vault_address),
            non_empty(&config.vault_token),
            non_empty(&config.vault_key),
        ) else {
            debug!("Vault is not fully configured, skipping");
            return Ok(None);
        };

        self.fetch(ctx, &address, &token, &key).await.map(Some)
    }
}
