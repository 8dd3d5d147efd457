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

use std::time::Duration;

use bytes::Bytes;
use gcsign_core::{Context, Error, RequestTimeout, Result};
use http::header::CONTENT_TYPE;
use http::{Method, StatusCode};
use log::{debug, error};
use serde::Serialize;

use crate::constants::TOKEN_URL;
use crate::credential::{AccessToken, ClientIdentity};

#[derive(Serialize)]
struct RefreshTokenRequest<'a> {
    #[serde(flatten)]
    identity: &'a ClientIdentity,
    grant_type: &'static str,
}

/// TokenExchange trades a refresh token for a short lived access token.
#[derive(Debug, Clone, Default)]
pub struct TokenExchange {
    timeout: Option<Duration>,
}

impl TokenExchange {
    /// Create a new TokenExchange without a timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the token request by the given timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exchange the identity for an access token.
    pub async fn exchange(&self, ctx: &Context, identity: &ClientIdentity) -> Result<AccessToken> {
        let body = serde_json::to_vec(&RefreshTokenRequest {
            identity,
            grant_type: "refresh_token",
        })
        .map_err(|e| Error::unexpected("failed to serialize token request").with_source(e))?;

        let mut req = http::Request::builder()
            .method(Method::POST)
            .uri(TOKEN_URL)
            .header(CONTENT_TYPE, "application/json")
            .body(Bytes::from(body))?;
        if let Some(timeout) = self.timeout {
            req.extensions_mut().insert(RequestTimeout(timeout));
        }

        debug!("requesting access token for client {}", identity.client_id);
        let resp = ctx.http_send(req).await?;

        if resp.status() != StatusCode::OK {
            error!("token endpoint responded with status {}", resp.status());
            return Err(Error::token_request_failed(format!(
                "unable to resolve access token, token endpoint responded with {}",
                resp.status()
            )));
        }

        serde_json::from_slice(resp.body())
            .map_err(|e| Error::unexpected("failed to parse token response").with_source(e))
    }
}
