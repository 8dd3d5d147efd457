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
use log::debug;

use gcsign_core::hash::base64_decode;
use gcsign_core::{Context, Error, ProvideCredential, Result};

use super::sanitize_token;
use crate::constants::{GOOGLE_APPLICATION_CREDENTIALS, GOOGLE_CREDENTIALS, GOOGLE_OAUTH_ACCESS_TOKEN};
use crate::credential::{parse_credentials_json, Credentials};
use crate::oauth2::TokenExchange;

/// EnvAccessTokenProvider reads a raw access token from `GOOGLE_OAUTH_ACCESS_TOKEN`.
#[derive(Debug, Clone, Default)]
pub struct EnvAccessTokenProvider;

impl EnvAccessTokenProvider {
    /// Create a new EnvAccessTokenProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvAccessTokenProvider {
    type Credential = Credentials;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(token) = ctx
            .env_var_non_empty(GOOGLE_OAUTH_ACCESS_TOKEN)
            .and_then(|v| sanitize_token(&v))
        else {
            return Ok(None);
        };

        debug!("loaded access token from {GOOGLE_OAUTH_ACCESS_TOKEN}");
        Ok(Some(Credentials::bearer(token)))
    }
}

/// EnvCredentialsProvider reads base64 encoded credentials JSON from `GOOGLE_CREDENTIALS`.
///
/// Once the variable is set, any decode or parse failure is returned as-is.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentialsProvider {
    exchange: TokenExchange,
}

impl EnvCredentialsProvider {
    /// Create a new EnvCredentialsProvider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given token exchange for authorized user credentials.
    pub fn with_token_exchange(mut self, exchange: TokenExchange) -> Self {
        self.exchange = exchange;
        self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialsProvider {
    type Credential = Credentials;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(content) = ctx.env_var_non_empty(GOOGLE_CREDENTIALS) else {
            return Ok(None);
        };

        let raw = base64_decode(content.trim()).map_err(|e| {
            Error::config_invalid(format!(
                "unable to base64 decode value from environment variable [{GOOGLE_CREDENTIALS}]"
            ))
            .with_source(e)
        })?;

        debug!("loaded credentials json from {GOOGLE_CREDENTIALS}");
        parse_credentials_json(ctx, &raw, &self.exchange)
            .await
            .map(Some)
    }
}

/// CredentialFileProvider reads credentials JSON from the file named by
/// `GOOGLE_APPLICATION_CREDENTIALS`.
#[derive(Debug, Clone, Default)]
pub struct CredentialFileProvider {
    exchange: TokenExchange,
}

impl CredentialFileProvider {
    /// Create a new CredentialFileProvider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given token exchange for authorized user credentials.
    pub fn with_token_exchange(mut self, exchange: TokenExchange) -> Self {
        self.exchange = exchange;
        self
    }
}

#[async_trait]
impl ProvideCredential for CredentialFileProvider {
    type Credential = Credentials;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(path) = ctx.env_var_non_empty(GOOGLE_APPLICATION_CREDENTIALS) else {
            return Ok(None);
        };

        let raw = ctx.file_read(&path).await.map_err(|e| {
            Error::config_invalid(format!(
                "unable to read file specified in [{GOOGLE_APPLICATION_CREDENTIALS}]"
            ))
            .with_source(e)
        })?;

        debug!("loaded credentials json from file {path}");
        parse_credentials_json(ctx, &raw, &self.exchange)
            .await
            .map(Some)
    }
}
