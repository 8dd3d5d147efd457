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
use std::time::Duration;

use gcsign_core::utils::Redact;
use gcsign_core::Context;

use crate::constants::{VAULT_ADDR, VAULT_KEY, VAULT_TOKEN};

/// Config carries the inputs of credential discovery.
#[derive(Clone, Default)]
pub struct Config {
    /// Explicit token, used before any other source.
    pub token: Option<String>,
    /// Address of the Vault server, for example `https://vault.example.com:8200`.
    pub vault_address: Option<String>,
    /// Token presented to the Vault server.
    pub vault_token: Option<String>,
    /// Path of the secret holding the access token.
    pub vault_key: Option<String>,
    /// Skip every environment variable source.
    pub disable_env: bool,
    /// Timeout applied to the token endpoint and Vault calls.
    pub timeout: Option<Duration>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &Redact::from(&self.token))
            .field("vault_address", &self.vault_address)
            .field("vault_token", &Redact::from(&self.vault_token))
            .field("vault_key", &self.vault_key)
            .field("disable_env", &self.disable_env)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Create a new config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the explicit token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the Vault server address.
    pub fn with_vault_address(mut self, address: impl Into<String>) -> Self {
        self.vault_address = Some(address.into());
        self
    }

    /// Set the Vault token.
    pub fn with_vault_token(mut self, token: impl Into<String>) -> Self {
        self.vault_token = Some(token.into());
        self
    }

    /// Set the Vault secret path. Leading slashes are dropped.
    pub fn with_vault_key(mut self, key: impl Into<String>) -> Self {
        self.vault_key = Some(key.into().trim_start_matches('/').to_string());
        self
    }

    /// Disable reading from environment variables.
    pub fn with_disable_env(mut self) -> Self {
        self.disable_env = true;
        self
    }

    /// Bound outbound credential requests by a timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load the Vault settings from environment variables.
    pub fn from_env(ctx: &Context) -> Self {
        Self::default().merge_env(ctx)
    }

    /// Fill the Vault settings left unset from environment variables.
    pub(crate) fn merge_env(mut self, ctx: &Context) -> Self {
        if self.vault_address.is_none() {
            self.vault_address = ctx.env_var_non_empty(VAULT_ADDR);
        }
        if self.vault_token.is_none() {
            self.vault_token = ctx.env_var_non_empty(VAULT_TOKEN);
        }
        if self.vault_key.is_none() {
            self.vault_key = ctx
                .env_var_non_empty(VAULT_KEY)
                .map(|v| v.trim_start_matches('/').to_string());
        }
        self
    }
}
