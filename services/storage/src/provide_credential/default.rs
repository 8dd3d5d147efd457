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

use gcsign_core::{Context, Error, ProvideCredential, ProvideCredentialChain, Result};

use super::{
    CredentialFileProvider, EnvAccessTokenProvider, EnvCredentialsProvider,
    StaticCredentialProvider, VaultCredentialProvider,
};
use crate::config::Config;
use crate::credential::Credentials;
use crate::oauth2::TokenExchange;

/// DefaultCredentialProvider tries every credential source in priority order.
///
/// 1. The explicit token from [`Config::token`].
/// 2. `GOOGLE_OAUTH_ACCESS_TOKEN`.
/// 3. `GOOGLE_CREDENTIALS`, base64 encoded credentials JSON.
/// 4. `GOOGLE_APPLICATION_CREDENTIALS`, path to a credentials JSON file.
/// 5. Vault, when address, token and key are all configured.
///
/// Sources 2 to 4 are skipped when environment access is disabled.
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credentials>,
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider.
    pub fn new(config: Config) -> Self {
        let exchange = TokenExchange::new().with_timeout(config.timeout);
        let mut chain = ProvideCredentialChain::new();

        if let Some(token) = &config.token {
            chain = chain.push(StaticCredentialProvider::new(token));
        }

        if !config.disable_env {
            chain = chain
                .push(EnvAccessTokenProvider::new())
                .push(EnvCredentialsProvider::new().with_token_exchange(exchange.clone()))
                .push(CredentialFileProvider::new().with_token_exchange(exchange));
        }

        chain = chain.push(VaultCredentialProvider::new(config));

        Self { chain }
    }

    /// Resolve credentials, failing when no source is configured.
    pub async fn resolve(&self, ctx: &Context) -> Result<Credentials> {
        match self.chain.provide_credential(ctx).await? {
            Some(cred) => Ok(cred),
            None => {
                debug!("no credential source was configured");
                Err(Error::credential_not_found())
            }
        }
    }
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credentials;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

/// Resolve credentials for an explicit token, falling back to the environment and Vault.
pub async fn resolve_credentials(ctx: &Context, explicit: &str) -> Result<Credentials> {
    DefaultCredentialProvider::new(Config::new().with_token(explicit))
        .resolve(ctx)
        .await
}
