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

use async_trait::async_trait;
use log::debug;

use gcsign_core::utils::Redact;
use gcsign_core::{Context, ProvideCredential, Result};

use super::sanitize_token;
use crate::credential::Credentials;

/// StaticCredentialProvider turns an explicitly configured token into a bearer credential.
///
/// A blank token leaves the decision to the next source.
#[derive(Clone)]
pub struct StaticCredentialProvider {
    token: String,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider from a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Debug for StaticCredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentialProvider")
            .field("token", &Redact::from(&self.token))
            .finish()
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credentials;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        let Some(token) = sanitize_token(&self.token) else {
            return Ok(None);
        };

        debug!("using explicitly configured token");
        Ok(Some(Credentials::bearer(token)))
    }
}
