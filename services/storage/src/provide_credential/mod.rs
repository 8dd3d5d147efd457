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

//! Credential sources, tried in priority order by [`DefaultCredentialProvider`].

mod default;
pub use default::{resolve_credentials, DefaultCredentialProvider};

mod env;
pub use env::{CredentialFileProvider, EnvAccessTokenProvider, EnvCredentialsProvider};

mod static_provider;
pub use static_provider::StaticCredentialProvider;

mod vault;
pub use vault::VaultCredentialProvider;

/// Normalize a raw token into an `Authorization` header value.
///
/// Surrounding whitespace is trimmed, `Bearer ` is prepended unless the value already
/// starts with `Bearer`, and one trailing period is dropped. Returns `None` for a blank
/// token.
pub(crate) fn sanitize_token(raw: &str) -> Option<String> {
    let token = raw.trim();
    if token.is_empty() {
        return None;
    }

    let mut token = if token.starts_with("Bearer") {
        token.to_string()
    } else {
        format!("Bearer {token}")
    };
    if token.ends_with('.') {
        token.pop();
    }
    Some(token)
}
