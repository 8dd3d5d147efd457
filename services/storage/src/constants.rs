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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use std::time::Duration;

// Env values used by the credential discovery chain.
pub const GOOGLE_OAUTH_ACCESS_TOKEN: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";
pub const GOOGLE_CREDENTIALS: &str = "GOOGLE_CREDENTIALS";
pub const GOOGLE_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const VAULT_ADDR: &str = "VAULT_ADDR";
pub const VAULT_TOKEN: &str = "VAULT_TOKEN";
pub const VAULT_KEY: &str = "VAULT_KEY";

// OAuth2 token endpoint used for refresh token exchange.
pub const TOKEN_URL: &str = "https://www.googleapis.com/oauth2/v4/token";

// Storage endpoint used unless the caller overrides it.
pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_HOST: &str = "storage.googleapis.com";
pub const DEFAULT_EXPIRATION: Duration = Duration::from_secs(30);

// Headers and query parameters understood by the storage service.
pub const X_GOOG_ENCRYPTION_ALGORITHM: &str = "x-goog-encryption-algorithm";
pub const X_GOOG_IF_GENERATION_MATCH: &str = "x-goog-if-generation-match";
pub const X_VAULT_TOKEN: &str = "X-Vault-Token";
pub const QUERY_ACCESS_ID: &str = "GoogleAccessId";
pub const QUERY_EXPIRES: &str = "Expires";
pub const QUERY_SIGNATURE: &str = "Signature";

/// AsciiSet for [Google UriEncode](https://cloud.google.com/storage/docs/authentication/canonical-requests)
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', '~' and '/'.
pub static GOOG_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
