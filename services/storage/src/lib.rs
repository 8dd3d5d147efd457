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

//! Google Cloud Storage request builder.
//!
//! Resolves credentials from an explicit token, the environment or Vault, then builds
//! GET, PUT and HEAD requests that are either bearer authorized or query signed. The
//! built request is returned to the caller, who sends it.
//!
//! ```no_run
//! use gcsign_core::{Context, OsEnv, Result};
//! use gcsign_storage::{build_request, resolve_credentials, RequestOptions};
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let credentials = resolve_credentials(&ctx, "").await?;
//!
//! let req = build_request(
//!     "GET",
//!     RequestOptions::new()
//!         .with_bucket("bucket")
//!         .with_resource("file.txt")
//!         .with_credentials(credentials),
//! )?;
//! println!("{}", req.uri());
//! # Ok(())
//! # }
//! ```

mod constants;

mod config;
pub use config::Config;

mod key;
pub use key::PrivateKey;

mod credential;
pub use credential::{parse_credentials_json, AccessToken, ClientIdentity, Credentials};

mod oauth2;
pub use oauth2::TokenExchange;

mod provide_credential;
pub use provide_credential::{
    resolve_credentials, CredentialFileProvider, DefaultCredentialProvider,
    EnvAccessTokenProvider, EnvCredentialsProvider, StaticCredentialProvider,
    VaultCredentialProvider,
};

mod options;
pub use options::{Body, Encryption, RequestOption, RequestOptions};

mod build_request;
pub use build_request::build_request;
