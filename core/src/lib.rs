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

//! Core components for building Google Cloud Storage requests.
//!
//! This crate provides the foundational types and traits shared by the gcsign crates.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending and
//!   environment access. Nothing in gcsign touches the process environment, the filesystem
//!   or the network directly; everything goes through a [`Context`].
//! - **ProvideCredential**: The trait implemented by every credential source.
//! - **ProvideCredentialChain**: An ordered list of credential sources where the first
//!   triggered source decides the outcome.
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use gcsign_core::{Context, ProvideCredential, Result, StaticEnv};
//! use std::collections::HashMap;
//!
//! #[derive(Debug)]
//! struct TokenFromEnv;
//!
//! #[async_trait]
//! impl ProvideCredential for TokenFromEnv {
//!     type Credential = String;
//!
//!     async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(ctx.env_var("MY_TOKEN"))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_env(StaticEnv {
//!     envs: HashMap::from([("MY_TOKEN".to_string(), "secret".to_string())]),
//! });
//!
//! let token = TokenFromEnv.provide_credential(&ctx).await?;
//! assert_eq!(token.as_deref(), Some("secret"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Base64 helpers
//! - [`time`]: Time helpers
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{
    Context, Env, FileRead, HttpSend, NoopEnv, NoopFileRead, NoopHttpSend, OsEnv,
    RequestTimeout, StaticEnv,
};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::ProvideCredential;
mod chain;
pub use chain::ProvideCredentialChain;
