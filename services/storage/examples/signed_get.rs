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

//! Resolve credentials from the environment and print a signed or authorized GET request.
//!
//! ```shell
//! GOOGLE_APPLICATION_CREDENTIALS=sa.json cargo run --example signed_get -- bucket path/to/file.txt
//! ```

use std::env;
use std::time::Duration;

use gcsign_core::{Context, OsEnv, Result};
use gcsign_file_read_tokio::TokioFileRead;
use gcsign_http_send_reqwest::ReqwestHttpSend;
use gcsign_storage::{build_request, Config, DefaultCredentialProvider, RequestOptions};
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let bucket = args.next().unwrap_or_else(|| "bucket".to_string());
    let resource = args.next().unwrap_or_else(|| "file.txt".to_string());

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);

    let provider = DefaultCredentialProvider::new(
        Config::from_env(&ctx).with_timeout(Duration::from_secs(10)),
    );
    let credentials = provider.resolve(&ctx).await?;
    info!("resolved credentials: {credentials:?}");

    let req = build_request(
        "GET",
        RequestOptions::new()
            .with_bucket(bucket)
            .with_resource(resource)
            .with_credentials(credentials)
            .with_expiration(gcsign_core::time::add_duration(
                gcsign_core::time::now(),
                Duration::from_secs(15 * 60),
            )),
    )?;

    println!("{} {}", req.method(), req.uri());
    for (name, value) in req.headers() {
        if value.is_sensitive() {
            println!("{name}: <redacted>");
        } else {
            println!("{name}: {}", value.to_str().unwrap_or_default());
        }
    }
    Ok(())
}
