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

use std::collections::HashMap;

use gcsign_core::time::from_epoch;
use gcsign_core::{Context, Result};
use gcsign_storage::{
    build_request, parse_credentials_json, Credentials, Encryption, RequestOptions, TokenExchange,
};
use http::header::AUTHORIZATION;
use pretty_assertions::assert_eq;

use crate::{init_logger, SERVICE_ACCOUNT_EMAIL, SERVICE_ACCOUNT_JSON};

const EPOCH: i64 = 1554410829;
const MD5: [u8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2, 3, 4, 5];

async fn service_account() -> Credentials {
    init_logger();
    parse_credentials_json(
        &Context::new(),
        SERVICE_ACCOUNT_JSON.as_bytes(),
        &TokenExchange::new(),
    )
    .await
    .expect("service account must parse")
}

fn query(req: &http::Request<gcsign_storage::Body>) -> HashMap<String, String> {
    form_urlencoded::parse(req.uri().query().unwrap_or_default().as_bytes())
        .into_owned()
        .collect()
}

#[tokio::test]
async fn test_get_signature() -> Result<()> {
    let req = build_request(
        "GET",
        RequestOptions::new()
            .with_bucket("bucket")
            .with_resource("file.txt")
            .with_credentials(service_account().await)
            .with_expiration(from_epoch(EPOCH)),
    )?;

    let q = query(&req);
    assert_eq!(q["Signature"], "PzVwB1N71A/p6wL7gP/Oh/nZdnsuoXQCszqFr/Q3jo6B5+ozZpuPIcuCW80+wtwUSBnKQJM4lcTVx6DtYrj2F3B/norqJPVdOHSCcG6bvGZ6oUjB2FQNzpQ1DyjY/mN0V8ziXe+FYPZzz6X0ewHJKaTHZb63BNQO92aMj/NMFYlN9FjdfdlE1G2La4oiT+Cjok47ncWw5UwhBXvJBEm8vgTtK2OU4AyqK+2vnOR/5PMBwTtU+82CmrnckOPeNZDyURiJvJenybIxrqOLzaaAsXvphQyz11XWt4Z8b+nqscQezuS6CcqKJiLDFvRcX0wXbzTxeOl00QWX3XGLaMUoGg==");
    assert_eq!(q["GoogleAccessId"], SERVICE_ACCOUNT_EMAIL);
    assert_eq!(q["Expires"], "1554410829");
    assert!(req.headers().get(AUTHORIZATION).is_none());

    let raw_query = req.uri().query().unwrap_or_default();
    assert!(raw_query.starts_with(
        "Expires=1554410829&GoogleAccessId=sample-key%40project-id-here.iam.gserviceaccount.com&Signature="
    ));
    Ok(())
}

#[tokio::test]
async fn test_put_signature() -> Result<()> {
    let req = build_request(
        "PUT",
        RequestOptions::new()
            .with_bucket("bucket")
            .with_resource("file.txt")
            .with_credentials(service_account().await)
            .with_expiration(from_epoch(EPOCH))
            .with_content_md5(MD5)
            .with_content_string("content")
            .with_content_type("content-type")
            .with_generation("12345678"),
    )?;

    assert_eq!(query(&req)["Signature"], "VHcBMifvvm1Vg1rbaoXbOs3a2IbMBBx/LInfjRD/lxgA4njeFS7K1CIYHcTlVZNrJFB0vWo8/424wTcgh0WvMRHCsJgN0jm48jjRsASazKriGzO3Y86COcdbpG8Ifs0565ahC0cHY7+/U6TT7W4N11XNYEh6WU+MlMDrFAaPCCUOeHaUwcz6NAUDF5cZQdXAOYQrtFhi2ODGzZ9Y/rlUNiEdXWdIx46+gIWNkYXP6JsIRDHnZGAcZPUhzF6r6YyPMto/MhwKCjx4kxR/jSp2hDa8TAfVULXBTAlqxbWbTpDvht8XcZPx6/T/TnYcZHhKyIQIWCvQzIrrJLCX8rmVpA==");
    Ok(())
}

#[tokio::test]
async fn test_put_signature_with_encryption() -> Result<()> {
    let req = build_request(
        "PUT",
        RequestOptions::new()
            .with_bucket("bucket")
            .with_resource("file.txt")
            .with_credentials(service_account().await)
            .with_expiration(from_epoch(EPOCH))
            .with_content_md5(MD5)
            .with_content_string("content")
            .with_content_type("content-type")
            .with_generation("12345678")
            .with_encryption(Encryption::Aes256),
    )?;

    assert_eq!(query(&req)["Signature"], "kiB3dtLcjNtiKsAS6dKhQ88ku7NQ4iBxA0A6wsKYQeIoGmrxTskT+G2AuQplR3izS/ujGS/Y7Y98QZEfMmdYA0oqxJGECs+y1PWCUK245ctBjIrvz/o1Aw58705uLImhXiLRF0WAfwBJEiDp8pz0/aiDQVy7kSs4rwkvnhGkiHixlS1ZFbSOwMYcdU/6Xsxd9AX0BCSskgRzgtbtG5298GYH2Adlvw7pcsT7nELhgWvaDxzZUoOxKPbp2+7iMOJ/ta+ceumn7G3/Ld+OtbSmu/pYCnE+GWOxjQd557ol05Fter1Sk9jW0pTNtL7wsEtyMH4TYWglDjTYzbtRXDTVbA==");
    assert_eq!(req.headers()["x-goog-encryption-algorithm"], "AES256");
    Ok(())
}

#[tokio::test]
async fn test_head_signature_with_nested_resource() -> Result<()> {
    let req = build_request(
        "HEAD",
        RequestOptions::new()
            .with_bucket("bucket")
            .with_resource("/directory/file.txt")
            .with_credentials(service_account().await)
            .with_expiration(from_epoch(EPOCH)),
    )?;

    assert_eq!(req.uri().path(), "/bucket/directory/file.txt");
    assert_eq!(query(&req)["Signature"], "hoxTmDm8D04Yw/l4BuIFijqFQlbswLLlwIAdhWMYQTInszWstp1zjLZqE3wJnOvk9A7VwsZcsffmiaX5KkXbFzA5+1WE5/e4b7JfkdTOOrRWmaUkCxIWspOJUZT/CbKb8BVx/u3gpBrbAJtlxNrIs8vm5bGwC+kb2hYpw5lMLbqnQelpbF0mBPKJk97ouIfOXhJhAwIiLqHkk9eXapng7JDAWUwSFNjoyTwv1PbNUcy65JJeZAQUsQ7JiDDf8+aMfNKxothFvbYRP7iuQs9z7iAdd/j4+JN8id5SgfvQpEp0/4Lh6i69ojvTMvisYAF4RRMFSDUwq3oas5y1ZdvgNg==");
    Ok(())
}

#[tokio::test]
async fn test_signature_is_reproducible() -> Result<()> {
    let cred = service_account().await;
    let build = || {
        build_request(
            "GET",
            RequestOptions::new()
                .with_bucket("bucket")
                .with_resource("file.txt")
                .with_credentials(cred.clone())
                .with_expiration(from_epoch(EPOCH)),
        )
    };

    assert_eq!(build()?.uri(), build()?.uri());
    Ok(())
}

#[tokio::test]
async fn test_default_expiration() -> Result<()> {
    let before = gcsign_core::time::now().timestamp();
    let req = build_request(
        "GET",
        RequestOptions::new()
            .with_bucket("bucket")
            .with_resource("file.txt")
            .with_credentials(service_account().await),
    )?;
    let after = gcsign_core::time::now().timestamp();

    let expires: i64 = query(&req)["Expires"].parse().unwrap();
    assert!(expires >= before + 30 && expires <= after + 30);
    Ok(())
}

#[test]
fn test_bearer_token_is_header_only() -> Result<()> {
    let req = build_request(
        "GET",
        RequestOptions::new()
            .with_bucket("bucket")
            .with_resource("file.txt")
            .with_bearer_token("Bearer ya29.token"),
    )?;

    assert_eq!(req.headers()[AUTHORIZATION], "Bearer ya29.token");
    assert!(req.headers()[AUTHORIZATION].is_sensitive());
    assert_eq!(req.uri().query(), None);
    assert_eq!(req.uri().to_string(), "https://storage.googleapis.com/bucket/file.txt");
    Ok(())
}

#[test]
fn test_anonymous_request() -> Result<()> {
    let req = build_request(
        "GET",
        RequestOptions::new()
            .with_bucket("bucket")
            .with_resource("file.txt")
            .with_bearer_token(""),
    )?;

    assert!(req.headers().get(AUTHORIZATION).is_none());
    assert_eq!(req.uri().query(), None);
    Ok(())
}
