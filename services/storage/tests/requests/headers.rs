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

use std::io::Cursor;
use std::time::Duration;

use gcsign_core::{RequestTimeout, Result};
use gcsign_storage::{build_request, Body, Encryption, RequestOption, RequestOptions};
use http::header::{CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE, IF_NONE_MATCH};
use pretty_assertions::assert_eq;

fn base() -> RequestOptions {
    RequestOptions::new()
        .with_bucket("bucket")
        .with_resource("file.txt")
}

fn upload() -> RequestOptions {
    base().with_content_string("hi")
}

#[test]
fn test_get_with_etag() -> Result<()> {
    let req = build_request("GET", base().with_etag(" my-etag "))?;
    assert_eq!(req.headers()[IF_NONE_MATCH], "my-etag");
    Ok(())
}

#[test]
fn test_put_headers() -> Result<()> {
    let req = build_request(
        "PUT",
        upload()
            .with_content_type("application/boink")
            .with_content_encoding("utf-8")
            .with_content_md5([0u8, 1, 2, 3, 4, 5, 7, 8, 9, 10, 11, 12, 13, 14, 15])
            .with_generation("42")
            .with_encryption(Encryption::Aes256),
    )?;

    let headers = req.headers();
    assert_eq!(headers[CONTENT_TYPE], "application/boink");
    assert_eq!(headers[CONTENT_ENCODING], "utf-8");
    assert_eq!(headers["Content-MD5"], "AAECAwQFBwgJCgsMDQ4P");
    assert_eq!(headers["x-goog-if-generation-match"], "42");
    assert_eq!(headers["x-goog-encryption-algorithm"], "AES256");
    assert_eq!(headers[CONTENT_LENGTH], "2");
    Ok(())
}

#[test]
fn test_put_only_headers_are_not_set_on_get() -> Result<()> {
    let req = build_request(
        "GET",
        base()
            .with_content_type("application/boink")
            .with_generation("42")
            .with_encryption(Encryption::Aes256),
    )?;

    assert!(req.headers().get(CONTENT_TYPE).is_none());
    assert!(req.headers().get("x-goog-if-generation-match").is_none());
    assert!(req.headers().get("x-goog-encryption-algorithm").is_none());
    Ok(())
}

#[test]
fn test_head_has_no_conditional_headers() -> Result<()> {
    let req = build_request("HEAD", base().with_etag("my-etag").with_generation("42"))?;
    assert!(req.headers().is_empty());
    Ok(())
}

#[test]
fn test_put_body() -> Result<()> {
    let req = build_request("PUT", base().with_content_bytes(&b"hi"[..]))?;
    assert_eq!(req.headers()[CONTENT_LENGTH], "2");
    assert_eq!(req.into_body().into_bytes()?.as_ref(), b"hi");
    Ok(())
}

#[test]
fn test_put_streamed_body() -> Result<()> {
    let req = build_request("PUT", base().with_content_reader(Cursor::new("hi")))?;
    assert!(req.headers().get(CONTENT_LENGTH).is_none());
    assert!(matches!(req.body(), Body::Reader(_)));
    assert_eq!(req.into_body().into_bytes()?.as_ref(), b"hi");

    let req = build_request(
        "PUT",
        base()
            .with_content_reader(Cursor::new("hi"))
            .with_content_length(17),
    )?;
    assert_eq!(req.headers()[CONTENT_LENGTH], "17");
    Ok(())
}

#[test]
fn test_endpoint() -> Result<()> {
    let req = build_request("GET", base().with_endpoint("http", "localhost:9000"))?;
    assert_eq!(req.uri().scheme_str(), Some("http"));
    assert_eq!(req.uri().authority().map(|a| a.as_str()), Some("localhost:9000"));
    assert_eq!(req.uri().path(), "/bucket/file.txt");
    Ok(())
}

#[test]
fn test_path_is_percent_encoded() -> Result<()> {
    let req = build_request("GET", base().with_resource("my dir/file+1.txt"))?;
    assert_eq!(req.uri().path(), "/bucket/my%20dir/file%2B1.txt");
    Ok(())
}

#[test]
fn test_timeout_is_bound_to_request() -> Result<()> {
    let req = build_request("GET", base().with_timeout(Duration::from_secs(10)))?;
    assert_eq!(
        req.extensions().get::<RequestTimeout>(),
        Some(&RequestTimeout(Duration::from_secs(10)))
    );

    let req = build_request("GET", base())?;
    assert!(req.extensions().get::<RequestTimeout>().is_none());
    Ok(())
}

#[test]
fn test_later_options_override_earlier_ones() -> Result<()> {
    let options = RequestOptions::new().with_options([
        RequestOption::Bucket("bucket".to_string()),
        RequestOption::Resource("file.txt".to_string()),
        RequestOption::Bucket("bucket2".to_string()),
        RequestOption::Resource("file2.txt".to_string()),
    ]);

    let req = build_request("GET", options)?;
    assert_eq!(req.uri().path(), "/bucket2/file2.txt");
    Ok(())
}
