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

use std::fmt::Write;

use gcsign_core::hash::base64_encode;
use gcsign_core::time::{add_duration, format_epoch, now};
use gcsign_core::{Error, RequestTimeout, Result};
use http::header::{
    HeaderValue, AUTHORIZATION, CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE, IF_NONE_MATCH,
};
use http::{Method, Uri};
use log::debug;
use percent_encoding::utf8_percent_encode;

use crate::constants::{
    DEFAULT_EXPIRATION, GOOG_URI_ENCODE_SET, QUERY_ACCESS_ID, QUERY_EXPIRES, QUERY_SIGNATURE,
    X_GOOG_ENCRYPTION_ALGORITHM, X_GOOG_IF_GENERATION_MATCH,
};
use crate::credential::Credentials;
use crate::key::PrivateKey;
use crate::options::{Body, RequestOptions};

const CONTENT_MD5: &str = "Content-MD5";

/// Build a storage request for `method`, which must be `GET`, `PUT` or `HEAD`.
///
/// A bearer credential is sent in the `Authorization` header. A service account
/// credential signs the request and adds `GoogleAccessId`, `Expires` and `Signature`
/// to the query string. Without credentials the request is left anonymous.
///
/// Options are validated before any signing work happens.
pub fn build_request(method: &str, options: RequestOptions) -> Result<http::Request<Body>> {
    let method = match method {
        "" => return Err(Error::method_missing()),
        "GET" => Method::GET,
        "PUT" => Method::PUT,
        "HEAD" => Method::HEAD,
        v => return Err(Error::method_unrecognized(v)),
    };
    if options.bucket.is_empty() {
        return Err(Error::bucket_missing());
    }
    if options.resource.is_empty() {
        return Err(Error::resource_missing());
    }
    if method == Method::PUT && options.content.is_empty() {
        return Err(Error::content_missing());
    }

    let object_key = object_key(&options.bucket, &options.resource);
    let mut url = format!(
        "{}://{}{}",
        options.scheme,
        options.host,
        utf8_percent_encode(&object_key, &GOOG_URI_ENCODE_SET)
    );

    let mut authorization = None;
    match &options.credentials {
        Some(Credentials::Bearer(token)) if !token.is_empty() => {
            let mut value = HeaderValue::from_str(token)?;
            value.set_sensitive(true);
            authorization = Some(value);
        }
        Some(Credentials::ServiceAccount {
            access_id,
            private_key,
        }) => {
            let expiration = options
                .expiration
                .unwrap_or_else(|| add_duration(now(), DEFAULT_EXPIRATION));
            let epoch = format_epoch(expiration);

            let string_to_sign = string_to_sign(&method, &options, &epoch, &object_key);
            debug!("calculated string to sign: {string_to_sign:?}");
            let signature = sign(private_key, &string_to_sign)?;

            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair(QUERY_EXPIRES, &epoch)
                .append_pair(QUERY_ACCESS_ID, access_id)
                .append_pair(QUERY_SIGNATURE, &signature)
                .finish();
            url.push('?');
            url.push_str(&query);
        }
        _ => debug!("no usable credentials, building an anonymous request"),
    }

    let uri: Uri = url.parse()?;
    let mut builder = http::Request::builder().method(method.clone()).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }

    if method == Method::GET {
        if !options.etag.is_empty() {
            builder = builder.header(IF_NONE_MATCH, options.etag.as_str());
        }
    } else if method == Method::PUT {
        if !options.content_type.is_empty() {
            builder = builder.header(CONTENT_TYPE, options.content_type.as_str());
        }
        if !options.content_md5.is_empty() {
            builder = builder.header(CONTENT_MD5, options.content_md5.as_str());
        }
        if !options.content_encoding.is_empty() {
            builder = builder.header(CONTENT_ENCODING, options.content_encoding.as_str());
        }
        if !options.generation.is_empty() {
            builder = builder.header(X_GOOG_IF_GENERATION_MATCH, options.generation.as_str());
        }
        if let Some(algorithm) = options.encryption.algorithm() {
            builder = builder.header(X_GOOG_ENCRYPTION_ALGORITHM, algorithm);
        }
    }

    if let Some(length) = options.content_length {
        builder = builder.header(CONTENT_LENGTH, length);
    }
    if let Some(timeout) = options.timeout {
        builder = builder.extension(RequestTimeout(timeout));
    }

    let req = builder.body(options.content)?;
    debug!("built {} request for {}", req.method(), req.uri().path());
    Ok(req)
}

/// Join bucket and resource into a rooted, lexically cleaned path.
fn object_key(bucket: &str, resource: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in bucket.split('/').chain(resource.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            v => segments.push(v),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Build the canonical string the storage service recomputes to verify the signature.
///
/// The extension header lines only exist for PUT and only when set.
fn string_to_sign(method: &Method, options: &RequestOptions, epoch: &str, object_key: &str) -> String {
    let mut s = String::new();
    // Writing to a String never fails.
    let _ = write!(
        s,
        "{method}\n{}\n{}\n{epoch}\n",
        options.content_md5, options.content_type
    );
    if method == Method::PUT {
        if let Some(algorithm) = options.encryption.algorithm() {
            let _ = writeln!(s, "{X_GOOG_ENCRYPTION_ALGORITHM}:{algorithm}");
        }
        if !options.generation.is_empty() {
            let _ = writeln!(s, "{X_GOOG_IF_GENERATION_MATCH}:{}", options.generation);
        }
    }
    s.push_str(object_key);
    s
}

fn sign(key: &PrivateKey, string_to_sign: &str) -> Result<String> {
    let signature = key.sign(string_to_sign.as_bytes())?;
    Ok(base64_encode(&signature))
}
