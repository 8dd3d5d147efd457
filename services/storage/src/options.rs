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
use std::io::{self, Read};
use std::time::Duration;

use bytes::Bytes;
use gcsign_core::hash::base64_encode;
use gcsign_core::time::DateTime;

use crate::constants::{DEFAULT_HOST, DEFAULT_SCHEME};
use crate::credential::Credentials;

/// Body of a built storage request.
#[derive(Default)]
pub enum Body {
    /// No payload.
    #[default]
    Empty,
    /// An in-memory payload.
    Bytes(Bytes),
    /// A streamed payload; its length is only known when set explicitly.
    Reader(Box<dyn Read + Send + Sync>),
}

impl Body {
    /// Whether the body carries no payload at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }

    /// Read the whole payload into memory.
    pub fn into_bytes(self) -> io::Result<Bytes> {
        match self {
            Body::Empty => Ok(Bytes::new()),
            Body::Bytes(bs) => Ok(bs),
            Body::Reader(mut r) => {
                let mut buf = Vec::new();
                r.read_to_end(&mut buf)?;
                Ok(buf.into())
            }
        }
    }
}

impl Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Empty"),
            Body::Bytes(bs) => write!(f, "Bytes({} bytes)", bs.len()),
            Body::Reader(_) => f.write_str("Reader"),
        }
    }
}

/// Server side encryption requested for an upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encryption {
    /// Let the bucket defaults apply.
    #[default]
    None,
    /// Google managed AES-256.
    Aes256,
}

impl Encryption {
    /// Value of the `x-goog-encryption-algorithm` header, if any.
    pub fn algorithm(&self) -> Option<&'static str> {
        match self {
            Encryption::None => None,
            Encryption::Aes256 => Some("AES256"),
        }
    }
}

/// A single adjustment applied to [`RequestOptions`].
///
/// Options are applied in order; a later option overrides an earlier one touching the
/// same field.
pub enum RequestOption {
    /// Target a different scheme and host.
    Endpoint {
        /// URL scheme, `https` by default.
        scheme: String,
        /// Host with optional port.
        host: String,
    },
    /// Bucket name.
    Bucket(String),
    /// Object name inside the bucket.
    Resource(String),
    /// Authorize with a full `Authorization` header value.
    BearerToken(String),
    /// Authorize with resolved credentials.
    Credentials(Credentials),
    /// Moment the signature stops being valid.
    Expiration(DateTime),
    /// Deadline attached to the built request.
    Timeout(Duration),
    /// `If-None-Match` value for GET.
    Etag(String),
    /// `x-goog-if-generation-match` value for PUT.
    Generation(String),
    /// In-memory payload; sets the content length as well.
    ContentBytes(Bytes),
    /// Streamed payload.
    ContentReader(Box<dyn Read + Send + Sync>),
    /// Payload length in bytes.
    ContentLength(u64),
    /// Payload media type.
    ContentType(String),
    /// Raw MD5 digest of the payload.
    ContentMd5(Vec<u8>),
    /// Payload encoding such as `gzip`.
    ContentEncoding(String),
    /// Server side encryption.
    Encryption(Encryption),
}

/// RequestOptions describe the storage request to build.
#[derive(Debug)]
pub struct RequestOptions {
    pub(crate) scheme: String,
    pub(crate) host: String,
    pub(crate) bucket: String,
    pub(crate) resource: String,
    pub(crate) credentials: Option<Credentials>,
    pub(crate) expiration: Option<DateTime>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) etag: String,
    pub(crate) generation: String,
    pub(crate) content: Body,
    pub(crate) content_length: Option<u64>,
    pub(crate) content_type: String,
    pub(crate) content_md5: String,
    pub(crate) content_encoding: String,
    pub(crate) encryption: Encryption,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            bucket: String::new(),
            resource: String::new(),
            credentials: None,
            expiration: None,
            timeout: None,
            etag: String::new(),
            generation: String::new(),
            content: Body::Empty,
            content_length: None,
            content_type: String::new(),
            content_md5: String::new(),
            content_encoding: String::new(),
            encryption: Encryption::None,
        }
    }
}

impl RequestOptions {
    /// Create options targeting the public storage endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one option. `None` is skipped, which makes conditional options plain
    /// `cond.then(|| option)` values.
    pub fn apply(mut self, option: impl Into<Option<RequestOption>>) -> Self {
        if let Some(option) = option.into() {
            self.set(option);
        }
        self
    }

    /// Apply a list of options in order.
    pub fn with_options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<Option<RequestOption>>,
    {
        for option in options.into_iter().filter_map(Into::<Option<RequestOption>>::into) {
            self.set(option);
        }
        self
    }

    fn set(&mut self, option: RequestOption) {
        match option {
            RequestOption::Endpoint { scheme, host } => {
                self.scheme = scheme;
                self.host = host;
            }
            RequestOption::Bucket(v) => self.bucket = v.trim().to_string(),
            RequestOption::Resource(v) => self.resource = v.trim().to_string(),
            RequestOption::BearerToken(v) => self.credentials = Some(Credentials::bearer(v)),
            RequestOption::Credentials(v) => self.credentials = Some(v),
            RequestOption::Expiration(v) => self.expiration = Some(v),
            RequestOption::Timeout(v) => self.timeout = Some(v),
            RequestOption::Etag(v) => self.etag = v.trim().to_string(),
            RequestOption::Generation(v) => self.generation = v.trim().to_string(),
            RequestOption::ContentBytes(v) => {
                self.content_length = Some(v.len() as u64);
                self.content = Body::Bytes(v);
            }
            RequestOption::ContentReader(v) => self.content = Body::Reader(v),
            RequestOption::ContentLength(v) => self.content_length = Some(v),
            RequestOption::ContentType(v) => self.content_type = v.trim().to_string(),
            RequestOption::ContentMd5(v) => self.content_md5 = base64_encode(&v),
            RequestOption::ContentEncoding(v) => self.content_encoding = v,
            RequestOption::Encryption(v) => self.encryption = v,
        }
    }

    /// Target a different scheme and host, for example an emulator.
    pub fn with_endpoint(self, scheme: impl Into<String>, host: impl Into<String>) -> Self {
        self.apply(RequestOption::Endpoint {
            scheme: scheme.into(),
            host: host.into(),
        })
    }

    /// Set the bucket.
    pub fn with_bucket(self, bucket: impl Into<String>) -> Self {
        self.apply(RequestOption::Bucket(bucket.into()))
    }

    /// Set the object name.
    pub fn with_resource(self, resource: impl Into<String>) -> Self {
        self.apply(RequestOption::Resource(resource.into()))
    }

    /// Authorize with a full `Authorization` header value.
    pub fn with_bearer_token(self, token: impl Into<String>) -> Self {
        self.apply(RequestOption::BearerToken(token.into()))
    }

    /// Authorize with resolved credentials.
    pub fn with_credentials(self, credentials: Credentials) -> Self {
        self.apply(RequestOption::Credentials(credentials))
    }

    /// Set when the signature expires. Defaults to 30 seconds after the request is built.
    pub fn with_expiration(self, expiration: DateTime) -> Self {
        self.apply(RequestOption::Expiration(expiration))
    }

    /// Attach a timeout to the built request.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.apply(RequestOption::Timeout(timeout))
    }

    /// Only fetch the object if its etag differs.
    pub fn with_etag(self, etag: impl Into<String>) -> Self {
        self.apply(RequestOption::Etag(etag.into()))
    }

    /// Only upload if the live object has this generation.
    pub fn with_generation(self, generation: impl Into<String>) -> Self {
        self.apply(RequestOption::Generation(generation.into()))
    }

    /// Upload an in-memory payload.
    pub fn with_content_bytes(self, content: impl Into<Bytes>) -> Self {
        self.apply(RequestOption::ContentBytes(content.into()))
    }

    /// Upload a string payload.
    pub fn with_content_string(self, content: impl Into<String>) -> Self {
        self.with_content_bytes(content.into())
    }

    /// Upload a streamed payload. Pair with [`RequestOptions::with_content_length`].
    pub fn with_content_reader(self, content: impl Read + Send + Sync + 'static) -> Self {
        self.apply(RequestOption::ContentReader(Box::new(content)))
    }

    /// Set the payload length.
    pub fn with_content_length(self, length: u64) -> Self {
        self.apply(RequestOption::ContentLength(length))
    }

    /// Set the payload media type.
    pub fn with_content_type(self, content_type: impl Into<String>) -> Self {
        self.apply(RequestOption::ContentType(content_type.into()))
    }

    /// Set the raw MD5 digest of the payload; it is sent base64 encoded.
    pub fn with_content_md5(self, digest: impl Into<Vec<u8>>) -> Self {
        self.apply(RequestOption::ContentMd5(digest.into()))
    }

    /// Set the payload encoding.
    pub fn with_content_encoding(self, encoding: impl Into<String>) -> Self {
        self.apply(RequestOption::ContentEncoding(encoding.into()))
    }

    /// Request server side encryption.
    pub fn with_encryption(self, encryption: Encryption) -> Self {
        self.apply(RequestOption::Encryption(encryption))
    }
}

impl Extend<RequestOption> for RequestOptions {
    fn extend<T: IntoIterator<Item = RequestOption>>(&mut self, iter: T) {
        for option in iter {
            self.set(option);
        }
    }
}

impl FromIterator<RequestOption> for RequestOptions {
    fn from_iter<T: IntoIterator<Item = RequestOption>>(iter: T) -> Self {
        let mut options = Self::default();
        options.extend(iter);
        options
    }
}
