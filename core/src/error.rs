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

use std::fmt;
use thiserror::Error;

/// The error type for gcsign operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The HTTP method was not provided.
    MethodMissing,

    /// The HTTP method is not one of GET, PUT or HEAD.
    MethodUnrecognized,

    /// The bucket was not provided.
    BucketMissing,

    /// The object resource was not provided.
    ResourceMissing,

    /// A PUT request was built without content.
    ContentMissing,

    /// Configuration error (undecodable values, unreadable files, invalid addresses)
    ConfigInvalid,

    /// Credential JSON could not be decoded
    MalformedJson,

    /// The private key could not be parsed
    MalformedPrivateKey,

    /// The private key was parsed but is not an RSA key
    UnsupportedPrivateKey,

    /// No credential source was configured
    CredentialNotFound,

    /// The OAuth2 token endpoint rejected the refresh token exchange
    TokenRequestFailed,

    /// Permission denied when accessing credentials
    CredentialDenied,

    /// Unexpected errors (network, I/O, service errors, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this error was caused by request or discovery configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MethodMissing
                | ErrorKind::MethodUnrecognized
                | ErrorKind::BucketMissing
                | ErrorKind::ResourceMissing
                | ErrorKind::ContentMissing
                | ErrorKind::ConfigInvalid
        )
    }

    /// Check if this is a credential error
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MalformedJson
                | ErrorKind::MalformedPrivateKey
                | ErrorKind::UnsupportedPrivateKey
                | ErrorKind::CredentialNotFound
                | ErrorKind::CredentialDenied
        )
    }
}

// Convenience constructors
impl Error {
    /// Create a method missing error
    pub fn method_missing() -> Self {
        Self::new(ErrorKind::MethodMissing, "missing HTTP method")
    }

    /// Create a method unrecognized error
    pub fn method_unrecognized(method: &str) -> Self {
        Self::new(
            ErrorKind::MethodUnrecognized,
            format!("unrecognized HTTP method [{method}]"),
        )
    }

    /// Create a bucket missing error
    pub fn bucket_missing() -> Self {
        Self::new(ErrorKind::BucketMissing, "bucket is required")
    }

    /// Create a resource missing error
    pub fn resource_missing() -> Self {
        Self::new(ErrorKind::ResourceMissing, "object resource key is required")
    }

    /// Create a content missing error
    pub fn content_missing() -> Self {
        Self::new(ErrorKind::ContentMissing, "content payload is required")
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a malformed JSON error
    pub fn malformed_json() -> Self {
        Self::new(ErrorKind::MalformedJson, "malformed JSON")
    }

    /// Create a malformed private key error
    pub fn malformed_private_key() -> Self {
        Self::new(ErrorKind::MalformedPrivateKey, "malformed private key")
    }

    /// Create an unsupported private key error
    pub fn unsupported_private_key() -> Self {
        Self::new(
            ErrorKind::UnsupportedPrivateKey,
            "unsupported private key type",
        )
    }

    /// Create a credential not found error
    pub fn credential_not_found() -> Self {
        Self::new(
            ErrorKind::CredentialNotFound,
            "unable to discover credentials",
        )
    }

    /// Create a token request failed error
    pub fn token_request_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenRequestFailed, message)
    }

    /// Create a credential denied error
    pub fn credential_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialDenied, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MethodMissing => write!(f, "missing method"),
            ErrorKind::MethodUnrecognized => write!(f, "unrecognized method"),
            ErrorKind::BucketMissing => write!(f, "missing bucket"),
            ErrorKind::ResourceMissing => write!(f, "missing resource"),
            ErrorKind::ContentMissing => write!(f, "missing content"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::MalformedJson => write!(f, "malformed json"),
            ErrorKind::MalformedPrivateKey => write!(f, "malformed private key"),
            ErrorKind::UnsupportedPrivateKey => write!(f, "unsupported private key"),
            ErrorKind::CredentialNotFound => write!(f, "credential not found"),
            ErrorKind::TokenRequestFailed => write!(f, "token request failed"),
            ErrorKind::CredentialDenied => write!(f, "credential access denied"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::config_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
