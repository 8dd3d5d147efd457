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

use gcsign_core::{Error, Result};
use log::debug;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::der::pem;
use rsa::pkcs8::{ObjectIdentifier, PrivateKeyInfo};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Signer};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use sha2::Sha256;

/// `rsaEncryption` from RFC 8017.
const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// PrivateKey is the RSA key of a service account.
///
/// Signing digests the message with SHA-256 and produces an RSASSA-PKCS1-v1_5
/// signature. PKCS#1 v1.5 signatures are deterministic; randomness is only used to
/// blind the private key operation against timing attacks and never changes the
/// produced bytes.
#[derive(Clone)]
pub struct PrivateKey {
    signing_key: SigningKey<Sha256>,
    bits: usize,
    blinding: bool,
}

impl PrivateKey {
    /// Parse a private key from PEM or DER bytes.
    ///
    /// PKCS#8 is tried first and PKCS#1 is accepted as a fallback. A PKCS#8 key of
    /// another algorithm is rejected as unsupported; every other failure is reported
    /// as a malformed key.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let raw = raw.trim_ascii();
        let der = match pem::decode_vec(raw) {
            Ok((label, der)) => {
                debug!("decoded PEM block labeled [{label}]");
                der
            }
            Err(_) => raw.to_vec(),
        };

        let key = match PrivateKeyInfo::try_from(der.as_slice()) {
            Ok(info) if info.algorithm.oid != RSA_ENCRYPTION => {
                debug!("private key algorithm {} is not rsa", info.algorithm.oid);
                return Err(Error::unsupported_private_key());
            }
            Ok(info) => RsaPrivateKey::try_from(info)
                .map_err(|e| Error::malformed_private_key().with_source(e))?,
            Err(_) => RsaPrivateKey::from_pkcs1_der(&der)
                .map_err(|e| Error::malformed_private_key().with_source(e))?,
        };

        Ok(Self::from_rsa(key))
    }

    fn from_rsa(key: RsaPrivateKey) -> Self {
        Self {
            bits: key.size() * 8,
            signing_key: SigningKey::<Sha256>::new(key),
            blinding: true,
        }
    }

    /// Disable blinding so signing never touches a random source.
    pub fn without_blinding(mut self) -> Self {
        self.blinding = false;
        self
    }

    /// Size of the key modulus in bits.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Sign the message with SHA-256 and RSASSA-PKCS1-v1_5.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let signature = if self.blinding {
            self.signing_key
                .try_sign_with_rng(&mut rand::thread_rng(), message)
        } else {
            self.signing_key.try_sign(message)
        }
        .map_err(|e| Error::unexpected("failed to sign message").with_source(e))?;

        Ok(signature.to_vec())
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bits", &self.bits)
            .finish_non_exhaustive()
    }
}
