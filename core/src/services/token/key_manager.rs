//! RS256 key management for JWT signing and verification

use std::sync::atomic::{AtomicUsize, Ordering};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use urm_shared::JwtConfig;

use crate::errors::DomainError;

/// Decoded signing/verification pair
struct KeyPair {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

#[derive(Serialize, Deserialize)]
struct CheckClaims {
    sub: String,
}

/// Lazily decodes and caches the RSA key pair from base64 configuration.
///
/// The first call to [`private_key`](Self::private_key) or
/// [`public_key`](Self::public_key) runs exactly one decode, even under
/// concurrent first access. The outcome, success or failure, is cached
/// for the lifetime of the provider.
pub struct KeyProvider {
    /// Base64 PKCS#8 DER private key
    private_key_b64: String,
    /// Base64 X.509 SubjectPublicKeyInfo DER public key
    public_key_b64: String,
    keys: OnceCell<Result<KeyPair, String>>,
    loads: AtomicUsize,
}

impl std::fmt::Debug for KeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyProvider")
            .field("loaded", &self.keys.get().is_some())
            .finish()
    }
}

impl KeyProvider {
    /// Creates a provider over base64-encoded DER key material.
    ///
    /// Nothing is decoded until the first key is requested.
    pub fn new(private_key_b64: impl Into<String>, public_key_b64: impl Into<String>) -> Self {
        Self {
            private_key_b64: private_key_b64.into(),
            public_key_b64: public_key_b64.into(),
            keys: OnceCell::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Creates a provider from the JWT section of the application config
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(config.private_key.clone(), config.public_key.clone())
    }

    /// Returns the encoding key for signing JWTs
    pub fn private_key(&self) -> Result<&EncodingKey, DomainError> {
        self.key_pair().map(|pair| &pair.encoding_key)
    }

    /// Returns the decoding key for verifying JWTs
    pub fn public_key(&self) -> Result<&DecodingKey, DomainError> {
        self.key_pair().map(|pair| &pair.decoding_key)
    }

    /// Forces the one-time decode so bad key material aborts startup
    pub fn warm_up(&self) -> Result<(), DomainError> {
        self.key_pair().map(|_| ())
    }

    /// Number of decode attempts performed so far (at most one)
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    fn key_pair(&self) -> Result<&KeyPair, DomainError> {
        self.keys
            .get_or_init(|| {
                self.loads.fetch_add(1, Ordering::SeqCst);
                let loaded = Self::load(&self.private_key_b64, &self.public_key_b64);
                match &loaded {
                    Ok(_) => info!("RSA key pair loaded"),
                    Err(message) => error!("Failed to load RSA key pair: {}", message),
                }
                loaded
            })
            .as_ref()
            .map_err(|message| DomainError::Configuration {
                message: message.clone(),
            })
    }

    fn load(private_key_b64: &str, public_key_b64: &str) -> Result<KeyPair, String> {
        let private_der = decode_base64(private_key_b64)
            .map_err(|e| format!("Private key is not valid base64: {}", e))?;
        let encoding_key = EncodingKey::from_rsa_pem(der_to_pem("PRIVATE KEY", &private_der).as_bytes())
            .map_err(|e| format!("Invalid private key format: {}", e))?;

        let public_der = decode_base64(public_key_b64)
            .map_err(|e| format!("Public key is not valid base64: {}", e))?;
        let decoding_key = DecodingKey::from_rsa_pem(der_to_pem("PUBLIC KEY", &public_der).as_bytes())
            .map_err(|e| format!("Invalid public key format: {}", e))?;

        // PEM parsing does not touch the RSA structure; a test signature does.
        let check = CheckClaims {
            sub: "key-check".to_string(),
        };
        let signed = encode(&Header::new(Algorithm::RS256), &check, &encoding_key)
            .map_err(|e| format!("Private key cannot sign: {}", e))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        decode::<CheckClaims>(&signed, &decoding_key, &validation)
            .map_err(|e| format!("Public key does not verify the private key: {}", e))?;

        Ok(KeyPair {
            encoding_key,
            decoding_key,
        })
    }
}

fn decode_base64(value: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = value.split_whitespace().collect();
    STANDARD.decode(compact)
}

fn der_to_pem(label: &str, der: &[u8]) -> String {
    let encoded = STANDARD.encode(der);
    let mut pem = format!("-----BEGIN {}-----\n", label);
    for (i, ch) in encoded.chars().enumerate() {
        if i > 0 && i % 64 == 0 {
            pem.push('\n');
        }
        pem.push(ch);
    }
    pem.push_str(&format!("\n-----END {}-----\n", label));
    pem
}
