//! Password hashing and bearer token handling

use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::{Params, Pbkdf2};
use serde::{Deserialize, Serialize};

/// PBKDF2-SHA256 password hashing producing PHC strings
#[derive(Debug, Clone)]
pub struct PasswordHashing {
    rounds: u32,
}

impl PasswordHashing {
    pub fn new(rounds: u32) -> Self {
        Self { rounds }
    }

    pub fn hash(&self, password: &str) -> Result<String> {
        let salt_bytes: [u8; 16] = rand::random();
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| anyhow!("salt encoding: {}", e))?;
        let params = Params {
            rounds: self.rounds,
            output_length: 32,
        };
        let hash = Pbkdf2
            .hash_password_customized(password.as_bytes(), None, None, params, &salt)
            .map_err(|e| anyhow!("password hashing: {}", e))?;
        Ok(hash.to_string())
    }

    /// Check a password against a stored hash; malformed hashes never verify
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        match PasswordHash::new(stored_hash) {
            Ok(parsed) => Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is malformed");
                false
            }
        }
    }
}

/// JWT claims carried by access tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Username at issue time
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 access token issuer and verifier
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Token lifetime in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    pub fn issue(&self, user_id: i32, username: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| anyhow!("token signing: {}", e))
    }

    /// Decode and validate signature and expiry; returns the user id
    pub fn verify(&self, token: &str) -> Result<i32> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))?;
        data.claims
            .sub
            .parse::<i32>()
            .map_err(|_| anyhow!("token subject is not a user id"))
    }
}
