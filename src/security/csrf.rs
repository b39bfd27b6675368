use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// How long a rendered contact form stays submittable.
const TOKEN_MAX_AGE_HOURS: i64 = 2;

/// Stateless CSRF tokens for the public forms: `nonce.issued_at.signature`,
/// signed with the site secret. Nothing is stored server-side.
pub struct CsrfService {
    secret: Vec<u8>,
    max_age: Duration,
}

impl CsrfService {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            max_age: Duration::hours(TOKEN_MAX_AGE_HOURS),
        }
    }

    pub fn generate_token(&self) -> String {
        let payload = format!("{}.{}", generate_random_nonce(), Utc::now().timestamp());
        let signature = self.sign(&payload);
        format!("{}.{}", payload, signature)
    }

    pub fn validate_token(&self, token: &str) -> bool {
        let Some((payload, signature)) = token.rsplit_once('.') else {
            return false;
        };
        let Some((_, issued_at)) = payload.split_once('.') else {
            return false;
        };
        let Ok(issued_at) = issued_at.parse::<i64>() else {
            return false;
        };

        let expected = self.sign(payload);
        if !bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
            return false;
        }

        let age = Utc::now().timestamp() - issued_at;
        age >= 0 && age <= self.max_age.num_seconds()
    }

    fn sign(&self, payload: &str) -> String {
        // HMAC accepts keys of any length, so this cannot fail.
        let mut mac = match HmacSha256::new_from_slice(&self.secret) {
            Ok(mac) => mac,
            Err(_) => return String::new(),
        };
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

fn generate_random_nonce() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
