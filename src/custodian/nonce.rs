//! One-time string generation for authorization URLs

use rand::RngCore;

const NONCE_BYTES: usize = 32;

/// Source of the anti-replay `state` nonce
pub trait NonceSource: Send + Sync {
    fn generate(&self) -> String;
}

/// 32 bytes from the thread-local CSPRNG, upper-case hex
#[derive(Debug, Default, Clone, Copy)]
pub struct OsNonceSource;

impl NonceSource for OsNonceSource {
    fn generate(&self) -> String {
        let mut bytes = [0u8; NONCE_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode_upper(bytes)
    }
}

/// Always returns the same value
#[derive(Debug, Clone)]
pub struct FixedNonce(pub String);

impl FixedNonce {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl NonceSource for FixedNonce {
    fn generate(&self) -> String {
        self.0.clone()
    }
}
