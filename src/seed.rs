use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

pub const SEED_LEN: usize = 32;

const MESSAGE_SEPARATOR: char = ':';

/// HMAC-SHA256 digest read as a 256-bit unsigned big-endian integer.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed(Zeroizing<[u8; SEED_LEN]>);

impl Seed {
    pub fn from_be_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    pub fn as_be_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

// Includes the ASCII separators U+001C..U+001F, which `char::is_whitespace`
// leaves out.
fn is_site_whitespace(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

pub fn normalize_site_key(site_key: &str) -> String {
    site_key.trim_matches(is_site_whitespace).to_lowercase()
}

pub fn canonical_message(site_key: &str, version: u64) -> String {
    format!(
        "{}{}{}",
        normalize_site_key(site_key),
        MESSAGE_SEPARATOR,
        version
    )
}

pub fn derive_seed(master_secret: &[u8], site_key: &str, version: u64) -> Seed {
    let message = canonical_message(site_key, version);

    tracing::debug!(message_len = message.len(), version, "deriving seed");

    hmac_sha256(master_secret, message.as_bytes())
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> Seed {
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        unreachable!("HMAC-SHA256 accepts any key size");
    };
    mac.update(message);
    let digest = mac.finalize().into_bytes();

    let mut seed = Seed::from_be_bytes([0u8; SEED_LEN]);
    seed.0.copy_from_slice(&digest);
    seed
}
