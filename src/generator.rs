use zeroize::Zeroizing;

use crate::charset::{CharClass, POOL};
use crate::error::{Error, Result};
use crate::keystream::KeystreamRng;
use crate::seed::{Seed, derive_seed, normalize_site_key};

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 4096;

fn check_length(length: usize) -> Result<()> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(Error::InvalidLength {
            length,
            minimum: MIN_LENGTH,
            maximum: MAX_LENGTH,
        });
    }
    Ok(())
}

fn pick(rng: &mut KeystreamRng, symbols: &[u8], name: &'static str) -> Result<u8> {
    rng.choose(symbols)
        .copied()
        .ok_or(Error::EmptyCharacterSet(name))
}

pub fn assemble_password(seed: &Seed, length: usize) -> Result<Zeroizing<String>> {
    check_length(length)?;

    let mut rng = KeystreamRng::new(seed);
    let mut password_bytes = Zeroizing::new(Vec::with_capacity(length));

    for class in CharClass::ALL {
        password_bytes.push(pick(&mut rng, class.symbols(), class.name())?);
    }

    for _ in MIN_LENGTH..length {
        password_bytes.push(pick(&mut rng, POOL, "combined")?);
    }

    rng.shuffle(password_bytes.as_mut_slice());

    let password: String = password_bytes.iter().map(|&b| char::from(b)).collect();
    Ok(Zeroizing::new(password))
}

/// Derives the password for `site_key` at `version` from `master_secret`.
///
/// The length is checked before any hashing. An empty secret or a site key
/// that normalizes to nothing is rejected as [`Error::InvalidInput`].
pub fn generate_password(
    master_secret: &[u8],
    site_key: &str,
    version: u64,
    length: usize,
) -> Result<Zeroizing<String>> {
    check_length(length)?;

    if master_secret.is_empty() {
        return Err(Error::invalid_input("master secret", "cannot be empty"));
    }
    if normalize_site_key(site_key).is_empty() {
        return Err(Error::invalid_input("site key", "cannot be empty"));
    }

    tracing::debug!(version, length, "generating password");

    let seed = derive_seed(master_secret, site_key, version);
    assemble_password(&seed, length)
}

pub fn generate_password_from_raw(
    master_secret: &[u8],
    site_key: &[u8],
    version: u64,
    length: usize,
) -> Result<Zeroizing<String>> {
    check_length(length)?;

    let secret = std::str::from_utf8(master_secret)
        .map_err(|e| Error::invalid_input("master secret", format!("not valid UTF-8 ({})", e)))?;
    let site_key = std::str::from_utf8(site_key)
        .map_err(|e| Error::invalid_input("site key", format!("not valid UTF-8 ({})", e)))?;

    generate_password(secret.as_bytes(), site_key, version, length)
}
