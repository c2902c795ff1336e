pub mod charset;
pub mod error;
pub mod generator;
mod keystream;
pub mod seed;

pub use error::{Error, Result};
pub use generator::{MAX_LENGTH, MIN_LENGTH, assemble_password, generate_password, generate_password_from_raw};
pub use seed::{Seed, canonical_message, derive_seed, normalize_site_key};
