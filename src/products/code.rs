//! Product code generation.

use rand::Rng;

const CODE_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";
pub const CODE_LENGTH: usize = 8;

/// Draw a code of `CODE_LENGTH` characters, each picked uniformly from
/// `[a-z0-9]`. Uniqueness against existing codes is not checked.
pub fn generate_code() -> String {
  generate_code_with(&mut rand::thread_rng())
}

pub fn generate_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
  (0..CODE_LENGTH)
    .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
    .collect()
}

/// Keep a caller-supplied code unless it is missing or empty.
pub fn resolve_code(code: Option<String>) -> String {
  match code {
    Some(code) if !code.is_empty() => code,
    _ => generate_code(),
  }
}
