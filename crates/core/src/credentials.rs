//! Random credential generation.

use rand::Rng;

/// Alphabet used for generated passwords. Documented so operators know what
/// characters a generated password may contain.
pub const PASSWORD_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()-_";

/// Length of auto-generated passwords for admin-created users.
pub const GENERATED_PASSWORD_LEN: usize = 12;

/// Generate a random password from [`PASSWORD_ALPHABET`].
pub fn generate_password(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..PASSWORD_ALPHABET.len());
            PASSWORD_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a 128-bit random share key, hex encoded (32 characters).
pub fn generate_share_key() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
