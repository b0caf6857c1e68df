use crate::config::BINARY_EXTENSIONS;
use rand::Rng;
use uuid::Uuid;

/// True when the path ends in one of the image extensions that carry no line counts.
pub fn is_binary_path(path: &str) -> bool {
    BINARY_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// 32 hex chars drawn from `rng`, shaped like a v4 UUID.
pub fn random_hex<R: Rng>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    Uuid::from_bytes(bytes).simple().to_string()
}

/// Leading `len` hex chars of a fresh [`random_hex`].
pub fn hex_token<R: Rng>(rng: &mut R, len: usize) -> String {
    let mut hex = random_hex(rng);
    hex.truncate(len.min(hex.len()));
    hex
}
