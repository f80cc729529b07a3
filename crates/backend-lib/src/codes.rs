// ============================
// netguessr-backend-lib/src/codes.rs
// ============================
//! Room-code generation.
use rand::Rng;

/// Room-code alphabet: the 52 upper/lowercase Latin letters.
const ALPHABET: &[u8; 52] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Every room code is exactly this long (52^5, about 380 million codes).
pub const CODE_LEN: usize = 5;

/// Draws candidate room codes, each character uniform over the alphabet.
///
/// Uniqueness is not this type's job: the registry retries candidates under
/// its own lock until one is absent from the live table, so the code only
/// becomes real at insert time. No counter or sequence is kept; the alphabet
/// space dwarfs any plausible number of live rooms, so rejection-and-retry
/// terminates fast.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoomCodeAllocator;

impl RoomCodeAllocator {
    /// Draw one candidate code.
    pub fn candidate(&self) -> String {
        let mut rng = rand::rng();
        (0..CODE_LEN)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
