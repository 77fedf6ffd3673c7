use rand::RngExt;

use crate::domain::types::AUTHCODE_LEN;

/// Source of fresh auth code tokens.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Charset for generated codes (lowercase hex).
const CHARSET: &[u8] = b"0123456789abcdef";

/// Draws codes from the thread-local CSPRNG.
///
/// Codes are short enough to type into a chat command, so they are
/// practically unique rather than unguessable at scale. Uniqueness among
/// pending codes is enforced by the store. The RNG panics if the OS entropy
/// source fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..AUTHCODE_LEN)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect()
    }
}
