use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_CODE_PREFIX: &str = "HYA";
pub const CODE_SUFFIX_LEN: usize = 7;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Display-only reference shown once a booking completes. Not unique, not a booking key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationCode(String);

impl ConfirmationCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfirmationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds codes as a fixed prefix plus seven random base-36 characters.
#[derive(Debug, Clone)]
pub struct ConfirmationCodeGenerator {
    prefix: String,
}

impl ConfirmationCodeGenerator {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into().to_ascii_uppercase(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn generate<R>(&self, rng: &mut R) -> ConfirmationCode
    where
        R: Rng + ?Sized,
    {
        let mut code = String::with_capacity(self.prefix.len() + CODE_SUFFIX_LEN);
        code.push_str(&self.prefix);
        for _ in 0..CODE_SUFFIX_LEN {
            let index = rng.gen_range(0..BASE36.len());
            code.push(char::from(BASE36[index]));
        }
        ConfirmationCode(code)
    }
}

impl Default for ConfirmationCodeGenerator {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_CODE_PREFIX)
    }
}
