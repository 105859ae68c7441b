//! Codec configuration

use serde::{Deserialize, Serialize};

use crate::backend::{MAX_NPAR, NPAR};
use crate::SizeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FecConfig {
    /// Parity bytes appended per codeword
    pub parity_len: usize,
}

impl Default for FecConfig {
    fn default() -> Self {
        Self { parity_len: NPAR }
    }
}

impl FecConfig {
    pub fn new(parity_len: usize) -> Self {
        Self { parity_len }
    }

    pub fn validate(&self) -> std::result::Result<(), SizeError> {
        if self.parity_len == 0 || self.parity_len > MAX_NPAR {
            return Err(SizeError::InvalidParityLen(self.parity_len));
        }
        Ok(())
    }
}
