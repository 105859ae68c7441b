//! Decode report for packet publishing
//!
//! Mirrors what the ground station posts per received packet: the raw hex as
//! received, the corrected payload and how many bytes the code repaired.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::SyndromeState;
use crate::codec::Decoded;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeReport {
    pub raw: String,
    pub corrected: String,
    pub errors_corrected: usize,
    pub syndrome: SyndromeState,
    pub decoded_at: DateTime<Utc>,
}

impl DecodeReport {
    pub fn new(raw_hex: &str, decoded: &Decoded) -> Self {
        Self {
            raw: raw_hex.to_ascii_lowercase(),
            corrected: decoded.payload_hex(),
            errors_corrected: decoded.corrected,
            syndrome: decoded.syndrome,
            decoded_at: Utc::now(),
        }
    }

    /// Single-line JSON for piping into the packet publisher
    pub fn to_json_compact(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
