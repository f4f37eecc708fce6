use crate::error::ChainBenchError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString, IntoStaticStr};

/// How finalized the queried ledger state must be.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Commitment {
    Processed,
    Confirmed,
    #[default]
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Parses the commitment of an incoming request, an empty value falls
    /// back to `default`.
    pub fn from_request(value: &str, default: Commitment) -> Result<Self, ChainBenchError> {
        if value.trim().is_empty() {
            return Ok(default);
        }
        Commitment::from_str(value.trim())
            .map_err(|_| ChainBenchError::InvalidCommitment(value.to_owned()))
    }
}
