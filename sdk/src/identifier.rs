use crate::error::ChainBenchError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const PUBKEY_LENGTH: usize = 32;
pub const SIGNATURE_LENGTH: usize = 64;

pub type Slot = u64;

/// Account address: 32 bytes, base58 encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pubkey([u8; PUBKEY_LENGTH]);

/// Transaction signature: 64 bytes, base58 encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

fn decode_base58<const N: usize>(value: &str) -> Option<[u8; N]> {
    let mut bytes = [0u8; N];
    match bs58::decode(value).onto(&mut bytes) {
        Ok(length) if length == N => Some(bytes),
        _ => None,
    }
}

impl Pubkey {
    pub fn new(bytes: [u8; PUBKEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBKEY_LENGTH] {
        &self.0
    }
}

impl Signature {
    pub fn new(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }
}

impl FromStr for Pubkey {
    type Err = ChainBenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_base58::<PUBKEY_LENGTH>(s)
            .map(Pubkey)
            .ok_or_else(|| ChainBenchError::InvalidPubkey(s.to_owned()))
    }
}

impl FromStr for Signature {
    type Err = ChainBenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_base58::<SIGNATURE_LENGTH>(s)
            .map(Signature)
            .ok_or_else(|| ChainBenchError::InvalidSignature(s.to_owned()))
    }
}

impl Display for Pubkey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", bs58::encode(self.0).into_string())
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", bs58::encode(self.0).into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM_PROGRAM: &str = "11111111111111111111111111111111";
    const TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

    #[test]
    fn should_parse_well_known_program_ids() {
        let system = Pubkey::from_str(SYSTEM_PROGRAM).unwrap();
        assert_eq!(system.as_bytes(), &[0u8; PUBKEY_LENGTH]);
        let token = Pubkey::from_str(TOKEN_PROGRAM).unwrap();
        assert_eq!(token.to_string(), TOKEN_PROGRAM);
    }

    #[test]
    fn should_reject_non_base58_pubkey() {
        let error = Pubkey::from_str("not-a-pubkey!").unwrap_err();
        assert!(error.is_invalid_target());
    }

    #[test]
    fn should_reject_pubkey_of_wrong_length() {
        assert!(Pubkey::from_str("1111").is_err());
        assert!(Pubkey::from_str(&"1".repeat(64)).is_err());
    }

    #[test]
    fn signature_should_round_trip_through_display() {
        let signature = Signature::new([7u8; SIGNATURE_LENGTH]);
        let parsed = Signature::from_str(&signature.to_string()).unwrap();
        assert_eq!(parsed, signature);
    }

    #[test]
    fn pubkey_should_not_parse_as_signature() {
        let error = Signature::from_str(TOKEN_PROGRAM).unwrap_err();
        assert!(matches!(error, ChainBenchError::InvalidSignature(_)));
    }
}
