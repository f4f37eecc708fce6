use chainbench::error::ChainBenchError;
use chainbench::identifier::{Pubkey, Signature, Slot};
use std::fmt::{Display, Formatter};

/// Identifier as received from the caller, not validated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetId {
    Account(String),
    Transaction(String),
    Block(Slot),
}

/// Validated lookup target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Account(Pubkey),
    Transaction(Signature),
    Block(Slot),
}

impl TargetId {
    pub fn parse(&self) -> Result<Target, ChainBenchError> {
        match self {
            TargetId::Account(pubkey) => pubkey.parse().map(Target::Account),
            TargetId::Transaction(signature) => signature.parse().map(Target::Transaction),
            TargetId::Block(slot) => Ok(Target::Block(*slot)),
        }
    }
}

impl Display for TargetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetId::Account(pubkey) => write!(f, "account|{pubkey}"),
            TargetId::Transaction(signature) => write!(f, "transaction|{signature}"),
            TargetId::Block(slot) => write!(f, "block|{slot}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_account_should_parse() {
        let target = TargetId::Account("11111111111111111111111111111111".to_string())
            .parse()
            .unwrap();
        assert_eq!(target, Target::Account(Pubkey::new([0; 32])));
    }

    #[test]
    fn malformed_signature_should_be_invalid_target() {
        let error = TargetId::Transaction("not-a-signature".to_string())
            .parse()
            .unwrap_err();
        assert!(error.is_invalid_target());
    }

    #[test]
    fn slot_should_always_parse() {
        assert_eq!(TargetId::Block(0).parse().unwrap(), Target::Block(0));
    }
}
