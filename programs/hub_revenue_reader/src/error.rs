use anchor_lang::prelude::Pubkey;

use crate::state::{GatewayTokenState, RecordKind};

pub type Result<T> = std::result::Result<T, HubReaderError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HubReaderError {
    // Lookup errors
    #[error("{kind} account {address} not found")]
    NotFound { kind: RecordKind, address: Pubkey },
    #[error("{kind} account is owned by {actual}, expected {expected}")]
    OwnerMismatch {
        kind: RecordKind,
        expected: Pubkey,
        actual: Pubkey,
    },

    // Layout errors
    #[error("{kind} account data too small: {actual} bytes, need at least {required}")]
    TooSmall {
        kind: RecordKind,
        actual: usize,
        required: usize,
    },
    #[error("{kind} {field} mismatch: expected {expected}, found {actual}")]
    FieldMismatch {
        kind: RecordKind,
        field: &'static str,
        expected: Pubkey,
        actual: Pubkey,
    },
    #[error("{kind} {field} has unknown value {value}")]
    UnknownEnumValue {
        kind: RecordKind,
        field: &'static str,
        value: u8,
    },
    #[error("{kind} account is malformed: {reason}")]
    Malformed { kind: RecordKind, reason: String },

    // Credential state errors
    #[error("credential expired at {expired_at} (now {now})")]
    Expired { expired_at: i64, now: i64 },
    #[error("credential is {0}")]
    InactiveState(GatewayTokenState),

    // Arithmetic errors
    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    // Collaborator errors
    #[error("ledger client error: {0}")]
    Ledger(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}
