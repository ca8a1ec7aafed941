use std::fmt;

use anchor_lang::prelude::Pubkey;

use crate::constants::*;
use crate::error::*;
use crate::ledger::LedgerAccount;
use crate::utils::AccountCursor;

use super::{ensure_owner, RecordKind};

/**
 * Gateway token (identity credential) account
 *
 * Issued by a gatekeeper on a gatekeeper network to attest a wallet's
 * identity verification. A token only counts for the wallet it was decoded
 * for and only on the configured network; any mismatch rejects the whole
 * account.
 *
 * Derivation: [wallet, "gateway", [0u8; 8], gatekeeper_network] under the
 * gateway program
 *
 * Layout (offsets move with the optional fields):
 * - version u8
 * - parent_gateway_token Option<Pubkey>
 * - owner_wallet Pubkey
 * - owner_identity Option<Pubkey>
 * - gatekeeper_network Pubkey
 * - issuing_gatekeeper Pubkey (skipped)
 * - state u8
 * - expire_time Option<i64>
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayToken {
    pub version: u8,
    pub parent_gateway_token: Option<Pubkey>,
    pub owner_wallet: Pubkey,
    pub owner_identity: Option<Pubkey>,
    pub gatekeeper_network: Pubkey,
    pub state: GatewayTokenState,
    /// Raw expiry as stored; see [`GatewayToken::expires_at`]
    pub expire_time: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayTokenState {
    Active,
    Frozen,
    Revoked,
}

impl TryFrom<u8> for GatewayTokenState {
    type Error = HubReaderError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(GatewayTokenState::Active),
            1 => Ok(GatewayTokenState::Frozen),
            2 => Ok(GatewayTokenState::Revoked),
            value => Err(HubReaderError::UnknownEnumValue {
                kind: RecordKind::Credential,
                field: "state",
                value,
            }),
        }
    }
}

impl fmt::Display for GatewayTokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GatewayTokenState::Active => "ACTIVE",
            GatewayTokenState::Frozen => "FROZEN",
            GatewayTokenState::Revoked => "REVOKED",
        };
        f.write_str(name)
    }
}

impl GatewayToken {
    pub const MIN_LEN: usize = GATEWAY_TOKEN_MIN_LEN;

    /// Decodes a gateway token for `wallet` issued on `network`
    pub fn decode(
        account: &LedgerAccount,
        gateway_program: &Pubkey,
        wallet: &Pubkey,
        network: &Pubkey,
    ) -> Result<Self> {
        ensure_owner(RecordKind::Credential, account, gateway_program)?;

        let mut cursor = AccountCursor::new(RecordKind::Credential, &account.data);
        cursor.require_len(Self::MIN_LEN)?;

        let version = cursor.read_u8()?;
        let parent_gateway_token = cursor.read_option_pubkey("parent_gateway_token")?;

        let owner_wallet = cursor.read_pubkey()?;
        ensure_field("owner_wallet", wallet, &owner_wallet)?;

        let owner_identity = cursor.read_option_pubkey("owner_identity")?;

        let gatekeeper_network = cursor.read_pubkey()?;
        ensure_field("gatekeeper_network", network, &gatekeeper_network)?;

        cursor.skip(PUBKEY_LEN)?;
        let state = GatewayTokenState::try_from(cursor.read_u8()?)?;
        let expire_time = cursor.read_option_i64("expire_time")?;

        Ok(Self {
            version,
            parent_gateway_token,
            owner_wallet,
            owner_identity,
            gatekeeper_network,
            state,
            expire_time,
        })
    }

    /// Expiry in Unix seconds; a stored zero means the token never expires
    pub fn expires_at(&self) -> Option<i64> {
        self.expire_time.filter(|t| *t > 0)
    }

    /// Usable means active and, if it expires, not yet expired at `now`
    pub fn ensure_usable(&self, now: i64) -> Result<()> {
        if self.state != GatewayTokenState::Active {
            return Err(HubReaderError::InactiveState(self.state));
        }
        match self.expires_at() {
            Some(expired_at) if expired_at <= now => {
                Err(HubReaderError::Expired { expired_at, now })
            }
            _ => Ok(()),
        }
    }
}

fn ensure_field(field: &'static str, expected: &Pubkey, actual: &Pubkey) -> Result<()> {
    if expected != actual {
        return Err(HubReaderError::FieldMismatch {
            kind: RecordKind::Credential,
            field,
            expected: *expected,
            actual: *actual,
        });
    }
    Ok(())
}
