use anchor_lang::prelude::Pubkey;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::ReaderConfig;
use crate::error::*;
use crate::ledger::{AccountSource, LedgerAccount};
use crate::pda::find_gateway_token_address;
use crate::state::*;

/// Why a wallet's credential was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// No gateway token at the derived address
    NotFound,
    /// Account not owned by the gateway program
    OwnerMismatch,
    /// Token belongs to another wallet or network
    FieldMismatch,
    /// Token is frozen or revoked
    WrongState,
    Expired,
    /// Data too short or carrying unknown values
    Malformed,
    /// The ledger client failed to answer
    LedgerUnavailable,
}

impl RejectReason {
    pub fn from_error(err: &HubReaderError) -> Self {
        match err {
            HubReaderError::NotFound { .. } => RejectReason::NotFound,
            HubReaderError::OwnerMismatch { .. } => RejectReason::OwnerMismatch,
            HubReaderError::FieldMismatch { .. } => RejectReason::FieldMismatch,
            HubReaderError::InactiveState(_) => RejectReason::WrongState,
            HubReaderError::Expired { .. } => RejectReason::Expired,
            HubReaderError::Ledger(_) => RejectReason::LedgerUnavailable,
            HubReaderError::TooSmall { .. }
            | HubReaderError::UnknownEnumValue { .. }
            | HubReaderError::Malformed { .. }
            | HubReaderError::ArithmeticOverflow
            | HubReaderError::Config(_) => RejectReason::Malformed,
        }
    }
}

/**
 * Outcome of a credential check
 *
 * `is_valid` is true only for an existing, correctly owned, well-formed token
 * issued to the wallet on the configured network, in the ACTIVE state and not
 * past its expiry. Every other outcome carries a `reason` and a message that
 * can be shown to the wallet holder as is.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialVerdict {
    pub wallet: Pubkey,
    /// Derived gateway token address that was checked
    pub gateway_token: Pubkey,
    pub is_valid: bool,
    pub state: Option<GatewayTokenState>,
    pub expires_at: Option<i64>,
    pub reason: Option<RejectReason>,
    pub message: String,
}

impl CredentialVerdict {
    fn rejected(
        wallet: Pubkey,
        gateway_token: Pubkey,
        err: &HubReaderError,
        token: Option<&GatewayToken>,
    ) -> Self {
        let reason = RejectReason::from_error(err);
        let message = match err {
            HubReaderError::NotFound { .. } => {
                "No gateway token found. Please complete identity verification.".to_string()
            }
            HubReaderError::OwnerMismatch { .. } => {
                "Invalid gateway token: account not owned by the gateway program.".to_string()
            }
            HubReaderError::FieldMismatch { field: "owner_wallet", .. } => {
                "Invalid gateway token: owner wallet mismatch.".to_string()
            }
            HubReaderError::FieldMismatch { field: "gatekeeper_network", .. } => {
                "Invalid gateway token: issued on a different gatekeeper network.".to_string()
            }
            HubReaderError::InactiveState(state) => format!("Gateway token is {state}."),
            HubReaderError::Expired { expired_at, .. } => format!(
                "Gateway token expired at {}. Please renew your verification.",
                format_timestamp(*expired_at)
            ),
            HubReaderError::Ledger(cause) => format!("Verification failed: {cause}"),
            other => format!("Invalid gateway token: {other}"),
        };

        Self {
            wallet,
            gateway_token,
            is_valid: false,
            state: token.map(|t| t.state),
            expires_at: token.and_then(GatewayToken::expires_at),
            reason: Some(reason),
            message,
        }
    }
}

/// Checks `account`, the raw gateway token fetched for `wallet`, at time `now`
pub fn verify_credential(
    config: &ReaderConfig,
    wallet: &Pubkey,
    account: Option<&LedgerAccount>,
    now: i64,
) -> CredentialVerdict {
    let (gateway_token, _) =
        find_gateway_token_address(wallet, &config.gatekeeper_network, &config.gateway_program_id);

    let Some(account) = account else {
        let err = HubReaderError::NotFound {
            kind: RecordKind::Credential,
            address: gateway_token,
        };
        return reject(*wallet, gateway_token, &err, None);
    };

    let token = match GatewayToken::decode(
        account,
        &config.gateway_program_id,
        wallet,
        &config.gatekeeper_network,
    ) {
        Ok(token) => token,
        Err(err) => return reject(*wallet, gateway_token, &err, None),
    };

    if let Err(err) = token.ensure_usable(now) {
        return reject(*wallet, gateway_token, &err, Some(&token));
    }

    CredentialVerdict {
        wallet: *wallet,
        gateway_token,
        is_valid: true,
        state: Some(token.state),
        expires_at: token.expires_at(),
        reason: None,
        message: "Identity verified. You can transfer tokens.".to_string(),
    }
}

fn reject(
    wallet: Pubkey,
    gateway_token: Pubkey,
    err: &HubReaderError,
    token: Option<&GatewayToken>,
) -> CredentialVerdict {
    debug!(target: "hub_reader", "Credential rejected for {}: {}", wallet, err);
    CredentialVerdict::rejected(wallet, gateway_token, err, token)
}

fn format_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}

/// Credential gate bound to a configuration
#[derive(Debug, Clone, Default)]
pub struct CredentialGate {
    pub config: ReaderConfig,
}

impl CredentialGate {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Derives the wallet's gateway token address, fetches it and checks it
    pub fn verify<S: AccountSource + ?Sized>(
        &self,
        source: &S,
        wallet: &Pubkey,
        now: i64,
    ) -> CredentialVerdict {
        let (address, _) = find_gateway_token_address(
            wallet,
            &self.config.gatekeeper_network,
            &self.config.gateway_program_id,
        );

        match source.get_account(&address) {
            Ok(account) => verify_credential(&self.config, wallet, account.as_ref(), now),
            Err(err) => {
                warn!(
                    target: "hub_reader",
                    "Gateway token lookup failed for {}: {}", wallet, err
                );
                CredentialVerdict::rejected(*wallet, address, &err, None)
            }
        }
    }

    pub fn verify_now<S: AccountSource + ?Sized>(
        &self,
        source: &S,
        wallet: &Pubkey,
    ) -> CredentialVerdict {
        self.verify(source, wallet, Utc::now().timestamp())
    }

    pub fn is_verified<S: AccountSource + ?Sized>(
        &self,
        source: &S,
        wallet: &Pubkey,
        now: i64,
    ) -> bool {
        self.verify(source, wallet, now).is_valid
    }
}
