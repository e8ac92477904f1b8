//! Error definitions for the messaging endpoint program.

use account_ledger::LedgerError;
use thiserror::Error;

use crate::governance::GovernanceError;

/// First custom error code; codes below belong to the ledger.
pub const ERROR_CODE_OFFSET: u32 = 6000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    #[error("Caller is not authorized")]
    CallerNotAuthorized,

    #[error("Bitmap index is out of bounds")]
    BitmapIndexOutOfBounds,

    #[error("Maximum number of adapters reached")]
    MaxAdaptersReached,

    #[error("Adapter is already enabled")]
    AdapterAlreadyEnabled,

    #[error("Adapter is already disabled")]
    AdapterAlreadyDisabled,

    #[error("An admin transfer is in progress")]
    AdminTransferInProgress,

    #[error("No admin transfer is in progress")]
    NoAdminTransferInProgress,

    #[error("Invalid chain id")]
    InvalidChainId,

    #[error("Adapter is not enabled")]
    AdapterNotEnabled,

    #[error("Adapter has already attested to this message")]
    DuplicateMessageAttestation,

    #[error("Message has already been picked up by this adapter")]
    MessageAlreadyPickedUp,

    #[error("Message has already been executed")]
    AlreadyExecuted,

    #[error("No attestation exists for this message")]
    UnknownMessageAttestation,

    #[error("Message hash does not match the attested message")]
    InvalidMessageHash,

    #[error("Message is not destined for this chain")]
    InvalidDestinationChain,

    #[error("Adapter is already registered")]
    AdapterAlreadyRegistered,

    #[error("Adapter is not registered")]
    AdapterNotRegistered,

    #[error("Refund recipient does not match the outbox message")]
    InvalidRefundRecipient,

    #[error("Receive threshold must be between 1 and the adapter limit")]
    InvalidThreshold,

    #[error("Not enough enabled adapters have attested to this message")]
    InsufficientAttestations,

    #[error("Admin cannot be the zero address")]
    InvalidAdminZeroAddress,

    #[error("Invalid instruction data")]
    InvalidInstructionData,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl EndpointError {
    pub fn error_code(&self) -> u32 {
        let index = match self {
            EndpointError::CallerNotAuthorized => 0,
            EndpointError::BitmapIndexOutOfBounds => 1,
            EndpointError::MaxAdaptersReached => 2,
            EndpointError::AdapterAlreadyEnabled => 3,
            EndpointError::AdapterAlreadyDisabled => 4,
            EndpointError::AdminTransferInProgress => 5,
            EndpointError::NoAdminTransferInProgress => 6,
            EndpointError::InvalidChainId => 7,
            EndpointError::AdapterNotEnabled => 8,
            EndpointError::DuplicateMessageAttestation => 9,
            EndpointError::MessageAlreadyPickedUp => 10,
            EndpointError::AlreadyExecuted => 11,
            EndpointError::UnknownMessageAttestation => 12,
            EndpointError::InvalidMessageHash => 13,
            EndpointError::InvalidDestinationChain => 14,
            EndpointError::AdapterAlreadyRegistered => 15,
            EndpointError::AdapterNotRegistered => 16,
            EndpointError::InvalidRefundRecipient => 17,
            EndpointError::InvalidThreshold => 18,
            EndpointError::InsufficientAttestations => 19,
            EndpointError::InvalidAdminZeroAddress => 20,
            EndpointError::InvalidInstructionData => 21,
            EndpointError::ArithmeticOverflow => 22,
            EndpointError::Ledger(e) => return e.error_code(),
        };
        ERROR_CODE_OFFSET + index
    }
}

impl From<GovernanceError> for EndpointError {
    fn from(e: GovernanceError) -> Self {
        match e {
            GovernanceError::CallerNotAdmin => EndpointError::CallerNotAuthorized,
            GovernanceError::TransferPending => EndpointError::AdminTransferInProgress,
            GovernanceError::NoTransferPending => EndpointError::NoAdminTransferInProgress,
            GovernanceError::ZeroAddress => EndpointError::InvalidAdminZeroAddress,
        }
    }
}
