//! Error definitions for the guardian adapter program.

use account_ledger::LedgerError;
use messaging_endpoint::governance::GovernanceError;
use messaging_endpoint::peer::PeerError;
use messaging_endpoint::EndpointError;
use thiserror::Error;

/// First custom error code, shared with the endpoint's numbering scheme.
pub const ERROR_CODE_OFFSET: u32 = 6000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardianAdapterError {
    #[error("Caller is not the admin")]
    CallerNotAdmin,

    #[error("Admin transfer is already pending")]
    AdminTransferPending,

    #[error("No admin update is pending")]
    NoAdminUpdatePending,

    #[error("Invalid zero address provided for admin")]
    InvalidAdminZeroAddress,

    #[error("Endpoint program does not match the configured endpoint")]
    InvalidEndpointProgram,

    #[error("Invalid chain ID")]
    InvalidChain,

    #[error("Invalid peer address (zero address)")]
    InvalidPeerZeroAddress,

    #[error("Peer already set for chain")]
    PeerAlreadySet,

    #[error("Invalid VAA")]
    InvalidVaa,

    #[error("Invalid peer for emitter chain")]
    InvalidPeer,

    #[error("Invalid payload length")]
    InvalidPayloadLength,

    #[error("Invalid instruction data")]
    InvalidInstructionData,

    #[error("Outbox message does not match the declared sender and sequence")]
    InvalidOutboxMessage,

    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl GuardianAdapterError {
    pub fn error_code(&self) -> u32 {
        let index = match self {
            GuardianAdapterError::CallerNotAdmin => 0,
            GuardianAdapterError::AdminTransferPending => 1,
            GuardianAdapterError::NoAdminUpdatePending => 2,
            GuardianAdapterError::InvalidAdminZeroAddress => 3,
            GuardianAdapterError::InvalidEndpointProgram => 4,
            GuardianAdapterError::InvalidChain => 5,
            GuardianAdapterError::InvalidPeerZeroAddress => 6,
            GuardianAdapterError::PeerAlreadySet => 7,
            GuardianAdapterError::InvalidVaa => 8,
            GuardianAdapterError::InvalidPeer => 9,
            GuardianAdapterError::InvalidPayloadLength => 10,
            GuardianAdapterError::InvalidInstructionData => 11,
            GuardianAdapterError::InvalidOutboxMessage => 12,
            GuardianAdapterError::Endpoint(e) => return e.error_code(),
            GuardianAdapterError::Ledger(e) => return e.error_code(),
        };
        ERROR_CODE_OFFSET + index
    }
}

impl From<GovernanceError> for GuardianAdapterError {
    fn from(e: GovernanceError) -> Self {
        match e {
            GovernanceError::CallerNotAdmin => GuardianAdapterError::CallerNotAdmin,
            GovernanceError::TransferPending => GuardianAdapterError::AdminTransferPending,
            GovernanceError::NoTransferPending => GuardianAdapterError::NoAdminUpdatePending,
            GovernanceError::ZeroAddress => GuardianAdapterError::InvalidAdminZeroAddress,
        }
    }
}

impl From<PeerError> for GuardianAdapterError {
    fn from(e: PeerError) -> Self {
        match e {
            PeerError::InvalidChain => GuardianAdapterError::InvalidChain,
            PeerError::ZeroAddress => GuardianAdapterError::InvalidPeerZeroAddress,
            PeerError::AlreadySet => GuardianAdapterError::PeerAlreadySet,
            PeerError::UnknownPeer => GuardianAdapterError::InvalidPeer,
        }
    }
}
