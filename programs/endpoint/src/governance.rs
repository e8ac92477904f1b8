//! Two-step admin governance.
//!
//! An `AdminState` is always in one of three states:
//!
//! - no admin (after a discard, terminal)
//! - owned by `admin`
//! - owned by `admin` with a transfer pending to `pending_admin`
//!
//! Every mutation other than `claim_admin` requires the caller to be the
//! current admin and no transfer to be pending. The pending candidate becomes
//! admin only by claiming. The endpoint and the guardian adapter embed this
//! state and translate `GovernanceError` into their own error names.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("Caller is not the admin")]
    CallerNotAdmin,

    #[error("An admin transfer is already pending")]
    TransferPending,

    #[error("No admin transfer is pending")]
    NoTransferPending,

    #[error("Admin cannot be the zero address")]
    ZeroAddress,
}

/// Result of a governance transition, used for the emitted events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminChange {
    pub old_admin: Pubkey,
    pub new_admin: Option<Pubkey>,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminState {
    /// Current admin; `None` once discarded
    pub admin: Option<Pubkey>,
    /// Candidate of an in-flight two-step transfer
    pub pending_admin: Option<Pubkey>,
}

impl AdminState {
    pub fn new(admin: Pubkey) -> Result<Self, GovernanceError> {
        if admin == Pubkey::default() {
            return Err(GovernanceError::ZeroAddress);
        }
        Ok(Self {
            admin: Some(admin),
            pending_admin: None,
        })
    }

    pub fn is_admin(&self, caller: &Pubkey) -> bool {
        self.admin.as_ref() == Some(caller)
    }

    pub fn has_pending_transfer(&self) -> bool {
        self.pending_admin.is_some()
    }

    pub fn require_admin(&self, caller: &Pubkey) -> Result<Pubkey, GovernanceError> {
        match self.admin {
            Some(admin) if admin == *caller => Ok(admin),
            _ => Err(GovernanceError::CallerNotAdmin),
        }
    }

    /// Admin check used by every gated operation: caller is admin and no
    /// transfer is in flight.
    pub fn require_settled_admin(&self, caller: &Pubkey) -> Result<Pubkey, GovernanceError> {
        let admin = self.require_admin(caller)?;
        if self.has_pending_transfer() {
            return Err(GovernanceError::TransferPending);
        }
        Ok(admin)
    }

    pub fn transfer_admin(
        &mut self,
        caller: &Pubkey,
        candidate: Pubkey,
    ) -> Result<AdminChange, GovernanceError> {
        let admin = self.require_settled_admin(caller)?;
        if candidate == Pubkey::default() {
            return Err(GovernanceError::ZeroAddress);
        }
        self.pending_admin = Some(candidate);
        Ok(AdminChange {
            old_admin: admin,
            new_admin: Some(candidate),
        })
    }

    pub fn claim_admin(&mut self, caller: &Pubkey) -> Result<AdminChange, GovernanceError> {
        let pending = self.pending_admin.ok_or(GovernanceError::NoTransferPending)?;
        if pending != *caller {
            return Err(GovernanceError::CallerNotAdmin);
        }
        let old_admin = self.admin.unwrap_or_default();
        self.admin = Some(pending);
        self.pending_admin = None;
        Ok(AdminChange {
            old_admin,
            new_admin: Some(pending),
        })
    }

    pub fn update_admin(
        &mut self,
        caller: &Pubkey,
        new_admin: Pubkey,
    ) -> Result<AdminChange, GovernanceError> {
        let admin = self.require_settled_admin(caller)?;
        if new_admin == Pubkey::default() {
            return Err(GovernanceError::ZeroAddress);
        }
        self.admin = Some(new_admin);
        Ok(AdminChange {
            old_admin: admin,
            new_admin: Some(new_admin),
        })
    }

    pub fn discard_admin(&mut self, caller: &Pubkey) -> Result<AdminChange, GovernanceError> {
        let admin = self.require_settled_admin(caller)?;
        self.admin = None;
        Ok(AdminChange {
            old_admin: admin,
            new_admin: None,
        })
    }

    /// Abort a pending transfer. The admin stays unchanged.
    pub fn cancel_admin_transfer(&mut self, caller: &Pubkey) -> Result<AdminChange, GovernanceError> {
        let admin = self.require_admin(caller)?;
        if self.pending_admin.take().is_none() {
            return Err(GovernanceError::NoTransferPending);
        }
        Ok(AdminChange {
            old_admin: admin,
            new_admin: Some(admin),
        })
    }
}
