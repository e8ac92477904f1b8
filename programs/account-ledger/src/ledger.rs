//! The account store and its transaction view.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use borsh::BorshSerialize;
use solana_program::{pubkey::Pubkey, rent::Rent};
use tracing::debug;

use crate::account::{Account, AccountState};
use crate::error::LedgerError;
use crate::signer::Signer;

/// A program log record, committed together with the transaction that emitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Program that emitted the record
    pub program_id: Pubkey,
    /// Borsh-encoded event
    pub data: Vec<u8>,
}

/// In-process account store.
///
/// Every account sits behind its own mutex; there is no lock over the whole
/// store apart from the slot table, which is only held while looking up or
/// inserting a slot.
pub struct Ledger {
    slots: RwLock<HashMap<Pubkey, Arc<Mutex<Account>>>>,
    logs: Mutex<Vec<LogEntry>>,
    rent: Rent,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_rent(Rent::default())
    }

    pub fn with_rent(rent: Rent) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            logs: Mutex::new(Vec::new()),
            rent,
        }
    }

    pub fn rent(&self) -> &Rent {
        &self.rent
    }

    fn slot(&self, key: &Pubkey) -> Result<Arc<Mutex<Account>>, LedgerError> {
        if let Some(slot) = self
            .slots
            .read()
            .map_err(|_| LedgerError::LockPoisoned)?
            .get(key)
        {
            return Ok(slot.clone());
        }
        let mut slots = self.slots.write().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(slots.entry(*key).or_default().clone())
    }

    /// Snapshot of an account, or `None` if it does not exist.
    pub fn get_account(&self, key: &Pubkey) -> Result<Option<Account>, LedgerError> {
        let slot = match self
            .slots
            .read()
            .map_err(|_| LedgerError::LockPoisoned)?
            .get(key)
        {
            Some(slot) => slot.clone(),
            None => return Ok(None),
        };
        let account = slot.lock().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(account.exists().then(|| account.clone()))
    }

    /// Decode typed state from an account outside of any transaction.
    pub fn read_state<T: AccountState>(
        &self,
        key: &Pubkey,
        program_id: &Pubkey,
    ) -> Result<Option<T>, LedgerError> {
        match self.get_account(key)? {
            Some(account) if !account.data_is_empty() => {
                T::unpack(&account, program_id).map(Some)
            }
            _ => Ok(None),
        }
    }

    pub fn balance(&self, key: &Pubkey) -> Result<u64, LedgerError> {
        Ok(self.get_account(key)?.map(|a| a.lamports).unwrap_or(0))
    }

    /// Credit lamports out of thin air. Used to fund payers.
    pub fn airdrop(&self, key: &Pubkey, lamports: u64) -> Result<(), LedgerError> {
        let slot = self.slot(key)?;
        let mut account = slot.lock().map_err(|_| LedgerError::LockPoisoned)?;
        account.lamports = account
            .lamports
            .checked_add(lamports)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(())
    }

    /// All existing accounts owned by `owner`, ordered by address.
    pub fn program_accounts(&self, owner: &Pubkey) -> Result<Vec<(Pubkey, Account)>, LedgerError> {
        let slots: Vec<(Pubkey, Arc<Mutex<Account>>)> = self
            .slots
            .read()
            .map_err(|_| LedgerError::LockPoisoned)?
            .iter()
            .map(|(key, slot)| (*key, slot.clone()))
            .collect();

        let mut accounts = Vec::new();
        for (key, slot) in slots {
            let account = slot.lock().map_err(|_| LedgerError::LockPoisoned)?;
            if account.owner == *owner && !account.data_is_empty() {
                accounts.push((key, account.clone()));
            }
        }
        accounts.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(accounts)
    }

    /// All committed program logs, oldest first.
    pub fn logs(&self) -> Result<Vec<LogEntry>, LedgerError> {
        Ok(self.logs.lock().map_err(|_| LedgerError::LockPoisoned)?.clone())
    }

    /// Logs committed after `cursor`, plus the cursor to resume from.
    pub fn logs_since(&self, cursor: usize) -> Result<(Vec<LogEntry>, usize), LedgerError> {
        let logs = self.logs.lock().map_err(|_| LedgerError::LockPoisoned)?;
        let start = cursor.min(logs.len());
        Ok((logs[start..].to_vec(), logs.len()))
    }

    /// Number of account slots currently held by the store.
    pub fn slot_count(&self) -> Result<usize, LedgerError> {
        Ok(self.slots.read().map_err(|_| LedgerError::LockPoisoned)?.len())
    }

    /// Run `f` as one atomic transaction over `keys`.
    ///
    /// The payer is always part of the account set and always a signer.
    /// Accounts are locked in ascending key order, `f` works on staged copies,
    /// and nothing (accounts or logs) is written back unless `f` returns `Ok`.
    /// Slots left without lamports or data are dropped afterwards, whether the
    /// transaction committed or not.
    pub fn transact<T, E, F>(
        &self,
        payer: &Signer,
        signers: &[Signer],
        keys: &[Pubkey],
        f: F,
    ) -> Result<T, E>
    where
        E: From<LedgerError>,
        F: FnOnce(&mut AccountSet) -> Result<T, E>,
    {
        let mut ordered: Vec<Pubkey> = keys.to_vec();
        ordered.push(*payer.key());
        ordered.sort();
        ordered.dedup();

        let result = self.run(payer, signers, &ordered, f);
        self.prune(&ordered)?;
        result
    }

    fn run<T, E, F>(
        &self,
        payer: &Signer,
        signers: &[Signer],
        ordered: &[Pubkey],
        f: F,
    ) -> Result<T, E>
    where
        E: From<LedgerError>,
        F: FnOnce(&mut AccountSet) -> Result<T, E>,
    {
        let slots = ordered
            .iter()
            .map(|key| self.slot(key))
            .collect::<Result<Vec<_>, _>>()?;
        let mut guards = Vec::with_capacity(slots.len());
        for slot in &slots {
            guards.push(slot.lock().map_err(|_| LedgerError::LockPoisoned)?);
        }

        let mut signer_keys: Vec<Pubkey> = signers.iter().map(|s| *s.key()).collect();
        signer_keys.push(*payer.key());

        let mut set = AccountSet {
            payer: *payer.key(),
            signers: signer_keys,
            accounts: ordered
                .iter()
                .zip(guards.iter())
                .map(|(key, guard)| (*key, (**guard).clone()))
                .collect(),
            logs: Vec::new(),
            rent: self.rent.clone(),
        };

        let output = f(&mut set)?;

        for (guard, (_, account)) in guards.iter_mut().zip(set.accounts) {
            **guard = account;
        }
        self.logs
            .lock()
            .map_err(|_| LedgerError::LockPoisoned)?
            .extend(set.logs);
        Ok(output)
    }

    /// Drop the slots of `keys` that hold nothing and that no other
    /// transaction has checked out.
    fn prune(&self, keys: &[Pubkey]) -> Result<(), LedgerError> {
        let mut slots = self.slots.write().map_err(|_| LedgerError::LockPoisoned)?;
        for key in keys {
            let empty = match slots.get(key) {
                // Clones are only taken under the table lock, so a count of one
                // means no transaction can be holding this slot
                Some(slot) if Arc::strong_count(slot) == 1 => {
                    !slot.lock().map_err(|_| LedgerError::LockPoisoned)?.exists()
                }
                _ => false,
            };
            if empty {
                slots.remove(key);
            }
        }
        Ok(())
    }
}

/// The locked, staged accounts of one transaction.
pub struct AccountSet {
    payer: Pubkey,
    signers: Vec<Pubkey>,
    accounts: Vec<(Pubkey, Account)>,
    logs: Vec<LogEntry>,
    rent: Rent,
}

impl AccountSet {
    pub fn payer(&self) -> &Pubkey {
        &self.payer
    }

    pub fn is_signer(&self, key: &Pubkey) -> bool {
        self.signers.contains(key)
    }

    pub fn require_signer(&self, key: &Pubkey) -> Result<(), LedgerError> {
        if self.is_signer(key) {
            Ok(())
        } else {
            Err(LedgerError::MissingRequiredSignature(*key))
        }
    }

    /// Add the PDA for `seeds` under `program_id` to the signer set, the
    /// equivalent of `invoke_signed` before calling into another program.
    pub fn sign_as_program(&mut self, seeds: &[&[u8]], program_id: &Pubkey) -> Pubkey {
        let (signer, _) = Signer::program_derived(seeds, program_id);
        if !self.signers.contains(signer.key()) {
            self.signers.push(*signer.key());
        }
        *signer.key()
    }

    fn position(&self, key: &Pubkey) -> Result<usize, LedgerError> {
        self.accounts
            .binary_search_by(|(k, _)| k.cmp(key))
            .map_err(|_| LedgerError::AccountNotLocked(*key))
    }

    pub fn account(&self, key: &Pubkey) -> Result<&Account, LedgerError> {
        let idx = self.position(key)?;
        Ok(&self.accounts[idx].1)
    }

    pub fn account_mut(&mut self, key: &Pubkey) -> Result<&mut Account, LedgerError> {
        let idx = self.position(key)?;
        Ok(&mut self.accounts[idx].1)
    }

    pub fn exists(&self, key: &Pubkey) -> Result<bool, LedgerError> {
        Ok(self.account(key)?.exists())
    }

    pub fn load<T: AccountState>(&self, key: &Pubkey, program_id: &Pubkey) -> Result<T, LedgerError> {
        T::unpack(self.account(key)?, program_id)
    }

    pub fn load_if_exists<T: AccountState>(
        &self,
        key: &Pubkey,
        program_id: &Pubkey,
    ) -> Result<Option<T>, LedgerError> {
        let account = self.account(key)?;
        if account.data_is_empty() {
            return Ok(None);
        }
        T::unpack(account, program_id).map(Some)
    }

    /// Create a program account holding `state`, funding its rent from the payer.
    pub fn init<T: AccountState>(
        &mut self,
        key: &Pubkey,
        program_id: &Pubkey,
        state: &T,
    ) -> Result<(), LedgerError> {
        if !self.account(key)?.data_is_empty() {
            return Err(LedgerError::AccountAlreadyInitialized);
        }
        let data = state.pack()?;
        self.fund_rent(key, data.len())?;
        let account = self.account_mut(key)?;
        account.owner = *program_id;
        account.data = data;
        debug!("Account created: key={}, owner={}", key, program_id);
        Ok(())
    }

    /// Overwrite an existing program account, topping up rent if it grew.
    pub fn store<T: AccountState>(
        &mut self,
        key: &Pubkey,
        program_id: &Pubkey,
        state: &T,
    ) -> Result<(), LedgerError> {
        let account = self.account(key)?;
        if account.data_is_empty() {
            return Err(LedgerError::AccountNotInitialized);
        }
        if account.owner != *program_id {
            return Err(LedgerError::InvalidAccountOwner);
        }
        let data = state.pack()?;
        self.fund_rent(key, data.len())?;
        self.account_mut(key)?.data = data;
        Ok(())
    }

    fn fund_rent(&mut self, key: &Pubkey, data_len: usize) -> Result<(), LedgerError> {
        let required = self.rent.minimum_balance(data_len);
        let held = self.account(key)?.lamports;
        if required > held {
            let payer = self.payer;
            self.transfer(&payer, key, required - held)?;
            debug!("Rent funded: key={}, lamports={}", key, required - held);
        }
        Ok(())
    }

    pub fn transfer(&mut self, from: &Pubkey, to: &Pubkey, lamports: u64) -> Result<(), LedgerError> {
        if from == to || lamports == 0 {
            return Ok(());
        }
        self.require_signer(from)?;
        let available = self.account(from)?.lamports;
        if available < lamports {
            return Err(LedgerError::InsufficientFunds {
                needed: lamports,
                available,
            });
        }
        let credited = self
            .account(to)?
            .lamports
            .checked_add(lamports)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.account_mut(from)?.lamports = available - lamports;
        self.account_mut(to)?.lamports = credited;
        Ok(())
    }

    /// Close a program account, moving all of its lamports to `recipient`.
    /// Returns the reclaimed amount.
    pub fn close(&mut self, key: &Pubkey, recipient: &Pubkey) -> Result<u64, LedgerError> {
        let reclaimed = self.account(key)?.lamports;
        let credited = self
            .account(recipient)?
            .lamports
            .checked_add(reclaimed)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        *self.account_mut(key)? = Account::default();
        self.account_mut(recipient)?.lamports = credited;
        debug!("Account closed: key={}, refunded {} to {}", key, reclaimed, recipient);
        Ok(reclaimed)
    }

    /// Record a borsh-encoded event for `program_id`.
    pub fn emit<E: BorshSerialize>(&mut self, program_id: &Pubkey, event: &E) -> Result<(), LedgerError> {
        let data = event.try_to_vec().map_err(|e| LedgerError::InvalidAccountData(e.to_string()))?;
        self.logs.push(LogEntry {
            program_id: *program_id,
            data,
        });
        Ok(())
    }
}
