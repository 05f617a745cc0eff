// Ledger state - Balances, allowances, and supply under guarded mutation
//
// Every operation checks all of its guards, computes every new value with
// checked arithmetic, and only then writes. A failed operation leaves the
// ledger unchanged.

use crate::account::AccountId;
use crate::ledger::config::{ConfigError, LedgerBuilder};
use crate::ledger::policy::{BurnPolicy, MintPolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Account {caller} is not authorized for this operation")]
    Unauthorized { caller: AccountId },

    #[error("The zero address is not a valid operation target")]
    InvalidAccount,

    #[error("Supply ceiling exceeded: minting {requested} on top of {minted} would pass the ceiling of {ceiling}")]
    SupplyCeilingExceeded {
        requested: u64,
        minted: u64,
        ceiling: u64,
    },

    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientBalance { available: u64, required: u64 },

    #[error("Allowance exceeded: available {available}, required {required}")]
    AllowanceExceeded { available: u64, required: u64 },

    /// Unreachable when the guards hold; a bug signal, not a domain error
    #[error("Arithmetic fault: internal counter over- or underflowed")]
    ArithmeticFault,
}

/// Errors from restoring a snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Deserialization failed: {0}")]
    Deserialization(String),

    #[error("Snapshot supply mismatch: recorded {recorded}, balances sum to {computed}")]
    SupplyMismatch { recorded: u64, computed: u128 },

    #[error("Snapshot exceeds its own ceiling: total supply {total_supply}, ceiling {supply_ceiling}")]
    CeilingExceeded {
        total_supply: u64,
        supply_ceiling: u64,
    },

    #[error("Snapshot contains an entry for the zero address")]
    SentinelEntry,
}

/// Statistics about the ledger
#[derive(Clone, Debug)]
pub struct LedgerStatistics {
    /// Accounts holding a balance entry
    pub accounts: usize,
    /// (owner, spender) allowance entries
    pub approvals: usize,
    /// Current total supply
    pub total_supply: u64,
    /// Remaining mintable amount below the ceiling
    pub headroom: u64,
}

/// Full ledger state for external persistence
///
/// Fields are public: persistence collaborators read them to store the
/// state in their own format, and [`Ledger::from_snapshot`] revalidates
/// the accounting invariants before accepting one back.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub owner: AccountId,
    pub supply_ceiling: u64,
    pub total_supply: u64,
    pub balances: HashMap<AccountId, u64>,
    pub allowances: HashMap<(AccountId, AccountId), u64>,
    pub mint_policy: MintPolicy,
    pub burn_policy: BurnPolicy,
}

/// The ledger - tracks balances, allowances, and total supply
#[derive(Clone, Debug)]
pub struct Ledger {
    /// Token name
    name: String,
    /// Token symbol
    symbol: String,
    /// Amounts are integers in units of 10^-decimals tokens
    decimals: u8,
    /// Account credited with the initial supply; holds the default capabilities
    owner: AccountId,
    /// Immutable upper bound on total supply
    supply_ceiling: u64,
    /// Current total supply; mutated only by mint and burn
    total_supply: u64,
    /// Per-account balances; absence means zero
    balances: HashMap<AccountId, u64>,
    /// Remaining delegated spending per (owner, spender) pair
    allowances: HashMap<(AccountId, AccountId), u64>,
    /// Who may mint
    mint_policy: MintPolicy,
    /// Who may burn
    burn_policy: BurnPolicy,
}

impl Ledger {
    /// Create a ledger with the default owner-only policies
    ///
    /// `initial_supply` is credited entirely to `owner`.
    pub fn new(
        name: &str,
        symbol: &str,
        decimals: u8,
        initial_supply: u64,
        supply_ceiling: u64,
        owner: AccountId,
    ) -> Result<Self, ConfigError> {
        LedgerBuilder::new()
            .name(name)
            .symbol(symbol)
            .decimals(decimals)
            .initial_supply(initial_supply)
            .supply_ceiling(supply_ceiling)
            .owner(owner)
            .build()
    }

    /// Start building a ledger
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::new()
    }

    pub(crate) fn from_parts(
        name: String,
        symbol: String,
        decimals: u8,
        initial_supply: u64,
        supply_ceiling: u64,
        owner: AccountId,
        mint_policy: MintPolicy,
        burn_policy: BurnPolicy,
    ) -> Self {
        let mut balances = HashMap::new();
        if initial_supply > 0 {
            balances.insert(owner, initial_supply);
        }

        Self {
            name,
            symbol,
            decimals,
            owner,
            supply_ceiling,
            total_supply: initial_supply,
            balances,
            allowances: HashMap::new(),
            mint_policy,
            burn_policy,
        }
    }

    // ========================================================================
    // READ-ONLY QUERIES
    // ========================================================================

    /// Token name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Token symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of decimals in the fixed-point representation
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// The ledger owner
    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// Current total supply
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Immutable supply ceiling
    pub fn max_supply(&self) -> u64 {
        self.supply_ceiling
    }

    /// Balance of an account; zero for unknown accounts
    pub fn balance_of(&self, account: &AccountId) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Remaining amount `spender` may move out of `owner`'s balance
    pub fn allowance_of(&self, owner: &AccountId, spender: &AccountId) -> u64 {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    /// Number of accounts with a balance entry
    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Get statistics about the ledger
    pub fn statistics(&self) -> LedgerStatistics {
        LedgerStatistics {
            accounts: self.balances.len(),
            approvals: self.allowances.len(),
            total_supply: self.total_supply,
            headroom: self.supply_ceiling.saturating_sub(self.total_supply),
        }
    }

    // ========================================================================
    // MINT / BURN
    // ========================================================================

    /// Mint new tokens to `recipient`
    ///
    /// The caller must hold the mint capability and the new supply must
    /// stay within the ceiling.
    pub fn mint(
        &mut self,
        caller: &AccountId,
        recipient: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        if !self.mint_policy.permits(caller) {
            return Err(LedgerError::Unauthorized { caller: *caller });
        }

        if recipient.is_zero() {
            return Err(LedgerError::InvalidAccount);
        }

        // The ceiling guard runs on checked arithmetic: an amount large
        // enough to wrap the counter is reported as a ceiling violation,
        // so the commit below can never overflow.
        let new_supply = match self.total_supply.checked_add(amount) {
            Some(supply) if supply <= self.supply_ceiling => supply,
            _ => {
                return Err(LedgerError::SupplyCeilingExceeded {
                    requested: amount,
                    minted: self.total_supply,
                    ceiling: self.supply_ceiling,
                })
            }
        };

        let new_balance = self
            .balance_of(recipient)
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticFault)?;

        self.balances.insert(*recipient, new_balance);
        self.total_supply = new_supply;

        debug!("Minted {} to {}, total supply now {}", amount, recipient, self.total_supply);
        Ok(())
    }

    /// Burn tokens out of `account`
    ///
    /// Authorization is governed by the ledger's [`BurnPolicy`].
    pub fn burn(
        &mut self,
        caller: &AccountId,
        account: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        if account.is_zero() {
            return Err(LedgerError::InvalidAccount);
        }

        if !self.burn_policy.permits(caller, account, &self.owner) {
            return Err(LedgerError::Unauthorized { caller: *caller });
        }

        let available = self.balance_of(account);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                available,
                required: amount,
            });
        }

        let new_balance = available
            .checked_sub(amount)
            .ok_or(LedgerError::ArithmeticFault)?;
        let new_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::ArithmeticFault)?;

        self.balances.insert(*account, new_balance);
        self.total_supply = new_supply;

        debug!("Burned {} from {}, total supply now {}", amount, account, self.total_supply);
        Ok(())
    }

    // ========================================================================
    // TRANSFERS AND ALLOWANCES
    // ========================================================================

    /// Move tokens from `sender` to `recipient`
    ///
    /// Total supply is unchanged. A self-transfer that passes the guards
    /// changes nothing and succeeds.
    pub fn transfer(
        &mut self,
        sender: &AccountId,
        recipient: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        if recipient.is_zero() {
            return Err(LedgerError::InvalidAccount);
        }

        let available = self.balance_of(sender);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                available,
                required: amount,
            });
        }

        if sender == recipient {
            return Ok(());
        }

        let debited = available
            .checked_sub(amount)
            .ok_or(LedgerError::ArithmeticFault)?;
        let credited = self
            .balance_of(recipient)
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticFault)?;

        self.balances.insert(*sender, debited);
        self.balances.insert(*recipient, credited);

        debug!("Transferred {} from {} to {}", amount, sender, recipient);
        Ok(())
    }

    /// Grant `spender` the right to move up to `amount` out of `owner`'s balance
    ///
    /// Sets the allowance outright; it does not add to a prior grant.
    pub fn approve(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        if spender.is_zero() {
            return Err(LedgerError::InvalidAccount);
        }

        self.allowances.insert((*owner, *spender), amount);

        debug!("Approved {} for spender {} on account {}", amount, spender, owner);
        Ok(())
    }

    /// Move tokens out of `owner`'s balance on the strength of an allowance
    ///
    /// On success the (owner, spender) allowance shrinks by exactly `amount`.
    pub fn transfer_from(
        &mut self,
        spender: &AccountId,
        owner: &AccountId,
        recipient: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        if recipient.is_zero() {
            return Err(LedgerError::InvalidAccount);
        }

        let allowance = self.allowance_of(owner, spender);
        if allowance < amount {
            return Err(LedgerError::AllowanceExceeded {
                available: allowance,
                required: amount,
            });
        }

        let available = self.balance_of(owner);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                available,
                required: amount,
            });
        }

        let remaining = allowance
            .checked_sub(amount)
            .ok_or(LedgerError::ArithmeticFault)?;
        let debited = available
            .checked_sub(amount)
            .ok_or(LedgerError::ArithmeticFault)?;

        // A delegated transfer back to the owner nets the balance out but
        // still consumes allowance.
        let credited = if owner == recipient {
            available
        } else {
            self.balance_of(recipient)
                .checked_add(amount)
                .ok_or(LedgerError::ArithmeticFault)?
        };

        self.allowances.insert((*owner, *spender), remaining);
        self.balances.insert(*owner, debited);
        self.balances.insert(*recipient, credited);

        debug!("Spender {} moved {} from {} to {}", spender, amount, owner, recipient);
        Ok(())
    }

    // ========================================================================
    // SNAPSHOTS
    // ========================================================================

    /// Export the full state for external persistence
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
            owner: self.owner,
            supply_ceiling: self.supply_ceiling,
            total_supply: self.total_supply,
            balances: self.balances.clone(),
            allowances: self.allowances.clone(),
            mint_policy: self.mint_policy.clone(),
            burn_policy: self.burn_policy,
        }
    }

    /// Rebuild a ledger from a snapshot, revalidating the accounting invariants
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.balances.contains_key(&AccountId::ZERO) {
            return Err(SnapshotError::SentinelEntry);
        }
        if snapshot
            .allowances
            .keys()
            .any(|(_, spender)| spender.is_zero())
        {
            return Err(SnapshotError::SentinelEntry);
        }

        let computed: u128 = snapshot.balances.values().map(|v| *v as u128).sum();
        if computed != snapshot.total_supply as u128 {
            return Err(SnapshotError::SupplyMismatch {
                recorded: snapshot.total_supply,
                computed,
            });
        }

        if snapshot.total_supply > snapshot.supply_ceiling {
            return Err(SnapshotError::CeilingExceeded {
                total_supply: snapshot.total_supply,
                supply_ceiling: snapshot.supply_ceiling,
            });
        }

        Ok(Self {
            name: snapshot.name,
            symbol: snapshot.symbol,
            decimals: snapshot.decimals,
            owner: snapshot.owner,
            supply_ceiling: snapshot.supply_ceiling,
            total_supply: snapshot.total_supply,
            balances: snapshot.balances,
            allowances: snapshot.allowances,
            mint_policy: snapshot.mint_policy,
            burn_policy: snapshot.burn_policy,
        })
    }

    /// Serialize the ledger to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        postcard::to_allocvec(&self.snapshot()).unwrap_or_default()
    }

    /// Deserialize a ledger from bytes, revalidating invariants
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: LedgerSnapshot = postcard::from_bytes(bytes)
            .map_err(|e| SnapshotError::Deserialization(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }
}
