// Authorization policies - capability checks injected at construction

use crate::account::AccountId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Who may mint new supply
///
/// An allow-list rather than a hard-coded owner, so a ledger can be
/// constructed with additional minters without touching the mutation
/// logic. The list is fixed once the ledger exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintPolicy {
    minters: HashSet<AccountId>,
}

impl MintPolicy {
    /// Only the ledger owner may mint
    pub fn owner_only(owner: AccountId) -> Self {
        Self {
            minters: HashSet::from([owner]),
        }
    }

    /// An explicit set of accounts may mint
    pub fn allow_list<I>(minters: I) -> Self
    where
        I: IntoIterator<Item = AccountId>,
    {
        Self {
            minters: minters.into_iter().collect(),
        }
    }

    /// Check whether the caller holds the mint capability
    pub fn permits(&self, caller: &AccountId) -> bool {
        self.minters.contains(caller)
    }

    /// Number of accounts holding the mint capability
    pub fn minter_count(&self) -> usize {
        self.minters.len()
    }
}

/// Who may burn tokens out of an account
///
/// Defaults to `OwnerOnly`; the unrestricted variant must be chosen
/// explicitly at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurnPolicy {
    /// Only the ledger owner may burn, from any account
    #[default]
    OwnerOnly,
    /// An account may burn only its own tokens
    SelfOnly,
    /// Any caller may burn from any account
    Unrestricted,
}

impl BurnPolicy {
    /// Check whether `caller` may burn from `account` on a ledger owned by `owner`
    pub fn permits(&self, caller: &AccountId, account: &AccountId, owner: &AccountId) -> bool {
        match self {
            BurnPolicy::OwnerOnly => caller == owner,
            BurnPolicy::SelfOnly => caller == account,
            BurnPolicy::Unrestricted => true,
        }
    }
}
