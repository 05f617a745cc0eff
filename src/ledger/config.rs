use crate::account::AccountId;
use crate::amount::MAX_DECIMALS;
use crate::ledger::policy::{BurnPolicy, MintPolicy};
use crate::ledger::state::Ledger;
use thiserror::Error;

/// Errors that can occur when constructing a ledger
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing name: token name is required")]
    MissingName,

    #[error("Missing symbol: token symbol is required")]
    MissingSymbol,

    #[error("Missing owner: owner account is required")]
    MissingOwner,

    #[error("Missing supply ceiling: supply ceiling is required")]
    MissingSupplyCeiling,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Builder for constructing a ledger
///
/// Name, symbol, owner, and supply ceiling are required. Decimals and
/// initial supply default to zero; policies default to owner-only.
pub struct LedgerBuilder {
    name: Option<String>,
    symbol: Option<String>,
    decimals: u8,
    initial_supply: u64,
    supply_ceiling: Option<u64>,
    owner: Option<AccountId>,
    mint_policy: Option<MintPolicy>,
    burn_policy: BurnPolicy,
}

impl LedgerBuilder {
    /// Create a new LedgerBuilder
    pub fn new() -> Self {
        Self {
            name: None,
            symbol: None,
            decimals: 0,
            initial_supply: 0,
            supply_ceiling: None,
            owner: None,
            mint_policy: None,
            burn_policy: BurnPolicy::default(),
        }
    }

    /// Set the token name (required)
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set the token symbol (required)
    pub fn symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }

    /// Set the number of decimals (fixed for the ledger's lifetime)
    pub fn decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    /// Set the initial supply, credited entirely to the owner
    pub fn initial_supply(mut self, amount: u64) -> Self {
        self.initial_supply = amount;
        self
    }

    /// Set the supply ceiling (required)
    pub fn supply_ceiling(mut self, ceiling: u64) -> Self {
        self.supply_ceiling = Some(ceiling);
        self
    }

    /// Set the owner account (required)
    pub fn owner(mut self, owner: AccountId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the mint policy (defaults to owner-only)
    pub fn mint_policy(mut self, policy: MintPolicy) -> Self {
        self.mint_policy = Some(policy);
        self
    }

    /// Set the burn policy (defaults to owner-only)
    pub fn burn_policy(mut self, policy: BurnPolicy) -> Self {
        self.burn_policy = policy;
        self
    }

    /// Validate the configuration and build the ledger
    pub fn build(self) -> Result<Ledger, ConfigError> {
        let name = self.name.ok_or(ConfigError::MissingName)?;
        let symbol = self.symbol.ok_or(ConfigError::MissingSymbol)?;
        let owner = self.owner.ok_or(ConfigError::MissingOwner)?;
        let supply_ceiling = self.supply_ceiling.ok_or(ConfigError::MissingSupplyCeiling)?;

        if owner.is_zero() {
            return Err(ConfigError::InvalidConfiguration(
                "owner cannot be the zero address".to_string(),
            ));
        }

        if self.decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidConfiguration(format!(
                "decimals {} exceed the maximum of {}",
                self.decimals, MAX_DECIMALS
            )));
        }

        if self.initial_supply > supply_ceiling {
            return Err(ConfigError::InvalidConfiguration(format!(
                "initial supply {} exceeds the supply ceiling {}",
                self.initial_supply, supply_ceiling
            )));
        }

        let mint_policy = self
            .mint_policy
            .unwrap_or_else(|| MintPolicy::owner_only(owner));

        Ok(Ledger::from_parts(
            name,
            symbol,
            self.decimals,
            self.initial_supply,
            supply_ceiling,
            owner,
            mint_policy,
            self.burn_policy,
        ))
    }
}

impl Default for LedgerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
