// tokenledger - Fixed-supply fungible token ledger with delegated spending
//
// The ledger is the single component: balances, allowances, and supply
// under guarded mutation. Collaborators map external identities onto
// AccountId values and persist state through the snapshot contract.

pub mod account;
pub mod amount;
pub mod ledger;
