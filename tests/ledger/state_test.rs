// Core ledger operation tests
//
// Mirrors the canonical flows: construction, minting against the ceiling,
// burning, direct transfers, and delegated spending via allowances.

use tokenledger::account::AccountId;
use tokenledger::ledger::{Ledger, LedgerError};

const DECIMALS: u8 = 8;
const UNIT: u64 = 100_000_000; // 10^8

/// A Galaxy ledger with half the ceiling minted to the owner up front
fn galaxy() -> (Ledger, AccountId) {
    let owner = AccountId::random();
    let ledger = Ledger::new(
        "Galaxy",
        "GAL",
        DECIMALS,
        500_000 * UNIT,
        1_000_000 * UNIT,
        owner,
    )
    .unwrap();
    (ledger, owner)
}

// ============================================================================
// CONSTRUCTION TESTS
// ============================================================================

#[test]
fn test_constructor_metadata_matches() {
    let (ledger, owner) = galaxy();

    assert_eq!(ledger.name(), "Galaxy");
    assert_eq!(ledger.symbol(), "GAL");
    assert_eq!(ledger.decimals(), DECIMALS);
    assert_eq!(ledger.owner(), &owner);
    assert_eq!(ledger.max_supply(), 1_000_000 * UNIT);
}

#[test]
fn test_initial_supply_credited_to_owner() {
    let (ledger, owner) = galaxy();

    assert_eq!(ledger.total_supply(), 500_000 * UNIT);
    assert_eq!(ledger.balance_of(&owner), 500_000 * UNIT);
}

#[test]
fn test_unknown_account_has_zero_balance() {
    let (ledger, _) = galaxy();

    assert_eq!(ledger.balance_of(&AccountId::random()), 0);
}

#[test]
fn test_unknown_pair_has_zero_allowance() {
    let (ledger, owner) = galaxy();

    assert_eq!(ledger.allowance_of(&owner, &AccountId::random()), 0);
}

// ============================================================================
// MINTING TESTS
// ============================================================================

#[test]
fn test_mint_credits_recipient_and_raises_supply() {
    let (mut ledger, owner) = galaxy();
    let account = AccountId::random();
    let before = ledger.total_supply();

    ledger.mint(&owner, &account, 4_000).unwrap();

    assert_eq!(ledger.balance_of(&account), 4_000);
    assert_eq!(ledger.total_supply(), before + 4_000);
}

#[test]
fn test_mint_to_zero_address_fails() {
    let (mut ledger, owner) = galaxy();
    let before = ledger.total_supply();

    let result = ledger.mint(&owner, &AccountId::ZERO, 100);

    assert!(matches!(result, Err(LedgerError::InvalidAccount)));
    assert_eq!(ledger.total_supply(), before);
}

#[test]
fn test_mint_past_ceiling_fails_and_leaves_state() {
    let owner = AccountId::random();
    let mut ledger = Ledger::new("Galaxy", "GAL", DECIMALS, 900, 1_000, owner).unwrap();
    let account = AccountId::random();

    let result = ledger.mint(&owner, &account, 200);

    assert!(matches!(
        result,
        Err(LedgerError::SupplyCeilingExceeded {
            requested: 200,
            minted: 900,
            ceiling: 1_000,
        })
    ));
    assert_eq!(ledger.total_supply(), 900);
    assert_eq!(ledger.balance_of(&account), 0);
}

#[test]
fn test_mint_exactly_to_ceiling_succeeds() {
    let owner = AccountId::random();
    let mut ledger = Ledger::new("Galaxy", "GAL", DECIMALS, 900, 1_000, owner).unwrap();
    let account = AccountId::random();

    ledger.mint(&owner, &account, 100).unwrap();

    assert_eq!(ledger.total_supply(), 1_000);

    // The ceiling is now fully used; one more unit must fail
    let result = ledger.mint(&owner, &account, 1);
    assert!(matches!(result, Err(LedgerError::SupplyCeilingExceeded { .. })));
}

#[test]
fn test_mint_by_non_owner_fails() {
    let (mut ledger, _) = galaxy();
    let outsider = AccountId::random();

    let result = ledger.mint(&outsider, &outsider, 100);

    assert!(matches!(result, Err(LedgerError::Unauthorized { caller }) if caller == outsider));
    assert_eq!(ledger.balance_of(&outsider), 0);
}

// ============================================================================
// BURNING TESTS
// ============================================================================

#[test]
fn test_burn_reduces_balance_and_supply() {
    let (mut ledger, owner) = galaxy();
    let account = AccountId::random();
    ledger.mint(&owner, &account, 100).unwrap();
    let supply_before = ledger.total_supply();

    ledger.burn(&owner, &account, 50).unwrap();

    assert_eq!(ledger.balance_of(&account), 50);
    assert_eq!(ledger.total_supply(), supply_before - 50);
}

#[test]
fn test_burn_more_than_owned_fails() {
    let (mut ledger, owner) = galaxy();
    let account = AccountId::random();
    ledger.mint(&owner, &account, 50).unwrap();

    let result = ledger.burn(&owner, &account, 500);

    assert!(matches!(
        result,
        Err(LedgerError::InsufficientBalance {
            available: 50,
            required: 500,
        })
    ));
    assert_eq!(ledger.balance_of(&account), 50);
}

#[test]
fn test_burn_zero_address_fails() {
    let (mut ledger, owner) = galaxy();

    let result = ledger.burn(&owner, &AccountId::ZERO, 100);

    assert!(matches!(result, Err(LedgerError::InvalidAccount)));
}

#[test]
fn test_burn_entire_balance() {
    let (mut ledger, owner) = galaxy();
    let account = AccountId::random();
    ledger.mint(&owner, &account, 75).unwrap();

    ledger.burn(&owner, &account, 75).unwrap();

    assert_eq!(ledger.balance_of(&account), 0);
}

// ============================================================================
// TRANSFER TESTS
// ============================================================================

#[test]
fn test_transfer_moves_balance() {
    let (mut ledger, owner) = galaxy();
    let account = AccountId::random();
    let recipient = AccountId::random();
    ledger.transfer(&owner, &account, 100).unwrap();

    ledger.transfer(&account, &recipient, 20).unwrap();

    assert_eq!(ledger.balance_of(&account), 80);
    assert_eq!(ledger.balance_of(&recipient), 20);
}

#[test]
fn test_transfer_conserves_supply() {
    let (mut ledger, owner) = galaxy();
    let account = AccountId::random();
    let before = ledger.total_supply();

    ledger.transfer(&owner, &account, 12_345).unwrap();

    assert_eq!(ledger.total_supply(), before);
}

#[test]
fn test_transfer_insufficient_balance_fails() {
    let (mut ledger, owner) = galaxy();
    let poor = AccountId::random();
    let recipient = AccountId::random();
    ledger.transfer(&owner, &poor, 10).unwrap();

    let result = ledger.transfer(&poor, &recipient, 11);

    assert!(matches!(
        result,
        Err(LedgerError::InsufficientBalance {
            available: 10,
            required: 11,
        })
    ));
    assert_eq!(ledger.balance_of(&poor), 10);
    assert_eq!(ledger.balance_of(&recipient), 0);
}

#[test]
fn test_transfer_to_zero_address_fails() {
    let (mut ledger, owner) = galaxy();

    let result = ledger.transfer(&owner, &AccountId::ZERO, 100);

    assert!(matches!(result, Err(LedgerError::InvalidAccount)));
    assert_eq!(ledger.balance_of(&owner), 500_000 * UNIT);
}

#[test]
fn test_transfer_exact_balance() {
    let (mut ledger, owner) = galaxy();
    let account = AccountId::random();
    let recipient = AccountId::random();
    ledger.transfer(&owner, &account, 100).unwrap();

    ledger.transfer(&account, &recipient, 100).unwrap();

    assert_eq!(ledger.balance_of(&account), 0);
    assert_eq!(ledger.balance_of(&recipient), 100);
}

#[test]
fn test_self_transfer_changes_nothing() {
    let (mut ledger, owner) = galaxy();
    let account = AccountId::random();
    ledger.transfer(&owner, &account, 100).unwrap();

    ledger.transfer(&account, &account, 40).unwrap();

    assert_eq!(ledger.balance_of(&account), 100);
}

// ============================================================================
// ALLOWANCE TESTS
// ============================================================================

#[test]
fn test_approve_sets_allowance() {
    let (mut ledger, owner) = galaxy();
    let spender = AccountId::random();

    ledger.approve(&owner, &spender, 100).unwrap();

    assert_eq!(ledger.allowance_of(&owner, &spender), 100);
}

#[test]
fn test_approve_overwrites_prior_grant() {
    let (mut ledger, owner) = galaxy();
    let spender = AccountId::random();

    ledger.approve(&owner, &spender, 100).unwrap();
    ledger.approve(&owner, &spender, 40).unwrap();

    assert_eq!(ledger.allowance_of(&owner, &spender), 40);
}

#[test]
fn test_approve_zero_spender_fails() {
    let (mut ledger, owner) = galaxy();

    let result = ledger.approve(&owner, &AccountId::ZERO, 100);

    assert!(matches!(result, Err(LedgerError::InvalidAccount)));
}

#[test]
fn test_allowances_are_independent_per_pair() {
    let (mut ledger, owner) = galaxy();
    let first = AccountId::random();
    let second = AccountId::random();

    ledger.approve(&owner, &first, 100).unwrap();
    ledger.approve(&owner, &second, 25).unwrap();

    assert_eq!(ledger.allowance_of(&owner, &first), 100);
    assert_eq!(ledger.allowance_of(&owner, &second), 25);
}

// ============================================================================
// DELEGATED TRANSFER TESTS
// ============================================================================

#[test]
fn test_transfer_from_over_allowance_fails() {
    let (mut ledger, owner) = galaxy();
    let spender = AccountId::random();
    let recipient = AccountId::random();
    ledger.approve(&owner, &spender, 100).unwrap();

    let result = ledger.transfer_from(&spender, &owner, &recipient, 110);

    assert!(matches!(
        result,
        Err(LedgerError::AllowanceExceeded {
            available: 100,
            required: 110,
        })
    ));
    assert_eq!(ledger.allowance_of(&owner, &spender), 100);
    assert_eq!(ledger.balance_of(&recipient), 0);
}

#[test]
fn test_transfer_from_decrements_allowance_exactly() {
    let (mut ledger, owner) = galaxy();
    let spender = AccountId::random();
    let recipient = AccountId::random();
    let owner_before = ledger.balance_of(&owner);
    ledger.approve(&owner, &spender, 100).unwrap();

    ledger.transfer_from(&spender, &owner, &recipient, 50).unwrap();

    assert_eq!(ledger.allowance_of(&owner, &spender), 50);
    assert_eq!(ledger.balance_of(&owner), owner_before - 50);
    assert_eq!(ledger.balance_of(&recipient), 50);
}

#[test]
fn test_transfer_from_without_owner_funds_fails() {
    let (mut ledger, _) = galaxy();
    let poor = AccountId::random();
    let spender = AccountId::random();
    let recipient = AccountId::random();
    ledger.approve(&poor, &spender, 1_000).unwrap();

    let result = ledger.transfer_from(&spender, &poor, &recipient, 500);

    assert!(matches!(
        result,
        Err(LedgerError::InsufficientBalance {
            available: 0,
            required: 500,
        })
    ));
    assert_eq!(ledger.allowance_of(&poor, &spender), 1_000);
}

#[test]
fn test_transfer_from_to_zero_address_fails() {
    let (mut ledger, owner) = galaxy();
    let spender = AccountId::random();
    ledger.approve(&owner, &spender, 100).unwrap();

    let result = ledger.transfer_from(&spender, &owner, &AccountId::ZERO, 50);

    assert!(matches!(result, Err(LedgerError::InvalidAccount)));
    assert_eq!(ledger.allowance_of(&owner, &spender), 100);
}

#[test]
fn test_transfer_from_exhausts_allowance() {
    let (mut ledger, owner) = galaxy();
    let spender = AccountId::random();
    let recipient = AccountId::random();
    ledger.approve(&owner, &spender, 100).unwrap();

    ledger.transfer_from(&spender, &owner, &recipient, 60).unwrap();
    ledger.transfer_from(&spender, &owner, &recipient, 40).unwrap();

    assert_eq!(ledger.allowance_of(&owner, &spender), 0);
    assert_eq!(ledger.balance_of(&recipient), 100);

    let result = ledger.transfer_from(&spender, &owner, &recipient, 1);
    assert!(matches!(result, Err(LedgerError::AllowanceExceeded { .. })));
}

// ============================================================================
// STATISTICS TESTS
// ============================================================================

#[test]
fn test_statistics_track_holders_and_approvals() {
    let (mut ledger, owner) = galaxy();
    let account = AccountId::random();
    let spender = AccountId::random();
    ledger.transfer(&owner, &account, 100).unwrap();
    ledger.approve(&owner, &spender, 50).unwrap();

    let stats = ledger.statistics();

    assert_eq!(stats.accounts, 2);
    assert_eq!(stats.approvals, 1);
    assert_eq!(stats.total_supply, 500_000 * UNIT);
    assert_eq!(stats.headroom, 500_000 * UNIT);
}

#[test]
fn test_holder_count_grows_lazily() {
    let (mut ledger, owner) = galaxy();
    assert_eq!(ledger.holder_count(), 1);

    ledger.transfer(&owner, &AccountId::random(), 10).unwrap();

    assert_eq!(ledger.holder_count(), 2);
}
