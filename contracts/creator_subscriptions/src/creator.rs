//! Creator vault: credits from subscription payments and withdraw_earnings.
//!
//! **PRs that only change creator payouts should edit this file only.**

use crate::events;
use crate::storage;
use crate::types::Error;
use soroban_sdk::{token, Address, Env};

pub fn get_vault_balance(env: &Env, creator: &Address) -> u64 {
    storage::read_vault(env, creator)
}

/// Vault balance after crediting `amount`. Callers compute this before moving
/// funds and write it once the payment has been collected.
pub fn next_vault_balance(env: &Env, creator: &Address, amount: u64) -> Result<u64, Error> {
    storage::read_vault(env, creator)
        .checked_add(amount)
        .ok_or(Error::Overflow)
}

/// Pays `amount` from the creator's vault to the creator; `0` withdraws everything.
///
/// Returns the amount paid out.
pub fn withdraw_earnings(env: &Env, creator: Address, amount: u64) -> Result<u64, Error> {
    creator.require_auth();
    let config = storage::read_config(env)?;

    let available = storage::read_vault(env, &creator);
    if available == 0 {
        return Err(Error::NoEarnings);
    }
    let withdraw_amount = if amount == 0 { available } else { amount };
    let remaining = available
        .checked_sub(withdraw_amount)
        .ok_or(Error::InsufficientBalance)?;

    storage::write_vault(env, &creator, remaining);
    storage::bump_instance(env);
    token::Client::new(env, &config.token).transfer(
        &env.current_contract_address(),
        &creator,
        &i128::from(withdraw_amount),
    );
    events::publish_earnings_withdrawn(env, creator, withdraw_amount, remaining);
    Ok(withdraw_amount)
}
