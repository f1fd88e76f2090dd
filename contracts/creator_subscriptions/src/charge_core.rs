//! Single renewal logic (no auth). Used by the billing pass.
//!
//! **PRs that only change how one subscription is renewed should edit this file only.**

use crate::creator::next_vault_balance;
use crate::events;
use crate::state_machine::{state_of, validate_transition};
use crate::storage;
use crate::types::{Error, Subscription, SubscriptionState, BILLING_PERIOD_MS};
use soroban_sdk::{token, Env};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RenewalOutcome {
    /// Not due, inactive, superseded by a resubscribe, or the creator's vault
    /// cannot take the credit. Skipped records are left untouched.
    Skipped,
    Renewed(u64),
    Lapsed,
}

struct Renewal {
    price: u64,
    next_payment_time: u64,
    total_paid: u64,
}

fn plan_renewal(env: &Env, sub: &Subscription) -> Result<Renewal, Error> {
    let tier = storage::read_tier(env, &sub.creator, sub.tier_id).ok_or(Error::NotFound)?;
    let price = tier.price_per_month;
    Ok(Renewal {
        price,
        next_payment_time: sub
            .next_payment_time
            .checked_add(BILLING_PERIOD_MS)
            .ok_or(Error::Overflow)?,
        total_paid: sub.total_paid.checked_add(price).ok_or(Error::Overflow)?,
    })
}

/// Pulls the tier price from the subscriber's allowance into the contract.
fn collect(env: &Env, token: &token::Client, sub: &Subscription, price: u64) -> Result<(), Error> {
    if price == 0 {
        return Ok(());
    }
    let contract = env.current_contract_address();
    match token.try_transfer_from(&contract, &sub.subscriber, &contract, &i128::from(price)) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::InsufficientPayment),
    }
}

fn lapse(env: &Env, mut sub: Subscription, reason: Error) -> RenewalOutcome {
    if validate_transition(&state_of(Some(&sub)), &SubscriptionState::Cancelled).is_err() {
        return RenewalOutcome::Skipped;
    }
    sub.is_active = false;
    storage::write_subscription(env, &sub);
    events::publish_lapsed(env, &sub, reason.to_code());
    RenewalOutcome::Lapsed
}

/// Renews subscription `id` if it is active and due at `now`.
///
/// Never fails: a renewal that cannot be collected deactivates the
/// subscription instead, so one bad record cannot stop the billing pass.
/// A renewal the creator's vault cannot absorb is skipped and retried on
/// the next pass.
pub fn renew_one(env: &Env, token: &token::Client, id: u64, now: u64) -> RenewalOutcome {
    let Some(sub_ref) = storage::read_subscription_ref(env, id) else {
        return RenewalOutcome::Skipped;
    };
    let Some(mut sub) = storage::read_subscription(env, &sub_ref.subscriber, &sub_ref.creator)
    else {
        return RenewalOutcome::Skipped;
    };
    if sub.id != id || !sub.is_active || sub.next_payment_time > now {
        return RenewalOutcome::Skipped;
    }

    let renewal = match plan_renewal(env, &sub) {
        Ok(renewal) => renewal,
        Err(e) => return lapse(env, sub, e),
    };
    // A full vault is the creator's limit, not the subscriber's failure.
    let Ok(vault) = next_vault_balance(env, &sub.creator, renewal.price) else {
        return RenewalOutcome::Skipped;
    };
    if let Err(e) = collect(env, token, &sub, renewal.price) {
        return lapse(env, sub, e);
    }

    storage::write_vault(env, &sub.creator, vault);
    sub.next_payment_time = renewal.next_payment_time;
    sub.total_paid = renewal.total_paid;
    storage::write_subscription(env, &sub);
    events::publish_renewed(env, &sub, renewal.price);
    RenewalOutcome::Renewed(renewal.price)
}
