//! Subscription lifecycle: subscribe and cancel.
//!
//! **PRs that only change subscription lifecycle should edit this file only.**

use crate::billing;
use crate::creator::next_vault_balance;
use crate::events;
use crate::state_machine::{state_of, validate_transition};
use crate::storage;
use crate::types::{
    now_ms, Error, Subscription, SubscriptionRef, SubscriptionState, BILLING_PERIOD_MS,
};
use soroban_sdk::{token, Address, Env};

/// Subscribes `subscriber` to `creator`'s tier, collecting the first month up front.
///
/// `payment` is pulled from the subscriber in the settlement token. Anything
/// above the tier price is kept as contract surplus and is not refunded.
/// A cancelled record for the same creator is overwritten in place with a
/// new id; the previous tier and payment history are not retained.
pub fn do_subscribe(
    env: &Env,
    subscriber: Address,
    creator: Address,
    tier_id: u64,
    payment: u64,
) -> Result<u64, Error> {
    subscriber.require_auth();
    let config = storage::read_config(env)?;

    let tier = storage::read_tier(env, &creator, tier_id).ok_or(Error::NotFound)?;
    let existing = storage::read_subscription(env, &subscriber, &creator);
    validate_transition(&state_of(existing.as_ref()), &SubscriptionState::Active)?;

    let price = tier.price_per_month;
    if payment < price {
        return Err(Error::InsufficientPayment);
    }

    // All arithmetic before the first write.
    let now = now_ms(env)?;
    let next_payment_time = now.checked_add(BILLING_PERIOD_MS).ok_or(Error::Overflow)?;
    let id = storage::read_subscription_count(env);
    let next_count = id.checked_add(1).ok_or(Error::Overflow)?;
    let vault = next_vault_balance(env, &creator, price)?;
    let excess = payment - price;
    let surplus = storage::read_surplus(env)
        .checked_add(excess)
        .ok_or(Error::Overflow)?;

    if payment > 0 {
        token::Client::new(env, &config.token).transfer(
            &subscriber,
            &env.current_contract_address(),
            &i128::from(payment),
        );
    }

    let sub = Subscription {
        id,
        subscriber: subscriber.clone(),
        creator: creator.clone(),
        tier_id,
        is_active: true,
        next_payment_time,
        created_at: now,
        total_paid: price,
    };
    storage::write_subscription(env, &sub);
    storage::write_subscription_ref(
        env,
        id,
        &SubscriptionRef {
            subscriber,
            creator: creator.clone(),
        },
    );
    storage::write_subscription_count(env, next_count);
    storage::write_vault(env, &creator, vault);
    if excess > 0 {
        storage::write_surplus(env, surplus);
    }

    billing::arm(env, next_payment_time);
    storage::bump_instance(env);
    events::publish_subscribed(env, &sub, payment);
    Ok(id)
}

/// Deactivates the caller's subscription to `creator`. Nothing is refunded.
pub fn do_cancel_subscription(
    env: &Env,
    subscriber: Address,
    creator: Address,
) -> Result<(), Error> {
    subscriber.require_auth();

    let existing = storage::read_subscription(env, &subscriber, &creator);
    validate_transition(&state_of(existing.as_ref()), &SubscriptionState::Cancelled)?;
    let mut sub = existing.ok_or(Error::NotFound)?;

    sub.is_active = false;
    storage::write_subscription(env, &sub);
    storage::bump_instance(env);
    events::publish_cancelled(env, &sub);
    Ok(())
}
