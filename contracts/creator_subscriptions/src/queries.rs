//! Read-only entrypoints for the subscription ledger.
//!
//! **PRs that only add or change read-only/query behavior should edit this file only.**

use crate::state_machine::state_of;
use crate::storage;
use crate::types::{Error, Subscription, SubscriptionState};
use soroban_sdk::{Address, Env};

pub fn get_subscription(
    env: &Env,
    subscriber: &Address,
    creator: &Address,
) -> Result<Subscription, Error> {
    storage::read_subscription(env, subscriber, creator).ok_or(Error::NotFound)
}

pub fn get_subscription_state(
    env: &Env,
    subscriber: &Address,
    creator: &Address,
) -> SubscriptionState {
    state_of(storage::read_subscription(env, subscriber, creator).as_ref())
}

/// `tier_id == 0` matches any tier.
pub fn is_subscribed(env: &Env, subscriber: &Address, creator: &Address, tier_id: u64) -> bool {
    match storage::read_subscription(env, subscriber, creator) {
        Some(sub) => sub.is_active && (tier_id == 0 || sub.tier_id == tier_id),
        None => false,
    }
}

/// Total number of subscription ids ever issued, including overwritten ones.
pub fn get_subscription_count(env: &Env) -> u64 {
    storage::read_subscription_count(env)
}
