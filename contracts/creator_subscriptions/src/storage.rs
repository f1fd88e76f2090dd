//! Typed storage access.
//!
//! Tiers, subscriptions, the id index and vaults are unbounded per-entity
//! records and live in persistent storage; every touch bumps their TTL.
//! Config, counters, the billing job and surplus live in instance storage.

use crate::types::{
    BillingSchedule, Config, DataKey, Error, Subscription, SubscriptionRef, Tier,
};
use soroban_sdk::{Address, Env, IntoVal, TryFromVal, Val};

const DAY_IN_LEDGERS: u32 = 17_280;
// A billing run touches every live entry once per period (30 days), so
// entries must survive at least two periods plus keeper lateness.
const TTL_THRESHOLD: u32 = 60 * DAY_IN_LEDGERS;
const TTL_EXTEND_TO: u32 = 120 * DAY_IN_LEDGERS;

fn get_persistent<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<V> {
    let value: Option<V> = env.storage().persistent().get(key);
    if value.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    value
}

fn set_persistent<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Config ───────────────────────────────────────────────────────────────────

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn read_config(env: &Env) -> Result<Config, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn write_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

// ── Tiers ────────────────────────────────────────────────────────────────────

pub fn read_tier(env: &Env, creator: &Address, tier_id: u64) -> Option<Tier> {
    get_persistent(env, &DataKey::Tier(creator.clone(), tier_id))
}

pub fn write_tier(env: &Env, tier: &Tier) {
    set_persistent(env, &DataKey::Tier(tier.creator.clone(), tier.id), tier);
}

pub fn read_tier_count(env: &Env, creator: &Address) -> u64 {
    get_persistent(env, &DataKey::TierCount(creator.clone())).unwrap_or(0)
}

pub fn write_tier_count(env: &Env, creator: &Address, count: u64) {
    set_persistent(env, &DataKey::TierCount(creator.clone()), &count);
}

// ── Subscriptions ────────────────────────────────────────────────────────────

pub fn read_subscription(
    env: &Env,
    subscriber: &Address,
    creator: &Address,
) -> Option<Subscription> {
    get_persistent(
        env,
        &DataKey::Subscription(subscriber.clone(), creator.clone()),
    )
}

pub fn write_subscription(env: &Env, sub: &Subscription) {
    set_persistent(
        env,
        &DataKey::Subscription(sub.subscriber.clone(), sub.creator.clone()),
        sub,
    );
}

pub fn read_subscription_ref(env: &Env, id: u64) -> Option<SubscriptionRef> {
    get_persistent(env, &DataKey::SubscriptionIndex(id))
}

pub fn write_subscription_ref(env: &Env, id: u64, sub_ref: &SubscriptionRef) {
    set_persistent(env, &DataKey::SubscriptionIndex(id), sub_ref);
}

pub fn read_subscription_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::SubscriptionCount)
        .unwrap_or(0)
}

pub fn write_subscription_count(env: &Env, count: u64) {
    env.storage()
        .instance()
        .set(&DataKey::SubscriptionCount, &count);
}

// ── Vaults ───────────────────────────────────────────────────────────────────

pub fn read_vault(env: &Env, creator: &Address) -> u64 {
    get_persistent(env, &DataKey::Vault(creator.clone())).unwrap_or(0)
}

pub fn write_vault(env: &Env, creator: &Address, balance: u64) {
    set_persistent(env, &DataKey::Vault(creator.clone()), &balance);
}

pub fn read_surplus(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::Surplus)
        .unwrap_or(0)
}

pub fn write_surplus(env: &Env, amount: u64) {
    env.storage().instance().set(&DataKey::Surplus, &amount);
}

// ── Billing ──────────────────────────────────────────────────────────────────

pub fn read_billing_schedule(env: &Env) -> Option<BillingSchedule> {
    env.storage().instance().get(&DataKey::BillingScheduled)
}

pub fn has_billing_schedule(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::BillingScheduled)
}

pub fn write_billing_schedule(env: &Env, schedule: &BillingSchedule) {
    env.storage()
        .instance()
        .set(&DataKey::BillingScheduled, schedule);
}

pub fn clear_billing_schedule(env: &Env) {
    env.storage().instance().remove(&DataKey::BillingScheduled);
}

pub fn read_billing_cursor(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::BillingCursor)
        .unwrap_or(0)
}

pub fn write_billing_cursor(env: &Env, cursor: u64) {
    env.storage()
        .instance()
        .set(&DataKey::BillingCursor, &cursor);
}
