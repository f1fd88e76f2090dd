#![no_std]

#[cfg(test)]
extern crate std;

// ── Modules ──────────────────────────────────────────────────────────────────
mod admin;
mod billing;
mod charge_core;
mod creator;
pub mod events;
mod queries;
mod state_machine;
mod storage;
mod subscription;
mod tiers;
pub mod types;

// ── Re-exports (used by tests and external consumers) ────────────────────────
pub use state_machine::{can_transition, get_allowed_transitions, validate_transition};
pub use types::*;

use soroban_sdk::{contract, contractimpl, Address, Env, String};

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct CreatorSubscriptions;

#[contractimpl]
impl CreatorSubscriptions {
    // ── Admin / Config ───────────────────────────────────────────────────

    /// Initialize the contract: admin, settlement token and billing batch size.
    ///
    /// # Arguments
    /// * `billing_batch_size` - Subscription ids inspected per `process_billing` call.
    ///                          Must be in `1..=MAX_BILLING_BATCH_SIZE`.
    pub fn init(
        env: Env,
        admin: Address,
        token: Address,
        billing_batch_size: u32,
    ) -> Result<(), Error> {
        admin::do_init(&env, admin, token, billing_batch_size)
    }

    pub fn get_admin(env: Env) -> Result<Address, Error> {
        admin::do_get_admin(&env)
    }

    pub fn get_token(env: Env) -> Result<Address, Error> {
        admin::do_get_token(&env)
    }

    /// Rotate admin to a new address. Only callable by current admin.
    pub fn rotate_admin(env: Env, current_admin: Address, new_admin: Address) -> Result<(), Error> {
        admin::do_rotate_admin(&env, current_admin, new_admin)
    }

    pub fn set_billing_batch_size(
        env: Env,
        admin: Address,
        billing_batch_size: u32,
    ) -> Result<(), Error> {
        admin::do_set_billing_batch_size(&env, admin, billing_batch_size)
    }

    /// Total overpayment held by the contract outside any creator vault.
    pub fn get_surplus(env: Env) -> u64 {
        admin::get_surplus(&env)
    }

    /// **ADMIN ONLY**: pay the accumulated surplus to `recipient`.
    pub fn sweep_surplus(env: Env, admin: Address, recipient: Address) -> Result<u64, Error> {
        admin::do_sweep_surplus(&env, admin, recipient)
    }

    // ── Tier catalog ─────────────────────────────────────────────────────

    /// Create a tier for `creator`. `caller` must be the creator.
    ///
    /// Tier ids are per-creator and start at `0`.
    pub fn create_tier(
        env: Env,
        caller: Address,
        creator: Address,
        name: String,
        price_per_month: u64,
        metadata_uri: String,
    ) -> Result<u64, Error> {
        tiers::do_create_tier(&env, caller, creator, name, price_per_month, metadata_uri)
    }

    pub fn get_tier(env: Env, creator: Address, tier_id: u64) -> Result<Tier, Error> {
        tiers::get_tier(&env, &creator, tier_id)
    }

    pub fn get_creator_tiers(env: Env, creator: Address) -> TierList {
        tiers::get_creator_tiers(&env, &creator)
    }

    pub fn get_tier_count(env: Env, creator: Address) -> u64 {
        tiers::get_tier_count(&env, &creator)
    }

    // ── Subscription lifecycle ───────────────────────────────────────────

    /// Subscribe to one of `creator`'s tiers, paying the first month up front.
    ///
    /// # Errors
    /// * `NotFound` - the tier does not exist.
    /// * `AlreadySubscribed` - an active subscription to this creator exists.
    /// * `InsufficientPayment` - `payment` is below the tier price.
    pub fn subscribe(
        env: Env,
        subscriber: Address,
        creator: Address,
        tier_id: u64,
        payment: u64,
    ) -> Result<u64, Error> {
        subscription::do_subscribe(&env, subscriber, creator, tier_id, payment)
    }

    /// Cancel the subscriber's subscription to `creator`. Nothing is refunded.
    pub fn cancel_subscription(env: Env, subscriber: Address, creator: Address) -> Result<(), Error> {
        subscription::do_cancel_subscription(&env, subscriber, creator)
    }

    // ── Billing ──────────────────────────────────────────────────────────

    /// Arm the billing job one period from now. No-op if a job is pending.
    pub fn schedule_billing(env: Env) -> Result<(), Error> {
        billing::do_schedule_billing(&env)
    }

    /// Keepers call this when the pending job is due. Renews due subscriptions
    /// in the current batch and always leaves a job pending; an early call
    /// does not move a job that is still in the future.
    pub fn process_billing(env: Env, timestamp: u64) -> Result<BillingReport, Error> {
        billing::do_process_billing(&env, timestamp)
    }

    pub fn get_billing_schedule(env: Env) -> Option<BillingSchedule> {
        billing::get_billing_schedule(&env)
    }

    pub fn is_billing_scheduled(env: Env) -> bool {
        billing::is_billing_scheduled(&env)
    }

    // ── Creator vault ────────────────────────────────────────────────────

    /// Creator withdraws accumulated earnings. `amount == 0` withdraws everything.
    pub fn withdraw_earnings(env: Env, creator: Address, amount: u64) -> Result<u64, Error> {
        creator::withdraw_earnings(&env, creator, amount)
    }

    pub fn get_vault_balance(env: Env, creator: Address) -> u64 {
        creator::get_vault_balance(&env, &creator)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn get_subscription(
        env: Env,
        subscriber: Address,
        creator: Address,
    ) -> Result<Subscription, Error> {
        queries::get_subscription(&env, &subscriber, &creator)
    }

    pub fn get_subscription_state(
        env: Env,
        subscriber: Address,
        creator: Address,
    ) -> SubscriptionState {
        queries::get_subscription_state(&env, &subscriber, &creator)
    }

    /// `tier_id == 0` matches any tier.
    pub fn is_subscribed(env: Env, subscriber: Address, creator: Address, tier_id: u64) -> bool {
        queries::is_subscribed(&env, &subscriber, &creator, tier_id)
    }

    /// Number of subscription ids ever issued. Useful for indexers and monitoring.
    pub fn get_subscription_count(env: Env) -> u64 {
        queries::get_subscription_count(&env)
    }
}

#[cfg(test)]
mod test_events;
