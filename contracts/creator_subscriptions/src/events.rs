//! Contract events for off-chain indexers. Nothing inside the contract reads them.

use crate::types::{BillingReport, BillingSchedule, Subscription, Tier};
use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub billing_batch_size: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminRotatedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchSizeChangedEvent {
    pub admin: Address,
    pub billing_batch_size: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierCreatedEvent {
    pub creator: Address,
    pub tier_id: u64,
    pub name: String,
    pub price_per_month: u64,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscribedEvent {
    pub subscription_id: u64,
    pub subscriber: Address,
    pub creator: Address,
    pub tier_id: u64,
    /// Amount actually transferred; anything above the tier price went to surplus.
    pub payment: u64,
    pub next_payment_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionCancelledEvent {
    pub subscription_id: u64,
    pub subscriber: Address,
    pub creator: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionRenewedEvent {
    pub subscription_id: u64,
    pub subscriber: Address,
    pub creator: Address,
    pub amount: u64,
    pub next_payment_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionLapsedEvent {
    pub subscription_id: u64,
    pub subscriber: Address,
    pub creator: Address,
    /// [`crate::Error`] code describing why the renewal could not be collected.
    pub reason: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BillingScheduledEvent {
    pub run_at: u64,
    pub target: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BillingProcessedEvent {
    /// Timestamp argument supplied by whoever triggered the run.
    pub requested_at: u64,
    pub processed_at: u64,
    pub report: BillingReport,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EarningsWithdrawnEvent {
    pub creator: Address,
    pub amount: u64,
    pub remaining: u64,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SurplusSweptEvent {
    pub admin: Address,
    pub recipient: Address,
    pub amount: u64,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address, token: Address, billing_batch_size: u32) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        token,
        billing_batch_size,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_admin_rotated(env: &Env, old_admin: Address, new_admin: Address) {
    let topics = (symbol_short!("ADM_ROT"), old_admin.clone(), new_admin.clone());
    let data = AdminRotatedEvent {
        old_admin,
        new_admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_batch_size_changed(env: &Env, admin: Address, billing_batch_size: u32) {
    let topics = (symbol_short!("BATCH_SZ"),);
    env.events().publish(
        topics,
        BatchSizeChangedEvent {
            admin,
            billing_batch_size,
        },
    );
}

pub fn publish_tier_created(env: &Env, tier: &Tier) {
    let topics = (symbol_short!("TIER_NEW"), tier.creator.clone());
    let data = TierCreatedEvent {
        creator: tier.creator.clone(),
        tier_id: tier.id,
        name: tier.name.clone(),
        price_per_month: tier.price_per_month,
        created_at: tier.created_at,
    };
    env.events().publish(topics, data);
}

pub fn publish_subscribed(env: &Env, sub: &Subscription, payment: u64) {
    let topics = (
        symbol_short!("SUB_NEW"),
        sub.subscriber.clone(),
        sub.creator.clone(),
    );
    let data = SubscribedEvent {
        subscription_id: sub.id,
        subscriber: sub.subscriber.clone(),
        creator: sub.creator.clone(),
        tier_id: sub.tier_id,
        payment,
        next_payment_time: sub.next_payment_time,
    };
    env.events().publish(topics, data);
}

pub fn publish_cancelled(env: &Env, sub: &Subscription) {
    let topics = (
        symbol_short!("SUB_CNCL"),
        sub.subscriber.clone(),
        sub.creator.clone(),
    );
    let data = SubscriptionCancelledEvent {
        subscription_id: sub.id,
        subscriber: sub.subscriber.clone(),
        creator: sub.creator.clone(),
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_renewed(env: &Env, sub: &Subscription, amount: u64) {
    let topics = (
        symbol_short!("SUB_RENEW"),
        sub.subscriber.clone(),
        sub.creator.clone(),
    );
    let data = SubscriptionRenewedEvent {
        subscription_id: sub.id,
        subscriber: sub.subscriber.clone(),
        creator: sub.creator.clone(),
        amount,
        next_payment_time: sub.next_payment_time,
    };
    env.events().publish(topics, data);
}

pub fn publish_lapsed(env: &Env, sub: &Subscription, reason: u32) {
    let topics = (
        symbol_short!("SUB_LAPSE"),
        sub.subscriber.clone(),
        sub.creator.clone(),
    );
    let data = SubscriptionLapsedEvent {
        subscription_id: sub.id,
        subscriber: sub.subscriber.clone(),
        creator: sub.creator.clone(),
        reason,
    };
    env.events().publish(topics, data);
}

pub fn publish_billing_scheduled(env: &Env, schedule: &BillingSchedule) {
    let topics = (symbol_short!("BILL_SCH"),);
    let data = BillingScheduledEvent {
        run_at: schedule.run_at,
        target: schedule.target.clone(),
    };
    env.events().publish(topics, data);
}

pub fn publish_billing_processed(
    env: &Env,
    requested_at: u64,
    processed_at: u64,
    report: BillingReport,
) {
    let topics = (symbol_short!("BILL_RUN"),);
    let data = BillingProcessedEvent {
        requested_at,
        processed_at,
        report,
    };
    env.events().publish(topics, data);
}

pub fn publish_earnings_withdrawn(env: &Env, creator: Address, amount: u64, remaining: u64) {
    let topics = (symbol_short!("WITHDRAW"), creator.clone());
    let data = EarningsWithdrawnEvent {
        creator,
        amount,
        remaining,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_surplus_swept(env: &Env, admin: Address, recipient: Address, amount: u64) {
    let topics = (symbol_short!("SURPLUS"), recipient.clone());
    let data = SurplusSweptEvent {
        admin,
        recipient,
        amount,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
