use soroban_sdk::{contracterror, contracttype, Address, Env, String, Vec};

/// Length of one billing cycle in milliseconds (fixed 30 days, not calendar months).
pub const BILLING_PERIOD_MS: u64 = 30 * 24 * 60 * 60 * 1000;

/// Ledger timestamps are seconds; the ledger model stores milliseconds.
pub const MS_PER_SECOND: u64 = 1000;

/// Subscription ids inspected per `process_billing` call unless the admin changes it.
pub const DEFAULT_BILLING_BATCH_SIZE: u32 = 50;

/// Upper bound for the configurable billing batch size.
pub const MAX_BILLING_BATCH_SIZE: u32 = 200;

/// Storage keys. Each variant encodes under its own discriminant, so two
/// namespaces can never produce the same key.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    /// `(creator, tier_id)`
    Tier(Address, u64),
    TierCount(Address),
    /// `(subscriber, creator)`
    Subscription(Address, Address),
    /// Global subscription id -> ledger key of the record it was issued to.
    SubscriptionIndex(u64),
    SubscriptionCount,
    Vault(Address),
    BillingScheduled,
    BillingCursor,
    Surplus,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    NotFound = 404,
    Unauthorized = 401,
    InvalidTransition = 400,
    InsufficientPayment = 402,
    Overflow = 403,
    AlreadySubscribed = 409,
    AlreadyCancelled = 1001,
    InsufficientBalance = 1003,
    /// Withdrawal attempted against an empty vault.
    NoEarnings = 1004,
    NotInitialized = 1005,
    AlreadyInitialized = 1006,
    /// Billing batch size is zero or above [`MAX_BILLING_BATCH_SIZE`].
    InvalidBatchSize = 1007,
    /// Surplus sweep requested while nothing is held.
    NoSurplus = 1008,
}

impl Error {
    pub const fn to_code(self) -> u32 {
        match self {
            Error::NotFound => 404,
            Error::Unauthorized => 401,
            Error::InvalidTransition => 400,
            Error::InsufficientPayment => 402,
            Error::Overflow => 403,
            Error::AlreadySubscribed => 409,
            Error::AlreadyCancelled => 1001,
            Error::InsufficientBalance => 1003,
            Error::NoEarnings => 1004,
            Error::NotInitialized => 1005,
            Error::AlreadyInitialized => 1006,
            Error::InvalidBatchSize => 1007,
            Error::NoSurplus => 1008,
        }
    }
}

/// Contract-wide settings written once by `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    /// Settlement token. Subscription payments, renewals and payouts all move this asset.
    pub token: Address,
    pub billing_batch_size: u32,
}

/// A creator-defined plan. Immutable once created.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tier {
    pub id: u64,
    pub creator: Address,
    pub name: String,
    /// Atomic units of the settlement token charged every billing cycle.
    pub price_per_month: u64,
    pub metadata_uri: String,
    pub created_at: u64,
}

/// Result of `get_creator_tiers`: the creator's tier counter plus every tier
/// still present in storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierList {
    pub count: u64,
    pub tiers: Vec<Tier>,
}

/// A subscriber's standing relationship to one creator.
///
/// There is at most one record per `(subscriber, creator)`. Resubscribing
/// after a cancel overwrites it in place with a fresh `id`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subscription {
    pub id: u64,
    pub subscriber: Address,
    pub creator: Address,
    pub tier_id: u64,
    pub is_active: bool,
    pub next_payment_time: u64,
    pub created_at: u64,
    pub total_paid: u64,
}

/// Lifecycle of the `(subscriber, creator)` ledger slot.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SubscriptionState {
    NoRecord = 0,
    Active = 1,
    Cancelled = 2,
}

/// Index entry pointing from a global subscription id back to its ledger slot.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionRef {
    pub subscriber: Address,
    pub creator: Address,
}

/// The pending billing job. Its presence is the "scheduled" flag.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BillingSchedule {
    /// Millisecond timestamp at which keepers should invoke `process_billing`.
    pub run_at: u64,
    /// Contract the job targets (always this contract).
    pub target: Address,
}

/// Outcome of one `process_billing` call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BillingReport {
    pub scanned: u32,
    pub charged: u32,
    pub lapsed: u32,
    pub collected: u64,
    /// Subscription id the next call resumes from.
    pub next_cursor: u64,
    /// `true` once the pass reached the end of the subscription index.
    pub complete: bool,
}

/// Current ledger time in milliseconds.
pub fn now_ms(env: &Env) -> Result<u64, Error> {
    env.ledger()
        .timestamp()
        .checked_mul(MS_PER_SECOND)
        .ok_or(Error::Overflow)
}
