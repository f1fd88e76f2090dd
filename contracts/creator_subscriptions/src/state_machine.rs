//! Lifecycle rules for the `(subscriber, creator)` ledger slot.

use crate::types::{Error, Subscription, SubscriptionState};

/// Derives the slot state from what storage holds.
pub fn state_of(record: Option<&Subscription>) -> SubscriptionState {
    match record {
        None => SubscriptionState::NoRecord,
        Some(sub) if sub.is_active => SubscriptionState::Active,
        Some(_) => SubscriptionState::Cancelled,
    }
}

/// Validates a lifecycle transition.
///
/// | From      | To        | Result                     |
/// |-----------|-----------|----------------------------|
/// | NoRecord  | Active    | Ok                         |
/// | Cancelled | Active    | Ok (record overwritten)    |
/// | Active    | Cancelled | Ok                         |
/// | Active    | Active    | `AlreadySubscribed`        |
/// | Cancelled | Cancelled | `AlreadyCancelled`         |
/// | NoRecord  | Cancelled | `NotFound`                 |
/// | *any*     | NoRecord  | `InvalidTransition`        |
///
/// Records are never deleted, so nothing transitions back to `NoRecord`.
pub fn validate_transition(
    from: &SubscriptionState,
    to: &SubscriptionState,
) -> Result<(), Error> {
    match (from, to) {
        (SubscriptionState::NoRecord, SubscriptionState::Active)
        | (SubscriptionState::Cancelled, SubscriptionState::Active)
        | (SubscriptionState::Active, SubscriptionState::Cancelled) => Ok(()),
        (SubscriptionState::Active, SubscriptionState::Active) => Err(Error::AlreadySubscribed),
        (SubscriptionState::Cancelled, SubscriptionState::Cancelled) => {
            Err(Error::AlreadyCancelled)
        }
        (SubscriptionState::NoRecord, SubscriptionState::Cancelled) => Err(Error::NotFound),
        (_, SubscriptionState::NoRecord) => Err(Error::InvalidTransition),
    }
}

pub fn get_allowed_transitions(state: &SubscriptionState) -> &'static [SubscriptionState] {
    match state {
        SubscriptionState::NoRecord => &[SubscriptionState::Active],
        SubscriptionState::Active => &[SubscriptionState::Cancelled],
        SubscriptionState::Cancelled => &[SubscriptionState::Active],
    }
}

pub fn can_transition(from: &SubscriptionState, to: &SubscriptionState) -> bool {
    validate_transition(from, to).is_ok()
}
