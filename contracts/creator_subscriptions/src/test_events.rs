use crate::events::{
    AdminRotatedEvent, BillingProcessedEvent, BillingScheduledEvent, EarningsWithdrawnEvent,
    SubscribedEvent, SubscriptionCancelledEvent, SubscriptionLapsedEvent,
    SubscriptionRenewedEvent, SurplusSweptEvent, TierCreatedEvent,
};
use crate::test::{Setup, BILLING_PERIOD_SECS, PRICE};
use crate::{Error, BILLING_PERIOD_MS};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{symbol_short, Address, IntoVal, String, TryFromVal, Val, Vec};

fn topics_of<T: IntoVal<soroban_sdk::Env, Vec<Val>>>(s: &Setup, topics: T) -> Vec<Val> {
    topics.into_val(&s.env)
}

#[test]
fn test_create_tier_event() {
    let s = Setup::new();
    let alice = Address::generate(&s.env);
    s.create_tier(&alice, PRICE);

    let (topics, data) = s.last_event(symbol_short!("TIER_NEW")).unwrap();
    assert_eq!(topics, topics_of(&s, (symbol_short!("TIER_NEW"), alice.clone())));
    assert_eq!(
        TierCreatedEvent::try_from_val(&s.env, &data).unwrap(),
        TierCreatedEvent {
            creator: alice,
            tier_id: 0,
            name: String::from_str(&s.env, "Supporter"),
            price_per_month: PRICE,
            created_at: s.now_ms(),
        }
    );
}

#[test]
fn test_rotate_admin_event() {
    let s = Setup::new();
    let new_admin = Address::generate(&s.env);
    s.client.rotate_admin(&s.admin, &new_admin);

    let (topics, data) = s.last_event(symbol_short!("ADM_ROT")).unwrap();
    assert_eq!(
        topics,
        topics_of(&s, (symbol_short!("ADM_ROT"), s.admin.clone(), new_admin.clone()))
    );
    assert_eq!(
        AdminRotatedEvent::try_from_val(&s.env, &data).unwrap(),
        AdminRotatedEvent {
            old_admin: s.admin.clone(),
            new_admin,
            timestamp: s.env.ledger().timestamp(),
        }
    );
}

#[test]
fn test_subscribe_event_records_full_payment() {
    let s = Setup::new();
    let alice = s.creator_with_tier(PRICE);
    let bob = s.funded_user(10_000);
    s.client.subscribe(&bob, &alice, &0, &(PRICE + 250));

    let (topics, data) = s.last_event(symbol_short!("SUB_NEW")).unwrap();
    assert_eq!(
        topics,
        topics_of(&s, (symbol_short!("SUB_NEW"), bob.clone(), alice.clone()))
    );
    assert_eq!(
        SubscribedEvent::try_from_val(&s.env, &data).unwrap(),
        SubscribedEvent {
            subscription_id: 0,
            subscriber: bob,
            creator: alice,
            tier_id: 0,
            payment: PRICE + 250,
            next_payment_time: s.now_ms() + BILLING_PERIOD_MS,
        }
    );

    // The first subscription armed the billing job in the same call.
    let (_, data) = s.last_event(symbol_short!("BILL_SCH")).unwrap();
    assert_eq!(
        BillingScheduledEvent::try_from_val(&s.env, &data).unwrap(),
        BillingScheduledEvent {
            run_at: s.now_ms() + BILLING_PERIOD_MS,
            target: s.contract_id.clone(),
        }
    );
}

#[test]
fn test_cancel_event() {
    let s = Setup::new();
    let alice = s.creator_with_tier(PRICE);
    let bob = s.funded_user(10_000);
    s.client.subscribe(&bob, &alice, &0, &PRICE);
    s.advance(60);
    s.client.cancel_subscription(&bob, &alice);

    let (topics, data) = s.last_event(symbol_short!("SUB_CNCL")).unwrap();
    assert_eq!(
        topics,
        topics_of(&s, (symbol_short!("SUB_CNCL"), bob.clone(), alice.clone()))
    );
    assert_eq!(
        SubscriptionCancelledEvent::try_from_val(&s.env, &data).unwrap(),
        SubscriptionCancelledEvent {
            subscription_id: 0,
            subscriber: bob,
            creator: alice,
            timestamp: s.env.ledger().timestamp(),
        }
    );
}

#[test]
fn test_billing_run_events() {
    let s = Setup::new();
    let alice = s.creator_with_tier(PRICE);
    let bob = s.funded_user(10_000);
    s.client.subscribe(&bob, &alice, &0, &PRICE);
    s.approve(&bob, 5 * PRICE as i128);

    s.advance(BILLING_PERIOD_SECS);
    let requested_at = s.now_ms() - 1;
    let report = s.client.process_billing(&requested_at);

    let (topics, data) = s.last_event(symbol_short!("SUB_RENEW")).unwrap();
    assert_eq!(
        topics,
        topics_of(&s, (symbol_short!("SUB_RENEW"), bob.clone(), alice.clone()))
    );
    assert_eq!(
        SubscriptionRenewedEvent::try_from_val(&s.env, &data).unwrap(),
        SubscriptionRenewedEvent {
            subscription_id: 0,
            subscriber: bob.clone(),
            creator: alice.clone(),
            amount: PRICE,
            next_payment_time: s.client.get_subscription(&bob, &alice).next_payment_time,
        }
    );

    let (_, data) = s.last_event(symbol_short!("BILL_SCH")).unwrap();
    assert_eq!(
        BillingScheduledEvent::try_from_val(&s.env, &data).unwrap().run_at,
        s.now_ms() + BILLING_PERIOD_MS
    );

    let (topics, data) = s.last_event(symbol_short!("BILL_RUN")).unwrap();
    assert_eq!(topics, topics_of(&s, (symbol_short!("BILL_RUN"),)));
    assert_eq!(
        BillingProcessedEvent::try_from_val(&s.env, &data).unwrap(),
        BillingProcessedEvent {
            requested_at,
            processed_at: s.now_ms(),
            report,
        }
    );
}

#[test]
fn test_lapse_event_carries_reason() {
    let s = Setup::new();
    let alice = s.creator_with_tier(PRICE);
    let bob = s.funded_user(10_000);
    s.client.subscribe(&bob, &alice, &0, &PRICE);

    s.advance(BILLING_PERIOD_SECS);
    s.client.process_billing(&s.now_ms());

    let (topics, data) = s.last_event(symbol_short!("SUB_LAPSE")).unwrap();
    assert_eq!(
        topics,
        topics_of(&s, (symbol_short!("SUB_LAPSE"), bob.clone(), alice.clone()))
    );
    assert_eq!(
        SubscriptionLapsedEvent::try_from_val(&s.env, &data).unwrap(),
        SubscriptionLapsedEvent {
            subscription_id: 0,
            subscriber: bob,
            creator: alice,
            reason: Error::InsufficientPayment.to_code(),
        }
    );
}

#[test]
fn test_withdraw_event() {
    let s = Setup::new();
    let alice = s.creator_with_tier(PRICE);
    let bob = s.funded_user(10_000);
    s.client.subscribe(&bob, &alice, &0, &PRICE);
    s.client.withdraw_earnings(&alice, &400);

    let (topics, data) = s.last_event(symbol_short!("WITHDRAW")).unwrap();
    assert_eq!(topics, topics_of(&s, (symbol_short!("WITHDRAW"), alice.clone())));
    assert_eq!(
        EarningsWithdrawnEvent::try_from_val(&s.env, &data).unwrap(),
        EarningsWithdrawnEvent {
            creator: alice,
            amount: 400,
            remaining: PRICE - 400,
            timestamp: s.env.ledger().timestamp(),
        }
    );
}

#[test]
fn test_sweep_surplus_event() {
    let s = Setup::new();
    let alice = s.creator_with_tier(PRICE);
    let bob = s.funded_user(10_000);
    let treasury = Address::generate(&s.env);
    s.client.subscribe(&bob, &alice, &0, &(PRICE + 250));
    s.client.sweep_surplus(&s.admin, &treasury);

    let (topics, data) = s.last_event(symbol_short!("SURPLUS")).unwrap();
    assert_eq!(topics, topics_of(&s, (symbol_short!("SURPLUS"), treasury.clone())));
    assert_eq!(
        SurplusSweptEvent::try_from_val(&s.env, &data).unwrap(),
        SurplusSweptEvent {
            admin: s.admin.clone(),
            recipient: treasury,
            amount: 250,
            timestamp: s.env.ledger().timestamp(),
        }
    );
}

#[test]
fn test_pending_job_is_announced_once() {
    let s = Setup::new();
    s.client.schedule_billing();
    let first_run_at = s.now_ms() + BILLING_PERIOD_MS;
    let announced = s.events_with_topic(symbol_short!("BILL_SCH"));
    assert_eq!(announced.len(), 1);

    // Neither a second schedule call nor a new subscriber announces another job.
    s.advance(3600);
    s.client.schedule_billing();
    let alice = s.creator_with_tier(PRICE);
    let bob = s.funded_user(10_000);
    s.client.subscribe(&bob, &alice, &0, &PRICE);

    let announced = s.events_with_topic(symbol_short!("BILL_SCH"));
    assert!(announced.len() <= 1);
    for (_, data) in announced {
        assert_eq!(
            BillingScheduledEvent::try_from_val(&s.env, &data)
                .unwrap()
                .run_at,
            first_run_at
        );
    }
    assert_eq!(s.client.get_billing_schedule().unwrap().run_at, first_run_at);
}
