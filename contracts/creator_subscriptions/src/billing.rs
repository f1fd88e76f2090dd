//! Billing scheduler: the singleton pending job and the billing pass that re-arms it.
//!
//! The job is a stored [`BillingSchedule`]; keepers watch it and invoke
//! `process_billing` once `run_at` has passed. `process_billing` always
//! finishes by re-arming the job, so the loop runs indefinitely once the
//! first subscription arms it.

use crate::charge_core::{renew_one, RenewalOutcome};
use crate::events;
use crate::storage;
use crate::types::{now_ms, BillingReport, BillingSchedule, Config, Error, BILLING_PERIOD_MS};
use soroban_sdk::{log, token, Env};

/// Stores a job for `run_at` unless one is already pending. Returns whether a job was armed.
pub fn arm(env: &Env, run_at: u64) -> bool {
    if storage::has_billing_schedule(env) {
        return false;
    }
    let schedule = BillingSchedule {
        run_at,
        target: env.current_contract_address(),
    };
    storage::write_billing_schedule(env, &schedule);
    events::publish_billing_scheduled(env, &schedule);
    true
}

/// Arms the job one billing period from now. No-op when a job is pending.
pub fn do_schedule_billing(env: &Env) -> Result<(), Error> {
    let run_at = now_ms(env)?
        .checked_add(BILLING_PERIOD_MS)
        .ok_or(Error::Overflow)?;
    arm(env, run_at);
    storage::bump_instance(env);
    Ok(())
}

pub fn get_billing_schedule(env: &Env) -> Option<BillingSchedule> {
    storage::read_billing_schedule(env)
}

pub fn is_billing_scheduled(env: &Env) -> bool {
    storage::has_billing_schedule(env)
}

/// Walks at most `billing_batch_size` ids from the cursor, renewing whatever is due.
fn run_pass(env: &Env, config: &Config, now: u64) -> BillingReport {
    let token = token::Client::new(env, &config.token);
    let total = storage::read_subscription_count(env);
    let start = storage::read_billing_cursor(env).min(total);
    let end = start
        .saturating_add(u64::from(config.billing_batch_size))
        .min(total);

    let mut report = BillingReport {
        scanned: 0,
        charged: 0,
        lapsed: 0,
        collected: 0,
        next_cursor: 0,
        complete: end >= total,
    };
    for id in start..end {
        match renew_one(env, &token, id, now) {
            RenewalOutcome::Renewed(amount) => {
                report.charged += 1;
                report.collected = report.collected.saturating_add(amount);
            }
            RenewalOutcome::Lapsed => report.lapsed += 1,
            RenewalOutcome::Skipped => {}
        }
        report.scanned += 1;
    }
    report.next_cursor = if report.complete { 0 } else { end };
    storage::write_billing_cursor(env, report.next_cursor);

    log!(
        env,
        "billing pass",
        start,
        end,
        report.charged,
        report.lapsed
    );
    report
}

/// Runs one billing pass and re-arms the job.
///
/// Everything that can fail is checked before the pass starts, and the pass
/// itself folds per-subscription failures into the report, so the re-arm at
/// the end is always reached. If more ids remain after this batch the job is
/// re-armed for `now` so keepers continue straight away; once the pass wraps
/// it is re-armed one billing period out. A call made before the pending job's
/// `run_at` still renews whatever is due but does not move the job.
pub fn do_process_billing(env: &Env, requested_at: u64) -> Result<BillingReport, Error> {
    let config = storage::read_config(env)?;
    let now = now_ms(env)?;
    let next_cycle = now.checked_add(BILLING_PERIOD_MS).ok_or(Error::Overflow)?;

    let pending = storage::read_billing_schedule(env);

    let report = run_pass(env, &config, now);

    // An early call that finishes the pass leaves a future job where it is.
    let keep_pending = report.complete && pending.is_some_and(|job| now < job.run_at);
    if !keep_pending {
        storage::clear_billing_schedule(env);
        arm(env, if report.complete { next_cycle } else { now });
    }
    storage::bump_instance(env);

    events::publish_billing_processed(env, requested_at, now, report.clone());
    Ok(report)
}
