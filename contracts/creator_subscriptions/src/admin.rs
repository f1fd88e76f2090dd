//! Admin and config: init, admin rotation, billing batch size, surplus sweep.
//!
//! **PRs that only change admin or configuration behavior should edit this file only.**

use crate::events;
use crate::storage;
use crate::types::{Config, Error, MAX_BILLING_BATCH_SIZE};
use soroban_sdk::{token, Address, Env};

fn validate_batch_size(billing_batch_size: u32) -> Result<(), Error> {
    if billing_batch_size == 0 || billing_batch_size > MAX_BILLING_BATCH_SIZE {
        return Err(Error::InvalidBatchSize);
    }
    Ok(())
}

pub fn do_init(
    env: &Env,
    admin: Address,
    token: Address,
    billing_batch_size: u32,
) -> Result<(), Error> {
    if storage::has_config(env) {
        return Err(Error::AlreadyInitialized);
    }
    validate_batch_size(billing_batch_size)?;
    admin.require_auth();

    storage::write_config(
        env,
        &Config {
            admin: admin.clone(),
            token: token.clone(),
            billing_batch_size,
        },
    );
    storage::bump_instance(env);
    events::publish_initialized(env, admin, token, billing_batch_size);
    Ok(())
}

/// Checks that `admin` authorized this call and is the stored admin.
pub fn require_admin(env: &Env, admin: &Address) -> Result<Config, Error> {
    admin.require_auth();
    let config = storage::read_config(env)?;
    if *admin != config.admin {
        return Err(Error::Unauthorized);
    }
    Ok(config)
}

pub fn do_get_admin(env: &Env) -> Result<Address, Error> {
    storage::read_config(env).map(|config| config.admin)
}

pub fn do_get_token(env: &Env) -> Result<Address, Error> {
    storage::read_config(env).map(|config| config.token)
}

pub fn do_rotate_admin(env: &Env, current_admin: Address, new_admin: Address) -> Result<(), Error> {
    let mut config = require_admin(env, &current_admin)?;
    config.admin = new_admin.clone();
    storage::write_config(env, &config);
    storage::bump_instance(env);
    events::publish_admin_rotated(env, current_admin, new_admin);
    Ok(())
}

pub fn do_set_billing_batch_size(
    env: &Env,
    admin: Address,
    billing_batch_size: u32,
) -> Result<(), Error> {
    let mut config = require_admin(env, &admin)?;
    validate_batch_size(billing_batch_size)?;
    config.billing_batch_size = billing_batch_size;
    storage::write_config(env, &config);
    storage::bump_instance(env);
    events::publish_batch_size_changed(env, admin, billing_batch_size);
    Ok(())
}

pub fn get_surplus(env: &Env) -> u64 {
    storage::read_surplus(env)
}

/// Pays out everything subscribers sent above tier prices. These funds belong
/// to no creator vault, so only the admin can move them.
pub fn do_sweep_surplus(env: &Env, admin: Address, recipient: Address) -> Result<u64, Error> {
    let config = require_admin(env, &admin)?;
    let amount = storage::read_surplus(env);
    if amount == 0 {
        return Err(Error::NoSurplus);
    }

    storage::write_surplus(env, 0);
    storage::bump_instance(env);
    token::Client::new(env, &config.token).transfer(
        &env.current_contract_address(),
        &recipient,
        &i128::from(amount),
    );
    events::publish_surplus_swept(env, admin, recipient, amount);
    Ok(amount)
}
