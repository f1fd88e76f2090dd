//! Tier catalog: create_tier, get_tier, get_creator_tiers.

use crate::events;
use crate::storage;
use crate::types::{now_ms, Error, Tier, TierList};
use soroban_sdk::{Address, Env, String, Vec};

pub fn do_create_tier(
    env: &Env,
    caller: Address,
    creator: Address,
    name: String,
    price_per_month: u64,
    metadata_uri: String,
) -> Result<u64, Error> {
    caller.require_auth();
    if caller != creator {
        return Err(Error::Unauthorized);
    }

    let id = storage::read_tier_count(env, &creator);
    let next_count = id.checked_add(1).ok_or(Error::Overflow)?;
    let tier = Tier {
        id,
        creator: creator.clone(),
        name,
        price_per_month,
        metadata_uri,
        created_at: now_ms(env)?,
    };

    storage::write_tier(env, &tier);
    storage::write_tier_count(env, &creator, next_count);
    storage::bump_instance(env);
    events::publish_tier_created(env, &tier);
    Ok(id)
}

pub fn get_tier(env: &Env, creator: &Address, tier_id: u64) -> Result<Tier, Error> {
    storage::read_tier(env, creator, tier_id).ok_or(Error::NotFound)
}

pub fn get_tier_count(env: &Env, creator: &Address) -> u64 {
    storage::read_tier_count(env, creator)
}

/// Returns the creator's counter and every tier slot in `0..count` that holds a tier.
pub fn get_creator_tiers(env: &Env, creator: &Address) -> TierList {
    let count = storage::read_tier_count(env, creator);
    let mut tiers = Vec::new(env);
    for tier_id in 0..count {
        if let Some(tier) = storage::read_tier(env, creator, tier_id) {
            tiers.push_back(tier);
        }
    }
    TierList { count, tiers }
}
