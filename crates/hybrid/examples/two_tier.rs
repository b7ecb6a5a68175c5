// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Two-Tier Cache in Front of a Database Example
//!
//! A small local tier sits in front of a larger shared tier, and both sit in front of
//! a simulated database:
//!
//! - The first lookup of a user reaches the database and fills both tiers
//! - Later lookups are served by the local tier
//! - Unknown users are cached as empty values by the shared tier, so repeated
//!   lookups of a missing user do not reach the database
//! - Deleting a user removes it from both tiers

use std::{
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use hybrid::{Error, Hybrid, TierOptions, TierPolicy, memory::MemoryTier};

#[derive(Debug, Clone, PartialEq)]
struct User {
    name: String,
}

#[derive(Debug, Default)]
struct Database {
    queries: AtomicU32,
}

impl Database {
    async fn find_user(&self, id: &str) -> Result<Option<User>, Error> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        match id {
            "1" => Ok(Some(User { name: "Ada".to_string() })),
            "2" => Ok(Some(User { name: "Grace".to_string() })),
            _ => Err(Error::empty_data()),
        }
    }

    fn queries(&self) -> u32 {
        self.queries.load(Ordering::SeqCst)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let local = MemoryTier::<Option<User>>::builder()
        .max_capacity(100)
        .time_to_live(Duration::from_secs(30))
        .name("local")
        .build();
    let shared = MemoryTier::<Option<User>>::builder()
        .max_capacity(10_000)
        .time_to_live(Duration::from_secs(600))
        .name("shared")
        .options(
            TierOptions::new()
                .prefix("users")
                .cache_empty(true)
                .empty_ttl(Duration::from_secs(60)),
        )
        .build();

    let cache = Hybrid::<Option<User>>::builder()
        .tier(local, TierPolicy::best_effort().named("local"))
        .tier(shared, TierPolicy::important().named("shared"))
        .build()?;

    let database = Arc::new(Database::default());

    for id in ["1", "1", "2", "404", "404"] {
        let db = Arc::clone(&database);
        let owned_id = id.to_string();
        let user = cache.get_value(id, move || async move { db.find_user(&owned_id).await }).await?;
        println!("user {id}: {user:?} (database queries so far: {})", database.queries());
    }

    cache.del("1").await?;

    let db = Arc::clone(&database);
    let user = cache.get_value("1", move || async move { db.find_user("1").await }).await?;
    println!("user 1 after delete: {user:?} (database queries so far: {})", database.queries());

    println!("tiers: {:?}", cache.tier_names());

    Ok(())
}
