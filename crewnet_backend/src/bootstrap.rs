use anyhow::Result;

use crate::store::models::{CreateUserInput, UserRecord};
use crate::store::repositories::users::UserRepository;
use crate::store::Store;

pub struct BootstrapResources {
    pub store: Store,
    pub seeded_users: Vec<UserRecord>,
}

/// Builds the store and seeds the sample member profiles every fresh
/// process starts with.
pub fn initialize() -> Result<BootstrapResources> {
    let store = Store::new();
    let seeded_users = store.with_repositories(|repos| {
        let mut users = repos.users();
        seed_profiles()
            .into_iter()
            .map(|profile| users.create(profile))
            .collect()
    })?;
    Ok(BootstrapResources {
        store,
        seeded_users,
    })
}

fn seed_profiles() -> Vec<CreateUserInput> {
    vec![
        CreateUserInput {
            name: "Maya Okafor".to_string(),
            headline: "Staff Engineer at Meridian Labs".to_string(),
            bio: Some("Distributed systems by day, flame graphs by night.".to_string()),
            location: Some("Lisbon, Portugal".to_string()),
            avatar: "https://i.pravatar.cc/150?img=47".to_string(),
            cover_image: Some("https://picsum.photos/seed/maya/1200/300".to_string()),
        },
        CreateUserInput {
            name: "Jonas Lindqvist".to_string(),
            headline: "Freelance Product Designer".to_string(),
            bio: Some("Interfaces, typography, and the occasional sauna.".to_string()),
            location: Some("Gothenburg, Sweden".to_string()),
            avatar: "https://i.pravatar.cc/150?img=12".to_string(),
            cover_image: None,
        },
    ]
}
