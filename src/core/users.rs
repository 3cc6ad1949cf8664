use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::models::role::Role;

/// Default roster: one account per uploader role plus the viewers.
pub const DEFAULT_ROSTER: &[(&str, Role, &str)] = &[
    ("admin", Role::Viewer, "it@example.com"),
    ("md", Role::Viewer, "md@example.com"),
    ("supervisor", Role::Viewer, "supervisor@example.com"),
    ("balance.clerk", Role::Balance, "balance@example.com"),
    ("interest.clerk", Role::Interest, "interest@example.com"),
    ("payables.clerk", Role::Payables, "payables@example.com"),
    ("receivables.clerk", Role::Receivables, "receivables@example.com"),
    ("plant.manager", Role::Plant, "plant@example.com"),
    ("sponge.lead", Role::Sponge, "sponge@example.com"),
    ("sales.lead", Role::Sales, "sales@example.com"),
    ("scrap.buyer", Role::Scrap, "scrap@example.com"),
];

/// Insert the default roster, skipping usernames that already exist.
/// Returns the usernames that were created.
pub fn seed_roster(store: &SqliteStore) -> AppResult<Vec<String>> {
    use crate::core::store::UserDirectory;

    let mut created = Vec::new();
    for (username, role, email) in DEFAULT_ROSTER {
        if store.find_by_username(username)?.is_some() {
            continue;
        }
        store.insert_user(username, Some(email), *role)?;
        created.push(username.to_string());
    }
    Ok(created)
}
