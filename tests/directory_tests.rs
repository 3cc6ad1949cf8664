use kpidesk::core::store::UserDirectory;
use kpidesk::db::pool::DbPool;
use kpidesk::db::store::SqliteStore;
use kpidesk::errors::AppError;
use kpidesk::models::role::Role;

#[test]
fn duplicate_email_is_a_domain_error() {
    let pool = DbPool::in_memory().unwrap();
    let store = SqliteStore::new(&pool.conn);

    store
        .insert_user("sales.lead", Some("sales@example.com"), Role::Sales)
        .unwrap();

    let err = store
        .insert_user("sales.backup", Some("sales@example.com"), Role::Sales)
        .unwrap_err();
    match err {
        AppError::DuplicateEmail { email, user } => {
            assert_eq!(email, "sales@example.com");
            assert_eq!(user, "sales.lead");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.find_by_username("sales.backup").unwrap().is_none());
}

#[test]
fn users_without_email_do_not_collide() {
    let pool = DbPool::in_memory().unwrap();
    let store = SqliteStore::new(&pool.conn);

    store.insert_user("md", None, Role::Viewer).unwrap();
    store.insert_user("admin", None, Role::Viewer).unwrap();
    assert_eq!(store.list_users().unwrap().len(), 2);
}
