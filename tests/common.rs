#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use kpidesk::db::pool::DbPool;
use kpidesk::db::store::SqliteStore;
use kpidesk::models::role::Role;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn kpd() -> Command {
    cargo_bin_cmd!("kpidesk")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_kpidesk.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and seed the default roster through the CLI
pub fn init_db_with_roster(db_path: &str) {
    kpd()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    kpd()
        .args(["--db", db_path, "--test", "user", "seed"])
        .assert()
        .success();
}

/// In-memory database with one uploader per role plus the supervisor.
pub fn memory_db_with_users() -> DbPool {
    let pool = DbPool::in_memory().expect("in-memory db");
    {
        let store = SqliteStore::new(&pool.conn);
        store
            .insert_user("supervisor", Some("supervisor@example.com"), Role::Viewer)
            .expect("supervisor");
        for role in Role::UPLOADERS {
            let name = format!("{}.clerk", role.code());
            let email = format!("{}@example.com", role.code());
            store
                .insert_user(&name, Some(&email), role)
                .expect("uploader");
        }
    }
    pool
}
