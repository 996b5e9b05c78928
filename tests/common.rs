#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;
use training_planner::db::initialize::init_db;
use training_planner::db::pool::DbPool;

pub fn tp() -> Command {
    cargo_bin_cmd!("tplanner")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tplanner.sqlite", name));
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

/// Initialize the DB and register three trainers:
/// 1 = Admin (admin), 2 = Anna Muster, 3 = Ben Beispiel.
pub fn init_db_with_trainers(db_path: &str) {
    tp().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    tp().args(["--db", db_path, "--test", "trainer", "add", "Admin", "--admin"])
        .assert()
        .success();

    for name in ["Anna Muster", "Ben Beispiel"] {
        tp().args(["--db", db_path, "--test", "--user", "1", "trainer", "add", name])
            .assert()
            .success();
    }
}

/// Same as `init_db_with_trainers`, plus the generated sessions of April 2024.
pub fn init_db_with_april(db_path: &str) {
    init_db_with_trainers(db_path);
    tp().args(["--db", db_path, "--test", "--user", "1", "generate", "2024-04"])
        .assert()
        .success();
}

/// Open a migrated pool directly through the library.
pub fn open_pool(db_path: &str) -> DbPool {
    let pool = DbPool::new(db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}
