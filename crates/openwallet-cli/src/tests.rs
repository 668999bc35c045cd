//! CLI command tests

use tempfile::TempDir;

use crate::commands;

fn temp_db() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.db");
    (dir, path)
}

#[test]
fn test_init_creates_database_file() {
    let (_dir, path) = temp_db();
    commands::cmd_init(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_transactions_add_and_list() {
    let (_dir, path) = temp_db();
    commands::cmd_init(&path).unwrap();

    commands::cmd_transactions_add(
        &path,
        1,
        "2025-11-03",
        "스타카페",
        4500,
        Some("카페/간식".to_string()),
        None,
    )
    .unwrap();

    commands::cmd_transactions_list(&path, 1, None, None).unwrap();

    let db = commands::open_db(&path).unwrap();
    assert_eq!(db.count_transactions(1).unwrap(), 1);
}

#[test]
fn test_transactions_add_rejects_bad_input() {
    let (_dir, path) = temp_db();
    commands::cmd_init(&path).unwrap();

    assert!(
        commands::cmd_transactions_add(&path, 1, "2025-11-03", "  ", 4500, None, None).is_err()
    );
    assert!(
        commands::cmd_transactions_add(&path, 1, "2025-11-03", "스타카페", 0, None, None).is_err()
    );
    assert!(
        commands::cmd_transactions_add(&path, 1, "11/03/2025", "스타카페", 4500, None, None)
            .is_err()
    );
}

#[test]
fn test_transactions_list_rejects_bad_date() {
    let (_dir, path) = temp_db();
    commands::cmd_init(&path).unwrap();

    assert!(commands::cmd_transactions_list(&path, 1, Some("bad"), None).is_err());
}
