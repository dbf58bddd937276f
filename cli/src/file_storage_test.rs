use std::fs;
use std::sync::Arc;

use portal::state::session::{CREDENTIAL_KEY, RoleId, Session};

use super::*;

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("portal-cli-{}", uuid::Uuid::new_v4())).join("session.json")
}

#[test]
fn missing_file_starts_empty() {
    let storage = FileStorage::open(temp_path());
    assert_eq!(storage.get(CREDENTIAL_KEY), None);
}

#[test]
fn set_persists_across_reopen() {
    let path = temp_path();
    let storage = FileStorage::open(&path);
    storage.set("jwtToken", "abc").unwrap();

    let reopened = FileStorage::open(&path);
    assert_eq!(reopened.get("jwtToken").as_deref(), Some("abc"));
    fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn remove_drops_key_from_file() {
    let path = temp_path();
    let storage = FileStorage::open(&path);
    storage.set("role", "1").unwrap();
    storage.set("jwtToken", "abc").unwrap();
    storage.remove("role").unwrap();

    let reopened = FileStorage::open(&path);
    assert_eq!(reopened.get("role"), None);
    assert_eq!(reopened.get("jwtToken").as_deref(), Some("abc"));
    fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn remove_missing_key_does_not_create_file() {
    let path = temp_path();
    let storage = FileStorage::open(&path);
    storage.remove("role").unwrap();
    assert!(!path.exists());
}

#[test]
fn corrupt_file_reads_as_empty() {
    let path = temp_path();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "not json").unwrap();
    assert_eq!(FileStorage::open(&path).get("jwtToken"), None);
    fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[test]
fn session_round_trips_through_file() {
    let path = temp_path();
    {
        let mut session = Session::new(Arc::new(FileStorage::open(&path)));
        session.set_credential("tok");
        session.set_role(RoleId::new("2"));
    }
    let restored = Session::restore(Arc::new(FileStorage::open(&path)));
    assert_eq!(restored.credential(), Some("tok"));
    assert_eq!(restored.role(), Some(&RoleId::new("2")));
    assert!(restored.identity().is_none());
    fs::remove_dir_all(path.parent().unwrap()).unwrap();
}
