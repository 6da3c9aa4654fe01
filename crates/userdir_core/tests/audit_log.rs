use userdir_core::db::{open_db_in_memory, share};
use userdir_core::{AuditLogRepository, LogOrder, SqliteAuditLogRepository};

fn repo() -> SqliteAuditLogRepository {
    SqliteAuditLogRepository::try_new(share(open_db_in_memory().unwrap())).unwrap()
}

#[test]
fn append_assigns_increasing_ids_starting_at_one() {
    let log = repo();

    let first = log.append("SuperAdmin", "added user Maria (id=2)").unwrap();
    let second = log.append("SuperAdmin", "added user Ivan (id=3)").unwrap();

    assert_eq!(first.log_id, 1);
    assert_eq!(second.log_id, 2);
    assert_eq!(first.actor_name, "SuperAdmin");
    assert_eq!(second.action, "added user Ivan (id=3)");
}

#[test]
fn append_stamps_second_precision_timestamp() {
    let log = repo();

    let entry = log.append("SuperAdmin", "added user Maria (id=2)").unwrap();

    // YYYY-MM-DD HH:MM:SS
    let stamp = entry.timestamp.as_bytes();
    assert_eq!(stamp.len(), 19);
    assert_eq!(stamp[4], b'-');
    assert_eq!(stamp[7], b'-');
    assert_eq!(stamp[10], b' ');
    assert_eq!(stamp[13], b':');
    assert_eq!(stamp[16], b':');
}

#[test]
fn list_supports_both_orders() {
    let log = repo();
    for action in ["first", "second", "third"] {
        log.append("SuperAdmin", action).unwrap();
    }

    let oldest_first: Vec<i64> = log
        .list_entries(LogOrder::OldestFirst)
        .unwrap()
        .iter()
        .map(|entry| entry.log_id)
        .collect();
    assert_eq!(oldest_first, vec![1, 2, 3]);

    let newest_first = log.list_entries(LogOrder::default()).unwrap();
    assert_eq!(newest_first[0].action, "third");
    assert_eq!(newest_first[2].action, "first");
}

#[test]
fn empty_log_lists_nothing() {
    let log = repo();

    assert!(log.list_entries(LogOrder::NewestFirst).unwrap().is_empty());
}
