use phonebook_core::db::open_db_in_memory;
use phonebook_core::{
    ContactListQuery, ContactRepository, ContactUpdate, NewContactRecord, RepoError,
    SqliteContactRepository, SqliteTagRepository, TagRepository,
};
use rusqlite::Connection;

fn new_record(name: &str, tag_id: i64) -> NewContactRecord {
    NewContactRecord {
        name: name.to_string(),
        content: "0811222333".to_string(),
        can_be_checked_off: false,
        is_checked_off: false,
        tag_id,
        in_trash: false,
        is_favorite: false,
    }
}

#[test]
fn insert_assigns_fresh_id_and_get_reads_it_back() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let id = repo.insert_contact(&new_record("Ada", 4)).unwrap();
    assert!(id > 6);

    let loaded = repo.get_contact(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Ada");
    assert_eq!(loaded.tag_id, 4);
    assert!(!loaded.in_trash);
}

#[test]
fn ids_are_never_reused_after_permanent_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let first = repo.insert_contact(&new_record("Ada", 1)).unwrap();
    repo.delete_contact(first).unwrap();
    let second = repo.insert_contact(&new_record("Grace", 1)).unwrap();

    assert!(second > first);
    assert!(repo.get_contact(first).unwrap().is_none());
}

#[test]
fn update_keeps_trash_flag_and_reports_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    repo.set_in_trash(2, true).unwrap();

    repo.update_contact(&ContactUpdate {
        id: 2,
        name: "Wick Jr".to_string(),
        content: "0835532054".to_string(),
        can_be_checked_off: true,
        is_checked_off: true,
        tag_id: 3,
        is_favorite: true,
    })
    .unwrap();

    let loaded = repo.get_contact(2).unwrap().unwrap();
    assert_eq!(loaded.name, "Wick Jr");
    assert!(loaded.in_trash);
    assert!(loaded.is_favorite);
    assert_eq!(loaded.tag_id, 3);

    let err = repo
        .update_contact(&ContactUpdate {
            id: 404,
            name: String::new(),
            content: String::new(),
            can_be_checked_off: false,
            is_checked_off: false,
            tag_id: 1,
            is_favorite: false,
        })
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(404)));
}

#[test]
fn lifecycle_writes_on_missing_rows_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    assert!(matches!(repo.set_in_trash(99, true), Err(RepoError::NotFound(99))));
    assert!(matches!(repo.set_favorite(99, true), Err(RepoError::NotFound(99))));
    assert!(matches!(repo.delete_contact(99), Err(RepoError::NotFound(99))));
}

#[test]
fn list_filters_by_trash_and_favorite_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    repo.set_in_trash(3, true).unwrap();
    repo.set_favorite(5, true).unwrap();
    repo.set_favorite(3, true).unwrap();

    let ids = |query: ContactListQuery| -> Vec<i64> {
        repo.list_contacts(&query)
            .unwrap()
            .iter()
            .map(|record| record.id)
            .collect()
    };

    assert_eq!(ids(ContactListQuery::all()), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(ids(ContactListQuery::active()), vec![1, 2, 4, 5, 6]);
    assert_eq!(ids(ContactListQuery::trashed()), vec![3]);
    assert_eq!(
        ids(ContactListQuery {
            in_trash: Some(false),
            favorites_only: true,
        }),
        vec![5]
    );
}

#[test]
fn insert_with_unknown_tag_is_rejected_by_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let err = repo.insert_contact(&new_record("Ghost", 42)).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn tag_repository_lists_catalog_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTagRepository::try_new(&conn).unwrap();

    let tags = repo.list_tags().unwrap();
    assert_eq!(tags.len(), 6);
    assert_eq!(tags[0].name, "Mobile");
    assert_eq!(tags[5].name, "Emergency");
    assert_eq!(repo.get_tag(4).unwrap().unwrap().name, "Work");
    assert!(repo.get_tag(7).unwrap().is_none());
}

#[test]
fn repositories_reject_unmigrated_connections() {
    let conn = Connection::open_in_memory().unwrap();

    assert!(matches!(
        SqliteContactRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("contacts"))
    ));
    assert!(matches!(
        SqliteTagRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("tags"))
    ));
}
