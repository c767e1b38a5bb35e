//! Behavior every `UserStore` must share, run against each backend.

#![allow(dead_code)]

use userbase_query::{next_page, KeysetQuery, Page, PageRequest, PageSource, SearchPredicate};
use userbase_storage::{StorageError, UserStore};
use userbase_types::UserId;

pub fn seed<S: UserStore + ?Sized>(store: &S, emails: &[&str]) {
    for email in emails {
        store.insert(email).unwrap();
    }
}

pub fn seed_numbered<S: UserStore + ?Sized>(store: &S, n: usize) {
    for i in 1..=n {
        store.insert(&format!("user{i:03}@d.com")).unwrap();
    }
}

pub fn walk<S: UserStore + ?Sized>(store: &S, first: PageRequest) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut request = Some(first);
    while let Some(req) = request {
        let page = next_page(store, &req).unwrap();
        request = req.after_page(&page);
        pages.push(page);
    }
    pages
}

pub fn emails(pages: &[Page]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|p| p.records.iter().map(|u| u.email.clone()))
        .collect()
}

// ── Record operations ────────────────────────────────────────────

pub fn insert_then_get<S: UserStore + ?Sized>(store: &S) {
    let user = store.insert("Ada@Example.com").unwrap();
    assert_eq!(user.email, "Ada@Example.com");
    assert_eq!(user.id.as_uuid().get_version_num(), 4);
    assert_eq!(store.get(&user.id).unwrap(), Some(user));
}

pub fn get_missing_is_none<S: UserStore + ?Sized>(store: &S) {
    assert_eq!(store.get(&UserId::new()).unwrap(), None);
}

pub fn duplicate_email_is_rejected_case_insensitively<S: UserStore + ?Sized>(store: &S) {
    store.insert("alpha@x.com").unwrap();
    let err = store.insert("ALPHA@X.com").unwrap_err();
    assert!(matches!(err, StorageError::DuplicateEmail(ref e) if e == "ALPHA@X.com"));
}

pub fn delete_removes_record<S: UserStore + ?Sized>(store: &S) {
    let user = store.insert("gone@x.com").unwrap();
    assert!(store.delete(&user.id).unwrap());
    assert!(!store.delete(&user.id).unwrap());
    assert_eq!(store.get(&user.id).unwrap(), None);
    // the key is free again
    store.insert("GONE@x.com").unwrap();
}

// ── Paging ───────────────────────────────────────────────────────

pub fn pages_of_ten_over_twenty_five<S: UserStore + ?Sized>(store: &S) {
    seed_numbered(store, 25);
    let pages = walk(store, PageRequest::from_params(None, Some("10"), None));

    assert_eq!(pages.iter().map(Page::len).collect::<Vec<_>>(), vec![10, 10, 5]);
    assert!(pages[0].cursor.is_some() && pages[1].cursor.is_some());
    assert!(pages[2].cursor.is_none());
    let expected: Vec<String> = (1..=25).map(|i| format!("user{i:03}@d.com")).collect();
    assert_eq!(emails(&pages), expected);
}

pub fn empty_store_single_page<S: UserStore + ?Sized>(store: &S) {
    let page = next_page(store, &PageRequest::from_params(None, None, None)).unwrap();
    assert!(page.is_empty());
    assert!(!page.has_more);
    assert!(page.cursor.is_none());
}

pub fn order_ignores_case<S: UserStore + ?Sized>(store: &S) {
    seed(store, &["b@x.com", "C@x.com", "a@x.com", "B2@x.com"]);
    let pages = walk(store, PageRequest::from_params(None, Some("2"), None));
    // '2' sorts before '@'
    assert_eq!(emails(&pages), vec!["a@x.com", "B2@x.com", "b@x.com", "C@x.com"]);
}

pub fn search_ignores_case<S: UserStore + ?Sized>(store: &S) {
    seed(store, &["alpha2@x.com", "beta@x.com", "Alpha@x.com"]);
    let page = next_page(store, &PageRequest::from_params(None, None, Some("ALPHA"))).unwrap();
    let found: Vec<&str> = page.records.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(found, vec!["alpha2@x.com", "Alpha@x.com"]);
}

pub fn search_wildcards_match_literally<S: UserStore + ?Sized>(store: &S) {
    seed(store, &["first_last@x.com", "firstXlast@x.com", "100%@x.com", "1000@x.com"]);
    let page = next_page(store, &PageRequest::from_params(None, None, Some("t_l"))).unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page.records[0].email, "first_last@x.com");

    let page = next_page(store, &PageRequest::from_params(None, None, Some("0%"))).unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page.records[0].email, "100%@x.com");
}

pub fn deleted_boundary_still_resumes<S: UserStore + ?Sized>(store: &S) {
    seed_numbered(store, 6);
    let request = PageRequest::from_params(None, Some("3"), None);
    let first = next_page(store, &request).unwrap();

    let boundary = first.records.last().unwrap().id;
    assert!(store.delete(&boundary).unwrap());

    let second = next_page(store, &request.after_page(&first).unwrap()).unwrap();
    let found: Vec<&str> = second.records.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(found, vec!["user004@d.com", "user005@d.com", "user006@d.com"]);
    assert!(!second.has_more);
}

pub fn invalid_cursor_restarts<S: UserStore + ?Sized>(store: &S) {
    seed_numbered(store, 12);
    let page = next_page(store, &PageRequest::from_params(Some("@@not-a-cursor@@"), None, None)).unwrap();
    assert_eq!(page.records[0].email, "user001@d.com");
    assert_eq!(page.len(), 10);
    assert!(page.has_more);
}

pub fn overlong_search_matches_nothing<S: UserStore + ?Sized>(store: &S) {
    seed(store, &["a@x.com"]);
    let needle = "a".repeat(60_000);

    let page = next_page(store, &PageRequest::from_params(None, None, Some(&needle))).unwrap();
    assert!(page.is_empty());
    assert!(!page.has_more);
    assert!(page.cursor.is_none());

    // direct store reads agree with the engine
    let predicate = SearchPredicate::new(Some(&needle));
    let query = KeysetQuery {
        predicate: &predicate,
        after: None,
        limit: 11,
    };
    assert!(store.fetch_page(&query).unwrap().is_empty());
}

/// Generates one `#[test]` per shared check, each with a fresh store.
macro_rules! store_conformance {
    ($make:expr) => {
        #[test]
        fn insert_then_get() {
            common::insert_then_get(&$make);
        }

        #[test]
        fn get_missing_is_none() {
            common::get_missing_is_none(&$make);
        }

        #[test]
        fn duplicate_email_is_rejected_case_insensitively() {
            common::duplicate_email_is_rejected_case_insensitively(&$make);
        }

        #[test]
        fn delete_removes_record() {
            common::delete_removes_record(&$make);
        }

        #[test]
        fn pages_of_ten_over_twenty_five() {
            common::pages_of_ten_over_twenty_five(&$make);
        }

        #[test]
        fn empty_store_single_page() {
            common::empty_store_single_page(&$make);
        }

        #[test]
        fn order_ignores_case() {
            common::order_ignores_case(&$make);
        }

        #[test]
        fn search_ignores_case() {
            common::search_ignores_case(&$make);
        }

        #[test]
        fn search_wildcards_match_literally() {
            common::search_wildcards_match_literally(&$make);
        }

        #[test]
        fn deleted_boundary_still_resumes() {
            common::deleted_boundary_still_resumes(&$make);
        }

        #[test]
        fn invalid_cursor_restarts() {
            common::invalid_cursor_restarts(&$make);
        }

        #[test]
        fn overlong_search_matches_nothing() {
            common::overlong_search_matches_nothing(&$make);
        }
    };
}
