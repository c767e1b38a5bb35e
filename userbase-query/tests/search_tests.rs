use userbase_query::search::{matches, LIKE_ESCAPE};
use userbase_query::SearchPredicate;
use userbase_types::MAX_EMAIL_LEN;

// ── Matching ─────────────────────────────────────────────────────

#[test]
fn absent_or_empty_search_matches_everything() {
    assert!(matches("anyone@example.com", None));
    assert!(matches("anyone@example.com", Some("")));
    assert!(SearchPredicate::match_all().is_match_all());
}

#[test]
fn search_is_case_insensitive_both_ways() {
    assert!(matches("Alpha@x.com", Some("ALPHA")));
    assert!(matches("alpha2@x.com", Some("ALPHA")));
    assert!(matches("ALPHA@X.COM", Some("alpha@x")));
}

#[test]
fn search_is_substring_not_prefix() {
    assert!(matches("user013@d.com", Some("13@")));
    assert!(matches("user013@d.com", Some("d.com")));
    assert!(!matches("user013@d.com", Some("14")));
}

#[test]
fn wildcard_characters_are_literal() {
    assert!(!matches("user013@d.com", Some("user%")));
    assert!(!matches("user013@d.com", Some("user_13")));
    assert!(matches("first_last@d.com", Some("t_l")));
}

#[test]
fn needle_is_normalized() {
    let predicate = SearchPredicate::new(Some("MiXeD"));
    assert_eq!(predicate.needle(), "mixed");
}

// ── LIKE rendering ───────────────────────────────────────────────

#[test]
fn like_pattern_wraps_needle() {
    assert_eq!(SearchPredicate::new(Some("Alpha")).like_pattern(), "%alpha%");
}

#[test]
fn like_pattern_for_match_all() {
    assert_eq!(SearchPredicate::match_all().like_pattern(), "%%");
}

#[test]
fn like_pattern_escapes_wildcards_and_escape_char() {
    assert_eq!(LIKE_ESCAPE, '\\');
    let predicate = SearchPredicate::new(Some(r"50%_off\"));
    assert_eq!(predicate.like_pattern(), r"%50\%\_off\\%");
}

// ── Over-long search text ────────────────────────────────────────

#[test]
fn needle_longer_than_any_key_is_unsatisfiable() {
    let at_limit = "a".repeat(MAX_EMAIL_LEN);
    assert!(!SearchPredicate::new(Some(&at_limit)).is_unsatisfiable());

    let over = "a".repeat(MAX_EMAIL_LEN + 1);
    let predicate = SearchPredicate::new(Some(&over));
    assert!(predicate.is_unsatisfiable());
    assert!(!predicate.matches("a@x.com"));
    assert!(!SearchPredicate::match_all().is_unsatisfiable());
}
