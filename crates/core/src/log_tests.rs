use super::*;
use serde_json::json;

fn log_of(types: &[&str]) -> EventLog {
    let mut log = EventLog::new();
    for t in types {
        log.append(Rc::new(Event::from_payload(*t, ())));
    }
    log
}

#[test]
fn append_keeps_order() {
    let log = log_of(&["search", "ec:product.view", "search"]);

    let types: Vec<&str> = log.iter().map(|e| e.event_type()).collect();
    assert_eq!(types, vec!["search", "ec:product.view", "search"]);
    assert_eq!(log.len(), 3);
    assert!(!log.is_empty());
}

#[test]
fn query_by_selector() {
    let log = log_of(&["ec:product.view", "search", "ec:transaction"]);

    let results = log.query(&Selector::glob("ec:*").unwrap());
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].event_type(), "ec:transaction");

    assert_eq!(log.query(&Selector::Any).len(), 3);
    assert!(log.query(&Selector::from("none")).is_empty());
}

#[test]
fn query_after_index() {
    let log = log_of(&["a", "b", "c", "d", "e"]);

    let results = log.after(3);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].event_type(), "d");
    assert_eq!(results[1].event_type(), "e");
    assert!(log.after(10).is_empty());
}

#[test]
fn snapshot_is_detached_from_later_appends() {
    let mut log = log_of(&["a"]);
    let snapshot = log.snapshot();

    log.append(Rc::new(Event::from_payload("b", json!({ "x": 1 }))));

    assert_eq!(snapshot.len(), 1);
    assert_eq!(log.len(), 2);
    assert_eq!(log.get(1).and_then(|e| e.get("x")), Some(&json!(1)));
}
