//! `uv types` specs

use crate::prelude::*;

#[test]
fn types_counts_in_first_seen_order() {
    let temp = Project::empty();
    temp.uv()
        .args(&["types"])
        .stdin(SESSION)
        .passes()
        .stdout_eq("view\t2\nsearch\t1\nec:product.view\t1\nec:transaction\t1\n");
}

#[test]
fn types_json_format() {
    let temp = Project::empty();
    let out = temp
        .uv()
        .args(&["types", "--format", "json"])
        .stdin(SESSION)
        .passes();

    let value: serde_json::Value = serde_json::from_str(&out.stdout()).unwrap();
    assert_eq!(value[0]["type"], "view");
    assert_eq!(value[0]["count"], 2);
    assert_eq!(value.as_array().unwrap().len(), 4);
}

#[test]
fn types_of_empty_input() {
    let temp = Project::empty();
    temp.uv().args(&["types"]).stdin("").passes().stdout_eq("");
}
