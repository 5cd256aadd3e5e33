#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::collections::BTreeMap;

use ams_core::{BuildError, DecodeError, Object};
use time::OffsetDateTime;
use time::macros::datetime;

#[derive(Debug, Clone, PartialEq, Object)]
#[object(kind = "Label", validate = "validate_label")]
pub struct Label {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    key: Option<String>,
    value: Option<String>,
    internal: Option<bool>,
}

fn validate_label(label: &Label) -> Result<(), BuildError> {
    if label.key().is_empty() {
        return Err(BuildError::invalid("key", "must not be empty"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Object)]
pub struct Owner {
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Object)]
#[object(kind = "Widget")]
pub struct Widget {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    name: Option<String>,
    count: Option<i64>,
    ratio: Option<f64>,
    created_at: Option<OffsetDateTime>,
    tags: Option<Vec<String>>,
    #[object(rename = "type")]
    type_: Option<String>,
    owner: Option<Owner>,
    labels: Option<Vec<Label>>,
}

#[derive(Debug, Clone, PartialEq, Object)]
pub struct Directory {
    owners: Option<BTreeMap<String, Owner>>,
    labels: Option<BTreeMap<String, Label>>,
}

fn full_widget() -> Widget {
    Widget::builder()
        .id("w1")
        .href("/widgets/w1")
        .name("gear")
        .count(3)
        .ratio(0.25)
        .created_at(datetime!(2021-06-01 08:00:00 UTC))
        .tags(["a", "b"])
        .type_("standard")
        .owner(Owner::builder().name("ann").email("ann@example.com"))
        .labels([
            Label::builder().key("env").value("prod"),
            Label::builder().key("tier").internal(true),
        ])
        .build()
        .unwrap()
}

#[test]
fn only_set_fields_are_marshaled() {
    let widget = Widget::builder().id("123").build().unwrap();
    assert_eq!(widget.to_json().unwrap(), r#"{"kind":"Widget","id":"123"}"#);
}

#[test]
fn accessors_distinguish_unset_from_zero() {
    let widget = Widget::unmarshal(r#"{"kind":"Widget","id":"123","count":0}"#).unwrap();
    assert_eq!(widget.get_id(), Some("123"));
    assert_eq!(widget.get_count(), Some(0));
    assert_eq!(widget.get_name(), None);
    assert_eq!(widget.name(), "");
    assert_eq!(widget.get_ratio(), None);
    assert_eq!(widget.ratio(), 0.0);
    assert_eq!(widget.created_at(), OffsetDateTime::UNIX_EPOCH);
    assert!(widget.tags().is_empty());
    assert!(widget.get_labels().is_none());
    assert!(widget.owner().is_none());
    assert!(!widget.link());
}

#[test]
fn round_trip_keeps_every_field() {
    let widget = full_widget();
    let json = widget.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["type"], "standard");
    assert_eq!(value["created_at"], "2021-06-01T08:00:00Z");
    assert_eq!(
        value["owner"],
        serde_json::json!({"name": "ann", "email": "ann@example.com"})
    );
    assert_eq!(value["labels"][0]["kind"], "Label");

    let decoded = Widget::unmarshal(&json).unwrap();
    assert_eq!(decoded, widget);
    assert_eq!(decoded.labels()[1].get_internal(), Some(true));
    assert_eq!(decoded.tags(), ["a".to_owned(), "b".to_owned()]);
}

#[test]
fn link_flag_selects_link_kind() {
    let widget = Widget::builder()
        .link(true)
        .id("w2")
        .href("/widgets/w2")
        .build()
        .unwrap();
    assert_eq!(widget.kind(), "WidgetLink");
    let json = widget.to_json().unwrap();
    assert!(json.starts_with(r#"{"kind":"WidgetLink""#));

    let decoded = Widget::unmarshal(json.as_bytes()).unwrap();
    assert!(decoded.link());
    assert_eq!(decoded.kind(), "WidgetLink");
}

#[test]
fn unknown_kind_is_rejected() {
    let err = Widget::unmarshal(r#"{"kind":"Gadget","id":"1"}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "expected kind 'Widget' or 'WidgetLink' but got 'Gadget'"
    );
}

#[test]
fn nested_kind_is_checked() {
    let err = Widget::unmarshal(r#"{"labels":[{"kind":"Tag","key":"x"}]}"#).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnexpectedKind {
            expected: "Label",
            expected_link: "LabelLink",
            ..
        }
    ));
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = Widget::unmarshal("{\"id\": 12").unwrap_err();
    assert!(matches!(err, DecodeError::Json(_)));
}

#[test]
fn build_reports_nested_validation_path() {
    let err = Widget::builder()
        .labels([Label::builder().key("ok"), Label::builder().value("no key")])
        .build()
        .unwrap_err();
    assert_eq!(err.path(), "labels[1].key");
}

#[test]
fn copy_is_deep() {
    let original = full_widget();
    let changed = Widget::builder()
        .copy(&original)
        .name("other")
        .labels([Label::builder().key("only")])
        .build()
        .unwrap();
    assert_eq!(original.name(), "gear");
    assert_eq!(original.labels().len(), 2);
    assert_eq!(changed.name(), "other");
    assert_eq!(changed.owner(), original.owner());
    assert_eq!(changed.labels().len(), 1);

    let copied = Widget::builder().copy(&original).build().unwrap();
    assert_eq!(copied, original);
}

#[test]
fn empty_ignores_href_and_link() {
    let widget = Widget::builder()
        .href("/widgets/x")
        .link(true)
        .build()
        .unwrap();
    assert!(widget.empty());

    let widget = Widget::builder().labels([]).build().unwrap();
    assert!(widget.empty());

    let widget = Widget::builder().count(0).build().unwrap();
    assert!(!widget.empty());

    assert!(Widget::builder().empty());
    assert!(!Widget::builder().name("x").empty());
}

#[test]
fn plain_structs_have_no_kind() {
    let owner = Owner::builder().name("bob").build().unwrap();
    assert_eq!(owner.to_json().unwrap(), r#"{"name":"bob"}"#);
    assert!(!<Owner as Object>::IDENTIFIED);
    assert_eq!(<Owner as Object>::LIST_KIND, "OwnerList");

    let decoded = Owner::unmarshal(r#"{"kind":"Anything","email":"bob@example.com"}"#).unwrap();
    assert_eq!(decoded.get_email(), Some("bob@example.com"));
}

#[test]
fn map_fields_round_trip_in_key_order() {
    let directory = Directory::builder()
        .owners([
            ("quay.io", Owner::builder().email("b@example.com")),
            ("cloud.example.com", Owner::builder().name("a")),
        ])
        .build()
        .unwrap();
    let json = directory.to_json().unwrap();
    assert_eq!(
        json,
        r#"{"owners":{"cloud.example.com":{"name":"a"},"quay.io":{"email":"b@example.com"}}}"#
    );

    let decoded = Directory::unmarshal(&json).unwrap();
    assert_eq!(decoded, directory);
    assert_eq!(decoded.owners("quay.io").unwrap().email(), "b@example.com");
    assert!(decoded.owners("missing").is_none());
    assert_eq!(decoded.get_owners().unwrap().len(), 2);
    assert!(decoded.get_labels().is_none());
}

#[test]
fn map_fields_copy_and_report_paths() {
    let directory = Directory::builder()
        .owners([("a", Owner::builder().name("ann"))])
        .build()
        .unwrap();
    let copied = Directory::builder().copy(&directory).build().unwrap();
    assert_eq!(copied, directory);

    let err = Directory::builder()
        .labels([("first", Label::builder().value("no key"))])
        .build()
        .unwrap_err();
    assert_eq!(err.path(), "labels[first].key");

    let err = Directory::unmarshal(r#"{"labels":{"x":{"kind":"Tag"}}}"#).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnexpectedKind {
            expected: "Label",
            ..
        }
    ));
}

#[test]
fn empty_map_counts_as_unset() {
    assert!(
        Directory::builder()
            .owners(Vec::<(String, OwnerBuilder)>::new())
            .empty()
    );
    let directory = Directory::builder()
        .owners([("a", Owner::builder())])
        .build()
        .unwrap();
    assert!(!directory.empty());
}

#[test]
fn ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/pass/*.rs");
}
