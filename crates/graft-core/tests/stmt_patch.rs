use graft_core::{
    list, record,
    stmt::{Lazy, Path, Value},
};
use pretty_assertions::assert_eq;

fn films() -> Value {
    list![
        record! { "film_id" => 1, "actors" => list![record! { "actor_id" => 10 }] },
        record! { "film_id" => 2, "actors" => list![] },
    ]
}

#[test]
fn patch_root_replaces_value() {
    let value = Value::from(1).patch(&Path::root(), |prev| {
        assert_eq!(prev, Some(&Value::I64(1)));
        Value::from("replaced")
    });
    assert_eq!(value.unwrap(), Value::from("replaced"));
}

#[test]
fn patch_field_in_list_element() {
    let before = films();
    let path = Path::root().join(1).join("title");

    let after = before
        .clone()
        .patch(&path, |prev| {
            assert!(prev.is_none());
            Value::from("ACE GOLDFINGER")
        })
        .unwrap();

    assert_eq!(
        after,
        list![
            record! { "film_id" => 1, "actors" => list![record! { "actor_id" => 10 }] },
            record! { "film_id" => 2, "actors" => list![], "title" => "ACE GOLDFINGER" },
        ]
    );

    // The original is untouched
    assert_eq!(before, films());
}

#[test]
fn patch_shares_untouched_siblings() {
    let before = films();
    let path = Path::root().join(1).join("actors").join(0);

    let after = before
        .clone()
        .patch(&path, |_| record! { "actor_id" => 20 }.into())
        .unwrap();

    let before_list = before.expect_list();
    let after_list = after.expect_list();

    // The element outside the patched subtree is the same allocation.
    assert!(before_list[0].ptr_eq(&after_list[0]));
    // The containers along the path are fresh.
    assert!(!before.ptr_eq(&after));
    assert!(!before_list[1].ptr_eq(&after_list[1]));

    assert_eq!(before_list[1].get("actors"), Some(&list![]));
    assert_eq!(
        after_list[1].get("actors"),
        Some(&list![record! { "actor_id" => 20 }])
    );
}

#[test]
fn patch_appends_at_list_end() {
    let value = list![1, 2]
        .patch(&Path::root().join(2), |prev| {
            assert!(prev.is_none());
            3.into()
        })
        .unwrap();
    assert_eq!(value, list![1, 2, 3]);
}

#[test]
fn patch_creates_missing_intermediate_records() {
    let value = Value::from(record! {})
        .patch(&Path::root().join("a").join("b"), |_| 1.into())
        .unwrap();
    assert_eq!(value, Value::from(record! { "a" => record! { "b" => 1 } }));
}

#[test]
fn patch_traverses_resolved_lazy_slot() {
    let value = Value::from(record! {
        "language" => Lazy::done(record! { "name" => "English" }),
    });

    let value = value
        .patch(&Path::root().join("language").join("name"), |_| "French".into())
        .unwrap();

    assert_eq!(
        value,
        Value::from(record! { "language" => Lazy::done(record! { "name" => "French" }) })
    );
}

#[test]
fn patch_shape_mismatch_is_assembly_error() {
    let err = films()
        .patch(&Path::root().join("film_id"), |_| Value::Null)
        .unwrap_err();
    assert!(err.is_assembly_invariant());
    assert_eq!(
        err.to_string(),
        "assembly invariant violated: expected a record at `/`, found list"
    );

    let err = films()
        .patch(&Path::root().join(0).join("film_id").join(0), |_| Value::Null)
        .unwrap_err();
    assert!(err.is_assembly_invariant());
    assert_eq!(
        err.to_string(),
        "assembly invariant violated: expected a list at `/0/film_id`, found i64"
    );
}

#[test]
fn patch_index_past_end_is_assembly_error() {
    let err = list![1]
        .patch(&Path::root().join(5), |_| Value::Null)
        .unwrap_err();
    assert!(err.is_assembly_invariant());
}

#[test]
fn path_display() {
    assert_eq!(Path::root().to_string(), "/");
    assert_eq!(
        Path::root().join(0).join("actors").join(3).to_string(),
        "/0/actors/3"
    );
}

#[test]
fn patch_before_places_new_fields_ahead_of_later_ones() {
    let mut film = Value::from(record! { "film_id" => 1, "category" => Lazy::Pending });
    let later = ["language".to_string(), "category".to_string()];

    film.patch_before_mut(&Path::root().join("actors"), &later, |_| list![])
        .unwrap();
    film.patch_before_mut(&Path::root().join("film_id"), &later, |_| Value::from(2))
        .unwrap();

    let keys: Vec<&str> = film.as_record().unwrap().keys().collect();
    assert_eq!(keys, ["film_id", "actors", "category"]);
    assert_eq!(film.get("film_id"), Some(&Value::from(2)));
}
