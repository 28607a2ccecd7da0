mod support;
use support::*;

use graft::{
    list, record,
    stmt::{col, Lazy, Query, Value},
};
use pretty_assertions::assert_eq;
use tokio_stream::StreamExt;

fn films_with(language: Query) -> Query {
    Query::table("film")
        .columns(["film_id", "language_id"])
        .include("language", language)
}

fn slots(films: &Value) -> Vec<Value> {
    films
        .as_list()
        .unwrap()
        .iter()
        .map(|film| film.get("language").unwrap().clone())
        .collect()
}

#[tokio::test]
async fn lazy_slots_start_pending() {
    let db = sakila();
    let snapshots: Vec<Value> = engine(&db)
        .stream(films_with(language().lazy()))
        .unwrap()
        .map(|snapshot| snapshot.unwrap())
        .collect()
        .await;

    assert_eq!(snapshots.len(), 2);
    assert_eq!(slots(&snapshots[0]), vec![Value::Lazy(Lazy::Pending); 4]);
    assert_eq!(
        slots(&snapshots[1]),
        [
            Value::Lazy(Lazy::done(english())),
            Value::Lazy(Lazy::done(english())),
            Value::Lazy(Lazy::done(italian())),
            Value::Lazy(Lazy::done(Value::Null)),
        ]
    );
    assert!(extends(&snapshots[1], &snapshots[0]));

    assert_eq!(
        snapshots[1].as_list().unwrap()[0].to_json_string().unwrap(),
        r#"{"film_id":1,"language_id":1,"language":{"status":"done","value":{"language_id":1,"name":"English"}}}"#
    );
}

#[tokio::test]
async fn cardinality_violation_stays_in_its_slot() {
    let db = sakila();
    let films = engine(&db)
        .exec(films_with(language().one().lazy()))
        .await
        .unwrap();

    let slots = slots(&films);
    assert_eq!(slots[0], Value::Lazy(Lazy::done(english())));
    assert_eq!(
        slots[3],
        Value::Lazy(Lazy::error(
            "cardinality violation at `film.language`: expected exactly one row, found 0"
        ))
    );
}

#[tokio::test]
async fn backend_failure_degrades_every_slot() {
    init_tracing();

    let db = sakila();
    let languages = Query::table("languages")
        .filter("language_id", col("film.language_id"))
        .lazy()
        .include(
            "countries",
            Query::table("country").filter("language_id", col("languages.language_id")),
        );

    let films = engine(&db).exec(films_with(languages)).await.unwrap();

    for slot in slots(&films) {
        match &slot {
            Value::Lazy(Lazy::Error(message)) => {
                assert_eq!(message, "backend error at `film.language`: no table named `languages`")
            }
            other => panic!("expected an error slot, found {other:?}"),
        }
    }

    // Nothing below a failed branch is queried
    assert_eq!(db.executed_tables(), ["film", "languages"]);
}

#[tokio::test]
async fn lazy_branches_keep_resolving_below() {
    let db = sakila();
    let query = Query::table("film")
        .columns(["film_id"])
        .filter("film_id", 2)
        .one()
        .include(
            "film_actor",
            Query::table("film_actor")
                .filter("film_id", col("film.film_id"))
                .lazy()
                .include(
                    "actor",
                    Query::table("actor")
                        .columns(["actor_id", "first_name"])
                        .filter("actor_id", col("film_actor.actor_id"))
                        .one(),
                ),
        );

    let snapshots: Vec<Value> = engine(&db)
        .stream(query)
        .unwrap()
        .map(|snapshot| snapshot.unwrap())
        .collect()
        .await;

    assert_eq!(
        snapshots,
        [
            Value::from(record! { "film_id" => 2, "film_actor" => Lazy::Pending }),
            Value::from(record! {
                "film_id" => 2,
                "film_actor" => Lazy::done(list![record! { "film_id" => 2, "actor_id" => 2 }]),
            }),
            Value::from(record! {
                "film_id" => 2,
                "film_actor" => Lazy::done(list![record! {
                    "film_id" => 2,
                    "actor_id" => 2,
                    "actor" => record! { "actor_id" => 2, "first_name" => "NICK" },
                }]),
            }),
        ]
    );
}
