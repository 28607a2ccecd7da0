mod support;
use support::*;

use graft::{
    driver::{Driver, Response},
    err, ndjson,
    stmt::{col, param, BinaryOp, Query, WhereValue},
    Engine, Error, Request,
};
use pretty_assertions::assert_eq;
use tokio_stream::StreamExt;

/// A driver that reports failures without classifying them.
#[derive(Debug)]
struct ConnectionReset;

#[async_trait::async_trait]
impl Driver for ConnectionReset {
    async fn exec(&self, _query: &Query) -> graft::Result<Response> {
        Err(err!("connection reset"))
    }
}

/// Planning fails, and nothing reaches the driver.
fn rejected(query: impl Into<Request>) -> Error {
    let db = sakila();
    let Err(err) = engine(&db).stream(query) else {
        panic!("request was accepted");
    };
    assert!(db.log().is_empty());
    err
}

#[test]
fn sibling_cycle() {
    let err = rejected(
        Query::table("film")
            .include("a", Query::table("actor").filter("actor_id", col("film_actor.actor_id")))
            .include("b", Query::table("film_actor").filter("actor_id", col("actor.actor_id"))),
    );

    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "invalid configuration: cyclic reference between includes [a, b]"
    );
}

#[test]
fn reference_to_unknown_table() {
    let err = rejected(
        Query::table("film").include(
            "actors",
            Query::table("actor").filter("actor_id", col("film_actor.actor_id")),
        ),
    );

    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "invalid configuration: `film.actors` references `film_actor.actor_id`, which is not a sibling or ancestor"
    );
}

#[test]
fn reference_to_unselected_column() {
    let err = rejected(
        Query::table("film")
            .columns(["film_id"])
            .include("language", language()),
    );

    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "invalid configuration: `film.language` references `film.language_id`, which `film` does not select"
    );
}

#[test]
fn missing_parameter() {
    let err = rejected(Query::table("film").filter("film_id", param("id")).one());

    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "invalid configuration: missing value for parameter `id`"
    );
}

#[test]
fn unknown_query_id() {
    let err = rejected(Request::registered("nope"));

    assert!(err.is_configuration());
    assert_eq!(err.to_string(), "invalid configuration: no query registered as `nope`");
}

#[test]
fn grouping_key_must_name_the_correlated_columns() {
    let err = rejected(
        Query::table("film").include("language", language().grouping_id(["name"])),
    );

    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "invalid configuration: malformed grouping key on `film.language`: `name` is not a correlated column"
    );

    let err = rejected(
        Query::table("film").include(
            "text",
            Query::table("film_text")
                .filter("film_id", col("film.film_id"))
                .filter("language_id", col("film.language_id"))
                .grouping_id(["film_id"]),
        ),
    );

    assert_eq!(
        err.to_string(),
        "invalid configuration: malformed grouping key on `film.text`: correlated column `language_id` is missing from the key"
    );
}

#[test]
fn correlated_column_must_be_selected() {
    let err = rejected(
        Query::table("film").include("language", language().columns(["name"])),
    );

    assert_eq!(
        err.to_string(),
        "invalid configuration: malformed grouping key on `film.language`: correlated column `language_id` is not selected"
    );
}

#[test]
fn range_correlation_is_rejected() {
    let err = rejected(Query::table("film").include(
        "longer",
        Query::table("film").filter("length", WhereValue::op(BinaryOp::Gt, col("film.length"))),
    ));

    assert!(err.is_configuration());
    assert!(err.to_string().contains("only equality and membership can correlate"));
}

#[test]
fn hidden_includes_are_leaves() {
    let err = rejected(Query::table("film").include(
        "film_actor",
        Query::table("film_actor")
            .filter("film_id", col("film.film_id"))
            .hidden()
            .include("actor", Query::table("actor")),
    ));

    assert_eq!(
        err.to_string(),
        "invalid configuration: hidden include `film.film_actor` cannot have includes of its own"
    );
}

#[test]
fn nesting_is_bounded() {
    let db = sakila();
    let engine = Engine::builder().driver(db.clone()).max_depth(1).build().unwrap();

    let deep = Query::table("film").include(
        "film_actor",
        Query::table("film_actor")
            .filter("film_id", col("film.film_id"))
            .include("actor", Query::table("actor").filter("actor_id", col("film_actor.actor_id"))),
    );

    let Err(err) = engine.stream(deep) else {
        panic!("request was accepted");
    };
    assert_eq!(
        err.to_string(),
        "invalid configuration: `film.film_actor` nests includes deeper than the maximum depth of 1"
    );
}

#[test]
fn engine_needs_a_driver() {
    let err = Engine::builder().build().unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn one_without_a_match_fails_the_request() {
    let db = sakila();
    let err = engine(&db)
        .exec(Query::table("film").include("language", language().one()))
        .await
        .unwrap_err();

    assert!(err.is_cardinality());
    assert_eq!(
        err.to_string(),
        "cardinality violation at `film.language`: expected exactly one row, found 0"
    );
}

#[tokio::test]
async fn maybe_with_two_matches_fails_the_request() {
    let db = sakila();
    let err = engine(&db)
        .exec(
            Query::table("film")
                .filter("film_id", 3)
                .include(
                    "film_actor",
                    Query::table("film_actor")
                        .filter("film_id", col("film.film_id"))
                        .maybe(),
                ),
        )
        .await
        .unwrap_err();

    assert!(err.is_cardinality());
    assert_eq!(
        err.to_string(),
        "cardinality violation at `film.film_actor`: expected at most one row, found 3"
    );
}

#[tokio::test]
async fn one_at_the_root() {
    let db = sakila();
    let err = engine(&db)
        .exec(Query::table("film").filter("length", WhereValue::op(BinaryOp::Lt, 60)).one())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "cardinality violation at `film`: expected exactly one row, found 2"
    );

    let none = engine(&db)
        .exec(Query::table("film").filter("film_id", 99).maybe())
        .await
        .unwrap();
    assert!(none.is_null());
}

#[tokio::test]
async fn backend_errors_fail_the_request() {
    let db = sakila();
    let err = engine(&db)
        .exec(Query::table("film").include("ratings", Query::table("rating")))
        .await
        .unwrap_err();

    assert!(err.is_backend());
    assert_eq!(err.to_string(), "backend error at `film.ratings`: no table named `rating`");
}

#[tokio::test]
async fn any_driver_failure_is_a_backend_error() {
    let engine = Engine::builder().driver(ConnectionReset).build().unwrap();

    let err = engine.exec(Query::table("film")).await.unwrap_err();
    assert!(err.is_backend());
    assert_eq!(err.to_string(), "backend error at `film`: connection reset");

    let lines: Vec<String> = ndjson::encode(
        engine.stream(Query::table("film")).unwrap(),
        ndjson::Mode::All,
    )
    .collect()
    .await;
    assert_eq!(
        lines,
        ["{\"error\":{\"kind\":\"backend\",\"message\":\"backend error at `film`: connection reset\"}}\n"]
    );
}
