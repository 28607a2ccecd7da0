mod support;
use support::*;

use graft::{
    ndjson::{self, Mode},
    stmt::{col, Query},
};
use pretty_assertions::assert_eq;
use tokio_stream::StreamExt;

fn films() -> Query {
    Query::table("film")
        .columns(["film_id", "language_id"])
        .filter("film_id", 3)
        .one()
        .include("language", language())
}

fn broken() -> Query {
    Query::table("film")
        .columns(["film_id", "language_id"])
        .filter("film_id", 3)
        .one()
        .include(
            "language",
            Query::table("languages").filter("language_id", col("film.language_id")),
        )
}

async fn lines(query: Query, mode: Mode) -> Vec<String> {
    let db = sakila();
    let snapshots = engine(&db).stream(query).unwrap();
    ndjson::encode(snapshots, mode).collect().await
}

#[tokio::test]
async fn all_snapshots() {
    assert_eq!(
        lines(films(), Mode::All).await,
        [
            "{\"film_id\":3,\"language_id\":2}\n",
            "{\"film_id\":3,\"language_id\":2,\"language\":{\"language_id\":2,\"name\":\"Italian\"}}\n",
        ]
    );
}

#[tokio::test]
async fn last_snapshot_only() {
    assert_eq!(
        lines(films(), Mode::Last).await,
        ["{\"film_id\":3,\"language_id\":2,\"language\":{\"language_id\":2,\"name\":\"Italian\"}}\n"]
    );
}

#[tokio::test]
async fn failure_mid_stream_is_reported_in_band() {
    let lines = lines(broken(), Mode::All).await;

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "{\"film_id\":3,\"language_id\":2}\n");

    let error: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(
        error,
        serde_json::json!({
            "error": {
                "kind": "backend",
                "message": "stream interrupted: backend error at `film.language`: no table named `languages`",
            }
        })
    );
}

#[tokio::test]
async fn failure_before_any_line_is_not_a_streaming_error() {
    let lines = lines(broken(), Mode::Last).await;

    assert_eq!(
        lines,
        ["{\"error\":{\"kind\":\"backend\",\"message\":\"backend error at `film.language`: no table named `languages`\"}}\n"]
    );
}

#[tokio::test]
async fn write_to_a_buffer() {
    let db = sakila();
    let mut out = vec![];

    ndjson::write(&mut out, engine(&db).stream(films()).unwrap(), Mode::All)
        .await
        .unwrap();

    let out = String::from_utf8(out).unwrap();
    assert_eq!(out.lines().count(), 2);
    assert!(out.ends_with('\n'));
}
