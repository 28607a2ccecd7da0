#![allow(dead_code)]

use graft::{
    driver::Memory,
    record,
    stmt::{col, Lazy, Query, Value},
    Engine,
};

/// A small slice of the sakila sample database.
pub fn sakila() -> Memory {
    Memory::new()
        .table(
            "film",
            [
                record! { "film_id" => 1, "title" => "ACADEMY DINOSAUR", "language_id" => 1, "length" => 86 },
                record! { "film_id" => 2, "title" => "ACE GOLDFINGER", "language_id" => 1, "length" => 48 },
                record! { "film_id" => 3, "title" => "ADAPTATION HOLES", "language_id" => 2, "length" => 50 },
                record! { "film_id" => 4, "title" => "AFFAIR PREJUDICE", "language_id" => 3, "length" => 117 },
            ],
        )
        .table(
            "language",
            [
                record! { "language_id" => 1, "name" => "English" },
                record! { "language_id" => 2, "name" => "Italian" },
            ],
        )
        .table(
            "actor",
            [
                record! { "actor_id" => 1, "first_name" => "PENELOPE", "last_name" => "GUINESS" },
                record! { "actor_id" => 2, "first_name" => "NICK", "last_name" => "WAHLBERG" },
                record! { "actor_id" => 3, "first_name" => "ED", "last_name" => "CHASE" },
                record! { "actor_id" => 4, "first_name" => "JENNIFER", "last_name" => "DAVIS" },
            ],
        )
        .table(
            "film_actor",
            [
                record! { "film_id" => 1, "actor_id" => 1 },
                record! { "film_id" => 1, "actor_id" => 3 },
                record! { "film_id" => 2, "actor_id" => 2 },
                record! { "film_id" => 3, "actor_id" => 1 },
                record! { "film_id" => 3, "actor_id" => 2 },
                record! { "film_id" => 3, "actor_id" => 4 },
            ],
        )
}

pub fn engine(driver: &Memory) -> Engine {
    Engine::builder().driver(driver.clone()).build().unwrap()
}

/// Films with their language and, through `film_actor`, their actors.
/// `actors` is declared before the table it joins through.
pub fn films() -> Query {
    Query::table("film")
        .columns(["film_id", "title", "language_id"])
        .include("language", language())
        .include(
            "actors",
            Query::table("actor")
                .columns(["actor_id", "first_name", "last_name"])
                .filter("actor_id", col("film_actor.actor_id")),
        )
        .include(
            "film_actor",
            Query::table("film_actor")
                .filter("film_id", col("film.film_id"))
                .hidden(),
        )
}

pub fn language() -> Query {
    Query::table("language")
        .filter("language_id", col("film.language_id"))
        .maybe()
}

pub fn english() -> Value {
    record! { "language_id" => 1, "name" => "English" }.into()
}

pub fn italian() -> Value {
    record! { "language_id" => 2, "name" => "Italian" }.into()
}

pub fn actor(actor_id: i64) -> Value {
    let (first_name, last_name) = match actor_id {
        1 => ("PENELOPE", "GUINESS"),
        2 => ("NICK", "WAHLBERG"),
        3 => ("ED", "CHASE"),
        4 => ("JENNIFER", "DAVIS"),
        _ => panic!("no actor {actor_id}"),
    };

    record! { "actor_id" => actor_id, "first_name" => first_name, "last_name" => last_name }.into()
}

/// Returns `true` if everything `earlier` holds is also in `later`, with a
/// pending lazy slot allowed to have resolved in any way.
pub fn extends(later: &Value, earlier: &Value) -> bool {
    match (earlier, later) {
        (Value::Lazy(Lazy::Pending), Value::Lazy(_)) => true,
        (Value::Lazy(Lazy::Done(a)), Value::Lazy(Lazy::Done(b))) => extends(b, a),
        (Value::Record(a), Value::Record(b)) => a
            .iter()
            .all(|(name, value)| b.get(name).is_some_and(|later| extends(later, value))),
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| extends(b, a))
        }
        (a, b) => a == b,
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
