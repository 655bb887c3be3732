// MIT License
// Copyright (c) 2024 Graham King

// Test databases shaped like the news site's, with view counts scaled down.

use crate::article;
use crate::views;

const CREATE_BASE_TABLES: &str = r#"
CREATE TABLE authors (
    name TEXT NOT NULL,
    bio TEXT,
    id INTEGER PRIMARY KEY
);
CREATE TABLE articles (
    author INTEGER NOT NULL REFERENCES authors (id),
    title TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    lead TEXT,
    body TEXT,
    time TIMESTAMP,
    id INTEGER PRIMARY KEY
);
CREATE TABLE log (
    path TEXT,
    ip TEXT,
    method TEXT,
    status TEXT,
    time TIMESTAMP,
    id INTEGER PRIMARY KEY
);
"#;

const AUTHORS: [(i64, &str); 4] = [
    (1, "Ursula La Multa"),
    (2, "Rudolf von Treppenwitz"),
    (3, "Anonymous Contributor"),
    (4, "Markoff Chaney"),
];

const ARTICLES: [(i64, &str, &str); 8] = [
    (3, "Bad things gone, say good people", "bad-things-gone"),
    (4, "Balloon goons doomed", "balloon-goons-doomed"),
    (1, "Bears love berries, alleges bear", "bears-love-berries"),
    (2, "Candidate is jerk, alleges rival", "candidate-is-jerk"),
    (1, "Goats eat Google's lawn", "goats-eat-googles"),
    (1, "Media obsessed with bears", "media-obsessed-with-bears"),
    (2, "Trouble for troubled troublemakers", "trouble-for-troubled"),
    (1, "There are a lot of bears", "so-many-bears"),
];

const REQUESTS: [(&str, i64); 11] = [
    ("/", 1000),
    ("/article/candidate-is-jerk", 339),
    ("/article/bears-love-berries", 254),
    ("/article/bad-things-gone", 170),
    ("/article/goats-eat-googles", 85),
    ("/article/trouble-for-troubled", 84),
    ("/article/balloon-goons-doomed", 83),
    ("/article/so-many-bears", 82),
    ("/article/media-obsessed-with-bears", 81),
    ("/article/rarely-read", 5),
    ("/spam-spam-spam-humbug", 3),
];

pub const SAMPLE_DAY: &str = "2016-07-01 12:00:00+00:00";

/// Base tables only, no views
pub fn bare_news_db() -> anyhow::Result<rusqlite::Connection> {
    let db_conn = rusqlite::Connection::open_in_memory()?;
    article::register_functions(&db_conn)?;
    db_conn.execute_batch(CREATE_BASE_TABLES)?;
    Ok(db_conn)
}

/// Base tables and views, no rows
pub fn empty_news_db() -> anyhow::Result<rusqlite::Connection> {
    let mut db_conn = bare_news_db()?;
    views::install(&mut db_conn, false)?;
    Ok(db_conn)
}

/// Authors, articles and a day of traffic, all successful
pub fn sample_news_db() -> anyhow::Result<rusqlite::Connection> {
    let db_conn = empty_news_db()?;
    seed_sample(&db_conn)?;
    Ok(db_conn)
}

/// Create the base tables in an existing (file backed) database
pub fn create_base_tables(db_conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    db_conn.execute_batch(CREATE_BASE_TABLES)
}

pub fn seed_sample(db_conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    for (id, name) in AUTHORS {
        db_conn.execute("INSERT INTO authors (id, name) VALUES (?1, ?2)", (id, name))?;
    }
    for (author, title, slug) in ARTICLES {
        db_conn.execute(
            "INSERT INTO articles (author, title, slug) VALUES (?1, ?2, ?3)",
            (author, title, slug),
        )?;
    }
    for (path, count) in REQUESTS {
        add_requests(db_conn, count, path, "200 OK", SAMPLE_DAY)?;
    }
    Ok(())
}

/// Log `count` identical requests
pub fn add_requests(
    db_conn: &rusqlite::Connection,
    count: i64,
    path: &str,
    status: &str,
    time: &str,
) -> rusqlite::Result<()> {
    if count == 0 {
        return Ok(());
    }
    db_conn.execute(
        r#"WITH RECURSIVE n(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < ?1)
           INSERT INTO log (path, method, status, time) SELECT ?2, 'GET', ?3, ?4 FROM n"#,
        (count, path, status, time),
    )?;
    Ok(())
}

/// Log a day of `total` requests to the front page, `errors` of them failing.
/// Timestamps are written the way the news data has them, e.g. "... 08:30:00+00".
pub fn add_day(
    db_conn: &rusqlite::Connection,
    date: &str,
    total: i64,
    errors: i64,
) -> rusqlite::Result<()> {
    let time = format!("{date} 08:30:00+00");
    add_requests(db_conn, total - errors, "/", "200 OK", &time)?;
    add_requests(db_conn, errors, "/", "404 NOT FOUND", &time)
}
