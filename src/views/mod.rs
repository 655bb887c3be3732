// MIT License
// Copyright (c) 2024 Graham King

use anyhow::Context;

use crate::article;

mod db;

/// Every view the reports read, with its definition, in dependency order
pub const VIEWS: [(&str, &str); 7] = [
    ("article_views", db::CREATE_ARTICLE_VIEWS),
    ("substr_title", db::CREATE_SUBSTR_TITLE),
    ("article_titles", db::CREATE_ARTICLE_TITLES),
    ("popular_articles", db::CREATE_POPULAR_ARTICLES),
    ("popular_authors", db::CREATE_POPULAR_AUTHORS),
    ("top_authors", db::CREATE_TOP_AUTHORS),
    ("errors", db::CREATE_ERRORS),
];

pub fn run(db_path: &str, is_replace: bool) -> anyhow::Result<()> {
    // Views go on top of the existing news data, never create a fresh database
    let mut db_conn = rusqlite::Connection::open_with_flags(
        db_path,
        rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("open database {db_path}"))?;
    article::register_functions(&db_conn)?;

    let created = install(&mut db_conn, is_replace)?;
    for name in &created {
        println!("Created view {name}");
    }
    println!("{} of {} views created in {db_path}", created.len(), VIEWS.len());
    Ok(())
}

/// Create any missing views in one transaction. With `is_replace` existing ones
/// are dropped first. Returns the names of the views created.
pub fn install(
    db_conn: &mut rusqlite::Connection,
    is_replace: bool,
) -> anyhow::Result<Vec<&'static str>> {
    let tx = db_conn.transaction()?;
    if is_replace {
        // Dependents first
        for (name, _) in VIEWS.iter().rev() {
            tx.execute(&format!("DROP VIEW IF EXISTS {name}"), ())
                .with_context(|| format!("drop view {name}"))?;
        }
    }
    let existing = existing_views(&tx)?;
    let mut created = Vec::new();
    for (name, ddl) in VIEWS {
        if existing.iter().any(|e| e.as_str() == name) {
            continue;
        }
        tx.execute(ddl, ()).with_context(|| format!("create view {name}"))?;
        created.push(name);
    }
    tx.commit()?;
    Ok(created)
}

/// Names of the report views not present in the database
pub fn missing_views(db_conn: &rusqlite::Connection) -> anyhow::Result<Vec<&'static str>> {
    let existing = existing_views(db_conn)?;
    Ok(VIEWS
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| !existing.iter().any(|e| e.as_str() == *name))
        .collect())
}

fn existing_views(db_conn: &rusqlite::Connection) -> anyhow::Result<Vec<String>> {
    let mut stmt = db_conn.prepare("SELECT name FROM sqlite_master WHERE type = 'view'")?;
    let names = stmt
        .query_map((), |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}
