// MIT License
// Copyright (c) 2024 Graham King

use rusqlite::functions::FunctionFlags;

/// Every article is served under this path, followed by its slug
pub const ARTICLE_PREFIX: &str = "/article/";

/// One row of the `article_titles` view
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleTitle {
    pub author: i64,
    pub title: String,
    pub slug: String,
}

/// One row of the `substr_title` view: a slug and how often it was requested
#[derive(Debug, Clone, PartialEq)]
pub struct SlugViews {
    pub slug: Option<String>,
    pub views: i64,
}

/// The slug of the article served at `path`, e.g. "/article/bears-love-berries"
/// gives "bears-love-berries". Paths outside /article/ have no slug.
pub fn slug_from_path(path: &str) -> Option<&str> {
    path.strip_prefix(ARTICLE_PREFIX).filter(|slug| !slug.is_empty())
}

/// Make `article_slug(path)` available to SQL. The `substr_title` view needs it,
/// so call this on every connection before querying.
pub fn register_functions(db_conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    db_conn.create_scalar_function(
        "article_slug",
        1,
        // Innocuous so views may call it when trusted_schema is off
        FunctionFlags::SQLITE_UTF8
            | FunctionFlags::SQLITE_DETERMINISTIC
            | FunctionFlags::SQLITE_INNOCUOUS,
        |ctx| {
            let path: Option<String> = ctx.get(0)?;
            Ok(path
                .as_deref()
                .and_then(slug_from_path)
                .map(str::to_string))
        },
    )
}
