// MIT License
// Copyright (c) 2024 Graham King

// Each view only depends on the base tables (log, articles, authors) and on the
// views listed before it. Keep them in this order.

// The busiest path is the site root, skip it and keep the next 8
pub const CREATE_ARTICLE_VIEWS: &str = r#"
CREATE VIEW IF NOT EXISTS article_views AS
    SELECT path, count(*) AS views FROM log
    GROUP BY path
    ORDER BY views DESC, path
    LIMIT 8 OFFSET 1
"#;

// article_slug is registered by crate::article::register_functions
pub const CREATE_SUBSTR_TITLE: &str = r#"
CREATE VIEW IF NOT EXISTS substr_title AS
    SELECT article_slug(path) AS path, views FROM article_views
"#;

pub const CREATE_ARTICLE_TITLES: &str = r#"
CREATE VIEW IF NOT EXISTS article_titles AS
    SELECT author, title, slug FROM articles
"#;

pub const CREATE_POPULAR_ARTICLES: &str = r#"
CREATE VIEW IF NOT EXISTS popular_articles AS
    SELECT title, views FROM article_titles, substr_title
    WHERE article_titles.slug = substr_title.path
    ORDER BY substr_title.views DESC, title
"#;

pub const CREATE_POPULAR_AUTHORS: &str = r#"
CREATE VIEW IF NOT EXISTS popular_authors AS
    SELECT author, article_titles.title AS title, views
    FROM article_titles, popular_articles
    WHERE article_titles.title = popular_articles.title
    ORDER BY views DESC, title
"#;

pub const CREATE_TOP_AUTHORS: &str = r#"
CREATE VIEW IF NOT EXISTS top_authors AS
    SELECT name, title, views FROM popular_authors, authors
    WHERE authors.id = popular_authors.author
    ORDER BY views DESC, title
"#;

// status is the full status line, e.g. "404 NOT FOUND".
// date is the calendar day as written in the timestamp, whatever its offset
// ("+00", "-05:00" or none). date(time) is NULL for "+00".
pub const CREATE_ERRORS: &str = r#"
CREATE VIEW IF NOT EXISTS errors AS
    SELECT substr(time, 1, 10) AS date,
           count(*) AS total,
           CAST(sum(status != '200 OK') AS REAL) AS error_count
    FROM log
    GROUP BY substr(time, 1, 10)
    ORDER BY substr(time, 1, 10)
"#;
