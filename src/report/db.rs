// MIT License
// Copyright (c) 2024 Graham King

// Raw dumps of the views, printed ahead of the answers

pub const SELECT_ARTICLE_TITLES: &str = r#"
SELECT author, title, slug FROM article_titles ORDER BY title
"#;

pub const SELECT_SUBSTR_TITLE: &str = r#"
SELECT path, views FROM substr_title ORDER BY views DESC, path
"#;

pub const SELECT_TOP_AUTHORS: &str = r#"
SELECT name, title, views FROM top_authors ORDER BY views DESC, title
"#;

pub const SELECT_ERRORS: &str = r#"
SELECT date, total, error_count FROM errors ORDER BY date
"#;

// What are the most popular three articles of all time?
pub const TOP_THREE_ARTICLES: &str = r#"
SELECT title FROM article_titles, substr_title
WHERE article_titles.slug = substr_title.path
ORDER BY substr_title.views DESC, title
LIMIT 3
"#;

// Who are the most popular article authors of all time?
// An author has a row per popular article, rank them by their best one.
pub const TOP_AUTHORS: &str = r#"
SELECT name FROM top_authors
GROUP BY name
ORDER BY max(views) DESC, name
"#;

// On which days did more than ?1 of requests lead to errors?
// Days without requests have no rate, skip them.
pub const ERROR_DAYS: &str = r#"
SELECT date, error_count / total * 100 AS percentage FROM errors
WHERE total > 0 AND error_count / total > ?1
ORDER BY date
"#;
