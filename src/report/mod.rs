// MIT License
// Copyright (c) 2024 Graham King

use std::io;
use std::io::Write;

use anyhow::Context;
use chrono::NaiveDate;

use crate::article::{self, ArticleTitle, SlugViews};
use crate::views;

mod db;

/// Report days where more than this fraction of requests failed
pub const ERROR_THRESHOLD: f64 = 0.01;

/// e.g. Jul/17/2016
pub const DATE_FORMAT: &str = "%b/%d/%Y";

/// One row of the `top_authors` view
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorArticle {
    pub name: String,
    pub title: String,
    pub views: i64,
}

/// One row of the `errors` view: a day's traffic
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDay {
    pub date: NaiveDate,
    pub total: i64,
    pub error_count: f64,
}

/// A day over the error threshold
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorRate {
    pub date: NaiveDate,
    pub percentage: f64,
}

/// Everything the report prints, fetched before any of it is printed
#[derive(Debug)]
pub struct Report {
    pub article_titles: Vec<ArticleTitle>,
    pub substr_titles: Vec<SlugViews>,
    pub top_authors_data: Vec<AuthorArticle>,
    pub error_days: Vec<ErrorDay>,

    pub top_three: Vec<String>,
    pub top_authors: Vec<String>,
    pub error_rates: Vec<ErrorRate>,
}

pub fn run(db_path: &str) -> anyhow::Result<()> {
    let db_conn = open(db_path)?;
    let report = Report::fetch(&db_conn)?;
    db_conn
        .close()
        .map_err(|(_, err)| err)
        .with_context(|| format!("close database {db_path}"))?;

    let mut stdout = io::stdout().lock();
    report.render(&mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Open the news database read-only and check it has every view
pub fn open(db_path: &str) -> anyhow::Result<rusqlite::Connection> {
    let db_conn = rusqlite::Connection::open_with_flags(
        db_path,
        rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("open database {db_path}"))?;
    article::register_functions(&db_conn)?;

    let missing = views::missing_views(&db_conn)?;
    if !missing.is_empty() {
        anyhow::bail!(
            "database {db_path} is missing views: {}. Create them with the `views` command.",
            missing.join(", ")
        );
    }
    Ok(db_conn)
}

impl Report {
    pub fn fetch(db_conn: &rusqlite::Connection) -> anyhow::Result<Report> {
        let article_titles = query(
            db_conn,
            "article_titles",
            db::SELECT_ARTICLE_TITLES,
            (),
            |row| {
                Ok(ArticleTitle {
                    author: row.get(0)?,
                    title: row.get(1)?,
                    slug: row.get(2)?,
                })
            },
        )?;
        let substr_titles = query(db_conn, "substr_title", db::SELECT_SUBSTR_TITLE, (), |row| {
            Ok(SlugViews {
                slug: row.get(0)?,
                views: row.get(1)?,
            })
        })?;
        let top_authors_data = query(db_conn, "top_authors", db::SELECT_TOP_AUTHORS, (), |row| {
            Ok(AuthorArticle {
                name: row.get(0)?,
                title: row.get(1)?,
                views: row.get(2)?,
            })
        })?;
        let error_days = query(db_conn, "errors", db::SELECT_ERRORS, (), |row| {
            Ok(ErrorDay {
                date: row.get(0)?,
                total: row.get(1)?,
                error_count: row.get(2)?,
            })
        })?;

        let top_three: Vec<String> =
            query(db_conn, "top three articles", db::TOP_THREE_ARTICLES, (), |row| row.get(0))?;
        let top_authors: Vec<String> =
            query(db_conn, "top authors", db::TOP_AUTHORS, (), |row| row.get(0))?;
        let error_rates = query(db_conn, "error days", db::ERROR_DAYS, [ERROR_THRESHOLD], |row| {
            Ok(ErrorRate {
                date: row.get(0)?,
                percentage: row.get(1)?,
            })
        })?;

        Ok(Report {
            article_titles,
            substr_titles,
            top_authors_data,
            error_days,
            top_three,
            top_authors,
            error_rates,
        })
    }

    pub fn render(&self, w: &mut impl io::Write) -> io::Result<()> {
        writeln!(w, "The Associated Views:")?;
        writeln!(w, "Article Titles: (author, title, slug)")?;
        for a in &self.article_titles {
            writeln!(w, "{} | {} | {}", a.author, a.title, a.slug)?;
        }

        writeln!(w, "\nSubstring Titles: (slug, views)")?;
        for s in &self.substr_titles {
            // Paths outside /article/ have no slug
            let slug = s.slug.as_deref().unwrap_or("-");
            writeln!(w, "{slug} | {}", s.views)?;
        }

        writeln!(w, "\nTop Authors: (name, title, views)")?;
        for a in &self.top_authors_data {
            writeln!(w, "{} | {} | {}", a.name, a.title, a.views)?;
        }

        writeln!(w, "\nErrors: (date, total, errors)")?;
        for e in &self.error_days {
            writeln!(w, "{} {} {}", e.date.format(DATE_FORMAT), e.total, e.error_count)?;
        }

        writeln!(w, "\nTop 3 Articles:")?;
        for title in &self.top_three {
            writeln!(w, "{title}")?;
        }

        writeln!(w, "\nTop Authors:")?;
        for name in &self.top_authors {
            writeln!(w, "{name}")?;
        }

        writeln!(w, "\nDate Where Error > 1%:")?;
        for e in &self.error_rates {
            writeln!(w, "{} ({:.2}% errors)", e.date.format(DATE_FORMAT), e.percentage)?;
        }
        Ok(())
    }
}

// Run `sql` and collect every row, naming `what` if it fails
fn query<T, P, F>(
    db_conn: &rusqlite::Connection,
    what: &str,
    sql: &str,
    params: P,
    f: F,
) -> anyhow::Result<Vec<T>>
where
    P: rusqlite::Params,
    F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = db_conn
        .prepare(sql)
        .with_context(|| format!("prepare {what} query"))?;
    let rows = stmt
        .query_map(params, f)
        .with_context(|| format!("run {what} query"))?
        .collect::<Result<Vec<T>, _>>()
        .with_context(|| format!("read {what} rows"))?;
    Ok(rows)
}
