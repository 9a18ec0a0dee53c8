//! Composable SQL conditions for dynamically filtered queries.
//!
//! A [`Condition`] is a SQL fragment with `?` placeholders plus the
//! arguments for those placeholders, in order. Conditions are built
//! independently and then pushed into a [`QueryBuilder`], which binds the
//! arguments positionally. This keeps user input out of the SQL text while
//! still letting subqueries compose with ordinary predicates.

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};

use crate::model::{SongFilters, TimeRange};

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Text(String),
    Date(NaiveDate),
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for Arg {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// A `SELECT` statement usable as the right-hand side of `IN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subquery {
    sql: String,
    args: Vec<Arg>,
}

impl Subquery {
    pub fn new(sql: impl Into<String>, args: Vec<Arg>) -> Self {
        let sql = sql.into();
        debug_assert_eq!(sql.matches('?').count(), args.len());
        Self { sql, args }
    }
}

/// A boolean SQL expression with positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    sql: String,
    args: Vec<Arg>,
}

impl Condition {
    pub fn new(sql: impl Into<String>, args: Vec<Arg>) -> Self {
        let sql = sql.into();
        debug_assert_eq!(sql.matches('?').count(), args.len());
        Self { sql, args }
    }

    /// `column = ?`
    pub fn eq(column: &str, value: impl Into<Arg>) -> Self {
        Self::new(format!("{} = ?", column), vec![value.into()])
    }

    /// `column >= ? AND column <= ?`, both bounds inclusive.
    pub fn between(column: &str, range: &TimeRange) -> Self {
        Self::new(
            format!("{0} >= ? AND {0} <= ?", column),
            vec![range.start().into(), range.end().into()],
        )
    }

    #[cfg(test)]
    fn sql(&self) -> &str {
        &self.sql
    }

    #[cfg(test)]
    fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Append this condition to `builder`, binding each argument at its
    /// placeholder.
    pub fn push_to(self, builder: &mut QueryBuilder<'_, Sqlite>) {
        let mut args = self.args.into_iter();
        let mut pieces = self.sql.split('?');

        if let Some(first) = pieces.next() {
            builder.push(first);
        }
        for piece in pieces {
            match args.next() {
                Some(Arg::Text(text)) => builder.push_bind(text),
                Some(Arg::Date(date)) => builder.push_bind(date),
                None => builder.push_bind(None::<String>),
            };
            builder.push(piece);
        }
    }
}

/// `property IN (subquery)`, with the subquery's arguments carried through
/// unchanged and in order.
pub fn in_condition_with_subquery(property: &str, subquery: Subquery) -> Condition {
    Condition {
        sql: format!("{} IN ({})", property, subquery.sql),
        args: subquery.args,
    }
}

/// Append `WHERE c1 AND c2 ...`; appends nothing for an empty list.
pub fn push_where(builder: &mut QueryBuilder<'_, Sqlite>, conditions: Vec<Condition>) {
    for (i, condition) in conditions.into_iter().enumerate() {
        builder.push(if i == 0 { " WHERE (" } else { " AND (" });
        condition.push_to(builder);
        builder.push(")");
    }
}

/// Escape `LIKE` wildcards so `needle` matches literally under `ESCAPE '\'`.
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Song IDs having at least one couplet that contains `needle`,
/// case-insensitively.
///
/// Matches against `text_folded`, which is lowercased in Rust on insert;
/// SQLite's own `lower()` and `LIKE` only fold ASCII.
pub fn songs_with_couplet_containing(needle: &str) -> Subquery {
    Subquery::new(
        "SELECT sc.song_id FROM song_couplets sc \
         WHERE sc.text_folded LIKE '%' || ? || '%' ESCAPE '\\'",
        vec![Arg::Text(escape_like(&needle.to_lowercase()))],
    )
}

/// Translate song filters into conditions over `songs s` joined with
/// `music_groups mg`.
pub fn song_filter_conditions(filters: &SongFilters) -> Vec<Condition> {
    let mut conditions = Vec::new();

    if let Some(name) = &filters.song_name {
        conditions.push(Condition::eq("s.name", name.as_str()));
    }
    if let Some(link) = &filters.link {
        conditions.push(Condition::eq("s.link", link.as_str()));
    }
    if let Some(group) = &filters.group_name {
        conditions.push(Condition::eq("mg.name", group.as_str()));
    }
    if let Some(range) = &filters.release_date_range {
        conditions.push(Condition::between("s.release_date", range));
    }
    if let Some(needle) = &filters.couplet_contains {
        conditions.push(in_condition_with_subquery(
            "s.id",
            songs_with_couplet_containing(needle),
        ));
    }

    conditions
}
