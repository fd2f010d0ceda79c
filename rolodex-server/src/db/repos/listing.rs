//! Paginated listing shared by every table
//!
//! Two statements per page: a COUNT over the filtered rows, then the
//! page itself. The count runs first because a non-positive page size
//! resolves to "all rows", which needs the total before LIMIT is known.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::models::{Paginated, Pagination};

use super::DbError;

/// Case-insensitive substring filter over several text columns
#[derive(Debug, Clone, Copy)]
pub struct Search<'a> {
    pub columns: &'static [&'static str],
    pub term: &'a str,
}

/// What to list and how
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    pub table: &'static str,
    pub columns: &'static str,
    pub search: Option<Search<'a>>,
}

impl Listing<'_> {
    /// Fetch one page, newest rows first.
    pub async fn fetch_page<T>(
        &self,
        pool: &PgPool,
        page: Pagination,
    ) -> Result<Paginated<T>, DbError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ");
        count.push(self.table);
        self.push_filter(&mut count);

        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;
        let window = page.window(total);

        let mut select = QueryBuilder::<Postgres>::new("SELECT ");
        select.push(self.columns).push(" FROM ").push(self.table);
        self.push_filter(&mut select);
        select
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(window.limit())
            .push(" OFFSET ")
            .push_bind(window.offset);

        let data: Vec<T> = select.build_query_as().fetch_all(pool).await?;

        tracing::debug!(
            table = self.table,
            total,
            page = window.page,
            per_page = window.per_page,
            returned = data.len(),
            "listed page"
        );

        Ok(Paginated::new(data, total, window))
    }

    fn push_filter(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        let Some(search) = self.search else {
            return;
        };

        let pattern = format!("%{}%", escape_like(search.term));
        builder.push(" WHERE (");
        for (i, column) in search.columns.iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder.push(*column).push(" ILIKE ").push_bind(pattern.clone());
        }
        builder.push(")");
    }
}

/// Escape LIKE wildcards so the term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
