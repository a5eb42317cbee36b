pub mod artist;
pub mod show;
pub mod venue;

use sea_orm::ColumnTrait;
use sea_orm::sea_query::{Expr, LikeExpr, SimpleExpr};

/// Case-insensitive substring match on a text column (`ILIKE '%term%'`).
///
/// Case folding is left to SQLite `LIKE` so the term and the column fold the
/// same way (ASCII only). `%` and `_` in the term match literally. An empty
/// term matches every row.
pub(crate) fn name_contains<C: ColumnTrait>(column: C, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(term));
    Expr::col(column.as_column_ref()).like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
