//! Bind `FieldValue`s to a MySQL query.

use crate::entry::FieldValue;
use sqlx::mysql::{MySql, MySqlArguments};
use sqlx::query::Query;

pub type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;

/// Bind params in order. Null is sent as a typed NULL.
pub fn bind_params<'q>(mut query: MySqlQuery<'q>, params: &'q [FieldValue]) -> MySqlQuery<'q> {
    for p in params {
        query = match p {
            FieldValue::Null => query.bind(None::<String>),
            FieldValue::Integer(n) => query.bind(*n),
            FieldValue::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}
