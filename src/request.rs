//! Per-request descriptor handed from the HTTP layer to the CRUD service.

use crate::entry::Entry;
use std::collections::HashMap;

pub const DEFAULT_LIMIT: u32 = 5;
pub const DEFAULT_OFFSET: u32 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Pagination {
    /// Read `limit` / `offset` from query parameters. Absent or unparsable values keep their defaults.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let parse = |key: &str, default: u32| {
            params
                .get(key)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(default)
        };
        Pagination {
            limit: parse("limit", DEFAULT_LIMIT),
            offset: parse("offset", DEFAULT_OFFSET),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RequestDescriptor {
    pub table: String,
    /// Absent for collection-level requests.
    pub id: Option<i64>,
    pub page: Pagination,
    /// Already filtered to known columns and coerced.
    pub body: Entry,
}

impl RequestDescriptor {
    pub fn new(table: impl Into<String>) -> Self {
        RequestDescriptor {
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_page(mut self, page: Pagination) -> Self {
        self.page = page;
        self
    }

    pub fn with_body(mut self, body: Entry) -> Self {
        self.body = body;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_when_absent() {
        assert_eq!(Pagination::from_query(&HashMap::new()), Pagination { limit: 5, offset: 0 });
    }

    #[test]
    fn parses_numbers() {
        let page = Pagination::from_query(&query(&[("limit", "1"), ("offset", "1")]));
        assert_eq!(page, Pagination { limit: 1, offset: 1 });
    }

    #[test]
    fn garbage_falls_back_per_field() {
        let page = Pagination::from_query(&query(&[("limit", "1'"), ("offset", "1\"")]));
        assert_eq!(page, Pagination::default());

        let page = Pagination::from_query(&query(&[("limit", "2"), ("offset", "-3")]));
        assert_eq!(page, Pagination { limit: 2, offset: 0 });
    }

    #[test]
    fn builder_sets_fields() {
        let req = RequestDescriptor::new("items").with_id(3);
        assert_eq!(req.table, "items");
        assert_eq!(req.id, Some(3));
        assert_eq!(req.page, Pagination::default());
        assert!(req.body.is_empty());
    }
}
