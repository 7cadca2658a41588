use serde_json::Value;

use crate::types::FLAG_READ;

/// A restriction on the set of messages, expressed as one SQL clause.
///
/// Filters carry their parameters as [`Value`]s so that this crate stays
/// free of any concrete database dependency. The database crate converts
/// them into its own parameter type when it builds the statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// All messages in a single folder
    Folder(i64),
    /// All messages in any of the given folders. Must not be empty.
    Folders(Vec<i64>),
    /// All messages whose flags, masked with `mask`, equal `wanted`
    Flags { mask: i64, wanted: i64 },
}

impl Filter {
    /// Messages with the read bit set.
    pub fn read() -> Self {
        Filter::Flags {
            mask: FLAG_READ,
            wanted: FLAG_READ,
        }
    }

    /// Messages with the read bit unset.
    pub fn unread() -> Self {
        Filter::Flags {
            mask: FLAG_READ,
            wanted: 0,
        }
    }

    fn to_sql(&self) -> (String, Vec<Value>) {
        match self {
            Filter::Folder(id) => ("folder = ?".to_owned(), vec![Value::from(*id)]),
            Filter::Folders(ids) => {
                let placeholders = vec!["?"; ids.len()].join(", ");
                (
                    format!("folder IN ({})", placeholders),
                    ids.iter().map(|id| Value::from(*id)).collect(),
                )
            }
            Filter::Flags { mask, wanted } => (
                "flags & ? = ?".to_owned(),
                vec![Value::from(*mask), Value::from(*wanted)],
            ),
        }
    }

    /// Combine `filters` into a `WHERE` clause and its parameters.
    /// An empty slice yields an empty clause, selecting everything.
    pub fn where_clause(filters: &[Filter]) -> (String, Vec<Value>) {
        if filters.is_empty() {
            return (String::new(), Vec::new());
        }
        let mut clauses = Vec::with_capacity(filters.len());
        let mut values = Vec::new();
        for filter in filters {
            let (clause, mut params) = filter.to_sql();
            clauses.push(clause);
            values.append(&mut params);
        }
        (format!(" WHERE {}", clauses.join(" AND ")), values)
    }
}
