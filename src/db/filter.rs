//! Movie list filter builder
//!
//! Turns the raw query-parameter map from a list request into a set of
//! per-column conditions bound as parameterized SQL. Only declared movie
//! attributes are filterable; everything else is dropped without error.

use std::collections::HashMap;

/// Columns that may appear in a filter. `id` and `poster` are never
/// filterable and any key outside this set is silently ignored.
const FILTERABLE_COLUMNS: &[&str] = &[
    "title",
    "year",
    "director",
    "genre",
    "duration",
    "synopsis",
];

/// Columns matched by substring rather than equality.
const SUBSTRING_COLUMNS: &[&str] = &["title", "director"];

/// Columns with integer affinity. Their values are parsed to i64 when
/// possible; a non-numeric value is bound as text and matches nothing.
const INTEGER_COLUMNS: &[&str] = &["year", "duration"];

/// A value ready to be bound into a query.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Int(i64),
}

/// How a single column is matched.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-sensitive substring match (`instr(col, ?) > 0`).
    /// SQLite LIKE is case-insensitive for ASCII, instr is not.
    Contains(String),
    /// Exact equality.
    Eq(FilterValue),
}

/// One per-column match condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: &'static str,
    pub predicate: Predicate,
}

impl Condition {
    /// Render this condition as a WHERE fragment using the given
    /// positional parameter index.
    pub fn to_sql(&self, param: usize) -> String {
        match self.predicate {
            Predicate::Contains(_) => format!("instr({}, ?{}) > 0", self.column, param),
            Predicate::Eq(_) => format!("{} = ?{}", self.column, param),
        }
    }
}

/// An ordered list of conditions, AND-combined when queried.
///
/// An empty filter produces no WHERE clause, so a list query returns
/// every record.
#[derive(Debug, Clone, Default)]
pub struct MovieFilter {
    conditions: Vec<Condition>,
}

impl MovieFilter {
    /// Build a filter from request query parameters.
    ///
    /// Conditions come out in declared-column order so the generated SQL
    /// is deterministic regardless of map iteration order.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let conditions = FILTERABLE_COLUMNS
            .iter()
            .filter_map(|&column| {
                params.get(column).map(|value| Condition {
                    column,
                    predicate: predicate_for(column, value),
                })
            })
            .collect();

        Self { conditions }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Render the WHERE clause body, or None when there are no conditions.
    /// Each condition binds exactly one value, numbered from ?1.
    pub fn where_sql(&self) -> Option<String> {
        if self.conditions.is_empty() {
            return None;
        }

        let clauses: Vec<String> = self
            .conditions
            .iter()
            .enumerate()
            .map(|(i, c)| c.to_sql(i + 1))
            .collect();

        Some(clauses.join(" AND "))
    }
}

fn predicate_for(column: &'static str, value: &str) -> Predicate {
    if SUBSTRING_COLUMNS.contains(&column) {
        return Predicate::Contains(value.to_string());
    }

    if INTEGER_COLUMNS.contains(&column)
        && let Ok(n) = value.parse::<i64>()
    {
        return Predicate::Eq(FilterValue::Int(n));
    }

    Predicate::Eq(FilterValue::Text(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn id_and_poster_are_never_filterable() {
        let filter = MovieFilter::from_query(&params(&[
            ("id", "7"),
            ("poster", "http://example.com/p.jpg"),
            ("genre", "Sci-Fi"),
        ]));

        assert_eq!(filter.conditions().len(), 1);
        assert_eq!(filter.conditions()[0].column, "genre");
    }

    #[test]
    fn unknown_keys_are_dropped_without_error() {
        let filter = MovieFilter::from_query(&params(&[
            ("rating", "5"),
            ("anything", "else"),
        ]));

        assert!(filter.is_empty());
        assert_eq!(filter.where_sql(), None);
    }

    #[test]
    fn title_and_director_use_substring_match() {
        let filter = MovieFilter::from_query(&params(&[
            ("title", "Matrix"),
            ("director", "Wachowski"),
        ]));

        for cond in filter.conditions() {
            assert!(matches!(cond.predicate, Predicate::Contains(_)));
        }

        assert_eq!(
            filter.where_sql().unwrap(),
            "instr(title, ?1) > 0 AND instr(director, ?2) > 0"
        );
    }

    #[test]
    fn other_columns_use_exact_equality() {
        let filter = MovieFilter::from_query(&params(&[("year", "1999")]));

        assert_eq!(
            filter.conditions()[0].predicate,
            Predicate::Eq(FilterValue::Int(1999))
        );
        assert_eq!(filter.where_sql().unwrap(), "year = ?1");
    }

    #[test]
    fn non_numeric_value_for_integer_column_passes_through_as_text() {
        let filter = MovieFilter::from_query(&params(&[("year", "not-a-year")]));

        assert_eq!(
            filter.conditions()[0].predicate,
            Predicate::Eq(FilterValue::Text("not-a-year".to_string()))
        );
    }

    #[test]
    fn conditions_come_out_in_declared_column_order() {
        let filter = MovieFilter::from_query(&params(&[
            ("duration", "120"),
            ("title", "Dune"),
            ("genre", "Sci-Fi"),
        ]));

        let columns: Vec<&str> = filter.conditions().iter().map(|c| c.column).collect();
        assert_eq!(columns, vec!["title", "genre", "duration"]);
    }

    #[test]
    fn empty_params_yield_empty_filter() {
        let filter = MovieFilter::from_query(&HashMap::new());

        assert!(filter.is_empty());
        assert_eq!(filter.where_sql(), None);
    }
}
