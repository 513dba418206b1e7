// src/query/filter.rs
//
// Predicate DSL for the store gateway. Conditions address entity fields;
// the builder resolves them to column names through the descriptor.
// Multiple conditions are joined with AND only.

use crate::mapping::SqlValue;

/// Relational operator of one filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    Like,
}

impl Relation {
    pub fn sql_op(self) -> &'static str {
        match self {
            Relation::Equals => "=",
            Relation::NotEquals => "<>",
            Relation::GreaterThan => ">",
            Relation::LessThan => "<",
            Relation::GreaterOrEqual => ">=",
            Relation::LessOrEqual => "<=",
            Relation::Like => "LIKE",
        }
    }
}

/// One predicate: (field, value, relation).
#[derive(Debug, Clone)]
pub struct FilterCondition {
    field: &'static str,
    value: SqlValue,
    relation: Relation,
}

impl FilterCondition {
    pub fn new(field: &'static str, value: impl Into<SqlValue>, relation: Relation) -> Self {
        Self {
            field,
            value: value.into(),
            relation,
        }
    }

    pub fn eq(field: &'static str, value: impl Into<SqlValue>) -> Self {
        Self::new(field, value, Relation::Equals)
    }

    pub fn ne(field: &'static str, value: impl Into<SqlValue>) -> Self {
        Self::new(field, value, Relation::NotEquals)
    }

    pub fn gt(field: &'static str, value: impl Into<SqlValue>) -> Self {
        Self::new(field, value, Relation::GreaterThan)
    }

    pub fn lt(field: &'static str, value: impl Into<SqlValue>) -> Self {
        Self::new(field, value, Relation::LessThan)
    }

    pub fn ge(field: &'static str, value: impl Into<SqlValue>) -> Self {
        Self::new(field, value, Relation::GreaterOrEqual)
    }

    pub fn le(field: &'static str, value: impl Into<SqlValue>) -> Self {
        Self::new(field, value, Relation::LessOrEqual)
    }

    pub fn like(field: &'static str, value: impl Into<SqlValue>) -> Self {
        Self::new(field, value, Relation::Like)
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Value to bind for this condition. LIKE wraps the text with
    /// wildcards on both sides here, at bind time; the rendered SQL
    /// always stays `column LIKE ?`.
    pub fn bind_value(&self) -> SqlValue {
        match (&self.relation, &self.value) {
            (Relation::Like, SqlValue::Text(text)) => SqlValue::Text(format!("%{text}%")),
            _ => self.value.clone(),
        }
    }
}

/// Sort key for a filtered SELECT.
#[derive(Debug, Clone, Copy)]
pub struct SortKey {
    pub field: &'static str,
    pub ascending: bool,
}

impl SortKey {
    pub fn asc(field: &'static str) -> Self {
        Self {
            field,
            ascending: true,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        Self {
            field,
            ascending: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wraps_wildcards_at_bind_time() {
        let condition = FilterCondition::like("name", "Recep");
        assert_eq!(condition.bind_value(), SqlValue::Text("%Recep%".to_string()));
    }

    #[test]
    fn other_relations_bind_the_value_verbatim() {
        let condition = FilterCondition::ge("duration", 90i64);
        assert_eq!(condition.bind_value(), SqlValue::Int(90));
    }

    #[test]
    fn operators_render_standard_sql() {
        assert_eq!(Relation::Equals.sql_op(), "=");
        assert_eq!(Relation::NotEquals.sql_op(), "<>");
        assert_eq!(Relation::GreaterOrEqual.sql_op(), ">=");
        assert_eq!(Relation::Like.sql_op(), "LIKE");
    }
}
