//! SQL builder
//!
//! Compiles predicates and sort keys into SQL fragments. Operand values are
//! always bound through `?` placeholders and collected in [`SqlParams`];
//! column names come only from the static entity schemas.

use super::types::{Clause, Condition, FieldDef, Predicate, Sort, Value};

/// Bound parameter values, in placeholder order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SqlParams {
    pub values: Vec<Value>,
}

impl SqlParams {
    fn bind(&mut self, value: Value) -> &'static str {
        self.values.push(value);
        "?"
    }

    fn bind_list(&mut self, values: &[Value]) -> String {
        let placeholders: Vec<&str> = values.iter().map(|v| self.bind(v.clone())).collect();
        placeholders.join(", ")
    }
}

fn column(field: &FieldDef, alias: &str) -> String {
    if alias.is_empty() {
        field.column.to_string()
    } else {
        format!("{}.{}", alias, field.column)
    }
}

impl Clause {
    /// SQL for a single clause.
    ///
    /// Negating operators are null-inclusive: a record with no value matches
    /// `notEquals`, `notIn` and `doesNotContain`.
    pub fn to_sql_aliased(&self, params: &mut SqlParams, alias: &str) -> String {
        let col = column(self.field, alias);
        match &self.condition {
            Condition::Equals(v) => format!("{} = {}", col, params.bind(v.clone())),
            Condition::NotEquals(v) => format!("{} IS NOT {}", col, params.bind(v.clone())),
            Condition::In(values) => format!("{} IN ({})", col, params.bind_list(values)),
            Condition::NotIn(values) => format!(
                "({} IS NULL OR {} NOT IN ({}))",
                col,
                col,
                params.bind_list(values)
            ),
            Condition::Specified(true) => format!("{} IS NOT NULL", col),
            Condition::Specified(false) => format!("{} IS NULL", col),
            Condition::Contains(s) => format!(
                "instr({}, {}) > 0",
                col,
                params.bind(Value::Text(s.clone()))
            ),
            Condition::DoesNotContain(s) => format!(
                "({} IS NULL OR instr({}, {}) = 0)",
                col,
                col,
                params.bind(Value::Text(s.clone()))
            ),
            Condition::Compare(cmp, v) => {
                format!("{} {} {}", col, cmp.as_sql(), params.bind(v.clone()))
            }
        }
    }
}

impl Predicate {
    /// WHERE fragment with unqualified column names
    pub fn to_sql(&self, params: &mut SqlParams) -> String {
        self.to_sql_aliased(params, "")
    }

    /// WHERE fragment with columns prefixed by `alias` (e.g. "b" → "b.title")
    pub fn to_sql_aliased(&self, params: &mut SqlParams, alias: &str) -> String {
        if self.is_empty() {
            return "1=1".to_string();
        }
        self.clauses()
            .iter()
            .map(|c| c.to_sql_aliased(params, alias))
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

impl Sort {
    /// ORDER BY list (without the keyword), tie-breaker included
    pub fn to_sql_aliased(&self, alias: &str) -> String {
        self.effective()
            .iter()
            .map(|o| format!("{} {}", column(o.field, alias), o.direction.as_sql()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
