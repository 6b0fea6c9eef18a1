//! Criteria type definitions
//!
//! Operators, field kinds and the per-kind operator table, operand values,
//! and the predicate/sort/page values produced by the parser.

use chrono::NaiveDate;

use super::error::CriteriaError;

/// Filter operators accepted in `<field>.<operator>` query keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
    In,
    NotIn,
    Specified,
    Contains,
    DoesNotContain,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

impl Operator {
    pub const ALL: &'static [Operator] = &[
        Operator::Equals,
        Operator::NotEquals,
        Operator::In,
        Operator::NotIn,
        Operator::Specified,
        Operator::Contains,
        Operator::DoesNotContain,
        Operator::GreaterThan,
        Operator::GreaterThanOrEqual,
        Operator::LessThan,
        Operator::LessThanOrEqual,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "notEquals",
            Operator::In => "in",
            Operator::NotIn => "notIn",
            Operator::Specified => "specified",
            Operator::Contains => "contains",
            Operator::DoesNotContain => "doesNotContain",
            Operator::GreaterThan => "greaterThan",
            Operator::GreaterThanOrEqual => "greaterThanOrEqual",
            Operator::LessThan => "lessThan",
            Operator::LessThanOrEqual => "lessThanOrEqual",
        }
    }

    /// Look up an operator by its query-string name (case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.as_str() == name)
    }
}

/// Operators valid on orderable kinds (integers, dates)
const ORDERABLE_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::In,
    Operator::NotIn,
    Operator::Specified,
    Operator::GreaterThan,
    Operator::GreaterThanOrEqual,
    Operator::LessThan,
    Operator::LessThanOrEqual,
];

/// Operators valid on text fields
const TEXT_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::In,
    Operator::NotIn,
    Operator::Specified,
    Operator::Contains,
    Operator::DoesNotContain,
];

/// Storage type of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
    Date,
}

impl FieldKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Text => "text",
            FieldKind::Date => "date",
        }
    }

    /// Operators applicable to this kind
    pub const fn operators(&self) -> &'static [Operator] {
        match self {
            FieldKind::Integer | FieldKind::Date => ORDERABLE_OPERATORS,
            FieldKind::Text => TEXT_OPERATORS,
        }
    }

    pub fn supports(&self, operator: Operator) -> bool {
        self.operators().contains(&operator)
    }

    /// Human-readable description of the operand format, used in errors
    pub const fn expected(&self) -> &'static str {
        match self {
            FieldKind::Integer => "an integer",
            FieldKind::Text => "text",
            FieldKind::Date => "a date (YYYY-MM-DD)",
        }
    }

    /// Parse a raw operand into a typed value, `None` when it does not fit this kind
    pub fn parse_operand(&self, raw: &str) -> Option<Value> {
        match self {
            FieldKind::Integer => raw.trim().parse::<i64>().ok().map(Value::Integer),
            FieldKind::Text => Some(Value::Text(raw.to_string())),
            FieldKind::Date => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .ok()
                .map(Value::Date),
        }
    }
}

/// Typed operand value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Text(String),
    Date(NaiveDate),
}

/// One filterable field: API name, storage column and kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn new(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self { name, column, kind }
    }
}

/// Static field table for one entity type.
///
/// The first field is the identifier and acts as the sort tie-breaker.
#[derive(Debug)]
pub struct EntitySchema {
    pub entity: &'static str,
    pub fields: &'static [FieldDef],
}

impl EntitySchema {
    pub fn field(&'static self, name: &str) -> Result<&'static FieldDef, CriteriaError> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| CriteriaError::UnknownField {
                entity: self.entity,
                field: name.to_string(),
            })
    }

    pub fn id(&'static self) -> &'static FieldDef {
        &self.fields[0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
        }
    }
}

/// A single operator with its typed operand(s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Equals(Value),
    NotEquals(Value),
    In(Vec<Value>),
    NotIn(Vec<Value>),
    Specified(bool),
    Contains(String),
    DoesNotContain(String),
    Compare(Comparison, Value),
}

/// A condition bound to a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub field: &'static FieldDef,
    pub condition: Condition,
}

/// Conjunction of clauses. An empty predicate matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn and(mut self, field: &'static FieldDef, condition: Condition) -> Self {
        self.push(field, condition);
        self
    }

    pub fn push(&mut self, field: &'static FieldDef, condition: Condition) {
        self.clauses.push(Clause { field, condition });
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: &'static FieldDef,
    pub direction: SortDirection,
}

/// Requested sort keys plus the identifier tie-breaker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    orders: Vec<SortOrder>,
    tie_break: &'static FieldDef,
}

impl Sort {
    pub fn new(orders: Vec<SortOrder>, schema: &'static EntitySchema) -> Self {
        Self {
            orders,
            tie_break: schema.id(),
        }
    }

    /// Sort by identifier ascending only
    pub fn by_id(schema: &'static EntitySchema) -> Self {
        Self::new(Vec::new(), schema)
    }

    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    /// Keys in effect, with `id ASC` appended unless the identifier is already a key
    pub fn effective(&self) -> Vec<SortOrder> {
        let mut keys = self.orders.clone();
        if !keys.iter().any(|o| o.field == self.tie_break) {
            keys.push(SortOrder {
                field: self.tie_break,
                direction: SortDirection::Asc,
            });
        }
        keys
    }
}

/// Zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pageable {
    pub page: u32,
    pub size: u32,
}

impl Pageable {
    pub const DEFAULT_SIZE: u32 = 20;
    pub const MAX_SIZE: u32 = 2000;

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 0,
            size: Self::DEFAULT_SIZE,
        }
    }
}
