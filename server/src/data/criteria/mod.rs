//! Criteria filter engine
//!
//! Translates `<field>.<operator>=<value>` query parameters into a typed
//! [`Predicate`] over a static entity schema, plus sort and page settings.
//! Predicates compile to parameterised SQL `WHERE` fragments.
//!
//! ## Usage
//!
//! ```no_run
//! use libris_server::data::criteria::{parse_criteria, schemas, SqlParams};
//!
//! let pairs = vec![("name.contains".to_string(), "Tolkien".to_string())];
//! let request = parse_criteria(&pairs, &schemas::AUTHOR).unwrap();
//! let mut params = SqlParams::default();
//! let where_sql = request.predicate.to_sql(&mut params);
//! assert_eq!(where_sql, "instr(name, ?) > 0");
//! ```

mod builder;
mod error;
mod parser;
pub mod schemas;
mod types;

pub use builder::SqlParams;
pub use error::CriteriaError;
pub use parser::{ListRequest, parse_criteria};
pub use types::{
    Clause, Comparison, Condition, EntitySchema, FieldDef, FieldKind, Operator, Pageable,
    Predicate, Sort, SortDirection, SortOrder, Value,
};
