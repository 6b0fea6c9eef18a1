//! Query parameter parsing
//!
//! Turns raw `(key, value)` query pairs into a [`ListRequest`]. Keys of the
//! form `<field>.<operator>` become predicate clauses; `sort`, `page`, `size`
//! and `distinct` are reserved.

use super::error::CriteriaError;
use super::types::{
    Comparison, Condition, EntitySchema, FieldDef, FieldKind, Operator, Pageable, Predicate,
    Sort, SortDirection, SortOrder, Value,
};

/// Maximum number of filter entries per request
const MAX_FILTERS: usize = 50;

/// Parsed list/count request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub predicate: Predicate,
    pub sort: Sort,
    pub page: Pageable,
}

/// Parse query pairs against an entity schema
pub fn parse_criteria(
    pairs: &[(String, String)],
    schema: &'static EntitySchema,
) -> Result<ListRequest, CriteriaError> {
    let mut predicate = Predicate::all();
    let mut orders = Vec::new();
    let mut page = Pageable::default();
    let mut filters = 0usize;

    for (key, value) in pairs {
        match key.as_str() {
            "sort" => orders.push(parse_sort(value, schema)?),
            "page" => page.page = parse_number("page", value)?,
            "size" => {
                let size = parse_number("size", value)?;
                if !(1..=Pageable::MAX_SIZE).contains(&size) {
                    return Err(CriteriaError::InvalidParameter {
                        name: "size".to_string(),
                        reason: format!("must be between 1 and {}", Pageable::MAX_SIZE),
                    });
                }
                page.size = size;
            }
            "distinct" => {}
            _ => {
                filters += 1;
                if filters > MAX_FILTERS {
                    return Err(CriteriaError::TooManyFilters { max: MAX_FILTERS });
                }
                let (field, condition) = parse_filter(key, value, schema)?;
                predicate.push(field, condition);
            }
        }
    }

    Ok(ListRequest {
        predicate,
        sort: Sort::new(orders, schema),
        page,
    })
}

fn parse_number(name: &str, value: &str) -> Result<u32, CriteriaError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| CriteriaError::InvalidParameter {
            name: name.to_string(),
            reason: format!("'{}' is not a non-negative integer", value),
        })
}

fn parse_sort(value: &str, schema: &'static EntitySchema) -> Result<SortOrder, CriteriaError> {
    let (name, direction) = match value.split_once(',') {
        Some((name, dir)) => (name.trim(), Some(dir.trim())),
        None => (value.trim(), None),
    };

    let field = schema.field(name)?;
    let direction = match direction.map(|d| d.to_ascii_lowercase()) {
        None => SortDirection::Asc,
        Some(d) if d == "asc" => SortDirection::Asc,
        Some(d) if d == "desc" => SortDirection::Desc,
        Some(d) => {
            return Err(CriteriaError::InvalidParameter {
                name: "sort".to_string(),
                reason: format!("unknown direction '{}', expected asc or desc", d),
            });
        }
    };

    Ok(SortOrder { field, direction })
}

fn parse_filter(
    key: &str,
    value: &str,
    schema: &'static EntitySchema,
) -> Result<(&'static FieldDef, Condition), CriteriaError> {
    let Some((name, op_name)) = key.split_once('.') else {
        return Err(CriteriaError::UnknownField {
            entity: schema.entity,
            field: key.to_string(),
        });
    };

    let field = schema.field(name)?;
    let operator = Operator::from_name(op_name)
        .filter(|op| field.kind.supports(*op))
        .ok_or_else(|| CriteriaError::UnsupportedOperator {
            field: field.name.to_string(),
            operator: op_name.to_string(),
            kind: field.kind.as_str(),
        })?;

    let condition = match operator {
        Operator::Equals => Condition::Equals(operand(field, operator, value)?),
        Operator::NotEquals => Condition::NotEquals(operand(field, operator, value)?),
        Operator::In => Condition::In(operand_list(field, operator, value)?),
        Operator::NotIn => Condition::NotIn(operand_list(field, operator, value)?),
        Operator::Specified => match value.trim() {
            "true" => Condition::Specified(true),
            "false" => Condition::Specified(false),
            _ => return Err(invalid(field, operator, value, "true or false")),
        },
        Operator::Contains => Condition::Contains(value.to_string()),
        Operator::DoesNotContain => Condition::DoesNotContain(value.to_string()),
        Operator::GreaterThan => Condition::Compare(Comparison::Gt, operand(field, operator, value)?),
        Operator::GreaterThanOrEqual => {
            Condition::Compare(Comparison::Gte, operand(field, operator, value)?)
        }
        Operator::LessThan => Condition::Compare(Comparison::Lt, operand(field, operator, value)?),
        Operator::LessThanOrEqual => {
            Condition::Compare(Comparison::Lte, operand(field, operator, value)?)
        }
    };

    Ok((field, condition))
}

fn invalid(
    field: &FieldDef,
    operator: Operator,
    value: &str,
    expected: &'static str,
) -> CriteriaError {
    CriteriaError::InvalidOperand {
        field: field.name.to_string(),
        operator: operator.as_str().to_string(),
        value: value.to_string(),
        expected,
    }
}

fn operand(field: &FieldDef, operator: Operator, raw: &str) -> Result<Value, CriteriaError> {
    field
        .kind
        .parse_operand(raw)
        .ok_or_else(|| invalid(field, operator, raw, field.kind.expected()))
}

fn operand_list(
    field: &FieldDef,
    operator: Operator,
    raw: &str,
) -> Result<Vec<Value>, CriteriaError> {
    let items: Vec<&str> = raw.split(',').collect();
    // Empty list items are only meaningful for text; reject "in=" and "in=1,,2" otherwise
    if raw.is_empty() || (field.kind != FieldKind::Text && items.iter().any(|i| i.trim().is_empty()))
    {
        return Err(invalid(field, operator, raw, "a non-empty comma-separated list"));
    }
    items
        .into_iter()
        .map(|item| operand(field, operator, item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::criteria::schemas::{AUTHOR, BOOK};
    use chrono::NaiveDate;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn no_params_yields_defaults() {
        let request = parse_criteria(&[], &AUTHOR).unwrap();
        assert!(request.predicate.is_empty());
        assert_eq!(request.page, Pageable::default());
        assert!(request.sort.orders().is_empty());
    }

    #[test]
    fn parses_typed_filters() {
        let request = parse_criteria(
            &pairs(&[
                ("name.contains", "AAA"),
                ("birthDate.lessThan", "2024-05-01"),
                ("id.in", "1,2,3"),
            ]),
            &AUTHOR,
        )
        .unwrap();

        let clauses = request.predicate.clauses();
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].condition, Condition::Contains("AAA".into()));
        assert_eq!(
            clauses[1].condition,
            Condition::Compare(
                Comparison::Lt,
                Value::Date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
            )
        );
        assert_eq!(
            clauses[2].condition,
            Condition::In(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)])
        );
    }

    #[test]
    fn same_field_may_repeat() {
        let request = parse_criteria(
            &pairs(&[
                ("price.greaterThan", "10"),
                ("price.lessThanOrEqual", "20"),
            ]),
            &BOOK,
        )
        .unwrap();
        assert_eq!(request.predicate.clauses().len(), 2);
    }

    #[test]
    fn unknown_field_rejected() {
        let err = parse_criteria(&pairs(&[("nickname.equals", "x")]), &AUTHOR).unwrap_err();
        assert_eq!(
            err,
            CriteriaError::UnknownField {
                entity: "author",
                field: "nickname".to_string()
            }
        );
    }

    #[test]
    fn bare_key_is_unknown_field() {
        let err = parse_criteria(&pairs(&[("name", "x")]), &AUTHOR).unwrap_err();
        assert!(matches!(err, CriteriaError::UnknownField { .. }));
    }

    #[test]
    fn text_operator_on_date_is_unsupported() {
        let err = parse_criteria(&pairs(&[("birthDate.contains", "19")]), &AUTHOR).unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_OPERATOR");
    }

    #[test]
    fn ordering_on_text_is_unsupported() {
        let err = parse_criteria(&pairs(&[("name.greaterThan", "M")]), &AUTHOR).unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_OPERATOR");
    }

    #[test]
    fn unknown_operator_is_unsupported() {
        let err = parse_criteria(&pairs(&[("name.startsWith", "A")]), &AUTHOR).unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_OPERATOR");
    }

    #[test]
    fn operand_type_mismatch() {
        let err = parse_criteria(&pairs(&[("id.equals", "abc")]), &AUTHOR).unwrap_err();
        assert_eq!(err.code(), "INVALID_OPERAND");

        let err = parse_criteria(&pairs(&[("birthDate.equals", "yesterday")]), &AUTHOR).unwrap_err();
        assert_eq!(err.code(), "INVALID_OPERAND");

        let err = parse_criteria(&pairs(&[("id.in", "1,x")]), &AUTHOR).unwrap_err();
        assert_eq!(err.code(), "INVALID_OPERAND");
    }

    #[test]
    fn in_requires_non_empty_list() {
        let err = parse_criteria(&pairs(&[("id.in", "")]), &AUTHOR).unwrap_err();
        assert_eq!(err.code(), "INVALID_OPERAND");

        let err = parse_criteria(&pairs(&[("id.notIn", "1,,2")]), &AUTHOR).unwrap_err();
        assert_eq!(err.code(), "INVALID_OPERAND");
    }

    #[test]
    fn specified_requires_boolean() {
        let request = parse_criteria(&pairs(&[("name.specified", "false")]), &AUTHOR).unwrap();
        assert_eq!(
            request.predicate.clauses()[0].condition,
            Condition::Specified(false)
        );

        let err = parse_criteria(&pairs(&[("name.specified", "yes")]), &AUTHOR).unwrap_err();
        assert_eq!(err.code(), "INVALID_OPERAND");
    }

    #[test]
    fn parses_sort_and_paging() {
        let request = parse_criteria(
            &pairs(&[
                ("sort", "name,desc"),
                ("sort", "birthDate"),
                ("page", "2"),
                ("size", "5"),
                ("distinct", "true"),
            ]),
            &AUTHOR,
        )
        .unwrap();

        let orders = request.sort.orders();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].field.name, "name");
        assert_eq!(orders[0].direction, SortDirection::Desc);
        assert_eq!(orders[1].direction, SortDirection::Asc);
        assert_eq!(request.page, Pageable { page: 2, size: 5 });
        assert!(request.predicate.is_empty());
    }

    #[test]
    fn invalid_sort_and_paging() {
        let err = parse_criteria(&pairs(&[("sort", "nope,asc")]), &AUTHOR).unwrap_err();
        assert!(matches!(err, CriteriaError::UnknownField { .. }));

        let err = parse_criteria(&pairs(&[("sort", "name,sideways")]), &AUTHOR).unwrap_err();
        assert_eq!(err.code(), "INVALID_PARAMETER");

        let err = parse_criteria(&pairs(&[("size", "0")]), &AUTHOR).unwrap_err();
        assert_eq!(err.code(), "INVALID_PARAMETER");

        let err = parse_criteria(&pairs(&[("size", "2001")]), &AUTHOR).unwrap_err();
        assert_eq!(err.code(), "INVALID_PARAMETER");

        let err = parse_criteria(&pairs(&[("page", "-1")]), &AUTHOR).unwrap_err();
        assert_eq!(err.code(), "INVALID_PARAMETER");
    }

    #[test]
    fn too_many_filters() {
        let many: Vec<(String, String)> = (0..=MAX_FILTERS)
            .map(|i| ("id.notEquals".to_string(), i.to_string()))
            .collect();
        let err = parse_criteria(&many, &AUTHOR).unwrap_err();
        assert_eq!(err, CriteriaError::TooManyFilters { max: MAX_FILTERS });
    }
}
