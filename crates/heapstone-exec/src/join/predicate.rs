//! Join predicates.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use heapstone_common::{HeapstoneError, Row, Value};

/// A pure test over a (left, right) row pair.
pub trait JoinPredicate: fmt::Debug {
    /// Returns true if the pair joins.
    fn matches(&self, left: &Row, right: &Row) -> bool;

    /// Returns the compared `(left, right)` field positions, if the
    /// predicate is a single field comparison.
    fn fields(&self) -> Option<(usize, usize)> {
        None
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Less than.
    Lt,
    /// Less than or equal.
    Le,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Ge,
}

impl CmpOp {
    /// Applies the operator to `left <op> right`.
    ///
    /// Values of different types never compare true.
    pub fn compare(self, left: &Value, right: &Value) -> bool {
        if left.field_type() != right.field_type() {
            return false;
        }
        let ord = left.cmp(right);
        match self {
            CmpOp::Eq => ord == Ordering::Equal,
            CmpOp::Ne => ord != Ordering::Equal,
            CmpOp::Lt => ord == Ordering::Less,
            CmpOp::Le => ord != Ordering::Greater,
            CmpOp::Gt => ord == Ordering::Greater,
            CmpOp::Ge => ord != Ordering::Less,
        }
    }

    /// Returns the operator symbol.
    pub fn as_str(self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "<>",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CmpOp {
    type Err = HeapstoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eq" | "=" | "==" => Ok(CmpOp::Eq),
            "ne" | "<>" | "!=" => Ok(CmpOp::Ne),
            "lt" | "<" => Ok(CmpOp::Lt),
            "le" | "<=" => Ok(CmpOp::Le),
            "gt" | ">" => Ok(CmpOp::Gt),
            "ge" | ">=" => Ok(CmpOp::Ge),
            other => Err(HeapstoneError::invalid_argument(format!(
                "unknown comparison operator: {other}"
            ))),
        }
    }
}

/// Compares `left[left_field] <op> right[right_field]`.
///
/// A pair where either field is unset or out of range does not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPredicate {
    left_field: usize,
    op: CmpOp,
    right_field: usize,
}

impl FieldPredicate {
    /// Creates a field comparison.
    pub fn new(left_field: usize, op: CmpOp, right_field: usize) -> Self {
        Self {
            left_field,
            op,
            right_field,
        }
    }

    /// Shorthand for an equi-join.
    pub fn equals(left_field: usize, right_field: usize) -> Self {
        Self::new(left_field, CmpOp::Eq, right_field)
    }

    /// Returns the comparison operator.
    pub fn op(&self) -> CmpOp {
        self.op
    }
}

impl JoinPredicate for FieldPredicate {
    fn matches(&self, left: &Row, right: &Row) -> bool {
        match (left.get(self.left_field), right.get(self.right_field)) {
            (Ok(Some(l)), Ok(Some(r))) => self.op.compare(l, r),
            _ => false,
        }
    }

    fn fields(&self) -> Option<(usize, usize)> {
        Some((self.left_field, self.right_field))
    }
}

/// Wraps a closure as a predicate.
pub struct FnPredicate<F> {
    func: F,
}

impl<F> FnPredicate<F>
where
    F: Fn(&Row, &Row) -> bool,
{
    /// Creates a predicate from `func`.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> JoinPredicate for FnPredicate<F>
where
    F: Fn(&Row, &Row) -> bool,
{
    fn matches(&self, left: &Row, right: &Row) -> bool {
        (self.func)(left, right)
    }
}

impl<F> fmt::Debug for FnPredicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPredicate").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapstone_common::{FieldType, Schema};
    use std::sync::Arc;

    fn int_row(v: i32) -> Row {
        let schema = Arc::new(Schema::unnamed(&[FieldType::Int]).unwrap());
        Row::from_values(schema, vec![Value::int(v)]).unwrap()
    }

    #[test]
    fn test_cmp_ops() {
        let (one, two) = (Value::int(1), Value::int(2));
        assert!(CmpOp::Lt.compare(&one, &two));
        assert!(CmpOp::Le.compare(&one, &one));
        assert!(!CmpOp::Gt.compare(&one, &two));
        assert!(CmpOp::Ne.compare(&one, &two));
        assert!(!CmpOp::Lt.compare(&one, &Value::text("a")));
        assert!(!CmpOp::Ne.compare(&one, &Value::text("a")));
    }

    #[test]
    fn test_parse_cmp_op() {
        assert_eq!("eq".parse::<CmpOp>().unwrap(), CmpOp::Eq);
        assert_eq!(">=".parse::<CmpOp>().unwrap(), CmpOp::Ge);
        assert_eq!("NE".parse::<CmpOp>().unwrap(), CmpOp::Ne);
        assert!("like".parse::<CmpOp>().is_err());
    }

    #[test]
    fn test_field_predicate() {
        let pred = FieldPredicate::equals(0, 0);
        assert!(pred.matches(&int_row(3), &int_row(3)));
        assert!(!pred.matches(&int_row(3), &int_row(4)));
        assert_eq!(pred.fields(), Some((0, 0)));
        assert_eq!(pred.op(), CmpOp::Eq);

        let out_of_range = FieldPredicate::equals(0, 5);
        assert!(!out_of_range.matches(&int_row(3), &int_row(3)));

        let unset = Row::new(int_row(0).schema().clone());
        assert!(!pred.matches(&unset, &int_row(0)));
    }

    #[test]
    fn test_fn_predicate() {
        let pred = FnPredicate::new(|l: &Row, r: &Row| l.get(0).ok() != r.get(0).ok());
        assert!(pred.matches(&int_row(1), &int_row(2)));
        assert_eq!(pred.fields(), None);
    }
}
