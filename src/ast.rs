use std::{collections::BTreeSet, fmt};

use crate::error::SyntaxError;

/// An abstract syntax tree (AST) node representing an expression.
///
/// `Expr` covers every construct of the condition language, from literals and
/// member paths to arithmetic, comparisons, logical connectives and the
/// `is between ... and ...` range test. Each variant owns its children and
/// records the byte offset of the token it was built from, so evaluation errors
/// can point back into the source.
///
/// Trees are immutable once built; compiled expressions share them behind an
/// `Rc`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal such as `18` or `2.5`.
    NumberLiteral {
        /// The constant value.
        value:    f64,
        /// Offset in the source.
        position: usize,
    },
    /// A quoted string literal.
    StringLiteral {
        /// The unquoted contents.
        value:    String,
        /// Offset in the source.
        position: usize,
    },
    /// `true` or `false`.
    BooleanLiteral {
        /// The constant value.
        value:    bool,
        /// Offset in the source.
        position: usize,
    },
    /// Reference to a top-level name in the environment.
    Identifier {
        /// Name of the variable.
        name:     String,
        /// Offset in the source.
        position: usize,
    },
    /// Property lookup on a record, e.g. `Participant_Age.answer`.
    MemberAccess {
        /// The expression whose property is read.
        object:   Box<Self>,
        /// The property name.
        property: String,
        /// Offset of the `.` in the source.
        position: usize,
    },
    /// Array literal expression, e.g. `['dark', 'contrast']`.
    ArrayLiteral {
        /// Elements of the array.
        elements: Vec<Self>,
        /// Offset of the `[` in the source.
        position: usize,
    },
    /// A unary operation (negation or logical not).
    UnaryOp {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        operand:  Box<Self>,
        /// Offset of the operator in the source.
        position: usize,
    },
    /// Arithmetic, comparison or membership between two operands.
    BinaryOp {
        /// The operator.
        op:       BinaryOperator,
        /// Left operand.
        left:     Box<Self>,
        /// Right operand.
        right:    Box<Self>,
        /// Offset of the operator in the source.
        position: usize,
    },
    /// Short-circuiting `and` / `or`.
    LogicalOp {
        /// The connective.
        op:       LogicalOperator,
        /// Left operand, always evaluated.
        left:     Box<Self>,
        /// Right operand, evaluated only when the left side does not decide.
        right:    Box<Self>,
        /// Offset of the operator in the source.
        position: usize,
    },
    /// A parenthesized expression.
    Grouping {
        /// The wrapped expression.
        inner:    Box<Self>,
        /// Offset of the `(` in the source.
        position: usize,
    },
    /// `target = value`, only produced when parsing a binding.
    Assignment {
        /// An [`Expr::Identifier`] or [`Expr::MemberAccess`] chain.
        target:   Box<Self>,
        /// The value to evaluate and store.
        value:    Box<Self>,
        /// Offset of the `=` in the source.
        position: usize,
    },
    /// `subject is between lower and upper`, inclusive on both ends.
    Between {
        /// The value being tested.
        subject:  Box<Self>,
        /// Inclusive lower bound.
        lower:    Box<Self>,
        /// Inclusive upper bound.
        upper:    Box<Self>,
        /// Offset of the `is` in the source.
        position: usize,
    },
}

impl Expr {
    /// Gets the source offset from `self`.
    /// ## Example
    /// ```
    /// use showif::ast::Expr;
    ///
    /// let expr = Expr::Identifier { name:     "age".to_string(),
    ///                               position: 5, };
    ///
    /// assert_eq!(expr.position(), 5);
    /// ```
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::NumberLiteral { position, .. }
            | Self::StringLiteral { position, .. }
            | Self::BooleanLiteral { position, .. }
            | Self::Identifier { position, .. }
            | Self::MemberAccess { position, .. }
            | Self::ArrayLiteral { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::LogicalOp { position, .. }
            | Self::Grouping { position, .. }
            | Self::Assignment { position, .. }
            | Self::Between { position, .. } => *position,
        }
    }

    /// Builds an [`Expr::Assignment`], checking that the target can be
    /// written to.
    ///
    /// # Errors
    /// Returns [`SyntaxError::InvalidAssignmentTarget`] when `target` is not an
    /// identifier or member chain.
    ///
    /// ## Example
    /// ```
    /// use showif::ast::Expr;
    ///
    /// let literal = Expr::NumberLiteral { value:    1.0,
    ///                                     position: 0, };
    /// let value = Expr::NumberLiteral { value:    2.0,
    ///                                   position: 4, };
    ///
    /// assert!(Expr::assignment(literal, value, 2).is_err());
    /// ```
    pub fn assignment(target: Self, value: Self, position: usize) -> Result<Self, SyntaxError> {
        if target.member_path().is_none() {
            return Err(SyntaxError::InvalidAssignmentTarget { position: target.position() });
        }
        Ok(Self::Assignment { target: Box::new(target),
                              value: Box::new(value),
                              position })
    }

    /// Compares two trees node by node, ignoring source positions.
    ///
    /// Two sources that differ only in whitespace produce structurally equal
    /// trees even though their positions differ.
    ///
    /// ## Example
    /// ```
    /// use showif::compile;
    ///
    /// let a = compile("a+1").unwrap();
    /// let b = compile("a  +  1").unwrap();
    ///
    /// assert_ne!(a.ast(), b.ast());
    /// assert!(a.ast().structurally_eq(b.ast()));
    /// ```
    #[must_use]
    pub fn structurally_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NumberLiteral { value: a, .. }, Self::NumberLiteral { value: b, .. }) => {
                a.to_bits() == b.to_bits()
            },
            (Self::StringLiteral { value: a, .. }, Self::StringLiteral { value: b, .. }) => a == b,
            (Self::BooleanLiteral { value: a, .. }, Self::BooleanLiteral { value: b, .. }) => {
                a == b
            },
            (Self::Identifier { name: a, .. }, Self::Identifier { name: b, .. }) => a == b,
            (Self::MemberAccess { object: o1,
                                  property: p1,
                                  .. },
             Self::MemberAccess { object: o2,
                                  property: p2,
                                  .. }) => p1 == p2 && o1.structurally_eq(o2),
            (Self::ArrayLiteral { elements: a, .. }, Self::ArrayLiteral { elements: b, .. }) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structurally_eq(y))
            },
            (Self::UnaryOp { op: op1,
                             operand: a,
                             .. },
             Self::UnaryOp { op: op2,
                             operand: b,
                             .. }) => op1 == op2 && a.structurally_eq(b),
            (Self::BinaryOp { op: op1,
                              left: l1,
                              right: r1,
                              .. },
             Self::BinaryOp { op: op2,
                              left: l2,
                              right: r2,
                              .. }) => op1 == op2 && l1.structurally_eq(l2) && r1.structurally_eq(r2),
            (Self::LogicalOp { op: op1,
                               left: l1,
                               right: r1,
                               .. },
             Self::LogicalOp { op: op2,
                               left: l2,
                               right: r2,
                               .. }) => op1 == op2 && l1.structurally_eq(l2) && r1.structurally_eq(r2),
            (Self::Grouping { inner: a, .. }, Self::Grouping { inner: b, .. }) => {
                a.structurally_eq(b)
            },
            (Self::Assignment { target: t1,
                                value: v1,
                                .. },
             Self::Assignment { target: t2,
                                value: v2,
                                .. }) => t1.structurally_eq(t2) && v1.structurally_eq(v2),
            (Self::Between { subject: s1,
                             lower: lo1,
                             upper: up1,
                             .. },
             Self::Between { subject: s2,
                             lower: lo2,
                             upper: up2,
                             .. }) => {
                s1.structurally_eq(s2) && lo1.structurally_eq(lo2) && up1.structurally_eq(up2)
            },
            _ => false,
        }
    }

    /// Returns the path of an identifier or member chain, root first.
    ///
    /// `a.b.c` yields `["a", "b", "c"]`. Any other node yields `None`.
    #[must_use]
    pub fn member_path(&self) -> Option<Vec<&str>> {
        match self {
            Self::Identifier { name, .. } => Some(vec![name.as_str()]),
            Self::MemberAccess { object, property, .. } => {
                let mut path = object.member_path()?;
                path.push(property.as_str());
                Some(path)
            },
            _ => None,
        }
    }

    /// Collects the distinct root names this expression reads.
    ///
    /// For `A.answer = 'Yes' and age > 18` this is `{"A", "age"}`. The target
    /// of an assignment is written, not read, and is not included.
    ///
    /// ## Example
    /// ```
    /// use showif::compile;
    ///
    /// let compiled = compile("A.answer = 'Yes' and (age > 18 or A.skip)").unwrap();
    /// let roots: Vec<&str> = compiled.ast().root_identifiers().into_iter().collect();
    ///
    /// assert_eq!(roots, vec!["A", "age"]);
    /// ```
    #[must_use]
    pub fn root_identifiers(&self) -> BTreeSet<&str> {
        let mut roots = BTreeSet::new();
        self.collect_roots(&mut roots);
        roots
    }

    /// Returns `true` when the tree is more than `limit` levels deep.
    ///
    /// A literal or identifier is one level deep. The walk stops at `limit`,
    /// so it never recurses further than that.
    ///
    /// ## Example
    /// ```
    /// use showif::compile;
    ///
    /// let compiled = compile("not (a > 1)").unwrap();
    ///
    /// assert!(!compiled.ast().deeper_than(4));
    /// assert!(compiled.ast().deeper_than(3));
    /// ```
    #[must_use]
    pub fn deeper_than(&self, limit: usize) -> bool {
        let Some(limit) = limit.checked_sub(1) else {
            return true;
        };

        match self {
            Self::NumberLiteral { .. }
            | Self::StringLiteral { .. }
            | Self::BooleanLiteral { .. }
            | Self::Identifier { .. } => false,
            Self::MemberAccess { object: inner, .. }
            | Self::UnaryOp { operand: inner, .. }
            | Self::Grouping { inner, .. } => inner.deeper_than(limit),
            Self::ArrayLiteral { elements, .. } => elements.iter().any(|e| e.deeper_than(limit)),
            Self::BinaryOp { left, right, .. }
            | Self::LogicalOp { left, right, .. }
            | Self::Assignment { target: left,
                                 value: right,
                                 .. } => left.deeper_than(limit) || right.deeper_than(limit),
            Self::Between { subject,
                            lower,
                            upper,
                            .. } => {
                subject.deeper_than(limit) || lower.deeper_than(limit) || upper.deeper_than(limit)
            },
        }
    }

    fn collect_roots<'a>(&'a self, roots: &mut BTreeSet<&'a str>) {
        match self {
            Self::NumberLiteral { .. } | Self::StringLiteral { .. } | Self::BooleanLiteral { .. } => {},
            Self::Identifier { name, .. } => {
                roots.insert(name.as_str());
            },
            Self::MemberAccess { object, .. } => object.collect_roots(roots),
            Self::ArrayLiteral { elements, .. } => {
                for element in elements {
                    element.collect_roots(roots);
                }
            },
            Self::UnaryOp { operand, .. } => operand.collect_roots(roots),
            Self::BinaryOp { left, right, .. } | Self::LogicalOp { left, right, .. } => {
                left.collect_roots(roots);
                right.collect_roots(roots);
            },
            Self::Grouping { inner, .. } => inner.collect_roots(roots),
            Self::Assignment { value, .. } => value.collect_roots(roots),
            Self::Between { subject,
                            lower,
                            upper,
                            .. } => {
                subject.collect_roots(roots);
                lower.collect_roots(roots);
                upper.collect_roots(roots);
            },
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons and array membership.
/// `=`, `==` and `is` all map to [`BinaryOperator::Equal`]; `!=` and `is not`
/// map to [`BinaryOperator::NotEqual`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
    /// Loose equality (`=`, `==`, `is`)
    Equal,
    /// Loose inequality (`!=`, `is not`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Left array contains right value (`contains`)
    Contains,
    /// Left value is an element of right array (`in`)
    In,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x` or `not x`).
    Not,
}

/// Represents a short-circuiting logical connective.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `and` / `AND`
    And,
    /// `or` / `OR`
    Or,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, Contains, Div, Equal, Greater, GreaterEqual, In, Less, LessEqual, Mul, NotEqual,
            Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Pow => "^",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Contains => "contains",
            In => "in",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "not "),
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
        }
    }
}

/// Renders the tree back to source text.
///
/// The output re-parses to a structurally equal tree: equality is always
/// written as `==` so it can never be mistaken for an assignment, and only the
/// parentheses recorded as [`Expr::Grouping`] nodes are emitted.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberLiteral { value, .. } => write!(f, "{value}"),
            Self::StringLiteral { value, .. } => {
                if value.contains('\'') {
                    write!(f, "\"{value}\"")
                } else {
                    write!(f, "'{value}'")
                }
            },
            Self::BooleanLiteral { value, .. } => write!(f, "{value}"),
            Self::Identifier { name, .. } => write!(f, "{name}"),
            Self::MemberAccess { object, property, .. } => write!(f, "{object}.{property}"),
            Self::ArrayLiteral { elements, .. } => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            },
            Self::UnaryOp { op, operand, .. } => write!(f, "{op}{operand}"),
            Self::BinaryOp { op, left, right, .. } => write!(f, "{left} {op} {right}"),
            Self::LogicalOp { op, left, right, .. } => write!(f, "{left} {op} {right}"),
            Self::Grouping { inner, .. } => write!(f, "({inner})"),
            Self::Assignment { target, value, .. } => write!(f, "{target} = {value}"),
            Self::Between { subject,
                            lower,
                            upper,
                            .. } => write!(f, "{subject} is between {lower} and {upper}"),
        }
    }
}
