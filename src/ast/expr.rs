//! Expression nodes.
//!
//! Dual-licensed under the MIT license and the Apache License, Version 2.0.
//! Unless required by applicable law or agreed to in writing, software
//! distributed under these licenses is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.

use crate::lexer::token::Token;
use crate::value::Value;

/// Identifies one `Variable` or `Assign` node for the resolver's side table.
///
/// The teacher's interpreter (and the Java original this language is drawn
/// from) key that table on the expression object's own identity. Rust AST
/// nodes are plain values with no stable address once moved, so each
/// `Variable`/`Assign` node is stamped with a monotonic id when the parser
/// builds it, and that id is the map key instead.
pub type ExprId = u64;

pub enum Expr {
    Literal(Value),
    Grouping(Box<Expr>),
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Variable {
        id: ExprId,
        name: Token,
    },
    Assign {
        id: ExprId,
        name: Token,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        paren: Token,
        arguments: Vec<Expr>,
    },
}
