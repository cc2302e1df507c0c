//! Static precedence relation between terminal classes
//!
//! Rows are indexed by the class on top of the parse stack, columns by the
//! class of the lookahead token. Every ordered pair maps to exactly one
//! [`Relation`], so the driver never faces a conflict.

use std::fmt;

use precalc_lexer::TokenClass;

/// Result of comparing two adjacent terminal classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// The left class yields precedence: shift.
    Less,
    /// Both classes belong to the same handle: shift.
    Equal,
    /// The left class takes precedence: reduce.
    Greater,
    /// The pair can never be adjacent in a well-formed expression.
    Error,
}

impl Relation {
    /// Symbol used in the rendered table (`<`, `=`, `>` or a blank for errors)
    pub const fn symbol(self) -> char {
        match self {
            Relation::Less => '<',
            Relation::Equal => '=',
            Relation::Greater => '>',
            Relation::Error => ' ',
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

use Relation::{Equal as E, Error as N, Greater as G, Less as L};

// The END/END cell is never consulted: the driver accepts on that pair
// before it looks at the table.
const TABLE: [[Relation; TokenClass::COUNT]; TokenClass::COUNT] = [
    //  +  -  *  /  n  (  )  $
    [G, G, L, L, L, L, G, G], // +
    [G, G, L, L, L, L, G, G], // -
    [G, G, G, G, L, L, G, G], // *
    [G, G, G, G, L, L, G, G], // /
    [G, G, G, G, N, N, G, G], // n
    [L, L, L, L, L, L, E, N], // (
    [G, G, G, G, N, N, G, G], // )
    [L, L, L, L, L, L, N, N], // $
];

/// Precedence relation between the stack-top class `top` and the lookahead
/// class `lookahead`.
///
/// Total over all pairs; [`Relation::Error`] is an ordinary answer, not a
/// failure of the lookup.
#[inline]
pub fn relation(top: TokenClass, lookahead: TokenClass) -> Relation {
    TABLE[top.index()][lookahead.index()]
}

/// Render the whole table as text, one row per stack-top class.
pub fn render_table() -> String {
    let mut out = String::from("   ");
    for column in TokenClass::ALL {
        out.push_str(&format!("  {}", column.symbol()));
    }
    out.push('\n');
    for row in TokenClass::ALL {
        out.push_str(&format!("  {}", row.symbol()));
        for column in TokenClass::ALL {
            out.push_str(&format!("  {}", relation(row, column)));
        }
        out.push('\n');
    }
    out
}
