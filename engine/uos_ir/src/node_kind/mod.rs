//! Node tags for the syntax tree.

use std::fmt;

/// Tag of a syntax tree node.
///
/// The set is closed: the parser only produces these kinds and the
/// interpreter matches on them exhaustively.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    // Control flow
    If,
    ElseIf,
    Else,
    EndIf,
    While,
    EndWhile,
    For,
    ForEach,
    EndFor,
    Break,
    Continue,
    Stop,
    Replay,

    // Relational operators
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,

    // Logical operators
    Not,
    And,
    Or,

    // Values
    String,
    Serial,
    Integer,
    Double,
    List,

    // Modifiers
    Quiet,
    Force,

    // Structure
    Script,
    Statement,
    Command,
    Operand,
    LogicalExpression,
    UnaryExpression,
    BinaryExpression,
}

impl NodeKind {
    /// Map a relational operator lexeme to its node kind.
    pub fn from_operator(lexeme: &str) -> Option<Self> {
        match lexeme {
            "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessThanOrEqual),
            ">" => Some(Self::GreaterThan),
            ">=" => Some(Self::GreaterThanOrEqual),
            _ => None,
        }
    }

    /// Map a control keyword to its node kind.
    ///
    /// `for` always maps to [`NodeKind::For`]; the parser decides whether the
    /// loop is really a `foreach`.
    pub fn from_keyword(lexeme: &str) -> Option<Self> {
        match lexeme {
            "if" => Some(Self::If),
            "elseif" => Some(Self::ElseIf),
            "else" => Some(Self::Else),
            "endif" => Some(Self::EndIf),
            "while" => Some(Self::While),
            "endwhile" => Some(Self::EndWhile),
            "for" => Some(Self::For),
            "endfor" => Some(Self::EndFor),
            "break" => Some(Self::Break),
            "continue" => Some(Self::Continue),
            "stop" => Some(Self::Stop),
            "replay" => Some(Self::Replay),
            _ => None,
        }
    }

    /// Source keyword of a control kind, `None` for other kinds.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::If => Some("if"),
            Self::ElseIf => Some("elseif"),
            Self::Else => Some("else"),
            Self::EndIf => Some("endif"),
            Self::While => Some("while"),
            Self::EndWhile => Some("endwhile"),
            Self::For | Self::ForEach => Some("for"),
            Self::EndFor => Some("endfor"),
            Self::Break => Some("break"),
            Self::Continue => Some("continue"),
            Self::Stop => Some("stop"),
            Self::Replay => Some("replay"),
            _ => None,
        }
    }

    /// Source symbol of a relational operator, `None` for other kinds.
    pub fn as_symbol(self) -> Option<&'static str> {
        match self {
            Self::Equal => Some("=="),
            Self::NotEqual => Some("!="),
            Self::LessThan => Some("<"),
            Self::LessThanOrEqual => Some("<="),
            Self::GreaterThan => Some(">"),
            Self::GreaterThanOrEqual => Some(">="),
            _ => None,
        }
    }

    /// Whether this is one of the six relational operators.
    #[inline]
    pub fn is_relational(self) -> bool {
        self.as_symbol().is_some()
    }

    /// Whether this kind opens a loop (`while`, `for`, `foreach`).
    #[inline]
    pub fn is_loop_opener(self) -> bool {
        matches!(self, Self::While | Self::For | Self::ForEach)
    }

    /// Whether this kind closes a loop (`endwhile`, `endfor`).
    #[inline]
    pub fn is_loop_closer(self) -> bool {
        matches!(self, Self::EndWhile | Self::EndFor)
    }

    /// Whether this kind is a literal or operand leaf.
    #[inline]
    pub fn is_value(self) -> bool {
        matches!(
            self,
            Self::String | Self::Serial | Self::Integer | Self::Double | Self::List | Self::Operand
        )
    }

    /// Upper-case tag name, as printed in AST dumps.
    pub fn name(self) -> &'static str {
        match self {
            Self::If => "IF",
            Self::ElseIf => "ELSEIF",
            Self::Else => "ELSE",
            Self::EndIf => "ENDIF",
            Self::While => "WHILE",
            Self::EndWhile => "ENDWHILE",
            Self::For => "FOR",
            Self::ForEach => "FOREACH",
            Self::EndFor => "ENDFOR",
            Self::Break => "BREAK",
            Self::Continue => "CONTINUE",
            Self::Stop => "STOP",
            Self::Replay => "REPLAY",
            Self::Equal => "EQUAL",
            Self::NotEqual => "NOT_EQUAL",
            Self::LessThan => "LESS_THAN",
            Self::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            Self::GreaterThan => "GREATER_THAN",
            Self::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            Self::Not => "NOT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::String => "STRING",
            Self::Serial => "SERIAL",
            Self::Integer => "INTEGER",
            Self::Double => "DOUBLE",
            Self::List => "LIST",
            Self::Quiet => "QUIET",
            Self::Force => "FORCE",
            Self::Script => "SCRIPT",
            Self::Statement => "STATEMENT",
            Self::Command => "COMMAND",
            Self::Operand => "OPERAND",
            Self::LogicalExpression => "LOGICAL_EXPRESSION",
            Self::UnaryExpression => "UNARY_EXPRESSION",
            Self::BinaryExpression => "BINARY_EXPRESSION",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
