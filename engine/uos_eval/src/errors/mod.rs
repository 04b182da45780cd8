//! Runtime error types and constructors.
//!
//! Factory functions below are the public way to build errors: they fill in
//! both the structured [`EvalErrorKind`] and the message. The interpreter
//! attaches the failing statement's line and lexeme on the way out.

use std::fmt;

/// Result of evaluating something at run time.
pub type EvalResult<T> = Result<T, EvalError>;

/// Typed category of a runtime error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Dispatch
    UnknownCommand {
        name: String,
    },
    UnknownExpression {
        name: String,
    },

    // Arguments
    WrongArgCount {
        command: String,
        expected: &'static str,
        got: usize,
    },
    UnconsumedArguments {
        command: String,
        count: usize,
    },
    InvalidArgument {
        command: String,
        message: String,
    },
    Conversion {
        value: String,
        target: &'static str,
    },
    TypeMismatch {
        left: String,
        right: String,
    },

    // State
    ListNotFound {
        name: String,
    },
    ListIndexOutOfRange {
        name: String,
        index: usize,
        size: usize,
    },
    LoopBeyondList {
        name: String,
        bound: usize,
        size: usize,
    },
    TimerNotFound {
        name: String,
    },
    NamespaceNotFound {
        name: String,
    },
    NamespaceExists {
        name: String,
    },
    ItemNotFound {
        namespace: String,
        item: String,
    },
    ScriptNotFound {
        name: String,
    },

    /// Anything raised by an external handler that has no better category.
    Custom {
        message: String,
    },
}

impl EvalErrorKind {
    /// Whether this is an argument error of a known command.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::WrongArgCount { .. }
                | Self::UnconsumedArguments { .. }
                | Self::InvalidArgument { .. }
        )
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand { name } => write!(f, "unknown command `{name}`"),
            Self::UnknownExpression { name } => write!(f, "unknown expression `{name}`"),

            Self::WrongArgCount {
                command,
                expected,
                got,
            } => write!(f, "{command} expects {expected} arguments, got {got}"),
            Self::UnconsumedArguments { command, count } => {
                write!(f, "{command} was given {count} unused argument(s)")
            }
            Self::InvalidArgument { command, message } => write!(f, "{command}: {message}"),
            Self::Conversion { value, target } => {
                write!(f, "cannot convert `{value}` to {target}")
            }
            Self::TypeMismatch { left, right } => {
                write!(f, "cannot compare `{left}` with `{right}`")
            }

            Self::ListNotFound { name } => write!(f, "list `{name}` does not exist"),
            Self::ListIndexOutOfRange { name, index, size } => {
                write!(f, "index {index} is out of range for list `{name}` of size {size}")
            }
            Self::LoopBeyondList { name, bound, size } => write!(
                f,
                "for loop runs to index {} but list `{name}` has size {size}",
                bound.saturating_sub(1)
            ),
            Self::TimerNotFound { name } => write!(f, "timer `{name}` does not exist"),
            Self::NamespaceNotFound { name } => write!(f, "namespace `{name}` does not exist"),
            Self::NamespaceExists { name } => write!(f, "namespace `{name}` already exists"),
            Self::ItemNotFound { namespace, item } => {
                write!(f, "namespace `{namespace}` has no item `{item}`")
            }
            Self::ScriptNotFound { name } => write!(f, "script `{name}` is not loaded"),

            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// A runtime error. Terminates the running script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message, equal to `kind.to_string()` for factory errors.
    pub message: String,
    /// 1-based line of the failing statement.
    pub line: Option<u32>,
    /// Keyword or command name of the failing statement.
    pub lexeme: Option<String>,
}

impl EvalError {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        EvalError {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            line: None,
            lexeme: None,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            line: None,
            lexeme: None,
        }
    }

    /// Attach a source location unless one is already set.
    #[must_use]
    pub fn at(mut self, line: u32, lexeme: Option<&str>) -> Self {
        if self.line.is_none() {
            self.line = Some(line);
            self.lexeme = lexeme.map(str::to_string);
        }
        self
    }

    pub fn is_argument_error(&self) -> bool {
        self.kind.is_argument_error()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, &self.lexeme) {
            (Some(line), Some(lexeme)) => {
                write!(f, "runtime error on line {line} (`{lexeme}`): {}", self.message)
            }
            (Some(line), None) => write!(f, "runtime error on line {line}: {}", self.message),
            _ => write!(f, "runtime error: {}", self.message),
        }
    }
}

impl std::error::Error for EvalError {}

/// Why statement execution unwound.
///
/// `Stop` is the `stop` keyword ending the script on purpose; it is not a
/// fault and is never reported as one.
#[derive(Debug)]
pub enum ControlAction {
    Error(Box<EvalError>),
    Stop,
}

impl From<EvalError> for ControlAction {
    #[inline]
    fn from(err: EvalError) -> Self {
        ControlAction::Error(Box::new(err))
    }
}

// Dispatch errors

#[cold]
pub fn unknown_command(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownCommand {
        name: name.to_string(),
    })
}

#[cold]
pub fn unknown_expression(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownExpression {
        name: name.to_string(),
    })
}

// Argument errors

/// Wrong number of arguments. `expected` reads like `"2"` or `"1 to 3"`.
#[cold]
pub fn wrong_arg_count(command: &str, expected: &'static str, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgCount {
        command: command.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn unconsumed_arguments(command: &str, count: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnconsumedArguments {
        command: command.to_string(),
        count,
    })
}

#[cold]
pub fn invalid_argument(command: &str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgument {
        command: command.to_string(),
        message: message.into(),
    })
}

#[cold]
pub fn cannot_convert(value: &str, target: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Conversion {
        value: value.to_string(),
        target,
    })
}

#[cold]
pub fn type_mismatch(left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        left: left.to_string(),
        right: right.to_string(),
    })
}

// State errors

#[cold]
pub fn list_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ListNotFound {
        name: name.to_string(),
    })
}

#[cold]
pub fn list_index_out_of_range(name: &str, index: usize, size: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ListIndexOutOfRange {
        name: name.to_string(),
        index,
        size,
    })
}

#[cold]
pub fn loop_beyond_list(name: &str, bound: usize, size: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::LoopBeyondList {
        name: name.to_string(),
        bound,
        size,
    })
}

#[cold]
pub fn timer_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TimerNotFound {
        name: name.to_string(),
    })
}

#[cold]
pub fn namespace_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NamespaceNotFound {
        name: name.to_string(),
    })
}

#[cold]
pub fn namespace_exists(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NamespaceExists {
        name: name.to_string(),
    })
}

#[cold]
pub fn item_not_found(namespace: &str, item: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ItemNotFound {
        namespace: namespace.to_string(),
        item: item.to_string(),
    })
}

#[cold]
pub fn script_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ScriptNotFound {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests;
