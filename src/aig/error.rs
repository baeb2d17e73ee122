use thiserror::Error;

use super::{Lit, Var};

/// The result of an AIG operation.
pub type Result<T> = std::result::Result<T, AigError>;

/// Error returned when an AIG operation failed.
#[derive(Debug, Error)]
pub enum AigError {
    /// Two nodes define the same variable.
    #[error("variable {0} is defined more than once")]
    DuplicateVariable(Var),

    /// Variable 0 is reserved for the constants, no node may define it.
    #[error("variable 0 is reserved for the constants")]
    VarZeroReserved,

    /// A fanin or an output refers to a variable no node defines.
    #[error("literal {0} refers to an undefined variable")]
    UndefinedLiteral(Lit),

    /// The combinational logic loops through the given variable.
    #[error("found a cycle through variable {0}")]
    CycleDetected(Var),

    /// Simulation needed the value of a literal that was never computed.
    /// This should not happen for a well-formed, acyclic AIG.
    #[error("literal {0} has no computed value")]
    UnresolvedLiteral(Lit),

    /// The assignment given to the simulator does not cover the inputs.
    #[error("expected {expected} input values, got {got}")]
    InputCountMismatch { expected: usize, got: usize },

    /// Exhaustive simulation cannot even count the assignments of this many inputs.
    #[error("cannot enumerate the 2^{0} assignments of {0} inputs")]
    TooManyInputs(usize),

    /// Just forwarding a [`ParserError`].
    #[error("{0}")]
    ParserError(#[from] ParserError),

    /// Reading or writing failed, forwarded unchanged.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned when parsing a circuit failed.
///
/// It is defined here because the `parser` module is private.
#[derive(Debug, Error)]
pub enum ParserError {
    /// All features are not supported (only the basics in fact).
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// Invalid token, something else was expected.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// The input stopped before the announced content.
    #[error("unexpected end of file, expected {0}")]
    UnexpectedEof(String),

    /// A BLIF signal is used but never driven.
    #[error("signal {0} is never driven")]
    UndefinedSignal(String),

    /// A BLIF signal is driven by more than one `.names` block or is also an input.
    #[error("signal {0} is driven more than once")]
    MultipleDrivers(String),

    /// A BLIF signal only goes through buffers and inverters back to itself.
    #[error("signal {0} loops through buffers only")]
    BufferLoop(String),
}
