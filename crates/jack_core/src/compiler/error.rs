//! Error types surfaced by the compilation engine. Every syntax error
//! carries the source line it happened on so the driver can render it with
//! [`colored`] the way the teacher's parser does.

use std::error::Error;
use std::fmt::Display;
use std::io;

use colored::Colorize;

use crate::lexer::LexError;

/// A grammar mismatch: the engine expected one shape of token and the
/// cursor held another. Unlike the reference this is grounded on, which
/// reports and keeps parsing, this implementation aborts compilation on
/// the first mismatch — see the grounding ledger for the rationale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: usize,
    pub line_text: String,
    pub expected: String,
    pub found: String,
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} at line {}", "syntax error".red().bold(), self.line)?;
        writeln!(f, "  {}", self.line_text)?;
        write!(f, "  expected {}, found {}", self.expected, self.found.red())
    }
}

impl Error for SyntaxError {}

/// A grammatically valid construct that is nonetheless meaningless: an
/// identifier used without ever being declared. The grammar itself stays
/// untyped; this is the one semantic check the engine cannot skip, since
/// it needs a kind and index to emit a `push`/`pop` segment at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticError {
    pub line: usize,
    pub line_text: String,
    pub message: String,
}

impl Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} at line {}", "semantic error".red().bold(), self.line)?;
        writeln!(f, "  {}", self.line_text)?;
        write!(f, "  {}", self.message)
    }
}

impl Error for SemanticError {}

#[derive(Debug)]
pub enum CompileError {
    Lex(LexError),
    Syntax(SyntaxError),
    Semantic(SemanticError),
    Io(io::Error),
}

impl Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Lex(e) => Display::fmt(e, f),
            CompileError::Syntax(e) => Display::fmt(e, f),
            CompileError::Semantic(e) => Display::fmt(e, f),
            CompileError::Io(e) => Display::fmt(e, f),
        }
    }
}

impl Error for CompileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CompileError::Lex(e) => Some(e),
            CompileError::Syntax(e) => Some(e),
            CompileError::Semantic(e) => Some(e),
            CompileError::Io(e) => Some(e),
        }
    }
}

impl From<LexError> for CompileError {
    fn from(e: LexError) -> Self {
        CompileError::Lex(e)
    }
}

impl From<SyntaxError> for CompileError {
    fn from(e: SyntaxError) -> Self {
        CompileError::Syntax(e)
    }
}

impl From<SemanticError> for CompileError {
    fn from(e: SemanticError) -> Self {
        CompileError::Semantic(e)
    }
}

impl From<io::Error> for CompileError {
    fn from(e: io::Error) -> Self {
        CompileError::Io(e)
    }
}

pub type CompileResult<T> = Result<T, CompileError>;
