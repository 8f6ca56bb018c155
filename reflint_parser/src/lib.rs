//! # Reflint Parser
//!
//! Lexer, parser and arena syntax tree for the JavaScript subset that
//! reflint analyzes: declarations (with destructuring), functions and
//! arrows, calls, member access, literals and basic control flow.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{BinaryOp, DeclKind, NodeId, NodeKind, SyntaxTree, UnaryOp};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, Parser};
pub use token::{Token, TokenKind};
