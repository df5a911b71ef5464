//! # partscript
//!
//! partscript is a small declarative language for parametric 3D modeling.
//! Scripts are tokenized, parsed into a tree whose every node knows the exact
//! text it came from, and executed by a tree-walking evaluator that sends
//! modeling commands with deterministic ids to a geometry engine.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::{
    ast::Program,
    engine::{CommandLog, EngineCommandManager, ModelingCommand},
    error::Error,
    interpreter::{
        evaluator::core::{ExecOutcome, execute},
        lexer::tokenize,
        memory::ProgramMemory,
        parser::core::parse_program,
        settings::ExecutorSettings,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Program`, `Statement` and `Expr` types that
/// represent the syntactic structure of source code as a tree. The AST is
/// built by the parser and traversed by the evaluator and by editor tooling.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches the source range of every node and locates nodes by path.
/// - Offers the read-only and rewriting queries editors need.
pub mod ast;
/// Helpers for editor tooling built on top of the core data structures.
///
/// None of these helpers run as part of a normal pass; they read a program
/// and a memory snapshot, or run their own isolated pass.
pub mod editor;
/// The boundary to the geometry engine.
///
/// Declares the modeling commands, the trait the engine implements to receive
/// them, and the deterministic identity every command carries.
pub mod engine;
/// Provides unified error types for lexing, parsing and execution.
///
/// This module defines all errors that can be raised while turning source
/// text into engine commands. Every error carries the source range it is
/// about.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches byte ranges and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, Program Memory and
/// value representations to provide a complete runtime for scripts.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities.
///
/// Helpers that are not specific to a single phase, such as converting byte
/// offsets into line and column numbers for diagnostics.
pub mod util;

/// Parses `source` into a [`Program`].
///
/// # Errors
/// Returns a lexing or parsing error carrying the range of the offending
/// text.
///
/// # Examples
/// ```
/// use partscript::parse;
///
/// let program = parse("const a = 3\nshow(a)").unwrap();
/// assert_eq!(program.body.len(), 2);
///
/// assert!(parse("const = 3").is_err());
/// ```
pub fn parse(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source)?;
    debug!(tokens = tokens.len(), "tokenized source");
    Ok(parse_program(&tokens, source.len())?)
}

/// Parses and executes `source` against a fresh Program Memory.
///
/// Every modeling command is sent to `engine` as soon as the call that
/// issues it runs.
///
/// # Errors
/// Returns the first lexing, parsing or runtime error. Nothing after a
/// runtime error executes.
///
/// # Examples
/// ```
/// use partscript::{engine::CommandLog, interpreter::value::core::Value, run};
///
/// let mut engine = CommandLog::default();
/// let outcome = run("const a = 3\nconst b = a + 4\nshow(b)", &mut engine, Default::default()).unwrap();
///
/// assert_eq!(outcome.shown, vec![Value::Number(7.0)]);
/// assert!(engine.is_empty());
///
/// // 'x' is not defined
/// assert!(run("const y = x + 1", &mut engine, Default::default()).is_err());
/// ```
pub fn run(source: &str,
           engine: &mut dyn EngineCommandManager,
           settings: ExecutorSettings)
           -> Result<ExecOutcome, Error> {
    let program = parse(source)?;
    Ok(execute(&program, source, ProgramMemory::new(), engine, settings)?)
}

/// A pass together with every command it submitted.
#[derive(Debug, Clone)]
pub struct RecordedRun {
    /// The result of the pass.
    pub outcome:  ExecOutcome,
    /// Submitted commands in submission order.
    pub commands: Vec<ModelingCommand>,
}

/// Like [`run`], but records the commands in a [`CommandLog`] instead of
/// sending them to an engine.
///
/// # Examples
/// ```
/// use partscript::run_recorded;
///
/// let code = "const s = close(lineTo(0, 1, lineTo(1, 0, startSketchAt(0, 0))))\nextrude(5, s)";
/// let first = run_recorded(code, Default::default()).unwrap();
/// let second = run_recorded(code, Default::default()).unwrap();
///
/// assert_eq!(first.commands.len(), 6);
/// assert_eq!(first.commands, second.commands);
/// ```
pub fn run_recorded(source: &str, settings: ExecutorSettings) -> Result<RecordedRun, Error> {
    let mut log = CommandLog::default();
    let outcome = run(source, &mut log, settings)?;
    Ok(RecordedRun { outcome,
                     commands: log.into_commands() })
}
