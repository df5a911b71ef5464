/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST in source order, evaluates expressions and
/// statements, binds declarations into Program Memory and calls into the
/// standard library. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes left to right, with no reordering.
/// - Threads source metadata through every value it produces.
/// - Reports runtime errors carrying the range of the failing node.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a sequence of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, operators, delimiters, and keywords. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with byte ranges.
/// - Skips whitespace and comments without shifting later offsets.
/// - Reports lexical errors for invalid characters and unterminated strings.
pub mod lexer;
/// Program Memory.
///
/// Scoped bindings from names to values with their metadata. Scopes live in
/// an arena and refer to their parent by index.
pub mod memory;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token sequence produced by the lexer and
/// constructs an AST that represents the syntactic structure of expressions
/// and statements.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Gives every node the exact byte range of the tokens it was built from.
/// - Validates grammar, reporting errors with the offending token's range.
pub mod parser;
/// Execution limits.
///
/// Step and call depth budgets for one pass.
pub mod settings;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during execution: numbers,
/// strings, booleans, geometry, functions and opaque host values, plus the
/// metadata that links each value back to its source.
pub mod value;
