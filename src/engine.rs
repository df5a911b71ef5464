/// The modeling command contract.
///
/// Defines the payloads standard library functions submit, the
/// [`EngineCommandManager`](command::EngineCommandManager) seam to the external
/// geometry engine, and [`CommandLog`](command::CommandLog), an in-process
/// recorder used by the command line tool and the tests.
pub mod command;
/// Deterministic command identity.
///
/// Hashes the source text, the source range and every geometry affecting input
/// of a call into a stable identifier, so that re-running unchanged code
/// yields the same engine object ids.
pub mod id;

pub use command::{CommandLog, EngineCommandManager, ModelingCmd, ModelingCommand, PathSegment};
pub use id::{CommandId, SemanticInput, command_id};
