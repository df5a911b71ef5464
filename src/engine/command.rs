use serde::Serialize;
use tracing::debug;

use crate::{
    ast::SourceRange,
    engine::id::CommandId,
    interpreter::value::geometry::{Point2d, Position},
};

/// A single segment appended to an open path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PathSegment {
    /// A straight line.
    Line {
        /// End point of the line.
        end:      Point2d,
        /// Whether `end` is relative to the current pen position.
        relative: bool,
    },
}

/// The payload of a modeling command.
///
/// Serializes with a `type` tag, for example
/// `{"type": "extrude", "target": "...", "distance": 5.0, "cap": true}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelingCmd {
    /// Opens a new, empty path.
    StartPath,
    /// Moves the pen of `path` without drawing.
    MovePathPen {
        /// The path being drawn.
        path: CommandId,
        /// Where the pen goes.
        to:   Position,
    },
    /// Appends a segment to `path`.
    ExtendPath {
        /// The path being drawn.
        path:    CommandId,
        /// The new segment.
        segment: PathSegment,
    },
    /// Closes `path_id` back to its start point.
    ClosePath {
        /// The path being closed.
        path_id: CommandId,
    },
    /// Extrudes a closed path into a solid.
    Extrude {
        /// The sketch to extrude.
        target:   CommandId,
        /// Extrusion length.
        distance: f64,
        /// Whether the ends are capped.
        cap:      bool,
    },
}

/// A command submitted to the engine: its deterministic id, the source range
/// that produced it, and the operation itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelingCommand {
    /// Deterministic id of the command and of the object it creates.
    pub id:    CommandId,
    /// The call that produced the command.
    pub range: SourceRange,
    /// The operation.
    pub cmd:   ModelingCmd,
}

/// The seam between the interpreter and an external geometry engine.
///
/// Submission is fire-and-forget: the engine acknowledges or fails out of
/// band. Ids are computed before submission, so nothing needs to come back.
pub trait EngineCommandManager {
    /// Submits one command.
    fn send_modeling_command(&mut self, command: ModelingCommand);
}

/// An engine stand-in that records every submitted command in order.
///
/// ## Example
/// ```
/// use partscript::{
///     ast::SourceRange,
///     engine::{CommandLog, EngineCommandManager, ModelingCmd, ModelingCommand, command_id},
/// };
///
/// let mut log = CommandLog::default();
/// let range = SourceRange::new(0, 4);
/// log.send_modeling_command(ModelingCommand { id: command_id("code", range, &[]),
///                                             range,
///                                             cmd: ModelingCmd::StartPath });
///
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CommandLog {
    commands: Vec<ModelingCommand>,
}

impl CommandLog {
    /// Recorded commands in submission order.
    #[must_use]
    pub fn commands(&self) -> &[ModelingCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing was submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Consumes the log and returns its commands.
    #[must_use]
    pub fn into_commands(self) -> Vec<ModelingCommand> {
        self.commands
    }
}

impl EngineCommandManager for CommandLog {
    fn send_modeling_command(&mut self, command: ModelingCommand) {
        debug!(id = %command.id, range = %command.range, cmd = ?command.cmd, "engine command");
        self.commands.push(command);
    }
}
