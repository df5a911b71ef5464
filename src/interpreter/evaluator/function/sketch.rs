use std::rc::Rc;

use crate::{
    engine::{
        command::{ModelingCmd, PathSegment},
        id::SemanticInput,
    },
    interpreter::{
        evaluator::{core::EvalResult, function::core::CallContext},
        value::{
            core::{MemoryItem, Value},
            geometry::{IDENTITY_ROTATION, Path, SketchGroup},
        },
    },
};

/// `startSketchAt(x, y)`: opens a new path with its pen at `(x, y)`.
///
/// Submits `start_path` followed by `move_path_pen`. The returned sketch has
/// no segments yet; its id is the id of the `start_path` command.
pub fn start_sketch_at(call: &mut CallContext<'_>, args: &[MemoryItem]) -> EvalResult<Value> {
    let x = args[0].value.as_number(call.argument_range(0))?;
    let y = args[1].value.as_number(call.argument_range(1))?;

    let id = call.command_id(&[SemanticInput::Kind("start_path"),
                               SemanticInput::Number(x),
                               SemanticInput::Number(y)]);
    call.submit(id, ModelingCmd::StartPath);

    let pen = call.command_id(&[SemanticInput::Kind("move_path_pen"),
                                SemanticInput::Id(id),
                                SemanticInput::Number(x),
                                SemanticInput::Number(y)]);
    call.submit(pen,
                ModelingCmd::MovePathPen { path: id,
                                           to:   [x, y, 0.0], });

    Ok(Value::SketchGroup(Rc::new(SketchGroup { id,
                                                value: Vec::new(),
                                                start: [x, y],
                                                position: [0.0, 0.0, 0.0],
                                                rotation: IDENTITY_ROTATION,
                                                meta: call.lineage(args) })))
}

/// `lineTo(x, y, sketch[, name])`: draws a line to an absolute point.
pub fn line_to(call: &mut CallContext<'_>, args: &[MemoryItem]) -> EvalResult<Value> {
    extend(call, args, false)
}

/// `line(dx, dy, sketch[, name])`: draws a line relative to the pen.
pub fn line(call: &mut CallContext<'_>, args: &[MemoryItem]) -> EvalResult<Value> {
    extend(call, args, true)
}

fn extend(call: &mut CallContext<'_>, args: &[MemoryItem], relative: bool) -> EvalResult<Value> {
    let x = args[0].value.as_number(call.argument_range(0))?;
    let y = args[1].value.as_number(call.argument_range(1))?;
    let sketch = args[2].value.as_sketch(call.argument_range(2))?;
    let name = segment_name(call, args, 3)?;

    let from = sketch.current_point();
    let to = if relative {
        [from[0] + x, from[1] + y]
    } else {
        [x, y]
    };

    let id = call.command_id(&[SemanticInput::Kind(if relative { "line" } else { "line_to" }),
                               SemanticInput::Number(x),
                               SemanticInput::Number(y),
                               SemanticInput::Sketch(&sketch),
                               name.as_deref().map_or(SemanticInput::Absent, SemanticInput::Text)]);
    call.submit(id,
                ModelingCmd::ExtendPath { path:    sketch.id,
                                          segment: PathSegment::Line { end: [x, y],
                                                                       relative }, });

    let path = Path { id,
                      name,
                      from,
                      to,
                      meta: call.meta() };
    Ok(Value::SketchGroup(Rc::new(sketch.with_path(path, call.lineage(args)))))
}

/// `close(sketch[, name])`: draws the closing segment back to the start
/// point and closes the path.
///
/// # Errors
/// `InvalidArgument` if the sketch has no segments yet.
pub fn close(call: &mut CallContext<'_>, args: &[MemoryItem]) -> EvalResult<Value> {
    let sketch = args[0].value.as_sketch(call.argument_range(0))?;
    let name = segment_name(call, args, 1)?;

    if sketch.value.is_empty() {
        return Err(call.invalid_argument("cannot close a sketch without segments".to_string()));
    }

    let id = call.command_id(&[SemanticInput::Kind("close_path"),
                               SemanticInput::Sketch(&sketch),
                               name.as_deref().map_or(SemanticInput::Absent, SemanticInput::Text)]);
    call.submit(id, ModelingCmd::ClosePath { path_id: sketch.id });

    let path = Path { id,
                      name,
                      from: sketch.current_point(),
                      to: sketch.start,
                      meta: call.meta() };
    Ok(Value::SketchGroup(Rc::new(sketch.with_path(path, call.lineage(args)))))
}

/// Reads the optional segment name argument at `index`.
fn segment_name(call: &CallContext<'_>, args: &[MemoryItem], index: usize) -> EvalResult<Option<String>> {
    args.get(index)
        .map(|arg| arg.value.as_str(call.argument_range(index)).map(str::to_string))
        .transpose()
}
