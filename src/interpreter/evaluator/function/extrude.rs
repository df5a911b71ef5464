use std::rc::Rc;

use serde_json::json;

use crate::{
    engine::{command::ModelingCmd, id::SemanticInput},
    interpreter::{
        evaluator::{core::EvalResult, function::core::CallContext},
        value::{
            core::{MemoryItem, Value},
            geometry::{ExtrudeGroup, ExtrudeSurface, Point2d, clockwise_sign, wall_transform},
        },
    },
};

/// `extrude(length, sketch)`: sweeps a sketch into a capped solid.
///
/// The command id hashes the length and the complete sketch, so changing any
/// segment of the profile changes the id. One wall is derived per segment.
/// The lineage starts with the call, followed by the sketch's own chain.
///
/// # Errors
/// - `TypeMismatch` if the arguments are not a number and a sketch.
/// - `InvalidArgument` if the sketch has no segments.
pub fn extrude(call: &mut CallContext<'_>, args: &[MemoryItem]) -> EvalResult<Value> {
    let length = args[0].value.as_number(call.argument_range(0))?;
    let sketch = args[1].value.as_sketch(call.argument_range(1))?;

    if sketch.value.is_empty() {
        return Err(call.invalid_argument("cannot extrude a sketch without segments".to_string()));
    }

    let id = call.command_id(&[SemanticInput::Kind("extrude"),
                               SemanticInput::Number(length),
                               SemanticInput::Sketch(&sketch)]);
    call.submit(id,
                ModelingCmd::Extrude { target:   sketch.id,
                                       distance: length,
                                       cap:      true, });

    let points = sketch.value.iter().map(|path| path.to).collect::<Vec<Point2d>>();
    let winding = clockwise_sign(&points);
    let walls = sketch.value
                      .iter()
                      .map(|path| {
                          let (position, rotation) =
                              wall_transform(path, length, winding, sketch.position);
                          ExtrudeSurface { id: call.command_id(&[SemanticInput::Kind("extrude_wall"),
                                                                 SemanticInput::Id(id),
                                                                 SemanticInput::Id(path.id)]),
                                           name: path.name.clone(),
                                           position,
                                           rotation,
                                           meta: path.meta.clone() }
                      })
                      .collect();

    Ok(Value::ExtrudeGroup(Rc::new(ExtrudeGroup { id,
                                                  value: walls,
                                                  height: length,
                                                  position: sketch.position,
                                                  rotation: sketch.rotation,
                                                  meta: call.lineage(args) })))
}

/// `getExtrudeWallTransform(name, extrude)`: placement of the wall swept
/// from the segment called `name`.
///
/// Returns an opaque value `{ "position": [x, y, z], "quaternion": [x, y, z,
/// w] }`.
///
/// # Errors
/// `InvalidArgument` if no wall has that name.
pub fn get_extrude_wall_transform(call: &mut CallContext<'_>,
                                  args: &[MemoryItem])
                                  -> EvalResult<Value> {
    let name = args[0].value.as_str(call.argument_range(0))?;
    let extrude = args[1].value.as_extrude(call.argument_range(1))?;

    let surface = extrude.find_surface(name).ok_or_else(|| {
                                                call.invalid_argument(format!("could not find path with name '{name}'"))
                                            })?;

    Ok(Value::UserVal(json!({
        "position": surface.position,
        "quaternion": surface.rotation,
    })))
}
