use partscript::{
    ast::SourceRange,
    engine::{CommandId, CommandLog, ModelingCmd, PathSegment, SemanticInput, command_id},
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::core::execute,
        memory::ProgramMemory,
        settings::ExecutorSettings,
        value::core::{MemoryItem, Metadata, Value},
    },
    parse, run_recorded,
};
use serde_json::json;

const SQUARE: &str = "const s0 = startSketchAt(0, 0)\n\
                      const s1 = lineTo(4, 0, s0, \"bottom\")\n\
                      const s2 = lineTo(4, 4, s1, \"right\")\n\
                      const s3 = lineTo(0, 4, s2, \"top\")\n\
                      const mySketch = close(s3, \"left\")\n\
                      const part = extrude(5, mySketch)";

fn id(code: &str, inputs: &[SemanticInput<'_>]) -> CommandId {
    command_id(code, SourceRange::new(0, 4), inputs)
}

#[test]
fn command_ids_are_deterministic() {
    let inputs = [SemanticInput::Kind("extrude"), SemanticInput::Number(5.0)];
    assert_eq!(id("code", &inputs), id("code", &inputs));
}

#[test]
fn every_input_changes_the_id() {
    let base = id("code", &[SemanticInput::Number(1.0)]);

    assert_ne!(base, id("code!", &[SemanticInput::Number(1.0)]));
    assert_ne!(base,
               command_id("code", SourceRange::new(0, 3), &[SemanticInput::Number(1.0)]));
    assert_ne!(base, id("code", &[SemanticInput::Number(2.0)]));
    assert_ne!(base, id("code", &[SemanticInput::Text("1")]));
    assert_ne!(base, id("code", &[SemanticInput::Number(1.0), SemanticInput::Absent]));
    assert_ne!(id("code", &[SemanticInput::Text("a")]), id("code", &[SemanticInput::Kind("a")]));
    assert_ne!(id("code", &[SemanticInput::Text("ab"), SemanticInput::Text("c")]),
               id("code", &[SemanticInput::Text("a"), SemanticInput::Text("bc")]));
}

#[test]
fn zero_signs_hash_the_same() {
    assert_eq!(id("code", &[SemanticInput::Number(0.0)]),
               id("code", &[SemanticInput::Number(-0.0)]));
}

#[test]
fn command_ids_are_uuid_v4_shaped() {
    let value = id("code", &[]);

    assert_eq!(value.get_version_num(), 4);
    assert_eq!(value.get_variant(), uuid::Variant::RFC4122);

    let text = value.to_string();
    assert_eq!(text.len(), 36);
    assert_eq!(text.matches('-').count(), 4);
    assert_eq!(serde_json::to_value(value).unwrap(), json!(text));
}

#[test]
fn sketch_commands_are_submitted_in_order() {
    let run = run_recorded(SQUARE, Default::default()).unwrap();
    let kinds = run.commands
                   .iter()
                   .map(|command| match command.cmd {
                       ModelingCmd::StartPath => "start_path",
                       ModelingCmd::MovePathPen { .. } => "move_path_pen",
                       ModelingCmd::ExtendPath { .. } => "extend_path",
                       ModelingCmd::ClosePath { .. } => "close_path",
                       ModelingCmd::Extrude { .. } => "extrude",
                   })
                   .collect::<Vec<_>>();

    assert_eq!(kinds,
               ["start_path",
                "move_path_pen",
                "extend_path",
                "extend_path",
                "extend_path",
                "close_path",
                "extrude"]);

    let path = run.commands[0].id;
    assert_eq!(run.commands[1].cmd,
               ModelingCmd::MovePathPen { path,
                                          to: [0.0, 0.0, 0.0] });
    assert_eq!(run.commands[2].cmd,
               ModelingCmd::ExtendPath { path,
                                         segment: PathSegment::Line { end:      [4.0, 0.0],
                                                                      relative: false, } });
    assert_eq!(run.commands[5].cmd, ModelingCmd::ClosePath { path_id: path });
}

#[test]
fn every_command_has_its_own_id() {
    let run = run_recorded(SQUARE, Default::default()).unwrap();
    let mut ids = run.commands.iter().map(|command| command.id).collect::<Vec<_>>();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), run.commands.len());
}

#[test]
fn scenario_extrude_of_a_bound_sketch() {
    let run = run_recorded(SQUARE, Default::default()).unwrap();
    let memory = &run.outcome.memory;
    let root = memory.root();

    let sketch_item = memory.get(root, "mySketch").unwrap();
    let Value::SketchGroup(sketch) = &sketch_item.value else {
        panic!("mySketch is not a sketch");
    };
    let Value::ExtrudeGroup(part) = &memory.get(root, "part").unwrap().value else {
        panic!("part is not an extrusion");
    };

    let extrudes = run.commands
                      .iter()
                      .filter(|command| matches!(command.cmd, ModelingCmd::Extrude { .. }))
                      .collect::<Vec<_>>();
    assert_eq!(extrudes.len(), 1);
    assert_eq!(extrudes[0].cmd,
               ModelingCmd::Extrude { target:   sketch.id,
                                      distance: 5.0,
                                      cap:      true, });
    assert_eq!(extrudes[0].id, part.id);

    let call_start = SQUARE.find("extrude(5").unwrap();
    assert_eq!(part.meta[0].source_range.slice(SQUARE), "extrude(5, mySketch)");
    assert_eq!(part.meta[0].source_range.start(), call_start);
    for entry in &sketch.meta {
        assert!(part.meta.contains(entry), "missing {entry:?}");
    }
    assert_eq!(sketch_item.meta, sketch.meta);
}

#[test]
fn sketch_operations_do_not_mutate_their_input() {
    let run = run_recorded(SQUARE, Default::default()).unwrap();
    let memory = &run.outcome.memory;
    let root = memory.root();

    let segments = |name: &str| match &memory.get(root, name).unwrap().value {
        Value::SketchGroup(sketch) => sketch.value.len(),
        other => panic!("{name} is a {}", other.type_name()),
    };
    assert_eq!(segments("s0"), 0);
    assert_eq!(segments("s1"), 1);
    assert_eq!(segments("s3"), 3);
    assert_eq!(segments("mySketch"), 4);
}

#[test]
fn extrusion_walls_face_outward() {
    let code = format!("{SQUARE}\nshow(getExtrudeWallTransform(\"bottom\", part))");
    let run = run_recorded(&code, Default::default()).unwrap();
    let Value::UserVal(transform) = &run.outcome.shown[0] else {
        panic!("expected an opaque transform");
    };

    assert_eq!(transform["position"], json!([2.0, 0.0, 2.5]));
    let quaternion = transform["quaternion"].as_array().unwrap();
    let z = quaternion[2].as_f64().unwrap();
    let w = quaternion[3].as_f64().unwrap();
    assert!((z + std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    assert!((w - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
}

#[test]
fn unknown_wall_is_an_error() {
    let code = format!("{SQUARE}\ngetExtrudeWallTransform(\"front\", part)");
    let err = run_recorded(&code, Default::default()).unwrap_err();

    assert!(matches!(err, Error::Runtime(RuntimeError::InvalidArgument { .. })));
    assert!(err.to_string().contains("front"));
}

#[test]
fn empty_sketches_cannot_be_extruded() {
    let err = run_recorded("extrude(5, startSketchAt(0, 0))", Default::default()).unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::InvalidArgument { .. })));
}

#[test]
fn type_errors_point_at_the_offending_argument() {
    let code = "const s = startSketchAt(0, 0)\nconst part = extrude(\"tall\", s)";
    let err = run_recorded(code, Default::default()).unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::TypeMismatch { .. })));
    assert_eq!(err.source_range().slice(code), "\"tall\"");

    let code = "const s = lineTo(1, 1, 5, \"side\")";
    let err = run_recorded(code, Default::default()).unwrap_err();
    assert_eq!(err.source_range().slice(code), "5");

    let code = "const s = lineTo(1, 1, startSketchAt(0, 0), 7)";
    let err = run_recorded(code, Default::default()).unwrap_err();
    assert_eq!(err.source_range().slice(code), "7");

    let err = run_recorded("max(1, \"two\")", Default::default()).unwrap_err();
    assert_eq!(err.source_range(), SourceRange::new(7, 12));
}

#[test]
fn relative_lines_advance_from_the_pen() {
    let run = run_recorded("const s = line(2, 3, line(1, 1, startSketchAt(1, 0)))",
                           Default::default()).unwrap();
    let Value::SketchGroup(sketch) = &run.outcome.memory.get(run.outcome.memory.root(), "s").unwrap().value else {
        panic!("s is not a sketch");
    };

    assert_eq!(sketch.value[0].to, [2.0, 1.0]);
    assert_eq!(sketch.value[1].from, [2.0, 1.0]);
    assert_eq!(sketch.value[1].to, [4.0, 4.0]);
}

/// Runs `code` with `w` seeded into the root scope and returns the id of the
/// extrude command.
fn extrude_id_with_width(code: &str, width: f64) -> CommandId {
    let program = parse(code).unwrap();
    let memory = ProgramMemory::with_bindings([("w".to_string(),
                                                MemoryItem::new(Value::Number(width), Metadata::default()))]);
    let mut log = CommandLog::default();
    execute(&program, code, memory, &mut log, ExecutorSettings::default()).unwrap();

    log.commands()
       .iter()
       .find(|command| matches!(command.cmd, ModelingCmd::Extrude { .. }))
       .map(|command| command.id)
       .unwrap()
}

#[test]
fn upstream_geometry_changes_the_extrude_id() {
    let code = "const s = close(lineTo(0, 1, lineTo(w, 0, startSketchAt(0, 0))))\nextrude(5, s)";

    assert_eq!(extrude_id_with_width(code, 2.0), extrude_id_with_width(code, 2.0));
    assert_ne!(extrude_id_with_width(code, 2.0), extrude_id_with_width(code, 3.0));
}

#[test]
fn command_log_serializes_tagged_commands() {
    let run = run_recorded("const s = close(lineTo(0, 1, lineTo(1, 0, startSketchAt(0, 0))))\nextrude(5, s)",
                           Default::default()).unwrap();
    let json = serde_json::to_value(&run.commands).unwrap();
    let extrude = &json[5];

    assert_eq!(extrude["cmd"]["type"], "extrude");
    assert_eq!(extrude["cmd"]["distance"], 5.0);
    assert_eq!(extrude["cmd"]["cap"], true);
    assert_eq!(extrude["cmd"]["target"], json[0]["id"]);
}
