use std::rc::Rc;

use glam::DVec3;
use ufe_usd::stage::{SdfPath, Stage, Value};
use ufe_usd::{
    CommandError, RotationOrder, UndoStack, UsdRotateUndoableCommand, UsdSceneItem,
    UsdTranslateUndoableCommand,
};

const TRANSLATE: &str = "xformOp:translate";

fn path(s: &str) -> SdfPath {
    SdfPath::new(s).unwrap()
}

fn stage_with_cube() -> Rc<Stage> {
    let stage = Stage::new();
    stage.define_prim(&path("/World"), "Xform").unwrap();
    stage.define_prim(&path("/World/Cube"), "Cube").unwrap();
    stage
        .create_attribute(&path("/World/Cube"), TRANSLATE, Value::Double3(DVec3::ZERO))
        .unwrap();
    stage
}

fn translate(stage: &Rc<Stage>, x: f64) -> Box<UsdTranslateUndoableCommand> {
    let item = UsdSceneItem::create(stage, path("/World/Cube"));
    let mut command = UsdTranslateUndoableCommand::create(item, 0.0, 0.0, 0.0).unwrap();
    command.initialize().unwrap();
    command.perform(x, 0.0, 0.0).unwrap();
    Box::new(command)
}

fn translate_x(stage: &Stage) -> f64 {
    stage
        .get::<DVec3>(&path("/World/Cube"), TRANSLATE)
        .unwrap()
        .unwrap()
        .x
}

// cmd: cargo test
#[test]
fn it_undoes_and_redoes_in_order() {
    let stage = stage_with_cube();
    let mut undo_stack = UndoStack::new();
    undo_stack.push(translate(&stage, 1.0)).unwrap();
    undo_stack.push(translate(&stage, 2.0)).unwrap();
    assert_eq!(undo_stack.get_history_size(), 2);
    assert_eq!(undo_stack.undo_label().as_deref(), Some("Translate </World/Cube>"));

    assert_eq!(undo_stack.undo(), Ok(true));
    assert_eq!(translate_x(&stage), 1.0);
    assert_eq!(undo_stack.undo(), Ok(true));
    assert_eq!(translate_x(&stage), 0.0);
    assert_eq!(undo_stack.undo(), Ok(false));
    assert!(!undo_stack.can_undo());

    assert_eq!(undo_stack.redo(), Ok(true));
    assert_eq!(undo_stack.redo(), Ok(true));
    assert_eq!(translate_x(&stage), 2.0);
    assert_eq!(undo_stack.redo(), Ok(false));
    assert!(!undo_stack.can_redo());
}

#[test]
fn it_drops_the_redo_tail_on_push() {
    let stage = stage_with_cube();
    let mut undo_stack = UndoStack::new();
    undo_stack.push(translate(&stage, 1.0)).unwrap();
    undo_stack.push(translate(&stage, 2.0)).unwrap();
    undo_stack.undo().unwrap();

    undo_stack.push(translate(&stage, 3.0)).unwrap();
    assert_eq!(undo_stack.get_history_size(), 2);
    assert!(!undo_stack.can_redo());

    let last: &UsdTranslateUndoableCommand = undo_stack.get_command(1).unwrap();
    assert_eq!(last.new_value(), DVec3::new(3.0, 0.0, 0.0));
}

#[test]
fn it_refuses_blocked_commands() {
    let stage = stage_with_cube();
    stage
        .create_attribute(&path("/World/Cube"), "xformOp:rotateY", Value::Float(10.0))
        .unwrap();
    let item = UsdSceneItem::create(&stage, path("/World/Cube"));
    let mut rotate =
        UsdRotateUndoableCommand::create(item, RotationOrder::XYZ, 0.0, 0.0, 0.0).unwrap();
    rotate.initialize().unwrap();

    let mut undo_stack = UndoStack::new();
    assert_eq!(
        undo_stack.push(Box::new(rotate)),
        Err(CommandError::InitializationBlocked {
            path: path("/World/Cube"),
            attribute: "xformOp:rotateXYZ".to_owned(),
        })
    );
    assert_eq!(undo_stack.get_history_size(), 0);
}

#[test]
fn it_keeps_the_cursor_when_a_command_fails() {
    let stage = stage_with_cube();
    let mut undo_stack = UndoStack::new();
    undo_stack.push(translate(&stage, 1.0)).unwrap();

    stage.remove_attribute(&path("/World/Cube"), TRANSLATE).unwrap();
    assert!(matches!(
        undo_stack.undo(),
        Err(CommandError::StaleTarget { .. })
    ));
    assert!(undo_stack.can_undo());
    assert!(!undo_stack.can_redo());
}

#[test]
fn it_replays_commands_that_share_a_created_attribute() {
    let stage = stage_with_cube();
    stage.remove_attribute(&path("/World/Cube"), TRANSLATE).unwrap();
    let mut undo_stack = UndoStack::new();
    undo_stack.push(translate(&stage, 5.0)).unwrap();
    undo_stack.push(translate(&stage, 7.0)).unwrap();

    assert_eq!(undo_stack.undo(), Ok(true));
    assert_eq!(translate_x(&stage), 5.0);
    assert_eq!(undo_stack.undo(), Ok(true));
    assert!(!stage.has_attribute(&path("/World/Cube"), TRANSLATE).unwrap());

    assert_eq!(undo_stack.redo(), Ok(true));
    assert_eq!(translate_x(&stage), 5.0);
    assert_eq!(undo_stack.redo(), Ok(true));
    assert_eq!(translate_x(&stage), 7.0);
    assert!(!undo_stack.can_redo());

    let edit: &UsdTranslateUndoableCommand = undo_stack.get_command(1).unwrap();
    assert!(!edit.is_invalidated());
}

#[test]
fn it_downcasts_recorded_commands() {
    let stage = stage_with_cube();
    let mut undo_stack = UndoStack::new();
    undo_stack.push(translate(&stage, 1.0)).unwrap();

    assert!(undo_stack.get_command::<UsdRotateUndoableCommand>(0).is_none());
    let command: &mut UsdTranslateUndoableCommand = undo_stack.get_command_mut(0).unwrap();
    command.perform(5.0, 0.0, 0.0).unwrap();
    assert_eq!(translate_x(&stage), 5.0);

    undo_stack.clear();
    assert_eq!(undo_stack.get_history_size(), 0);
    assert_eq!(translate_x(&stage), 5.0);
}

// End of File
