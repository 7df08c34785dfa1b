use std::rc::Rc;

use glam::{DVec3, Vec3};
use ufe_usd::stage::{SdfPath, Stage, Value, ValueType};
use ufe_usd::{
    CommandError, CommandState, Outcome, RotationOrder, Translate, TrsUndoableCommandBase,
    UndoableCommand, UsdRotateUndoableCommand, UsdScaleUndoableCommand, UsdSceneItem,
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
}

fn cube(stage: &Rc<Stage>) -> Rc<UsdSceneItem> {
    UsdSceneItem::create(stage, path("/World/Cube"))
}

fn translate_of(stage: &Stage, at: &str) -> Option<DVec3> {
    stage.get::<DVec3>(&path(at), TRANSLATE).unwrap()
}

fn stale(at: &str, attribute: &str) -> CommandError {
    CommandError::StaleTarget {
        path: path(at),
        attribute: attribute.to_owned(),
    }
}

// cmd: cargo test
#[test]
fn it_creates_and_removes_a_missing_attribute() {
    let stage = stage_with_cube();
    let mut command = UsdTranslateUndoableCommand::create(cube(&stage), 0.0, 0.0, 0.0).unwrap();

    assert_eq!(command.initialize(), Ok(Outcome::Applied));
    assert!(command.attribute_created());
    assert_eq!(translate_of(&stage, "/World/Cube"), Some(DVec3::ZERO));

    assert_eq!(command.perform(5.0, 0.0, 0.0), Ok(Outcome::Applied));
    assert_eq!(translate_of(&stage, "/World/Cube"), Some(DVec3::new(5.0, 0.0, 0.0)));

    assert_eq!(command.undo(), Ok(Outcome::Applied));
    assert!(!stage.has_attribute(&path("/World/Cube"), TRANSLATE).unwrap());
    assert_eq!(command.state(), CommandState::Undone);

    assert_eq!(command.redo(), Ok(Outcome::Applied));
    assert_eq!(translate_of(&stage, "/World/Cube"), Some(DVec3::new(5.0, 0.0, 0.0)));
    assert!(!command.is_invalidated());
}

#[test]
fn it_restores_the_previous_value_exactly() {
    let stage = stage_with_cube();
    let original = DVec3::new(0.1, 0.2, 1.0 / 3.0);
    stage
        .create_attribute(&path("/World/Cube"), TRANSLATE, Value::Double3(original))
        .unwrap();

    let mut command = UsdTranslateUndoableCommand::create(cube(&stage), 0.0, 0.0, 0.0).unwrap();
    command.initialize().unwrap();
    assert!(!command.attribute_created());
    assert_eq!(command.previous_value(), original);

    command.perform(7.0, 8.0, 9.0).unwrap();
    command.undo().unwrap();
    assert_eq!(translate_of(&stage, "/World/Cube"), Some(original));
}

fn assert_undo_redo_cycles(stage: &Rc<Stage>, before: Option<DVec3>) {
    let mut command = UsdTranslateUndoableCommand::create(cube(stage), 0.0, 0.0, 0.0).unwrap();
    command.initialize().unwrap();
    let performed = DVec3::new(0.1, -2.5, 1.0 / 7.0);
    command.perform(performed.x, performed.y, performed.z).unwrap();

    for _ in 0..3 {
        command.undo().unwrap();
        assert_eq!(translate_of(stage, "/World/Cube"), before);
        command.redo().unwrap();
        assert_eq!(translate_of(stage, "/World/Cube"), Some(performed));
    }
}

#[test]
fn it_redoes_idempotently_on_an_existing_attribute() {
    let stage = stage_with_cube();
    let original = DVec3::new(1.0 / 3.0, 2.0, -0.3);
    stage
        .create_attribute(&path("/World/Cube"), TRANSLATE, Value::Double3(original))
        .unwrap();
    assert_undo_redo_cycles(&stage, Some(original));
}

#[test]
fn it_redoes_idempotently_on_a_created_attribute() {
    let stage = stage_with_cube();
    assert_undo_redo_cycles(&stage, None);
}

#[test]
fn it_leaves_an_attribute_authored_while_undone_alone() {
    let stage = stage_with_cube();
    let mut command = UsdTranslateUndoableCommand::create(cube(&stage), 0.0, 0.0, 0.0).unwrap();
    command.initialize().unwrap();
    command.perform(5.0, 0.0, 0.0).unwrap();
    command.undo().unwrap();

    let authored = DVec3::splat(42.0);
    stage
        .create_attribute(&path("/World/Cube"), TRANSLATE, Value::Double3(authored))
        .unwrap();
    assert_eq!(command.redo(), Err(stale("/World/Cube", TRANSLATE)));
    assert_eq!(translate_of(&stage, "/World/Cube"), Some(authored));
    assert_eq!(command.state(), CommandState::Undone);

    // Nothing of ours to take back.
    assert!(matches!(command.undo(), Err(CommandError::InvalidSequencing(_))));
    assert_eq!(translate_of(&stage, "/World/Cube"), Some(authored));
}

#[test]
fn it_keeps_only_the_latest_perform() {
    let stage = stage_with_cube();
    stage
        .create_attribute(&path("/World/Cube"), TRANSLATE, Value::Double3(DVec3::X))
        .unwrap();
    let mut command = UsdTranslateUndoableCommand::create(cube(&stage), 0.0, 0.0, 0.0).unwrap();
    command.initialize().unwrap();

    command.perform(2.0, 0.0, 0.0).unwrap();
    command.perform(3.0, 0.0, 0.0).unwrap();
    assert_eq!(command.new_value(), DVec3::new(3.0, 0.0, 0.0));

    command.undo().unwrap();
    assert_eq!(translate_of(&stage, "/World/Cube"), Some(DVec3::X));
    command.redo().unwrap();
    assert_eq!(translate_of(&stage, "/World/Cube"), Some(DVec3::new(3.0, 0.0, 0.0)));
}

#[test]
fn it_refuses_to_edit_after_external_attribute_removal() {
    let stage = stage_with_cube();
    let mut command = UsdTranslateUndoableCommand::create(cube(&stage), 0.0, 0.0, 0.0).unwrap();
    command.initialize().unwrap();
    command.perform(4.0, 0.0, 0.0).unwrap();

    stage.remove_attribute(&path("/World/Cube"), TRANSLATE).unwrap();
    assert!(command.is_invalidated());

    assert_eq!(command.undo(), Err(stale("/World/Cube", TRANSLATE)));
    assert_eq!(command.redo(), Err(stale("/World/Cube", TRANSLATE)));
    assert_eq!(command.perform(6.0, 0.0, 0.0), Err(stale("/World/Cube", TRANSLATE)));
    assert!(!stage.has_attribute(&path("/World/Cube"), TRANSLATE).unwrap());

    // Recreating the attribute does not revive the command.
    let recreated = DVec3::new(-1.0, -1.0, -1.0);
    stage
        .create_attribute(&path("/World/Cube"), TRANSLATE, Value::Double3(recreated))
        .unwrap();
    assert_eq!(command.redo(), Err(stale("/World/Cube", TRANSLATE)));
    assert_eq!(translate_of(&stage, "/World/Cube"), Some(recreated));
}

#[test]
fn it_refuses_to_edit_after_prim_removal() {
    let stage = stage_with_cube();
    let mut command = UsdTranslateUndoableCommand::create(cube(&stage), 0.0, 0.0, 0.0).unwrap();
    command.initialize().unwrap();
    command.perform(1.0, 0.0, 0.0).unwrap();

    stage.remove_prim(&path("/World")).unwrap();
    assert!(command.is_invalidated());
    assert_eq!(command.undo(), Err(stale("/World/Cube", TRANSLATE)));
}

#[test]
fn it_refuses_to_edit_after_deactivation() {
    let stage = stage_with_cube();
    let mut command = UsdTranslateUndoableCommand::create(cube(&stage), 0.0, 0.0, 0.0).unwrap();
    command.initialize().unwrap();
    command.perform(1.0, 0.0, 0.0).unwrap();

    stage.set_active(&path("/World"), false).unwrap();
    stage.set_active(&path("/World"), true).unwrap();
    assert!(command.is_invalidated());
    assert_eq!(command.undo(), Err(stale("/World/Cube", TRANSLATE)));
    assert_eq!(translate_of(&stage, "/World/Cube"), Some(DVec3::X));
}

#[test]
fn it_ignores_changes_to_other_prims() {
    let stage = stage_with_cube();
    stage.define_prim(&path("/World/Sphere"), "Sphere").unwrap();
    stage
        .create_attribute(&path("/World/Sphere"), TRANSLATE, Value::Double3(DVec3::ZERO))
        .unwrap();
    let mut command = UsdTranslateUndoableCommand::create(cube(&stage), 0.0, 0.0, 0.0).unwrap();
    command.initialize().unwrap();
    command.perform(1.0, 0.0, 0.0).unwrap();

    stage.remove_attribute(&path("/World/Sphere"), TRANSLATE).unwrap();
    stage.remove_prim(&path("/World/Sphere")).unwrap();
    assert!(!command.is_invalidated());
    assert_eq!(command.undo(), Ok(Outcome::Applied));
}

#[test]
fn it_follows_renames() {
    let stage = stage_with_cube();
    let mut command = UsdTranslateUndoableCommand::create(cube(&stage), 0.0, 0.0, 0.0).unwrap();
    command.initialize().unwrap();
    command.perform(1.0, 2.0, 3.0).unwrap();

    stage.rename_prim(&path("/World/Cube"), "Box").unwrap();
    assert_eq!(command.item().path(), &path("/World/Box"));
    assert_eq!(command.label(), "Translate </World/Box>");

    command.perform(4.0, 5.0, 6.0).unwrap();
    assert_eq!(translate_of(&stage, "/World/Box"), Some(DVec3::new(4.0, 5.0, 6.0)));
    command.undo().unwrap();
    assert!(!stage.has_attribute(&path("/World/Box"), TRANSLATE).unwrap());
}

#[test]
fn it_follows_reparents_of_the_prim_and_its_ancestors() {
    let stage = stage_with_cube();
    stage.define_prim(&path("/Other"), "Xform").unwrap();
    stage
        .create_attribute(&path("/World/Cube"), TRANSLATE, Value::Double3(DVec3::ONE))
        .unwrap();
    let mut command = UsdTranslateUndoableCommand::create(cube(&stage), 0.0, 0.0, 0.0).unwrap();
    command.initialize().unwrap();
    command.perform(9.0, 9.0, 9.0).unwrap();

    stage.reparent_prim(&path("/World/Cube"), &path("/Other")).unwrap();
    assert_eq!(command.item().path(), &path("/Other/Cube"));

    stage.reparent_prim(&path("/Other"), &path("/World")).unwrap();
    assert_eq!(command.item().path(), &path("/World/Other/Cube"));

    command.undo().unwrap();
    assert_eq!(translate_of(&stage, "/World/Other/Cube"), Some(DVec3::ONE));
    command.redo().unwrap();
    assert_eq!(translate_of(&stage, "/World/Other/Cube"), Some(DVec3::splat(9.0)));
}

#[test]
fn it_creates_scale_at_one() {
    let stage = stage_with_cube();
    let mut command = UsdScaleUndoableCommand::create(cube(&stage), 1.0, 1.0, 1.0).unwrap();
    command.initialize().unwrap();
    assert_eq!(command.previous_value(), DVec3::ONE);

    command.perform(2.0, 2.0, 2.0).unwrap();
    assert_eq!(
        stage.get::<DVec3>(&path("/World/Cube"), "xformOp:scale").unwrap(),
        Some(DVec3::splat(2.0))
    );
    command.undo().unwrap();
    assert!(!stage.has_attribute(&path("/World/Cube"), "xformOp:scale").unwrap());
}

#[test]
fn it_rotates_in_single_precision() {
    let stage = stage_with_cube();
    let mut command =
        UsdRotateUndoableCommand::create(cube(&stage), RotationOrder::XYZ, 0.0, 0.0, 0.0).unwrap();
    command.initialize().unwrap();
    command.perform(0.0, 0.0, 90.0).unwrap();

    let attribute = stage
        .attribute(&path("/World/Cube"), "xformOp:rotateXYZ")
        .unwrap()
        .unwrap();
    assert_eq!(attribute.value_type(), ValueType::Float3);
    assert_eq!(attribute.get::<Vec3>(), Some(Vec3::new(0.0, 0.0, 90.0)));
}

#[test]
fn it_blocks_rotate_when_another_rotate_op_exists() {
    let stage = stage_with_cube();
    stage
        .create_attribute(&path("/World/Cube"), "xformOp:rotateX", Value::Float(30.0))
        .unwrap();
    let observers = stage.observer_count();

    let mut command =
        UsdRotateUndoableCommand::create(cube(&stage), RotationOrder::XYZ, 0.0, 0.0, 45.0).unwrap();
    assert_eq!(command.initialize(), Ok(Outcome::Blocked));
    assert_eq!(command.state(), CommandState::Blocked);
    assert!(command.is_blocked());
    assert_eq!(command.perform(0.0, 0.0, 45.0), Ok(Outcome::Blocked));
    assert_eq!(command.undo(), Ok(Outcome::Blocked));
    assert_eq!(command.redo(), Ok(Outcome::Blocked));

    assert!(!stage.has_attribute(&path("/World/Cube"), "xformOp:rotateXYZ").unwrap());
    assert_eq!(stage.observer_count(), observers);
}

#[test]
fn it_does_not_block_rotate_on_its_own_op() {
    let stage = stage_with_cube();
    stage
        .create_attribute(&path("/World/Cube"), "xformOp:rotateZXY", Value::Float3(Vec3::X))
        .unwrap();
    let mut command =
        UsdRotateUndoableCommand::create(cube(&stage), RotationOrder::ZXY, 0.0, 0.0, 0.0).unwrap();
    assert_eq!(command.initialize(), Ok(Outcome::Applied));
    assert_eq!(command.previous_value(), Vec3::X);
}

#[test]
fn it_finds_the_authored_rotation_order() {
    let stage = stage_with_cube();
    assert_eq!(RotationOrder::authored(&cube(&stage)), None);

    stage
        .create_attribute(&path("/World/Cube"), "xformOp:rotateYZX", Value::Float3(Vec3::ZERO))
        .unwrap();
    assert_eq!(RotationOrder::authored(&cube(&stage)), Some(RotationOrder::YZX));
}

#[test]
fn it_rejects_a_precision_mismatch() {
    let stage = stage_with_cube();
    stage
        .create_attribute(&path("/World/Cube"), TRANSLATE, Value::Float3(Vec3::ZERO))
        .unwrap();

    let mismatch = UsdTranslateUndoableCommand::create(cube(&stage), 1.0, 0.0, 0.0).err();
    assert_eq!(
        mismatch,
        Some(CommandError::PrecisionMismatch {
            path: path("/World/Cube"),
            attribute: TRANSLATE.to_owned(),
            expected: ValueType::Float3,
            found: ValueType::Double3,
        })
    );

    // The caller picks the matching precision instead.
    let mut command =
        TrsUndoableCommandBase::<Vec3, Translate>::create(cube(&stage), 0.0, 0.0, 0.0).unwrap();
    command.initialize().unwrap();
    command.perform(1.0, 0.0, 0.0).unwrap();
    assert_eq!(
        stage.get::<Vec3>(&path("/World/Cube"), TRANSLATE).unwrap(),
        Some(Vec3::X)
    );
}

#[test]
fn it_enforces_sequencing() {
    let stage = stage_with_cube();
    let mut command = UsdTranslateUndoableCommand::create(cube(&stage), 0.0, 0.0, 0.0).unwrap();

    assert!(matches!(
        command.perform(1.0, 0.0, 0.0),
        Err(CommandError::InvalidSequencing(_))
    ));
    command.initialize().unwrap();
    assert!(matches!(
        command.initialize(),
        Err(CommandError::InvalidSequencing(_))
    ));
    assert!(matches!(command.undo(), Err(CommandError::InvalidSequencing(_))));
    assert!(matches!(command.redo(), Err(CommandError::InvalidSequencing(_))));

    command.perform(1.0, 0.0, 0.0).unwrap();
    assert!(matches!(command.redo(), Err(CommandError::InvalidSequencing(_))));
    command.undo().unwrap();
    assert!(matches!(command.undo(), Err(CommandError::InvalidSequencing(_))));
    assert!(!stage.has_attribute(&path("/World/Cube"), TRANSLATE).unwrap());
}

#[test]
fn it_reports_a_missing_prim_as_stale() {
    let stage = stage_with_cube();
    let item = UsdSceneItem::create(&stage, path("/World/Missing"));
    let mut command = UsdTranslateUndoableCommand::create(item, 0.0, 0.0, 0.0).unwrap();
    assert_eq!(command.initialize(), Err(stale("/World/Missing", TRANSLATE)));
}

#[test]
fn it_unsubscribes_when_dropped() {
    let stage = stage_with_cube();
    let observers = stage.observer_count();
    let mut command = UsdTranslateUndoableCommand::create(cube(&stage), 0.0, 0.0, 0.0).unwrap();
    command.initialize().unwrap();
    assert_eq!(stage.observer_count(), observers + 1);

    drop(command);
    assert_eq!(stage.observer_count(), observers);
}

// End of File
