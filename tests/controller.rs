//! End-to-end command dispatch scenarios from the UI surface.

use std::time::Duration;

use flowcanvas::blocks::BlockKind;
use flowcanvas::config::EditorConfig;
use flowcanvas::controller::{CommandOutcome, EditorCommand, EditorController, EditorError};
use flowcanvas::events::EditorEvent;
use flowcanvas::graph::NodeId;
use flowcanvas::placement::{ScreenPoint, Viewport};
use serde_json::json;

fn place(editor: &mut EditorController, kind: BlockKind, x: f64, y: f64) -> flowcanvas::graph::Node {
    match editor
        .dispatch(EditorCommand::PlaceNode {
            kind,
            at: ScreenPoint { x, y },
        })
        .unwrap()
    {
        CommandOutcome::Node(node) => node,
        other => panic!("expected a node, got {other:?}"),
    }
}

#[test]
fn editor_starts_with_a_seed_trigger() {
    let editor = EditorController::default();
    assert_eq!(editor.graph().nodes.len(), 1);
    assert_eq!(editor.graph().nodes[0].kind, BlockKind::Trigger);
    assert_eq!(editor.history().snapshots().len(), 1);
}

#[test]
fn place_connect_export_delete_scenario() {
    let mut editor = EditorController::default();
    let trigger = editor.graph().nodes[0].id.clone();

    let action = place(&mut editor, BlockKind::Action, 100.0, 100.0);
    editor
        .dispatch(EditorCommand::Connect {
            source: trigger,
            target: action.id.clone(),
        })
        .unwrap();

    // Export yields a 2-node / 1-edge document.
    let text = match editor.dispatch(EditorCommand::ExportJson).unwrap() {
        CommandOutcome::Json(text) => text,
        other => panic!("expected JSON, got {other:?}"),
    };
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(value["edges"].as_array().unwrap().len(), 1);

    // Deleting the action cascades the edge.
    editor.dispatch(EditorCommand::Delete(action.id)).unwrap();
    assert!(editor.graph().edges.is_empty());
}

#[test]
fn connect_to_missing_node_is_invalid_and_atomic() {
    let mut editor = EditorController::default();
    let trigger = editor.graph().nodes[0].id.clone();
    let before = editor.graph().clone();

    let err = editor
        .dispatch(EditorCommand::Connect {
            source: NodeId::from("missing-id"),
            target: trigger,
        })
        .unwrap_err();
    assert!(matches!(err, EditorError::Graph(_)));
    assert_eq!(editor.graph(), &before);
}

#[test]
fn placement_respects_viewport_and_grid() {
    let config = EditorConfig::default()
        .with_grid(20)
        .with_drop_anchor((0.0, 0.0));
    let mut editor = EditorController::new(config, Default::default());
    editor.set_viewport(Viewport {
        pan_x: 100.0,
        pan_y: 0.0,
        zoom: 2.0,
    });

    // Screen (307, 86) -> canvas (103.5, 43) -> snapped (100, 40).
    let node = place(&mut editor, BlockKind::Tag, 307.0, 86.0);
    assert_eq!(node.position.x, 100);
    assert_eq!(node.position.y, 40);
}

#[test]
fn placed_node_carries_the_registry_template() {
    let mut editor = EditorController::default();
    let wait = place(&mut editor, BlockKind::Wait, 200.0, 200.0);
    assert_eq!(wait.data.get("label"), Some(&json!("Wait")));
    assert_eq!(wait.data.get("time"), Some(&json!(1)));
    assert_eq!(wait.data.get("unit"), Some(&json!("days")));
}

#[test]
fn edit_field_patches_one_key() {
    let mut editor = EditorController::default();
    let wait = place(&mut editor, BlockKind::Wait, 200.0, 200.0);
    editor
        .dispatch(EditorCommand::EditField {
            node: wait.id.clone(),
            key: "time".into(),
            value: json!(5),
        })
        .unwrap();
    let stored = editor.graph().node(&wait.id).unwrap();
    assert_eq!(stored.data.get("time"), Some(&json!(5)));
    assert_eq!(stored.data.get("unit"), Some(&json!("days")));
}

#[test]
fn undo_redo_walk_the_command_history() {
    let mut editor = EditorController::default();
    place(&mut editor, BlockKind::Action, 100.0, 100.0);
    place(&mut editor, BlockKind::Tag, 300.0, 100.0);
    assert_eq!(editor.graph().nodes.len(), 3);

    editor.dispatch(EditorCommand::Undo).unwrap();
    editor.dispatch(EditorCommand::Undo).unwrap();
    assert_eq!(editor.graph().nodes.len(), 1);

    // At the initial snapshot, undo is a boundary no-op.
    assert!(matches!(
        editor.dispatch(EditorCommand::Undo).unwrap(),
        CommandOutcome::Boundary
    ));

    editor.dispatch(EditorCommand::Redo).unwrap();
    editor.dispatch(EditorCommand::Redo).unwrap();
    assert_eq!(editor.graph().nodes.len(), 3);
    assert!(matches!(
        editor.dispatch(EditorCommand::Redo).unwrap(),
        CommandOutcome::Boundary
    ));
}

#[test]
fn mutation_after_undo_discards_redo() {
    let mut editor = EditorController::default();
    place(&mut editor, BlockKind::Action, 100.0, 100.0);
    editor.dispatch(EditorCommand::Undo).unwrap();
    place(&mut editor, BlockKind::Notify, 100.0, 100.0);
    assert!(matches!(
        editor.dispatch(EditorCommand::Redo).unwrap(),
        CommandOutcome::Boundary
    ));
}

#[test]
fn save_and_restore_versions() {
    let mut editor = EditorController::default();
    place(&mut editor, BlockKind::Action, 100.0, 100.0);
    editor
        .dispatch(EditorCommand::SaveVersion {
            label: "two blocks".into(),
        })
        .unwrap();
    place(&mut editor, BlockKind::Tag, 300.0, 100.0);

    let saved = editor
        .history()
        .snapshots()
        .iter()
        .find(|s| s.label == "two blocks")
        .unwrap()
        .id
        .clone();
    editor
        .dispatch(EditorCommand::RestoreVersion(saved))
        .unwrap();
    assert_eq!(editor.graph().nodes.len(), 2);

    // Restore preserves the tail; redo walks forward again.
    editor.dispatch(EditorCommand::Redo).unwrap();
    assert_eq!(editor.graph().nodes.len(), 3);
}

#[test]
fn import_rejection_is_atomic() {
    let mut editor = EditorController::default();
    let before = editor.graph().clone();

    let payload = json!({
        "nodes": [{"id": "n1", "kind": "trigger", "position": {"x": 0, "y": 0}}],
        "edges": [{"id": "e1", "sourceNodeId": "n1", "targetNodeId": "ghost"}]
    });
    let err = editor
        .dispatch(EditorCommand::ImportJson(payload.to_string()))
        .unwrap_err();
    assert!(matches!(err, EditorError::Codec(_)));
    assert_eq!(editor.graph(), &before);
}

#[test]
fn import_replaces_graph_and_is_undoable() {
    let mut editor = EditorController::default();
    let payload = json!({
        "nodes": [
            {"id": "n1", "kind": "trigger", "position": {"x": 0, "y": 0}, "data": {"label": "Trigger"}},
            {"id": "n2", "kind": "action", "position": {"x": 120, "y": 0}, "data": {"label": "Send email"}}
        ],
        "edges": [{"id": "e1", "sourceNodeId": "n1", "targetNodeId": "n2"}]
    });
    editor
        .dispatch(EditorCommand::ImportJson(payload.to_string()))
        .unwrap();
    assert_eq!(editor.graph().nodes.len(), 2);
    assert_eq!(editor.graph().edges.len(), 1);

    // An import is itself a tracked mutation.
    editor.dispatch(EditorCommand::Undo).unwrap();
    assert_eq!(editor.graph().nodes.len(), 1);
    assert_eq!(editor.graph().nodes[0].kind, BlockKind::Trigger);
}

#[test]
fn selection_clears_when_the_node_is_deleted() {
    let mut editor = EditorController::default();
    let rx = editor.subscribe();
    let node = place(&mut editor, BlockKind::Action, 100.0, 100.0);

    editor
        .dispatch(EditorCommand::Select(Some(node.id.clone())))
        .unwrap();
    assert_eq!(editor.selection(), Some(&node.id));

    editor.dispatch(EditorCommand::Delete(node.id)).unwrap();
    assert!(editor.selection().is_none());

    let cleared = rx
        .drain()
        .filter(|e| matches!(e, EditorEvent::SelectionChanged(None)))
        .count();
    assert_eq!(cleared, 1);
}

#[test]
fn abandoned_drag_leaves_no_history_entry() {
    let mut editor = EditorController::default();
    let versions = editor.history().snapshots().len();

    editor
        .dispatch(EditorCommand::DragStart {
            kind: BlockKind::Notify,
        })
        .unwrap();
    editor
        .dispatch(EditorCommand::DragOver {
            at: ScreenPoint { x: 50.0, y: 50.0 },
        })
        .unwrap();
    // No drop: nothing committed.
    assert_eq!(editor.history().snapshots().len(), versions);
    assert_eq!(editor.graph().nodes.len(), 1);

    // A drop with no drag in progress is a boundary no-op.
    assert!(matches!(
        editor
            .dispatch(EditorCommand::Drop {
                at: ScreenPoint { x: 50.0, y: 50.0 }
            })
            .unwrap(),
        CommandOutcome::Boundary
    ));
}

#[tokio::test]
async fn simulation_commands_drive_the_engine() {
    let config = EditorConfig::default().with_simulation(
        flowcanvas::config::SimulationConfig::default()
            .with_tick(Duration::from_millis(1))
            .with_seed(9),
    );
    let mut editor = EditorController::new(config, Default::default());
    place(&mut editor, BlockKind::Action, 100.0, 100.0);

    editor.dispatch(EditorCommand::RunSimulation).unwrap();
    // Re-entrancy is rejected synchronously at start.
    assert!(matches!(
        editor.dispatch(EditorCommand::RunSimulation).unwrap_err(),
        EditorError::Simulation(_)
    ));

    editor.simulation().wait().await;
    let metrics = editor.simulation().metrics();
    assert!(metrics.ctr > 0.0 && metrics.ctr <= 1.0);

    // Nothing running any more: cancel is a boundary no-op.
    assert!(matches!(
        editor.dispatch(EditorCommand::CancelSimulation).unwrap(),
        CommandOutcome::Boundary
    ));
}
