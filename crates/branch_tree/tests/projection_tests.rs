//! Tests for the active view projection

use branch_tree::{
    ActiveViewProjector, BranchLocator, ChatTree, ProjectionOptions, Sender,
};

fn forked_tree() -> ChatTree {
    let mut tree = ChatTree::new();
    tree.add_message("hi", Sender::Assistant);
    let b = tree.add_message("how are you", Sender::User);
    tree.add_message("good", Sender::Assistant);
    tree.edit_message(b.id, "how's work").unwrap();
    let busy = tree.add_message("busy", Sender::Assistant);
    tree.edit_message(busy.id, "quiet").unwrap();
    tree
}

#[test]
fn test_projection_is_idempotent() {
    let tree = forked_tree();
    let first = tree.project();
    let second = tree.project();
    assert_eq!(first, second);

    let options = ProjectionOptions {
        include_inactive: true,
    };
    assert_eq!(
        ActiveViewProjector::project_with(&tree, options),
        ActiveViewProjector::project_with(&tree, options)
    );
}

#[test]
fn test_projection_depths_follow_forks() {
    let tree = forked_tree();
    let view = tree.project();

    let rows: Vec<_> = view
        .iter()
        .map(|e| (e.message.content.as_str(), e.depth))
        .collect();
    assert_eq!(rows, vec![("hi", 0), ("how's work", 1), ("quiet", 2)]);
    assert!(view.iter().all(|e| e.is_active));
}

#[test]
fn test_projection_sibling_metadata_only_at_fork_heads() {
    let tree = forked_tree();
    let view = tree.project();

    assert!(view[0].siblings.is_none());
    let outer = view[1].siblings.as_ref().unwrap();
    assert_eq!(outer.position(), (2, 2));
    let inner = view[2].siblings.as_ref().unwrap();
    assert_eq!(inner.indices, vec![1, 2]);
    assert_eq!(inner.previous(), Some(1));
    assert_eq!(inner.next(), None);
}

#[test]
fn test_projection_branch_locators_match_path() {
    let tree = forked_tree();
    let path = tree.current_path();
    let view = tree.project();

    for entry in &view {
        assert_eq!(path[entry.depth], entry.branch);
    }
    assert_eq!(view[0].branch, BranchLocator::Root);
}

#[test]
fn test_ghost_rows_for_every_fork_on_path() {
    let tree = forked_tree();
    let view = ActiveViewProjector::project_with(
        &tree,
        ProjectionOptions {
            include_inactive: true,
        },
    );

    let rows: Vec<_> = view
        .iter()
        .map(|e| (e.message.content.as_str(), e.depth, e.is_active))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("hi", 0, true),
            ("how are you", 1, false),
            ("good", 1, false),
            ("how's work", 1, true),
            ("busy", 2, false),
            ("quiet", 2, true),
        ]
    );
}

#[test]
fn test_empty_tree_projects_nothing() {
    let tree = ChatTree::new();
    assert!(tree.project().is_empty());
}

#[test]
fn test_projection_serializes_for_renderer() {
    let tree = forked_tree();
    let view = tree.project();
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json[0]["branch"]["type"], "root");
    assert_eq!(json[1]["branch"]["type"], "fork");
    assert_eq!(json[1]["branch"]["index"], 2);
    assert_eq!(json[1]["message"]["is_edited"], true);
    assert!(json[0].get("siblings").is_none());
    assert_eq!(json[2]["siblings"]["selected"], 2);
}
