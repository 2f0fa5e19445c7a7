use notetree_core::seed::{demo_notebooks, demo_notes};
use notetree_core::state::reducer::{reduce, Effect, Event};
use notetree_core::{AppState, DragItem, DropTarget, MoveRejection, Note, Notebook, NotebookTree};

fn notebook(id: &str, name: &str, parent: Option<&str>) -> Notebook {
    Notebook::new(id, name, parent.map(str::to_string), 0)
}

fn ancestors_of(tree: &NotebookTree, notebook_id: &str) -> Vec<String> {
    let mut ancestors = Vec::new();
    let mut current = tree
        .notebook(notebook_id)
        .and_then(|notebook| notebook.parent_id.clone());
    while let Some(parent_id) = current {
        current = tree
            .notebook(&parent_id)
            .and_then(|notebook| notebook.parent_id.clone());
        ancestors.push(parent_id);
    }
    ancestors
}

fn drag_and_drop(state: &mut AppState, item: DragItem, target: DropTarget) -> Effect {
    reduce(state, Event::DragStarted(item), 1);
    reduce(state, Event::DragEntered(target.clone()), 1);
    match reduce(state, Event::Dropped(target), 1) {
        Effect::Move(request) => reduce(state, Event::MoveCommitted(request), 2),
        other => other,
    }
}

#[test]
fn descendant_ids_include_self_and_exclude_ancestors() {
    let tree = NotebookTree::from_parts(demo_notebooks(), demo_notes());

    for notebook in tree.notebooks() {
        let descendants = tree.descendant_ids(&notebook.id);
        assert!(descendants.contains(&notebook.id));
        for ancestor in ancestors_of(&tree, &notebook.id) {
            assert!(
                !descendants.contains(&ancestor),
                "{ancestor} is an ancestor of {}",
                notebook.id
            );
        }
    }
}

#[test]
fn descendant_ids_walk_the_whole_subtree() {
    let tree = NotebookTree::from_parts(
        vec![
            notebook("a", "A", None),
            notebook("b", "B", Some("a")),
            notebook("c", "C", Some("b")),
            notebook("d", "D", None),
        ],
        Vec::new(),
    );

    let ids = tree.descendant_ids("a");
    assert_eq!(ids.len(), 3);
    assert!(ids.contains("c"));
    assert!(!ids.contains("d"));
}

#[test]
fn children_and_notes_are_sorted_regardless_of_insertion_order() {
    let tree = NotebookTree::from_parts(
        vec![
            notebook("3", "work", None),
            notebook("1", "Zeta", None),
            notebook("2", "alpha", None),
            notebook("4", "Work", None),
        ],
        vec![
            Note::with_id("n2", "1", "beta", "", 0),
            Note::with_id("n1", "1", "Alpha", "", 0),
            Note::with_id("n3", "2", "other", "", 0),
        ],
    );

    let names = tree
        .children_of(None)
        .into_iter()
        .map(|notebook| notebook.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["alpha", "work", "Work", "Zeta"]);

    let titles = tree
        .notes_of("1")
        .into_iter()
        .map(|note| note.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Alpha", "beta"]);
}

#[test]
fn accented_names_sort_with_their_base_letter() {
    let tree = NotebookTree::from_parts(
        ["Zebra", "\u{c9}cole", "Fig", "\u{c1}pple", "Banana"]
            .into_iter()
            .enumerate()
            .map(|(index, name)| notebook(&index.to_string(), name, None))
            .collect(),
        vec![
            Note::with_id("n1", "0", "\u{f6}l", "", 0),
            Note::with_id("n2", "0", "Oak", "", 0),
            Note::with_id("n3", "0", "Pine", "", 0),
        ],
    );

    let names = tree
        .children_of(None)
        .into_iter()
        .map(|notebook| notebook.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec!["\u{c1}pple", "Banana", "\u{c9}cole", "Fig", "Zebra"]
    );

    let titles = tree
        .notes_of("0")
        .into_iter()
        .map(|note| note.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Oak", "\u{f6}l", "Pine"]);
}

#[test]
fn children_of_unknown_parent_is_empty() {
    let tree = NotebookTree::from_parts(demo_notebooks(), Vec::new());
    assert!(tree.children_of(Some("ghost")).is_empty());
    assert!(tree.notes_of("ghost").is_empty());
}

#[test]
fn moving_c_onto_a_then_a_onto_c_is_rejected() {
    let mut state = AppState::new(NotebookTree::from_parts(
        vec![
            notebook("A", "A", None),
            notebook("B", "B", None),
            notebook("C", "C", Some("B")),
        ],
        Vec::new(),
    ));

    let first = drag_and_drop(
        &mut state,
        DragItem::Notebook("C".into()),
        DropTarget::Notebook("A".into()),
    );
    assert_eq!(first, Effect::None);
    assert_eq!(
        state.tree.notebook("C").unwrap().parent_id.as_deref(),
        Some("A")
    );
    assert!(state.expanded.is_expanded("A"));

    let before = state.tree.clone();
    let second = drag_and_drop(
        &mut state,
        DragItem::Notebook("A".into()),
        DropTarget::Notebook("C".into()),
    );
    assert_eq!(
        second,
        Effect::Rejected(MoveRejection::CycleDetected {
            notebook_id: "A".into(),
            target_id: "C".into(),
        })
    );
    assert_eq!(state.tree, before);
    assert!(!state.in_flight.moving);
}

#[test]
fn moving_a_note_reassigns_it_and_expands_the_target() {
    let mut state = AppState::new(NotebookTree::from_parts(demo_notebooks(), demo_notes()));

    let effect = drag_and_drop(
        &mut state,
        DragItem::Note("note-1".into()),
        DropTarget::Notebook("notebook-3".into()),
    );

    assert_eq!(effect, Effect::None);
    let note = state.tree.note("note-1").unwrap();
    assert_eq!(note.notebook_id, "notebook-3");
    assert_eq!(note.updated_at, 2);
    assert!(state.expanded.is_expanded("notebook-3"));
}

#[test]
fn dropping_notebook_on_root_promotes_it() {
    let mut state = AppState::new(NotebookTree::from_parts(demo_notebooks(), Vec::new()));

    let effect = drag_and_drop(
        &mut state,
        DragItem::Notebook("notebook-3".into()),
        DropTarget::Root,
    );

    assert_eq!(effect, Effect::None);
    assert!(state.tree.notebook("notebook-3").unwrap().is_root());
    let roots = state
        .tree
        .children_of(None)
        .into_iter()
        .map(|notebook| notebook.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(roots, vec!["notebook-1", "notebook-3", "notebook-2"]);
}
