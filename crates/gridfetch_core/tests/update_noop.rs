use gridfetch_core::{update, AppState, Msg};

#[test]
fn tick_while_idle_changes_nothing() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::Tick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
