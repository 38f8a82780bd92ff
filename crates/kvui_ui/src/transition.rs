use crate::lines::parse_collapsed_database;
use crate::{NavigationState, PaneId, View};

/// User input the browser reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    CursorUp,
    CursorDown,
    FocusLeft,
    FocusRight,
    Select,
    Quit,
}

/// Side effect requested by a transition; executed by [`crate::Browser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    MoveCursor { pane: PaneId, delta: isize },
    SelectDatabase(u32),
    Render(PaneId),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: NavigationState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: &NavigationState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }
}

/// Next state for `event`.
///
/// `highlighted` is the text under the cursor of the focused pane. No I/O
/// happens here; backend calls and pane writes are returned as effects.
pub fn transition(
    state: &NavigationState,
    event: InputEvent,
    highlighted: Option<&str>,
) -> Transition {
    match event {
        InputEvent::CursorUp => move_cursor(state, -1),
        InputEvent::CursorDown => move_cursor(state, 1),
        InputEvent::FocusRight if state.view == View::Tree => focus(state, View::Value),
        InputEvent::FocusLeft if state.view == View::Value => focus(state, View::Tree),
        InputEvent::FocusLeft | InputEvent::FocusRight => Transition::unchanged(state),
        InputEvent::Select => select(state, highlighted),
        InputEvent::Quit => Transition {
            state: state.clone(),
            effects: vec![Effect::Quit],
        },
    }
}

fn move_cursor(state: &NavigationState, delta: isize) -> Transition {
    let pane = state.view.pane();
    Transition {
        state: state.clone(),
        effects: vec![Effect::MoveCursor { pane, delta }, Effect::Render(pane)],
    }
}

fn focus(state: &NavigationState, view: View) -> Transition {
    let mut next = state.clone();
    next.view = view;
    Transition {
        state: next,
        effects: Vec::new(),
    }
}

fn select(state: &NavigationState, highlighted: Option<&str>) -> Transition {
    if state.view != View::Tree {
        return Transition::unchanged(state);
    }

    let Some(database) = highlighted.and_then(parse_collapsed_database) else {
        return Transition::unchanged(state);
    };

    let mut next = state.clone();
    next.database = database;
    Transition {
        state: next,
        effects: vec![Effect::SelectDatabase(database), Effect::Render(PaneId::Tree)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_value() -> NavigationState {
        transition(&NavigationState::new(), InputEvent::FocusRight, None).state
    }

    #[test]
    fn cursor_moves_in_focused_pane() {
        let t = transition(&NavigationState::new(), InputEvent::CursorDown, None);
        assert_eq!(
            t.effects,
            vec![
                Effect::MoveCursor {
                    pane: PaneId::Tree,
                    delta: 1
                },
                Effect::Render(PaneId::Tree)
            ]
        );

        let t = transition(&on_value(), InputEvent::CursorUp, None);
        assert_eq!(
            t.effects,
            vec![
                Effect::MoveCursor {
                    pane: PaneId::Value,
                    delta: -1
                },
                Effect::Render(PaneId::Value)
            ]
        );
    }

    #[test]
    fn focus_only_moves_toward_a_target() {
        let tree = NavigationState::new();
        assert_eq!(transition(&tree, InputEvent::FocusLeft, None).state, tree);
        assert_eq!(on_value().view(), View::Value);

        let value = on_value();
        assert_eq!(transition(&value, InputEvent::FocusRight, None).state, value);
        assert_eq!(
            transition(&value, InputEvent::FocusLeft, None).state.view(),
            View::Tree
        );
    }

    #[test]
    fn select_collapsed_database() {
        let t = transition(&NavigationState::new(), InputEvent::Select, Some("+ db:3"));
        assert_eq!(t.state.database(), 3);
        assert_eq!(
            t.effects,
            vec![Effect::SelectDatabase(3), Effect::Render(PaneId::Tree)]
        );
    }

    #[test]
    fn select_ignores_other_lines() {
        let state = NavigationState::new();
        for line in [Some("- db:0"), Some("  - user:1"), None] {
            let t = transition(&state, InputEvent::Select, line);
            assert_eq!(t, Transition::unchanged(&state));
        }
    }

    #[test]
    fn select_needs_tree_focus() {
        let value = on_value();
        let t = transition(&value, InputEvent::Select, Some("+ db:1"));
        assert_eq!(t.state.database(), 0);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn quit_requests_loop_exit() {
        let t = transition(&NavigationState::new(), InputEvent::Quit, None);
        assert_eq!(t.effects, vec![Effect::Quit]);
    }
}
