use kvui_core::{KeyType, KvError};

use crate::PaneId;
use crate::lines::parse_key_line;

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Tree,
    Value,
}

impl View {
    pub fn pane(self) -> PaneId {
        match self {
            View::Tree => PaneId::Tree,
            View::Value => PaneId::Value,
        }
    }

    pub fn name(self) -> &'static str {
        self.pane().name()
    }
}

/// Where the cursor is: focused view, database, key and the key's last
/// observed type, plus the most recent surfaced error.
///
/// `key_type` only drives the layout and is re-observed on every value
/// render; it is never trusted across renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub(crate) view: View,
    pub(crate) database: u32,
    pub(crate) key: String,
    pub(crate) key_type: KeyType,
    pub(crate) last_error: Option<KvError>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn database(&self) -> u32 {
        self.database
    }

    /// Selected key; empty when a database line is highlighted.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn last_error(&self) -> Option<&KvError> {
        self.last_error.as_ref()
    }

    /// Derives the selected key from the highlighted tree line.
    pub(crate) fn observe_tree_line(&mut self, line: Option<&str>) {
        self.key = line
            .and_then(parse_key_line)
            .map(str::to_string)
            .unwrap_or_default();
    }

    /// Records the type just read for the selected key. Returns true when it
    /// differs from the previous observation, i.e. the layout must change.
    pub(crate) fn observe_key_type(&mut self, key_type: KeyType) -> bool {
        let changed = self.key_type != key_type;
        self.key_type = key_type;
        changed
    }

    /// Replaces the sticky error shown in the status pane.
    pub(crate) fn record_error(&mut self, error: KvError) {
        self.last_error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_tree_with_nothing_selected() {
        let state = NavigationState::new();
        assert_eq!(state.view(), View::Tree);
        assert_eq!(state.database(), 0);
        assert!(!state.has_key());
        assert_eq!(state.key_type(), KeyType::Invalid);
        assert!(state.last_error().is_none());
    }

    #[test]
    fn tree_line_selects_or_clears_key() {
        let mut state = NavigationState::new();
        state.observe_tree_line(Some("  - user:1"));
        assert_eq!(state.key(), "user:1");

        state.observe_tree_line(Some("- db:0"));
        assert!(!state.has_key());

        state.observe_tree_line(Some("  - user:2"));
        state.observe_tree_line(None);
        assert!(!state.has_key());
    }

    #[test]
    fn key_type_change_is_reported_once() {
        let mut state = NavigationState::new();
        assert!(state.observe_key_type(KeyType::String));
        assert!(!state.observe_key_type(KeyType::String));
        assert!(state.observe_key_type(KeyType::Map));
    }

    #[test]
    fn last_error_is_sticky_until_replaced() {
        let mut state = NavigationState::new();
        state.record_error(KvError::key_not_found("a"));
        state.observe_tree_line(Some("  - b"));
        assert_eq!(state.last_error(), Some(&KvError::key_not_found("a")));

        state.record_error(KvError::connection("down"));
        assert_eq!(state.last_error(), Some(&KvError::connection("down")));
    }
}
