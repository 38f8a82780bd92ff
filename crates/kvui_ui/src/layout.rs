use kvui_core::KeyType;

use crate::{PaneId, Rect, Screen};

/// Pane geometry for one terminal size and key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub tree: Rect,
    pub value: Rect,
    pub sub_value: Option<Rect>,
    pub status: Rect,
}

impl Layout {
    /// The tree takes a fifth of the width. Map keys split the remaining
    /// space into a field list and a field value pane.
    pub fn derive(width: u16, height: u16, key_type: KeyType) -> Self {
        let tree_size = width / 5;
        let right = width.saturating_sub(1);
        let bottom = height.saturating_sub(4);

        let tree = Rect::new(0, 0, tree_size, bottom);
        let (value, sub_value) = if key_type == KeyType::Map {
            (
                Rect::new(tree_size + 1, 0, tree_size * 2, bottom),
                Some(Rect::new(tree_size * 2 + 1, 0, right, bottom)),
            )
        } else {
            (Rect::new(tree_size + 1, 0, right, bottom), None)
        };
        let status = Rect::new(0, height.saturating_sub(3), right, height.saturating_sub(1));

        Self {
            tree,
            value,
            sub_value,
            status,
        }
    }

    pub fn apply(&self, screen: &mut dyn Screen) {
        let tree = screen.set_pane(PaneId::Tree, self.tree);
        tree.set_wrap(true);
        tree.set_highlight(true);

        let value = screen.set_pane(PaneId::Value, self.value);
        value.set_wrap(true);
        value.set_highlight(self.sub_value.is_some());

        match self.sub_value {
            Some(rect) => screen.set_pane(PaneId::SubValue, rect).set_wrap(true),
            None => screen.delete_pane(PaneId::SubValue),
        }

        screen.set_pane(PaneId::Status, self.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PaneSet;

    #[test]
    fn two_columns_for_scalar_keys() {
        let layout = Layout::derive(100, 40, KeyType::String);
        assert_eq!(layout.tree, Rect::new(0, 0, 20, 36));
        assert_eq!(layout.value, Rect::new(21, 0, 99, 36));
        assert_eq!(layout.sub_value, None);
        assert_eq!(layout.status, Rect::new(0, 37, 99, 39));
    }

    #[test]
    fn three_columns_for_map_keys() {
        let layout = Layout::derive(100, 40, KeyType::Map);
        assert_eq!(layout.value, Rect::new(21, 0, 40, 36));
        assert_eq!(layout.sub_value, Some(Rect::new(41, 0, 99, 36)));
    }

    #[test]
    fn tiny_terminal_does_not_underflow() {
        let layout = Layout::derive(0, 0, KeyType::Map);
        assert_eq!(layout.status, Rect::new(0, 0, 0, 0));
    }

    #[test]
    fn apply_adds_and_removes_field_pane() {
        let mut screen = PaneSet::new(100, 40);

        Layout::derive(100, 40, KeyType::Map).apply(&mut screen);
        assert!(screen.contains(PaneId::SubValue));
        assert!(screen.get(PaneId::Value).unwrap().highlight());

        Layout::derive(100, 40, KeyType::List).apply(&mut screen);
        assert!(!screen.contains(PaneId::SubValue));
        assert!(!screen.get(PaneId::Value).unwrap().highlight());
        assert!(screen.get(PaneId::Tree).unwrap().highlight());
    }
}
