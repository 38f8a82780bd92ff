//! Derives pane contents from [`NavigationState`] and a fresh backend read.
//!
//! Every render fetches before it clears, so a failed read leaves the pane
//! showing its last good content and hands the error back to the caller.

use chrono::Local;
use kvui_core::{Backend, KeyType, KvError, Liveness};
use log::debug;

use crate::lines::{database_line, item_line, key_line, parse_item_line};
use crate::{Layout, NavigationState, Pane, PaneId, Screen, Tone};

const KEY_PATTERN: &str = "*";
const PLACEHOLDER_TIME_FORMAT: &str = "%b %e %H:%M:%S";

pub struct Pipeline<'a> {
    backend: &'a dyn Backend,
    state: &'a mut NavigationState,
    screen: &'a mut dyn Screen,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        backend: &'a dyn Backend,
        state: &'a mut NavigationState,
        screen: &'a mut dyn Screen,
    ) -> Self {
        Self {
            backend,
            state,
            screen,
        }
    }

    /// Re-derives the layout for the current key type.
    pub fn relayout(&mut self) {
        let (width, height) = self.screen.size();
        Layout::derive(width, height, self.state.key_type).apply(&mut *self.screen);
    }

    /// Databases with the current one expanded into its keys.
    ///
    /// A database count failure is written into the tree itself. The
    /// selected key is re-derived from the highlighted line afterwards.
    pub fn render_tree(&mut self) -> Result<(), KvError> {
        let lines = match self.backend.list_database_count() {
            Ok(count) => self.tree_lines(count)?,
            Err(error) => vec![error.to_string()],
        };

        let Some(tree) = self.screen.pane_mut(PaneId::Tree) else {
            return Ok(());
        };
        tree.clear();
        for line in &lines {
            tree.write_line(line);
        }
        tree.set_cursor(tree.cursor());

        let highlighted = tree.current_line().map(str::to_string);
        self.state.observe_tree_line(highlighted.as_deref());
        Ok(())
    }

    fn tree_lines(&self, count: u32) -> Result<Vec<String>, KvError> {
        let mut lines = Vec::new();
        for index in 0..count {
            let expanded = index == self.state.database;
            lines.push(database_line(index, expanded));
            if expanded {
                let mut keys = self.backend.list_keys(KEY_PATTERN)?;
                keys.sort();
                lines.extend(keys.iter().map(|key| key_line(key)));
            }
        }
        Ok(lines)
    }

    /// Contents of the selected key, laid out for its current type.
    ///
    /// The type is re-read on every call. A failure to read it falls back to
    /// the placeholder and is returned for the status pane.
    pub fn render_value(&mut self) -> Result<(), KvError> {
        if !self.state.has_key() {
            self.observe_type(KeyType::Invalid);
            self.write_placeholder();
            return Ok(());
        }

        let key = self.state.key.clone();
        let key_type = match self.backend.type_of(&key) {
            Ok(key_type) => key_type,
            Err(error) => {
                self.observe_type(KeyType::Invalid);
                self.write_placeholder();
                return Err(error);
            }
        };
        self.observe_type(key_type);

        match key_type {
            KeyType::String => {
                let value = self.backend.get(&key)?;
                self.write_value(&[value]);
            }
            KeyType::Map => {
                let mut fields = self.backend.hash_field_names(&key)?;
                fields.sort();
                let lines: Vec<String> = fields.iter().map(|field| item_line(field)).collect();
                self.write_value(&lines);
                self.render_sub_value(&key)?;
            }
            KeyType::List => {
                let items = self.backend.list_get(&key)?;
                let lines: Vec<String> = items.iter().map(|item| item_line(item)).collect();
                self.write_value(&lines);
            }
            KeyType::Invalid => self.write_placeholder(),
        }
        Ok(())
    }

    fn render_sub_value(&mut self, key: &str) -> Result<(), KvError> {
        let field = self
            .screen
            .pane(PaneId::Value)
            .and_then(|pane| pane.current_line())
            .and_then(parse_item_line)
            .map(str::to_string);

        let value = match field {
            Some(field) => Some(self.backend.hash_get(key, &field)?),
            None => None,
        };

        if let Some(pane) = self.screen.pane_mut(PaneId::SubValue) {
            pane.clear();
            if let Some(value) = value {
                pane.write_line(&value);
            }
        }
        Ok(())
    }

    /// Connection state, then the sticky error if any.
    pub fn render_status(&mut self) {
        let liveness = self.backend.is_connected();
        let Some(status) = self.screen.pane_mut(PaneId::Status) else {
            return;
        };

        let mut text = match &liveness {
            Liveness::Connected => {
                status.set_tone(Tone::Affirmative);
                " connected".to_string()
            }
            Liveness::Disconnected(error) => {
                status.set_tone(Tone::Negative);
                format!(" disconnected ({error})")
            }
        };
        if let Some(error) = &self.state.last_error {
            text.push_str(&format!("    ERROR: {error}"));
        }

        status.clear();
        status.write_line(&text);
    }

    fn observe_type(&mut self, key_type: KeyType) {
        if self.state.observe_key_type(key_type) {
            debug!("key type now {key_type}, relayout");
            self.relayout();
        }
    }

    fn write_placeholder(&mut self) {
        let text = format!(
            "{} {}",
            Local::now().format(PLACEHOLDER_TIME_FORMAT),
            self.state.view.name()
        );
        self.write_value(&[text]);
    }

    fn write_value(&mut self, lines: &[String]) {
        let Some(value) = self.screen.pane_mut(PaneId::Value) else {
            return;
        };
        value.clear();
        for line in lines {
            value.write_line(line);
        }
        value.set_cursor(value.cursor());
    }
}
