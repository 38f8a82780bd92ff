use std::collections::BTreeMap;

/// Every pane the browser can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaneId {
    Tree,
    Value,
    /// Value of the highlighted hash field; only present for map keys.
    SubValue,
    Status,
}

impl PaneId {
    pub fn name(self) -> &'static str {
        match self {
            PaneId::Tree => "tree",
            PaneId::Value => "value",
            PaneId::SubValue => "subvalue",
            PaneId::Status => "status",
        }
    }
}

/// Pane geometry in text cells, corners inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Rect {
    pub fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> u16 {
        self.x1.saturating_sub(self.x0) + 1
    }

    pub fn height(&self) -> u16 {
        self.y1.saturating_sub(self.y0) + 1
    }
}

/// Semantic foreground colour; the terminal picks the actual colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Affirmative,
    Negative,
}

/// A rectangular, line-addressed text region.
pub trait Pane {
    fn clear(&mut self);

    /// Appends `text`; embedded newlines start new lines.
    fn write_line(&mut self, text: &str);

    fn line(&self, index: usize) -> Option<&str>;

    fn line_count(&self) -> usize;

    fn cursor(&self) -> usize;

    /// Moves the cursor to `index`, clamped to the written lines.
    fn set_cursor(&mut self, index: usize);

    fn move_cursor(&mut self, delta: isize) {
        let target = self.cursor().saturating_add_signed(delta);
        self.set_cursor(target);
    }

    fn current_line(&self) -> Option<&str> {
        self.line(self.cursor())
    }

    fn set_tone(&mut self, tone: Tone);

    fn set_highlight(&mut self, highlight: bool);

    fn set_wrap(&mut self, wrap: bool);

    fn rect(&self) -> Rect;

    fn set_rect(&mut self, rect: Rect);
}

/// In-memory [`Pane`]; the terminal front end draws these.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPane {
    lines: Vec<String>,
    cursor: usize,
    tone: Tone,
    highlight: bool,
    wrap: bool,
    rect: Rect,
}

impl TextPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn highlight(&self) -> bool {
        self.highlight
    }

    pub fn wrap(&self) -> bool {
        self.wrap
    }
}

impl Pane for TextPane {
    // The cursor survives a clear so redraws keep the selection.
    fn clear(&mut self) {
        self.lines.clear();
    }

    fn write_line(&mut self, text: &str) {
        self.lines.extend(text.split('\n').map(str::to_string));
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.lines.len().saturating_sub(1));
    }

    fn set_tone(&mut self, tone: Tone) {
        self.tone = tone;
    }

    fn set_highlight(&mut self, highlight: bool) {
        self.highlight = highlight;
    }

    fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

/// Scoped access to the panes on screen.
pub trait Screen {
    /// Terminal size in cells (width, height).
    fn size(&self) -> (u16, u16);

    /// Creates the pane if needed and (re)positions it.
    fn set_pane(&mut self, id: PaneId, rect: Rect) -> &mut dyn Pane;

    fn pane(&self, id: PaneId) -> Option<&dyn Pane>;

    fn pane_mut(&mut self, id: PaneId) -> Option<&mut dyn Pane>;

    fn delete_pane(&mut self, id: PaneId);
}

/// The set of [`TextPane`]s making up the browser screen.
#[derive(Debug, Clone, Default)]
pub struct PaneSet {
    width: u16,
    height: u16,
    panes: BTreeMap<PaneId, TextPane>,
}

impl PaneSet {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            panes: BTreeMap::new(),
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn get(&self, id: PaneId) -> Option<&TextPane> {
        self.panes.get(&id)
    }

    pub fn contains(&self, id: PaneId) -> bool {
        self.panes.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PaneId, &TextPane)> {
        self.panes.iter().map(|(id, pane)| (*id, pane))
    }
}

impl Screen for PaneSet {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn set_pane(&mut self, id: PaneId, rect: Rect) -> &mut dyn Pane {
        let pane = self.panes.entry(id).or_default();
        pane.set_rect(rect);
        pane
    }

    fn pane(&self, id: PaneId) -> Option<&dyn Pane> {
        self.panes.get(&id).map(|pane| pane as &dyn Pane)
    }

    fn pane_mut(&mut self, id: PaneId) -> Option<&mut dyn Pane> {
        self.panes.get_mut(&id).map(|pane| pane as &mut dyn Pane)
    }

    fn delete_pane(&mut self, id: PaneId) {
        self.panes.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_splits_embedded_newlines() {
        let mut pane = TextPane::new();
        pane.write_line("a\nb");
        pane.write_line("c");
        assert_eq!(pane.lines(), ["a", "b", "c"]);
        assert_eq!(pane.line(1), Some("b"));
        assert_eq!(pane.line(3), None);
    }

    #[test]
    fn cursor_clamps_to_written_lines() {
        let mut pane = TextPane::new();
        for line in ["one", "two", "three"] {
            pane.write_line(line);
        }

        pane.move_cursor(-1);
        assert_eq!(pane.cursor(), 0);

        pane.move_cursor(5);
        assert_eq!(pane.cursor(), 2);
        assert_eq!(pane.current_line(), Some("three"));
    }

    #[test]
    fn clear_keeps_cursor_until_reclamped() {
        let mut pane = TextPane::new();
        pane.write_line("a\nb\nc");
        pane.set_cursor(2);
        pane.clear();
        assert_eq!(pane.cursor(), 2);
        assert_eq!(pane.current_line(), None);

        pane.write_line("x");
        pane.set_cursor(pane.cursor());
        assert_eq!(pane.current_line(), Some("x"));
    }

    #[test]
    fn pane_set_creates_moves_and_deletes() {
        let mut screen = PaneSet::new(100, 40);
        screen.set_pane(PaneId::Value, Rect::new(0, 0, 9, 9)).write_line("v");
        screen.set_pane(PaneId::Value, Rect::new(5, 0, 19, 9));

        let value = screen.get(PaneId::Value).unwrap();
        assert_eq!(value.rect().width(), 15);
        assert_eq!(value.lines(), ["v"]);

        screen.delete_pane(PaneId::Value);
        assert!(screen.pane(PaneId::Value).is_none());
        assert_eq!(screen.size(), (100, 40));
    }
}
