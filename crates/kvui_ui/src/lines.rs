//! Text formats of the tree and value panes, and their parsers.
//!
//! Selection is read back from pane text, so every writer here has a
//! matching parser.

pub const KEY_PREFIX: &str = "  - ";
pub const DB_PREFIX: &str = " db:";
pub const ITEM_PREFIX: &str = "- ";

const EXPANDED: char = '-';
const COLLAPSED: char = '+';

pub fn database_line(index: u32, expanded: bool) -> String {
    let marker = if expanded { EXPANDED } else { COLLAPSED };
    format!("{}{}{}", marker, DB_PREFIX, index)
}

pub fn key_line(key: &str) -> String {
    format!("{}{}", KEY_PREFIX, key)
}

pub fn item_line(item: &str) -> String {
    format!("{}{}", ITEM_PREFIX, item)
}

/// Database index of a collapsed database line.
pub fn parse_collapsed_database(line: &str) -> Option<u32> {
    line.strip_prefix(COLLAPSED)?
        .strip_prefix(DB_PREFIX)?
        .parse()
        .ok()
}

pub fn parse_key_line(line: &str) -> Option<&str> {
    line.strip_prefix(KEY_PREFIX)
}

pub fn parse_item_line(line: &str) -> Option<&str> {
    line.strip_prefix(ITEM_PREFIX)
}
