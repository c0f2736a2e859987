//! Display projection of the roster.

use crate::{
    student::StudentRecord,
    types::{RecordId, RosterConfig},
};

/// Text of the single row shown for an empty roster.
pub const EMPTY_PLACEHOLDER: &str = "No students added yet";

/// One displayed roster row, values already escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// 1-based position in the roster.
    pub position: usize,
    /// Escaped name.
    pub name: String,
    /// Escaped student ID.
    pub sid: String,
    /// Escaped email.
    pub email: String,
    /// Escaped contact number.
    pub contact: String,
    /// Record targeted by this row's Edit and Delete actions.
    pub id: RecordId,
}

/// How the table surface treats overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Rows past the visible area are clipped.
    Clip,
    /// The surface scrolls vertically within a fixed height.
    Scroll {
        /// Maximum height in pixels.
        max_height_px: u32,
    },
}

/// Rendered roster table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterView {
    /// Rows in roster order; empty means the placeholder is shown.
    pub rows: Vec<RowView>,
    /// Overflow policy for the table surface.
    pub overflow: Overflow,
}

impl RosterView {
    /// True when the placeholder row stands in for an empty roster.
    pub fn is_placeholder(&self) -> bool {
        self.rows.is_empty()
    }

    /// Emits the table body markup.
    ///
    /// Row actions carry `data-action` and `data-id` attributes so a single
    /// delegated handler can route them.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if self.rows.is_empty() {
            out.push_str(&format!("<tr><td colspan=\"6\">{EMPTY_PLACEHOLDER}</td></tr>"));
            return out;
        }
        for row in &self.rows {
            let id = escape_html(row.id.as_str());
            out.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td><button data-action=\"edit\" data-id=\"{id}\">Edit</button>\
                 <button data-action=\"delete\" data-id=\"{id}\">Delete</button></td></tr>",
                row.position, row.name, row.sid, row.email, row.contact,
            ));
        }
        out
    }
}

/// Projects `records` into display rows.
pub fn render(records: &[StudentRecord], config: &RosterConfig) -> RosterView {
    let rows = records
        .iter()
        .enumerate()
        .map(|(idx, rec)| RowView {
            position: idx + 1,
            name: escape_html(&rec.name),
            sid: escape_html(&rec.sid),
            email: escape_html(&rec.email),
            contact: escape_html(&rec.contact),
            id: rec.id.clone(),
        })
        .collect();

    let overflow = if records.len() > config.scroll_threshold {
        Overflow::Scroll {
            max_height_px: config.max_height_px,
        }
    } else {
        Overflow::Clip
    };

    RosterView { rows, overflow }
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
