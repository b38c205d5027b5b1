//! Ordered code box collection
//!
//! Owns the box list, its order, and the active color filter. Order is
//! significant: it defines both display order and concatenation order for
//! submission. The collection is never empty.

use crate::types::{BoxColor, CodeBox};

/// Ordered, non-empty collection of code boxes with an optional color filter.
///
/// All mutations are synchronous single-step operations; invalid identifiers
/// are silent no-ops. Deleting the last remaining box is refused.
#[derive(Debug, Clone)]
pub struct BoxCollection {
    boxes: Vec<CodeBox>,
    filter: Option<BoxColor>,
}

impl BoxCollection {
    /// Create a collection seeded with the default hello-world box.
    #[must_use]
    pub fn new() -> Self {
        Self {
            boxes: vec![CodeBox::seed()],
            filter: None,
        }
    }

    /// Number of boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Always `false`: the collection invariant keeps at least one box.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// The full ordered sequence.
    #[must_use]
    pub fn boxes(&self) -> &[CodeBox] {
        &self.boxes
    }

    /// The box with identifier `id`, if present.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CodeBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    /// The active color filter.
    #[must_use]
    pub fn filter(&self) -> Option<BoxColor> {
        self.filter
    }

    /// Insert a new placeholder box immediately after `after_id`.
    ///
    /// When `after_id` does not resolve to an existing box the new box is
    /// appended at the end. Returns the new box's identifier.
    pub fn add_box(&mut self, after_id: &str) -> String {
        let new_box = CodeBox::placeholder();
        let id = new_box.id.clone();
        match self.position(after_id) {
            Some(index) => self.boxes.insert(index + 1, new_box),
            None => self.boxes.push(new_box),
        }
        id
    }

    /// Remove the box with identifier `id`.
    ///
    /// Refused when only one box remains; no-op when `id` does not exist.
    /// Returns whether a box was removed.
    pub fn delete_box(&mut self, id: &str) -> bool {
        if self.boxes.len() == 1 {
            return false;
        }
        let Some(index) = self.position(id) else {
            return false;
        };
        self.boxes.remove(index);
        true
    }

    /// Replace the code of the box with identifier `id`.
    ///
    /// No-op when `id` does not exist. Returns whether a box was updated.
    pub fn update_code(&mut self, id: &str, code: impl Into<String>) -> bool {
        match self.boxes.iter_mut().find(|b| b.id == id) {
            Some(code_box) => {
                code_box.code = code.into();
                true
            }
            None => false,
        }
    }

    /// Replace the color of the box with identifier `id`.
    ///
    /// No-op when `id` does not exist. Returns whether a box was updated.
    pub fn update_color(&mut self, id: &str, color: BoxColor) -> bool {
        match self.boxes.iter_mut().find(|b| b.id == id) {
            Some(code_box) => {
                code_box.color = color;
                true
            }
            None => false,
        }
    }

    /// Move the box `active_id` to the position currently occupied by
    /// `over_id`, shifting intervening boxes.
    ///
    /// List-splice semantics: both indices are resolved against the
    /// pre-removal order, then the box is removed and reinserted at the
    /// target index. No-op when either identifier is missing or when they
    /// are equal. Returns whether the order changed.
    pub fn reorder(&mut self, active_id: &str, over_id: &str) -> bool {
        if active_id == over_id {
            return false;
        }
        let (Some(old_index), Some(new_index)) =
            (self.position(active_id), self.position(over_id))
        else {
            return false;
        };
        let moved = self.boxes.remove(old_index);
        self.boxes.insert(new_index, moved);
        true
    }

    /// Set the active color filter. Storage order and content are untouched.
    pub fn set_filter(&mut self, filter: Option<BoxColor>) {
        self.filter = filter;
    }

    /// Boxes matching the active filter, in storage order.
    ///
    /// A pure projection: it never reorders, duplicates, or mutates boxes.
    #[must_use]
    pub fn visible_boxes(&self) -> Vec<&CodeBox> {
        match self.filter {
            Some(color) => self.boxes_by_color(color),
            None => self.boxes.iter().collect(),
        }
    }

    /// All boxes tagged `color`, in storage order.
    #[must_use]
    pub fn boxes_by_color(&self, color: BoxColor) -> Vec<&CodeBox> {
        self.boxes.iter().filter(|b| b.color == color).collect()
    }

    /// Concatenate the code of every box tagged `color`, in storage order,
    /// joined with a blank-line separator.
    ///
    /// Ignores the active view filter: submission always targets an explicit
    /// color. Returns an empty string when no box matches.
    #[must_use]
    pub fn combined_code(&self, color: BoxColor) -> String {
        self.boxes
            .iter()
            .filter(|b| b.color == color)
            .map(|b| b.code.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.boxes.iter().position(|b| b.id == id)
    }
}

impl Default for BoxCollection {
    fn default() -> Self {
        Self::new()
    }
}
