use crate::TagId;

/// Tags attached to the draft, in the order they were switched on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSelection {
    ids: Vec<TagId>,
}

impl TagSelection {
    /// Switches `id` on if absent, off if present. Returns whether it is now
    /// selected.
    pub fn toggle(&mut self, id: TagId) -> bool {
        match self.ids.iter().position(|held| *held == id) {
            Some(pos) => {
                self.ids.remove(pos);
                false
            }
            None => {
                self.ids.push(id);
                true
            }
        }
    }

    pub fn contains(&self, id: &TagId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[TagId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl FromIterator<TagId> for TagSelection {
    /// Toggles each id in turn, so an id listed twice ends up deselected.
    fn from_iter<I: IntoIterator<Item = TagId>>(iter: I) -> Self {
        let mut selection = Self::default();
        for id in iter {
            selection.toggle(id);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_symmetric_difference() {
        let mut tags = TagSelection::default();
        assert!(tags.toggle(TagId::from(1_i64)));
        assert!(tags.toggle(TagId::from(2_i64)));
        assert!(!tags.toggle(TagId::from(1_i64)));
        assert_eq!(tags.ids(), [TagId::from(2_i64)]);
        assert!(!tags.toggle(TagId::from("2")));
        assert!(tags.is_empty());
    }

    #[test]
    fn collecting_keeps_toggle_order() {
        let tags: TagSelection = ["3", "1", "3", "4"].into_iter().map(TagId::from).collect();
        assert_eq!(tags.ids(), [TagId::from("1"), TagId::from("4")]);
    }
}
