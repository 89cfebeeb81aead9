//! Suggestion items and the selection set
//!
//! The selection set holds names rather than ids, so removing an item has
//! to drop its name from the set in the same call.

/// Identifier of an item, unique within its list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

/// Where an item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOrigin {
    /// Returned by the suggestion service
    Fetched,
    /// Typed in by the user; survives later fetches
    Manual,
}

/// One selectable suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionItem {
    pub id: ItemId,
    pub name: String,
    /// Mirrors membership of `name` in the selection set
    pub selected: bool,
    pub origin: ItemOrigin,
}

/// Displayed items plus the ordered set of selected names
#[derive(Debug, Clone, Default)]
pub struct SuggestionList {
    items: Vec<SuggestionItem>,
    selection: Vec<String>,
    next_id: u64,
}

impl SuggestionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SuggestionItem] {
        &self.items
    }

    /// Selected names in the order they were selected
    pub fn selected(&self) -> &[String] {
        &self.selection
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selection.iter().any(|selected| selected == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace fetched items with a fresh response
    ///
    /// Manual items are kept after the fetched ones. Selections whose name
    /// no longer appears are dropped.
    pub fn replace_fetched(&mut self, names: Vec<String>) {
        let manual: Vec<SuggestionItem> = self
            .items
            .drain(..)
            .filter(|item| item.origin == ItemOrigin::Manual)
            .collect();

        let mut items = Vec::with_capacity(names.len() + manual.len());
        for name in names {
            let id = self.allocate_id();
            items.push(SuggestionItem {
                id,
                name,
                selected: false,
                origin: ItemOrigin::Fetched,
            });
        }
        items.extend(manual);
        self.items = items;

        let items = &self.items;
        self.selection
            .retain(|name| items.iter().any(|item| &item.name == name));
        self.sync_flags();
    }

    /// Flip selection of `name`. Returns whether it is now selected.
    ///
    /// Names that are not in the list are ignored.
    pub fn toggle(&mut self, name: &str) -> bool {
        if !self.contains(name) {
            return false;
        }

        let now_selected = if let Some(pos) = self.selection.iter().position(|n| n == name) {
            self.selection.remove(pos);
            false
        } else {
            self.selection.push(name.to_string());
            true
        };
        self.sync_flags();
        now_selected
    }

    /// Append a user-typed item, selected. Blank input is ignored.
    pub fn add_manual(&mut self, name: &str) -> Option<ItemId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let id = self.allocate_id();
        self.items.push(SuggestionItem {
            id,
            name: name.to_string(),
            selected: true,
            origin: ItemOrigin::Manual,
        });
        if !self.is_selected(name) {
            self.selection.push(name.to_string());
        }
        self.sync_flags();
        Some(id)
    }

    /// Remove every item called `name` and its selection entry
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.name != name);
        self.selection.retain(|selected| selected != name);
        self.items.len() != before
    }

    pub fn clear_all(&mut self) {
        self.items.clear();
        self.selection.clear();
    }

    fn allocate_id(&mut self) -> ItemId {
        self.next_id += 1;
        ItemId(self.next_id)
    }

    fn sync_flags(&mut self) {
        let selection = &self.selection;
        for item in &mut self.items {
            item.selected = selection.iter().any(|name| name == &item.name);
        }
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod item_tests;
