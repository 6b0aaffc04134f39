use super::app_state::{AppMode, DialogItem, DialogNode, PackContent, Screen, SelectionState};
use crate::compendium::{self, PackInfo, PackSource};
use crate::hooks::{ActionKind, Hooks};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

// --- Selection propagation helpers ---

/// Set an item's state and push it down to its (loaded) children. Entries
/// are leaves and can never be partially selected.
pub(super) fn apply_state_and_propagate_down(
    items: &mut [DialogItem],
    item_idx: usize,
    new_state: SelectionState,
) {
    if item_idx >= items.len() {
        return;
    }
    let actual_new_state =
        if !items[item_idx].is_pack() && new_state == SelectionState::PartiallySelected {
            SelectionState::FullySelected
        } else {
            new_state
        };
    items[item_idx].state = actual_new_state;
    if items[item_idx].is_pack() && actual_new_state != SelectionState::PartiallySelected {
        let children_indices = items[item_idx].children_indices.clone();
        for child_idx in children_indices {
            apply_state_and_propagate_down(items, child_idx, actual_new_state);
        }
    }
}

/// Recompute a pack's aggregate from its loaded entries. A pack without
/// children (unloaded, or genuinely empty) keeps whatever state was set on it
/// directly.
pub(super) fn recalculate_pack_state(items: &mut [DialogItem], pack_idx: usize) {
    if pack_idx >= items.len() || !items[pack_idx].is_pack() {
        return;
    }
    let children_indices = items[pack_idx].children_indices.clone();
    if children_indices.is_empty() {
        return;
    }

    let mut num_fully_selected = 0;
    let mut num_partially_selected = 0;
    for &child_idx in &children_indices {
        match items[child_idx].state {
            SelectionState::FullySelected => num_fully_selected += 1,
            SelectionState::PartiallySelected => num_partially_selected += 1,
            SelectionState::NotSelected => {}
        }
    }
    let total_children = children_indices.len();
    items[pack_idx].state = if num_fully_selected == total_children {
        SelectionState::FullySelected
    } else if num_fully_selected > 0 || num_partially_selected > 0 {
        SelectionState::PartiallySelected
    } else {
        SelectionState::NotSelected
    };
}

/// Recompute the global aggregate over every loaded entry. Entries inside
/// never-expanded packs do not exist yet and so never contribute; with no
/// loaded entries at all there is nothing to derive from and `None` is
/// returned so the caller keeps the directly-set state.
pub(super) fn recalculate_global_state(items: &[DialogItem]) -> Option<SelectionState> {
    let mut total = 0;
    let mut num_fully_selected = 0;
    let mut num_partially_selected = 0;
    for item in items.iter().filter(|item| !item.is_pack()) {
        total += 1;
        match item.state {
            SelectionState::FullySelected => num_fully_selected += 1,
            SelectionState::PartiallySelected => num_partially_selected += 1,
            SelectionState::NotSelected => {}
        }
    }
    if total == 0 {
        return None;
    }
    Some(if num_fully_selected == total {
        SelectionState::FullySelected
    } else if num_fully_selected > 0 || num_partially_selected > 0 {
        SelectionState::PartiallySelected
    } else {
        SelectionState::NotSelected
    })
}

/// Build the initial one-row-per-pack tree: collapsed, unloaded, unchecked.
pub(super) fn prepare_pack_items(packs: &[PackInfo]) -> Vec<DialogItem> {
    packs
        .iter()
        .map(|pack| DialogItem {
            label: pack.title.clone(),
            node: DialogNode::Pack {
                collection: pack.collection.clone(),
                content: PackContent::Unloaded,
            },
            is_expanded: false,
            state: SelectionState::NotSelected,
            children_indices: Vec::new(),
            parent_index: None,
        })
        .collect()
}

// --- DialogApp struct and impl ---

pub struct DialogApp<'a> {
    pub(super) source: &'a dyn PackSource,
    pub(super) hooks: &'a Hooks,
    pub(super) screen: Screen,
    pub(super) existing_tables: Vec<String>,
    pub(super) items: Vec<DialogItem>,
    pub(super) global_state: SelectionState,
    pub(super) current_selection_idx: usize,
    pub(super) scroll_offset: usize,
    pub(super) quit: bool,
    pub(super) confirmed: bool,
    pub(super) mode: AppMode,
    pub(super) table_name: String,
    pub(super) name_backup: String,
    pub(super) name_cursor_pos: usize,
    pub(super) list_viewport_height: usize,
    preselect: Vec<String>,
}

impl<'a> DialogApp<'a> {
    pub fn new(
        source: &'a dyn PackSource,
        hooks: &'a Hooks,
        existing_tables: Vec<String>,
        initial_name: String,
        preselect: Vec<String>,
    ) -> Self {
        DialogApp {
            source,
            hooks,
            screen: Screen::Directory,
            existing_tables,
            items: Vec::new(),
            global_state: SelectionState::NotSelected,
            current_selection_idx: 0,
            scroll_offset: 0,
            quit: false,
            confirmed: false,
            mode: AppMode::Normal,
            table_name: initial_name,
            name_backup: String::new(),
            name_cursor_pos: 0,
            list_viewport_height: 0, // Will be updated by ui_renderer
            preselect,
        }
    }

    /// Open the selection dialog: list the packs, sort them by title, and
    /// show one collapsed, unloaded row per pack. No entry content is fetched
    /// here; that happens per pack on first expand.
    pub(super) fn open_import_dialog(&mut self) -> Result<()> {
        let mut packs = self.source.list_packs()?;
        compendium::sort_packs(&mut packs);
        self.items = prepare_pack_items(&packs);

        if !self.preselect.is_empty() {
            for idx in 0..self.items.len() {
                let wanted = self.items[idx]
                    .pack_collection()
                    .is_some_and(|c| self.preselect.iter().any(|p| p == c));
                if wanted {
                    apply_state_and_propagate_down(
                        &mut self.items,
                        idx,
                        SelectionState::FullySelected,
                    );
                }
            }
            self.refresh_aggregates();
        }

        self.current_selection_idx = 0;
        self.scroll_offset = 0;
        self.screen = Screen::Import;
        Ok(())
    }

    /// Fetch a pack's documents and graft them into the tree as entry rows.
    /// Runs at most once per pack; afterwards the rows are cached for the
    /// dialog's remaining lifetime. Entries arriving while the pack's box is
    /// already checked start checked, keeping the pack aggregate equal to the
    /// conjunction of its children at the moment children come to exist.
    fn load_pack_content(&mut self, pack_idx: usize) -> Result<()> {
        let DialogNode::Pack {
            collection,
            content,
        } = &self.items[pack_idx].node
        else {
            return Ok(());
        };
        if *content == PackContent::Loaded {
            return Ok(());
        }
        let collection = collection.clone();

        let mut documents = self.source.get_documents(&collection)?;
        compendium::sort_entries(&mut documents);

        let initial_state = if self.items[pack_idx].state == SelectionState::FullySelected {
            SelectionState::FullySelected
        } else {
            SelectionState::NotSelected
        };

        let mut children_indices = Vec::with_capacity(documents.len());
        for document in documents {
            let child_idx = self.items.len();
            children_indices.push(child_idx);
            self.items.push(DialogItem {
                label: document.name,
                node: DialogNode::Entry {
                    pack: collection.clone(),
                    id: document.id,
                    img: document.img,
                },
                is_expanded: false,
                state: initial_state,
                children_indices: Vec::new(),
                parent_index: Some(pack_idx),
            });
        }
        self.items[pack_idx].children_indices = children_indices;
        self.items[pack_idx].node = DialogNode::Pack {
            collection,
            content: PackContent::Loaded,
        };
        self.refresh_aggregates();
        Ok(())
    }

    /// Recompute every derived aggregate from the leaves up. Called after
    /// every mutation of the tree; the rendered checkboxes are a pure
    /// projection of the states set here.
    pub(super) fn refresh_aggregates(&mut self) {
        for idx in 0..self.items.len() {
            if self.items[idx].is_pack() {
                recalculate_pack_state(&mut self.items, idx);
            }
        }
        if let Some(state) = recalculate_global_state(&self.items) {
            self.global_state = state;
        }
    }

    pub(super) fn select_next_visible_item(&mut self) {
        self.move_selection_in_visible_list(1);
    }

    pub(super) fn select_previous_visible_item(&mut self) {
        self.move_selection_in_visible_list(-1);
    }

    pub(super) fn move_selection_in_visible_list(&mut self, delta: i32) {
        if self.items.is_empty() {
            return;
        }
        let visible_indices = self.get_visible_item_indices();
        if visible_indices.is_empty() {
            return;
        }

        let current_position = visible_indices
            .iter()
            .position(|&idx| idx == self.current_selection_idx);

        let new_idx_in_visible_list = match current_position {
            Some(pos) => (pos as i32 + delta).rem_euclid(visible_indices.len() as i32) as usize,
            None => {
                if delta > 0 {
                    0
                } else {
                    visible_indices.len() - 1
                }
            }
        };
        self.current_selection_idx = visible_indices[new_idx_in_visible_list];
    }

    pub(super) fn toggle_current_item_selection(&mut self) {
        if self.items.is_empty() || self.current_selection_idx >= self.items.len() {
            return;
        }
        let item_idx = self.current_selection_idx;
        let new_state_for_item = match self.items[item_idx].state {
            SelectionState::NotSelected | SelectionState::PartiallySelected => {
                SelectionState::FullySelected
            }
            SelectionState::FullySelected => SelectionState::NotSelected,
        };
        apply_state_and_propagate_down(&mut self.items, item_idx, new_state_for_item);
        self.refresh_aggregates();
    }

    /// Global select-all: every pack box and every loaded entry takes the
    /// target state. Unloaded packs are checked but never loaded here; their
    /// content is materialized at confirm time.
    pub(super) fn apply_global_selection(&mut self, target: SelectionState) {
        for idx in 0..self.items.len() {
            if self.items[idx].is_pack() {
                apply_state_and_propagate_down(&mut self.items, idx, target);
            }
        }
        self.global_state = target;
        self.refresh_aggregates();
    }

    pub(super) fn select_all_items(&mut self) {
        self.apply_global_selection(SelectionState::FullySelected);
    }

    pub(super) fn deselect_all_items(&mut self) {
        self.apply_global_selection(SelectionState::NotSelected);
    }

    pub(super) fn toggle_expansion_and_adjust_selection(&mut self) -> Result<()> {
        if self.items.is_empty() || self.current_selection_idx >= self.items.len() {
            return Ok(());
        }
        let item_idx = self.current_selection_idx;
        if self.items[item_idx].is_pack() {
            if !self.items[item_idx].is_expanded {
                self.load_pack_content(item_idx)?;
            }
            self.items[item_idx].is_expanded = !self.items[item_idx].is_expanded;
            self.ensure_selection_is_visible();
        }
        Ok(())
    }

    pub(super) fn get_visible_item_indices(&self) -> Vec<usize> {
        (0..self.items.len())
            .filter(|&idx| self.is_item_visible_recursive(idx))
            .collect()
    }

    pub(super) fn is_item_visible_recursive(&self, item_idx: usize) -> bool {
        if item_idx >= self.items.len() {
            return false;
        }
        match self.items[item_idx].parent_index {
            None => true,
            Some(parent_idx) => {
                self.items[parent_idx].is_expanded && self.is_item_visible_recursive(parent_idx)
            }
        }
    }

    pub(super) fn ensure_selection_is_visible_in_viewport(&mut self) {
        if self.items.is_empty() || self.list_viewport_height == 0 {
            return;
        }
        let visible_indices = self.get_visible_item_indices();
        if visible_indices.is_empty() {
            self.scroll_offset = 0;
            return;
        }

        let list_height = self.list_viewport_height;
        let current_position = visible_indices
            .iter()
            .position(|&idx| idx == self.current_selection_idx);

        if let Some(pos) = current_position {
            if pos < self.scroll_offset {
                self.scroll_offset = pos;
            } else if pos >= self.scroll_offset + list_height {
                self.scroll_offset = pos.saturating_sub(list_height - 1);
            }
        } else {
            self.current_selection_idx = *visible_indices.first().unwrap_or(&0);
            self.scroll_offset = 0;
        }

        let num_visible_items = visible_indices.len();
        if num_visible_items <= list_height {
            self.scroll_offset = 0;
        } else {
            self.scroll_offset = self.scroll_offset.min(num_visible_items - list_height);
        }
    }

    pub(super) fn ensure_selection_is_visible(&mut self) {
        if self.items.is_empty() {
            return;
        }
        if self.is_item_visible_recursive(self.current_selection_idx) {
            self.ensure_selection_is_visible_in_viewport();
            return;
        }
        // Selection got hidden by a collapse; fall back to its pack.
        if let Some(parent_idx) = self
            .items
            .get(self.current_selection_idx)
            .and_then(|item| item.parent_index)
        {
            self.current_selection_idx = parent_idx;
        }
        self.ensure_selection_is_visible_in_viewport();
    }

    // --- Event handling sub-methods ---

    pub(super) fn handle_directory_input(&mut self, key_event: KeyEvent) -> Result<()> {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char(c) => {
                if let Some(action) = self.hooks.action_for_key(c) {
                    match action.kind {
                        ActionKind::OpenImportDialog => self.open_import_dialog()?,
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub(super) fn handle_normal_mode_input(&mut self, key_event: KeyEvent) -> Result<()> {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('y') => {
                self.confirmed = true;
                self.quit = true;
            }
            KeyCode::Down | KeyCode::Char('j') => self.select_next_visible_item(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous_visible_item(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_current_item_selection(),
            KeyCode::Tab | KeyCode::Char('o') => self.toggle_expansion_and_adjust_selection()?,
            KeyCode::Char('a') => self.select_all_items(),
            KeyCode::Char('d') => self.deselect_all_items(),
            KeyCode::Char('n') => {
                self.mode = AppMode::EditingName;
                self.name_backup = self.table_name.clone();
                self.name_cursor_pos = self.table_name.len();
            }
            _ => {}
        }
        Ok(())
    }

    pub(super) fn handle_name_mode_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
            }
            KeyCode::Esc => {
                self.table_name = self.name_backup.clone();
                self.name_cursor_pos = self.table_name.len();
                self.mode = AppMode::Normal;
            }
            KeyCode::Char(c) => {
                self.table_name.insert(self.name_cursor_pos, c);
                self.name_cursor_pos += c.len_utf8();
            }
            KeyCode::Backspace => {
                if let Some(prev) = self.table_name[..self.name_cursor_pos].chars().next_back() {
                    self.name_cursor_pos -= prev.len_utf8();
                    self.table_name.remove(self.name_cursor_pos);
                }
            }
            KeyCode::Left => {
                if let Some(prev) = self.table_name[..self.name_cursor_pos].chars().next_back() {
                    self.name_cursor_pos -= prev.len_utf8();
                }
            }
            KeyCode::Right => {
                if let Some(next) = self.table_name[self.name_cursor_pos..].chars().next() {
                    self.name_cursor_pos += next.len_utf8();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compendium::{InMemorySource, PackEntry};
    use crate::hooks::{Hooks, register_default_hooks};
    use crossterm::event::{KeyEvent, KeyModifiers};
    use std::cell::RefCell;

    fn entry(id: &str, name: &str) -> PackEntry {
        PackEntry {
            id: id.to_string(),
            name: name.to_string(),
            img: format!("icons/{id}.png"),
        }
    }

    fn test_source() -> InMemorySource {
        let mut source = InMemorySource::new();
        source.add_pack(
            "world.monsters",
            "Monsters",
            vec![entry("m1", "Troll"), entry("m2", "goblin"), entry("m3", "Orc")],
        );
        source.add_pack("world.items", "items", vec![entry("i1", "Rope")]);
        source
    }

    fn open_app<'a>(source: &'a dyn PackSource, hooks: &'a Hooks) -> DialogApp<'a> {
        let mut app = DialogApp::new(
            source,
            hooks,
            Vec::new(),
            "Imported Entries".to_string(),
            Vec::new(),
        );
        app.open_import_dialog().unwrap();
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Pack source that counts fetches, for the loaded-exactly-once property.
    struct CountingSource {
        inner: InMemorySource,
        fetches: RefCell<usize>,
    }

    impl PackSource for CountingSource {
        fn list_packs(&self) -> Result<Vec<PackInfo>> {
            self.inner.list_packs()
        }

        fn get_documents(&self, collection: &str) -> Result<Vec<PackEntry>> {
            *self.fetches.borrow_mut() += 1;
            self.inner.get_documents(collection)
        }
    }

    #[test]
    fn open_sorts_packs_and_fetches_no_content() {
        let source = test_source();
        let hooks = Hooks::new();
        let app = open_app(&source, &hooks);

        // Case-insensitive title order: "items" before "Monsters".
        assert_eq!(app.items.len(), 2);
        assert_eq!(app.items[0].label, "items");
        assert_eq!(app.items[1].label, "Monsters");
        for item in &app.items {
            assert!(!item.is_expanded);
            assert!(matches!(
                item.node,
                DialogNode::Pack {
                    content: PackContent::Unloaded,
                    ..
                }
            ));
        }
    }

    #[test]
    fn expanding_a_pack_fetches_exactly_once() {
        let source = CountingSource {
            inner: test_source(),
            fetches: RefCell::new(0),
        };
        let hooks = Hooks::new();
        let mut app = open_app(&source, &hooks);

        app.current_selection_idx = 1; // Monsters
        app.toggle_expansion_and_adjust_selection().unwrap();
        assert_eq!(*source.fetches.borrow(), 1);
        assert_eq!(app.items.len(), 5);
        // Entries sorted case-insensitively by name.
        assert_eq!(app.items[2].label, "goblin");
        assert_eq!(app.items[3].label, "Orc");
        assert_eq!(app.items[4].label, "Troll");

        // Collapse and re-expand: cached, no re-fetch, no duplicate rows.
        app.current_selection_idx = 1;
        app.toggle_expansion_and_adjust_selection().unwrap();
        assert!(!app.items[1].is_expanded);
        assert_eq!(app.items.len(), 5);
        app.toggle_expansion_and_adjust_selection().unwrap();
        assert!(app.items[1].is_expanded);
        assert_eq!(*source.fetches.borrow(), 1);
        assert_eq!(app.items.len(), 5);
    }

    #[test]
    fn entry_toggles_keep_pack_aggregate_derived() {
        let source = test_source();
        let hooks = Hooks::new();
        let mut app = open_app(&source, &hooks);

        app.current_selection_idx = 1;
        app.toggle_expansion_and_adjust_selection().unwrap();

        app.current_selection_idx = 2;
        app.toggle_current_item_selection();
        assert_eq!(app.items[1].state, SelectionState::PartiallySelected);
        assert_eq!(app.global_state, SelectionState::PartiallySelected);

        app.current_selection_idx = 3;
        app.toggle_current_item_selection();
        app.current_selection_idx = 4;
        app.toggle_current_item_selection();
        assert_eq!(app.items[1].state, SelectionState::FullySelected);

        app.current_selection_idx = 4;
        app.toggle_current_item_selection();
        assert_eq!(app.items[1].state, SelectionState::PartiallySelected);
    }

    #[test]
    fn pack_toggle_sets_all_loaded_entries() {
        let source = test_source();
        let hooks = Hooks::new();
        let mut app = open_app(&source, &hooks);

        app.current_selection_idx = 1;
        app.toggle_expansion_and_adjust_selection().unwrap();
        app.toggle_current_item_selection();
        for idx in 2..5 {
            assert_eq!(app.items[idx].state, SelectionState::FullySelected);
        }

        app.toggle_current_item_selection();
        for idx in 2..5 {
            assert_eq!(app.items[idx].state, SelectionState::NotSelected);
        }
    }

    #[test]
    fn global_select_all_checks_packs_without_loading_them() {
        let source = CountingSource {
            inner: test_source(),
            fetches: RefCell::new(0),
        };
        let hooks = Hooks::new();
        let mut app = open_app(&source, &hooks);

        app.select_all_items();
        assert_eq!(*source.fetches.borrow(), 0);
        assert_eq!(app.items[0].state, SelectionState::FullySelected);
        assert_eq!(app.items[1].state, SelectionState::FullySelected);
        assert_eq!(app.global_state, SelectionState::FullySelected);

        app.deselect_all_items();
        assert_eq!(app.items[0].state, SelectionState::NotSelected);
        assert_eq!(app.global_state, SelectionState::NotSelected);
    }

    #[test]
    fn unloaded_packs_never_affect_the_global_aggregate() {
        let source = test_source();
        let hooks = Hooks::new();
        let mut app = open_app(&source, &hooks);

        // Load Monsters and check every entry; leave "items" untouched and
        // unloaded. The global aggregate only sees loaded entries.
        app.current_selection_idx = 1;
        app.toggle_expansion_and_adjust_selection().unwrap();
        app.toggle_current_item_selection();
        assert_eq!(app.global_state, SelectionState::FullySelected);

        // Checking the unloaded pack's box does not change that either.
        app.current_selection_idx = 0;
        app.toggle_current_item_selection();
        assert_eq!(app.items[0].state, SelectionState::FullySelected);
        app.toggle_current_item_selection();
        assert_eq!(app.items[0].state, SelectionState::NotSelected);
        assert_eq!(app.global_state, SelectionState::FullySelected);
    }

    #[test]
    fn entries_loaded_into_a_checked_pack_start_checked() {
        let source = test_source();
        let hooks = Hooks::new();
        let mut app = open_app(&source, &hooks);

        app.current_selection_idx = 1;
        app.toggle_current_item_selection();
        assert_eq!(app.items[1].state, SelectionState::FullySelected);

        app.toggle_expansion_and_adjust_selection().unwrap();
        for idx in 2..5 {
            assert_eq!(app.items[idx].state, SelectionState::FullySelected);
        }
        assert_eq!(app.items[1].state, SelectionState::FullySelected);
        assert_eq!(app.global_state, SelectionState::FullySelected);
    }

    #[test]
    fn collapse_hides_entries_without_discarding_state() {
        let source = test_source();
        let hooks = Hooks::new();
        let mut app = open_app(&source, &hooks);

        app.current_selection_idx = 1;
        app.toggle_expansion_and_adjust_selection().unwrap();
        app.current_selection_idx = 2;
        app.toggle_current_item_selection();

        app.current_selection_idx = 1;
        app.toggle_expansion_and_adjust_selection().unwrap();
        let visible = app.get_visible_item_indices();
        assert_eq!(visible, vec![0, 1]);
        assert_eq!(app.items[2].state, SelectionState::FullySelected);
    }

    #[test]
    fn preselected_collections_start_checked() {
        let source = test_source();
        let hooks = Hooks::new();
        let mut app = DialogApp::new(
            &source,
            &hooks,
            Vec::new(),
            "Imported Entries".to_string(),
            vec!["world.items".to_string()],
        );
        app.open_import_dialog().unwrap();

        assert_eq!(app.items[0].state, SelectionState::FullySelected);
        assert_eq!(app.items[1].state, SelectionState::NotSelected);
    }

    #[test]
    fn name_editing_applies_on_enter_and_reverts_on_esc() {
        let source = test_source();
        let hooks = Hooks::new();
        let mut app = open_app(&source, &hooks);

        app.handle_normal_mode_input(key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.mode, AppMode::EditingName);
        for _ in 0.."Imported Entries".len() {
            app.handle_name_mode_input(key(KeyCode::Backspace));
        }
        for c in "Loot".chars() {
            app.handle_name_mode_input(key(KeyCode::Char(c)));
        }
        app.handle_name_mode_input(key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.table_name, "Loot");

        app.handle_normal_mode_input(key(KeyCode::Char('n'))).unwrap();
        app.handle_name_mode_input(key(KeyCode::Char('x')));
        app.handle_name_mode_input(key(KeyCode::Esc));
        assert_eq!(app.table_name, "Loot");
    }

    #[test]
    fn quit_without_confirm_is_a_cancel() {
        let source = test_source();
        let hooks = Hooks::new();
        let mut app = open_app(&source, &hooks);

        app.handle_normal_mode_input(key(KeyCode::Char('q'))).unwrap();
        assert!(app.quit);
        assert!(!app.confirmed);
    }

    #[test]
    fn directory_screen_opens_the_dialog_through_the_hook() {
        let source = test_source();
        let mut hooks = Hooks::new();
        register_default_hooks(&mut hooks);
        let mut app = DialogApp::new(
            &source,
            &hooks,
            vec!["Old Loot".to_string()],
            "Imported Entries".to_string(),
            Vec::new(),
        );

        assert_eq!(app.screen, Screen::Directory);
        app.handle_directory_input(key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.screen, Screen::Directory);
        app.handle_directory_input(key(KeyCode::Char('i'))).unwrap();
        assert_eq!(app.screen, Screen::Import);
        assert_eq!(app.items.len(), 2);
    }
}
