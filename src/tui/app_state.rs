#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    NotSelected,
    PartiallySelected,
    FullySelected,
}

/// Lazy-load marker for a pack's entry list. Content moves from `Unloaded`
/// to `Loaded` on first expand (or not at all, if the user never expands the
/// pack) and never transitions back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackContent {
    Unloaded,
    Loaded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogNode {
    Pack {
        collection: String,
        content: PackContent,
    },
    Entry {
        pack: String,
        id: String,
        img: String,
    },
}

/// One row in the dialog's checkbox tree. Packs own `children_indices`;
/// entries point back through `parent_index`.
#[derive(Debug, Clone)]
pub struct DialogItem {
    pub label: String,
    pub node: DialogNode,
    pub is_expanded: bool,
    pub state: SelectionState,
    pub children_indices: Vec<usize>,
    pub parent_index: Option<usize>,
}

impl DialogItem {
    pub fn is_pack(&self) -> bool {
        matches!(self.node, DialogNode::Pack { .. })
    }

    pub fn pack_collection(&self) -> Option<&str> {
        match &self.node {
            DialogNode::Pack { collection, .. } => Some(collection),
            DialogNode::Entry { .. } => None,
        }
    }
}

/// Everything the workflow needs from a confirmed dialog.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub table_name: String,
    pub items: Vec<DialogItem>,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(super) enum AppMode {
    // pub(super) for use within tui module
    Normal,
    EditingName,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(super) enum Screen {
    Directory,
    Import,
}
