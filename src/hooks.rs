/// What a toolbar action does when its key is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    OpenImportDialog,
}

/// One action surfaced in the table-directory toolbar.
#[derive(Debug, Clone)]
pub struct ToolbarAction {
    pub key: char,
    pub label: String,
    pub kind: ActionKind,
}

/// Registry of hooks into the table-directory screen. Modules register their
/// toolbar actions once at startup; the screen rebuilds its toolbar from the
/// registry on every frame, so insertion stays idempotent no matter how often
/// the view renders.
#[derive(Debug, Default)]
pub struct Hooks {
    directory_actions: Vec<ToolbarAction>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_table_directory(&mut self, action: ToolbarAction) {
        self.directory_actions.push(action);
    }

    pub fn directory_actions(&self) -> &[ToolbarAction] {
        &self.directory_actions
    }

    /// First registered action bound to `key`, if any. Later registrations on
    /// the same key stay listed but are unreachable.
    pub fn action_for_key(&self, key: char) -> Option<&ToolbarAction> {
        self.directory_actions.iter().find(|a| a.key == key)
    }
}

/// Register the actions tableforge itself contributes. Runs once at startup.
pub fn register_default_hooks(hooks: &mut Hooks) {
    hooks.on_table_directory(ToolbarAction {
        key: 'i',
        label: "Import Compendiums".to_string(),
        kind: ActionKind::OpenImportDialog,
    });
}
