use crate::table::RollTable;
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

/// Destination for created roll tables. `list_tables` feeds the directory
/// screen; `create_table` is the one mutation this tool ever performs.
pub trait TableStore {
    fn create_table(&self, table: &RollTable) -> Result<()>;
    fn list_tables(&self) -> Result<Vec<String>>;
}

/// Table store backed by a directory of `*.json` table documents, one file
/// per table, named after a slug of the table name. Creating a table whose
/// slug already exists overwrites the previous document.
pub struct FolderStore {
    output: PathBuf,
}

impl FolderStore {
    pub fn new(output: PathBuf) -> Self {
        FolderStore { output }
    }
}

impl TableStore for FolderStore {
    fn create_table(&self, table: &RollTable) -> Result<()> {
        fs::create_dir_all(&self.output)
            .with_context(|| format!("creating output directory {}", self.output.display()))?;
        let path = self.output.join(format!("{}.json", slugify(&table.name)));
        let json = serde_json::to_string_pretty(table)?;
        fs::write(&path, json).with_context(|| format!("writing table {}", path.display()))?;
        Ok(())
    }

    fn list_tables(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let Ok(dir) = fs::read_dir(&self.output) else {
            // No output directory yet means no tables.
            return Ok(names);
        };
        for dirent in dir.flatten() {
            let path = dirent.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Ok(text) = fs::read_to_string(&path) else {
                continue;
            };
            match serde_json::from_str::<serde_json::Value>(&text) {
                Ok(value) => {
                    let name = value
                        .get("name")
                        .and_then(|n| n.as_str())
                        .map(str::to_string)
                        .or_else(|| {
                            path.file_stem().map(|s| s.to_string_lossy().into_owned())
                        });
                    if let Some(name) = name {
                        names.push(name);
                    }
                }
                Err(e) => eprintln!("⚠️  Warning: skipping {}: {}", path.display(), e),
            }
        }
        names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
        Ok(names)
    }
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("table");
    }
    slug
}

/// In-memory table store, for tests. Records every created table.
#[derive(Default)]
pub struct InMemoryStore {
    created: RefCell<Vec<RollTable>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> Vec<RollTable> {
        self.created.borrow().clone()
    }
}

impl TableStore for InMemoryStore {
    fn create_table(&self, table: &RollTable) -> Result<()> {
        self.created.borrow_mut().push(table.clone());
        Ok(())
    }

    fn list_tables(&self) -> Result<Vec<String>> {
        Ok(self.created.borrow().iter().map(|t| t.name.clone()).collect())
    }
}
