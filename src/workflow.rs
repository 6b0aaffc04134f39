use crate::cli::Cli;
use crate::compendium::{self, FolderSource, PackInfo, PackSource};
use crate::hooks::{self, Hooks};
use crate::settings::{self, DevLog, Settings};
use crate::store::{FolderStore, TableStore};
use crate::table::{self, SelectionEntry, build_roll_table};
use crate::tui::{self, DialogItem, DialogNode, PackContent, SelectionState};
use anyhow::{Result, bail};
use std::collections::HashSet;

// Main orchestrator for the tableforge application logic.
pub fn run_tableforge(cli_args: Cli) -> Result<()> {
    // Step 1: register settings. This runs once, before anything reads them.
    let mut app_settings = Settings::load();
    settings::register_settings(&mut app_settings);
    let dev = DevLog::new(cli_args.dev || app_settings.get_bool(settings::DEV_MODE)?);

    // Step 2: the compendium library and the table destination.
    let source = FolderSource::new(cli_args.library.clone());
    let store = FolderStore::new(cli_args.output.clone());

    // Step 3: dispatch to headless (--headless) mode or interactive TUI mode.
    if cli_args.headless {
        run_headless_mode(&source, &store, &dev, &cli_args)
    } else {
        run_interactive_mode(&source, &store, &dev, &cli_args)
    }
}

// Handles the --headless mode: import the packs given via --packs without
// showing the dialog.
fn run_headless_mode(
    source: &dyn PackSource,
    store: &dyn TableStore,
    dev: &DevLog,
    cli_args: &Cli,
) -> Result<()> {
    if cli_args.packs.is_empty() {
        bail!("--headless requires at least one pack via --packs");
    }
    let mut packs = resolve_packs(source, &cli_args.packs)?;
    compendium::sort_packs(&mut packs);
    dev.log(format!("Importing {} packs headlessly", packs.len()));

    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    for pack in &packs {
        append_pack_documents(source, &pack.collection, &mut entries, &mut seen)?;
    }

    let table_name = cli_args
        .name
        .clone()
        .unwrap_or_else(|| table::DEFAULT_TABLE_NAME.to_string());
    import_selected_entries(store, dev, entries, &table_name)
}

// Handles interactive TUI mode: run the directory screen and dialog, then
// materialize whatever the user confirmed.
fn run_interactive_mode(
    source: &dyn PackSource,
    store: &dyn TableStore,
    dev: &DevLog,
    cli_args: &Cli,
) -> Result<()> {
    let mut app_hooks = Hooks::new();
    hooks::register_default_hooks(&mut app_hooks);

    let existing_tables = store.list_tables()?;
    let initial_name = cli_args
        .name
        .clone()
        .unwrap_or_else(|| table::DEFAULT_TABLE_NAME.to_string());

    match tui::run_import_tui(
        source,
        &app_hooks,
        existing_tables,
        initial_name,
        cli_args.packs.clone(),
    )? {
        Some(request) => {
            dev.log(format!("Table name: {}", request.table_name));
            let entries = collect_selection(&request.items, source)?;
            import_selected_entries(store, dev, entries, &request.table_name)
        }
        None => {
            // User cancellation is a graceful exit; nothing was created.
            println!("Selection cancelled. No table was created.");
            Ok(())
        }
    }
}

// Resolve requested collections against the library, failing on unknowns.
fn resolve_packs(source: &dyn PackSource, collections: &[String]) -> Result<Vec<PackInfo>> {
    let available = source.list_packs()?;
    let mut resolved = Vec::new();
    for collection in collections {
        match available.iter().find(|p| &p.collection == collection) {
            Some(pack) => resolved.push(pack.clone()),
            None => bail!("compendium pack not found: {collection}"),
        }
    }
    Ok(resolved)
}

// Fetch a whole pack and append its documents, in presentation order,
// skipping anything already collected.
fn append_pack_documents(
    source: &dyn PackSource,
    collection: &str,
    entries: &mut Vec<SelectionEntry>,
    seen: &mut HashSet<(String, String)>,
) -> Result<()> {
    let mut documents = source.get_documents(collection)?;
    compendium::sort_entries(&mut documents);
    for document in documents {
        if seen.insert((collection.to_string(), document.id.clone())) {
            entries.push(SelectionEntry {
                pack: collection.to_string(),
                id: document.id,
                name: document.name,
                img: document.img,
            });
        }
    }
    Ok(())
}

/// Materialize a confirmed dialog tree: checked entries in tree order first,
/// then the full contents of every pack whose box was checked but whose
/// content was never loaded, fetched now and deduplicated by pack+id.
fn collect_selection(
    items: &[DialogItem],
    source: &dyn PackSource,
) -> Result<Vec<SelectionEntry>> {
    let mut entries = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for item in items {
        if let DialogNode::Entry { pack, id, img } = &item.node {
            if item.state == SelectionState::FullySelected
                && seen.insert((pack.clone(), id.clone()))
            {
                entries.push(SelectionEntry {
                    pack: pack.clone(),
                    id: id.clone(),
                    name: item.label.clone(),
                    img: img.clone(),
                });
            }
        }
    }

    for item in items {
        if let DialogNode::Pack {
            collection,
            content: PackContent::Unloaded,
        } = &item.node
        {
            if item.state == SelectionState::FullySelected {
                append_pack_documents(source, collection, &mut entries, &mut seen)?;
            }
        }
    }

    Ok(entries)
}

// Create the roll table and notify. The one mutation of the whole run.
fn import_selected_entries(
    store: &dyn TableStore,
    dev: &DevLog,
    entries: Vec<SelectionEntry>,
    table_name: &str,
) -> Result<()> {
    dev.log(format!("Importing {} selected entries...", entries.len()));
    let table = build_roll_table(table_name, &entries);
    store.create_table(&table)?;
    println!(
        "✅ Imported {} entries into a new rollable table named \"{}\".",
        entries.len(),
        table_name
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compendium::{InMemorySource, PackEntry};
    use crate::store::InMemoryStore;
    use std::path::PathBuf;

    fn entry(id: &str, name: &str) -> PackEntry {
        PackEntry {
            id: id.to_string(),
            name: name.to_string(),
            img: format!("icons/{id}.png"),
        }
    }

    fn pack_item(collection: &str, content: PackContent, state: SelectionState) -> DialogItem {
        DialogItem {
            label: collection.to_string(),
            node: DialogNode::Pack {
                collection: collection.to_string(),
                content,
            },
            is_expanded: false,
            state,
            children_indices: Vec::new(),
            parent_index: None,
        }
    }

    fn entry_item(pack: &str, id: &str, name: &str, state: SelectionState) -> DialogItem {
        DialogItem {
            label: name.to_string(),
            node: DialogNode::Entry {
                pack: pack.to_string(),
                id: id.to_string(),
                img: format!("icons/{id}.png"),
            },
            is_expanded: false,
            state,
            children_indices: Vec::new(),
            parent_index: Some(0),
        }
    }

    fn cli(packs: &[&str], name: Option<&str>, headless: bool) -> Cli {
        Cli {
            library: PathBuf::from("unused"),
            output: PathBuf::from("unused"),
            name: name.map(str::to_string),
            packs: packs.iter().map(|s| s.to_string()).collect(),
            headless,
            dev: false,
        }
    }

    #[test]
    fn confirm_collects_checked_entries_then_checked_unloaded_packs() {
        let mut source = InMemorySource::new();
        source.add_pack(
            "world.treasure",
            "Treasure",
            vec![entry("t2", "Silver"), entry("t1", "gold")],
        );

        // Pack A was expanded with 2 of 3 entries checked; pack B's box was
        // checked but B was never expanded.
        let items = vec![
            pack_item(
                "world.monsters",
                PackContent::Loaded,
                SelectionState::PartiallySelected,
            ),
            entry_item("world.monsters", "m1", "Goblin", SelectionState::FullySelected),
            entry_item("world.monsters", "m2", "Orc", SelectionState::NotSelected),
            entry_item("world.monsters", "m3", "Troll", SelectionState::FullySelected),
            pack_item(
                "world.treasure",
                PackContent::Unloaded,
                SelectionState::FullySelected,
            ),
        ];

        let entries = collect_selection(&items, &source).unwrap();
        assert_eq!(
            entries.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
            vec!["m1", "m3", "t1", "t2"]
        );

        let table = build_roll_table("Loot", &entries);
        assert_eq!(table.name, "Loot");
        assert_eq!(table.results.len(), 4);
        assert_eq!(table.formula, "1d4");
        for (index, result) in table.results.iter().enumerate() {
            let roll = index as u32 + 1;
            assert_eq!(result.range, (roll, roll));
        }
    }

    #[test]
    fn confirm_deduplicates_by_pack_and_id() {
        let mut source = InMemorySource::new();
        source.add_pack("world.treasure", "Treasure", vec![entry("t1", "Gold")]);

        // A stray checked entry row for t1 plus the whole (unloaded, checked)
        // pack must not produce the document twice.
        let items = vec![
            entry_item("world.treasure", "t1", "Gold", SelectionState::FullySelected),
            pack_item(
                "world.treasure",
                PackContent::Unloaded,
                SelectionState::FullySelected,
            ),
        ];

        let entries = collect_selection(&items, &source).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "t1");
    }

    #[test]
    fn checked_loaded_pack_contributes_only_its_checked_entries() {
        let source = InMemorySource::new();
        let items = vec![
            pack_item(
                "world.monsters",
                PackContent::Loaded,
                SelectionState::FullySelected,
            ),
            entry_item("world.monsters", "m1", "Goblin", SelectionState::FullySelected),
        ];

        // Loaded packs are never re-fetched at confirm time.
        let entries = collect_selection(&items, &source).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn zero_selection_creates_an_empty_degenerate_table() {
        let source = InMemorySource::new();
        let store = InMemoryStore::new();
        let dev = DevLog::new(false);

        let items = vec![pack_item(
            "world.monsters",
            PackContent::Unloaded,
            SelectionState::NotSelected,
        )];
        let entries = collect_selection(&items, &source).unwrap();
        import_selected_entries(&store, &dev, entries, "Empty").unwrap();

        let created = store.created();
        assert_eq!(created.len(), 1);
        assert!(created[0].results.is_empty());
        assert_eq!(created[0].formula, "1d0");
    }

    #[test]
    fn headless_mode_imports_requested_packs_in_title_order() {
        let mut source = InMemorySource::new();
        source.add_pack("world.b", "Zoo", vec![entry("b1", "Bear")]);
        source.add_pack("world.a", "Aviary", vec![entry("a1", "Crow")]);
        let store = InMemoryStore::new();
        let dev = DevLog::new(false);

        let cli_args = cli(&["world.b", "world.a"], Some("Beasts"), true);
        run_headless_mode(&source, &store, &dev, &cli_args).unwrap();

        let created = store.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "Beasts");
        assert_eq!(
            created[0]
                .results
                .iter()
                .map(|r| r.text.as_str())
                .collect::<Vec<_>>(),
            vec!["Crow", "Bear"]
        );
        assert_eq!(created[0].formula, "1d2");
    }

    #[test]
    fn headless_mode_rejects_unknown_collections() {
        let source = InMemorySource::new();
        let store = InMemoryStore::new();
        let dev = DevLog::new(false);

        let cli_args = cli(&["world.nope"], None, true);
        let err = run_headless_mode(&source, &store, &dev, &cli_args).unwrap_err();
        assert!(err.to_string().contains("world.nope"));
        assert!(store.created().is_empty());
    }

    #[test]
    fn headless_mode_requires_packs() {
        let source = InMemorySource::new();
        let store = InMemoryStore::new();
        let dev = DevLog::new(false);

        let cli_args = cli(&[], None, true);
        assert!(run_headless_mode(&source, &store, &dev, &cli_args).is_err());
    }
}
