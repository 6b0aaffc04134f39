use serde::Serialize;

/// Name used when the user never edits the table-name field.
pub const DEFAULT_TABLE_NAME: &str = "Imported Entries";

/// One checked entry, collected at confirm time. Lives only for the duration
/// of the import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub pack: String,
    pub id: String,
    pub name: String,
    pub img: String,
}

/// How a table result resolves when drawn. Imported entries always reference
/// back into their compendium pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Compendium,
}

/// One range-to-entry mapping within a roll table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableResult {
    #[serde(rename = "documentCollection")]
    pub document_collection: String,
    #[serde(rename = "documentId")]
    pub document_id: String,
    pub range: (u32, u32),
    pub text: String,
    pub img: String,
    #[serde(rename = "type")]
    pub kind: ResultKind,
}

/// A rollable table ready to hand to a table store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollTable {
    pub name: String,
    pub results: Vec<TableResult>,
    pub formula: String,
}

/// Map selection entries into a roll table. Entry `i` (0-based) occupies the
/// range `(i + 1, i + 1)`, so every result has width exactly 1, and the draw
/// formula rolls one die with as many faces as there are entries. An empty
/// selection yields the degenerate `1d0` formula; the table is still built.
pub fn build_roll_table(name: &str, entries: &[SelectionEntry]) -> RollTable {
    let results = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let roll = index as u32 + 1;
            TableResult {
                document_collection: entry.pack.clone(),
                document_id: entry.id.clone(),
                range: (roll, roll),
                text: entry.name.clone(),
                img: entry.img.clone(),
                kind: ResultKind::Compendium,
            }
        })
        .collect();
    RollTable {
        name: name.to_string(),
        results,
        formula: format!("1d{}", entries.len()),
    }
}
