use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Descriptor of one compendium pack, as listed by a [`PackSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackInfo {
    /// Unique pack id, e.g. "world.monsters".
    pub collection: String,
    /// Display title shown in the dialog.
    pub title: String,
}

/// One document inside a pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEntry {
    pub id: String,
    pub name: String,
    pub img: String,
}

/// Read-only view over a compendium library. Fetches are synchronous and
/// issued one at a time; callers cache results for the lifetime of a dialog,
/// the source itself does not.
pub trait PackSource {
    fn list_packs(&self) -> Result<Vec<PackInfo>>;
    fn get_documents(&self, collection: &str) -> Result<Vec<PackEntry>>;
}

// On-disk pack file layout.
#[derive(Debug, Deserialize)]
struct PackFile {
    collection: String,
    label: String,
    #[serde(default)]
    entries: Vec<PackFileEntry>,
}

#[derive(Debug, Deserialize)]
struct PackFileEntry {
    id: String,
    name: String,
    #[serde(default)]
    img: String,
}

/// Pack source backed by a directory of `*.json` pack files. The library may
/// be organized into subdirectories; the whole tree is scanned.
pub struct FolderSource {
    library: PathBuf,
}

impl FolderSource {
    pub fn new(library: PathBuf) -> Self {
        FolderSource { library }
    }

    fn pack_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for result in WalkDir::new(&self.library) {
            let dirent = match result {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("⚠️  Warning during library scan: {}", e);
                    continue;
                }
            };
            if !dirent.file_type().is_file() {
                continue;
            }
            let path = dirent.into_path();
            if path.extension() == Some(OsStr::new("json")) {
                files.push(path);
            }
        }
        files.sort();
        files
    }

    fn read_pack(path: &Path) -> Result<PackFile> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading pack file {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing pack file {}", path.display()))
    }
}

impl PackSource for FolderSource {
    fn list_packs(&self) -> Result<Vec<PackInfo>> {
        let mut packs = Vec::new();
        for path in self.pack_files() {
            match Self::read_pack(&path) {
                Ok(pack) => packs.push(PackInfo {
                    collection: pack.collection,
                    title: pack.label,
                }),
                Err(e) => eprintln!("⚠️  Warning: skipping {}: {:#}", path.display(), e),
            }
        }
        Ok(packs)
    }

    fn get_documents(&self, collection: &str) -> Result<Vec<PackEntry>> {
        for path in self.pack_files() {
            let Ok(pack) = Self::read_pack(&path) else {
                continue;
            };
            if pack.collection == collection {
                return Ok(pack
                    .entries
                    .into_iter()
                    .map(|e| PackEntry {
                        id: e.id,
                        name: e.name,
                        img: e.img,
                    })
                    .collect());
            }
        }
        bail!("compendium pack not found: {collection}");
    }
}

/// In-memory pack source, for tests and for embedding a fixed library.
#[derive(Default)]
pub struct InMemorySource {
    packs: Vec<(PackInfo, Vec<PackEntry>)>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pack(&mut self, collection: &str, title: &str, entries: Vec<PackEntry>) {
        self.packs.push((
            PackInfo {
                collection: collection.to_string(),
                title: title.to_string(),
            },
            entries,
        ));
    }
}

impl PackSource for InMemorySource {
    fn list_packs(&self) -> Result<Vec<PackInfo>> {
        Ok(self.packs.iter().map(|(info, _)| info.clone()).collect())
    }

    fn get_documents(&self, collection: &str) -> Result<Vec<PackEntry>> {
        self.packs
            .iter()
            .find(|(info, _)| info.collection == collection)
            .map(|(_, entries)| entries.clone())
            .ok_or_else(|| anyhow!("compendium pack not found: {collection}"))
    }
}

/// Packs are always presented in case-insensitive ascending title order.
pub fn sort_packs(packs: &mut [PackInfo]) {
    packs.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
}

/// Entries are always presented in case-insensitive ascending name order.
pub fn sort_entries(entries: &mut [PackEntry]) {
    entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}
