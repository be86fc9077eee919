//! Directory-backed store.
//!
//! Layout of a store directory:
//! - `manifest.json`: format version, material, publish generation, and the live collections
//!   with their file names and record counts.
//! - `<collection>.g<generation>.txt`: one record per line (see [`crate::store::record`]).
//!
//! Staged copies are written straight to fresh generation-suffixed files. Publishing syncs them,
//! then replaces `manifest.json` via rename; that rename is the commit point. A collection is
//! visible only once the manifest lists it, so an interrupted pass leaves the previous state
//! intact and the orphaned files are removed on the next [`DirStore::open`].

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::position::Position;
use crate::error::{Result, TablebaseError};
use crate::store::record::Record;
use crate::store::{CollectionId, PositionScan, PositionStore};

const FORMAT_VERSION: u32 = 1;
const MATERIAL: &str = "KHK";
const MANIFEST_FILENAME: &str = "manifest.json";
const MANIFEST_TMP_FILENAME: &str = "manifest.json.tmp";
const RECORD_EXTENSION: &str = "txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreManifest {
    pub format_version: u32,
    pub material: String,
    /// Incremented by every publish.
    pub generation: u64,
    pub collections: Vec<CollectionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub id: CollectionId,
    pub file: String,
    pub records: usize,
}

impl StoreManifest {
    fn empty() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            material: MATERIAL.to_string(),
            generation: 0,
            collections: Vec::new(),
        }
    }

    pub fn entry(&self, id: CollectionId) -> Option<&CollectionEntry> {
        self.collections.iter().find(|e| e.id == id)
    }
}

#[derive(Debug)]
struct StagedCollection {
    file: String,
    path: PathBuf,
    writer: BufWriter<File>,
    records: usize,
}

impl StagedCollection {
    /// Flushes and syncs the file, returning the record count.
    fn finish(self) -> Result<(String, usize)> {
        let path = self.path.display().to_string();
        let file = self.writer.into_inner().map_err(|e| TablebaseError::Io {
            stage: "dir_publish_flush",
            path: path.clone(),
            source: e.into_error(),
        })?;
        file.sync_all().map_err(|source| TablebaseError::Io {
            stage: "dir_publish_sync",
            path,
            source,
        })?;
        Ok((self.file, self.records))
    }
}

#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
    manifest: StoreManifest,
    staged: FxHashMap<CollectionId, StagedCollection>,
}

impl DirStore {
    /// Opens (or creates) a store in `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|source| TablebaseError::Io {
            stage: "dir_open_create",
            path: root.display().to_string(),
            source,
        })?;

        let manifest_path = root.join(MANIFEST_FILENAME);
        let manifest = if manifest_path.exists() {
            let manifest = read_manifest(&manifest_path)?;
            if manifest.format_version != FORMAT_VERSION || manifest.material != MATERIAL {
                return Err(TablebaseError::Invariant {
                    stage: "dir_open",
                    detail: format!(
                        "{} holds format {} for {}, expected format {FORMAT_VERSION} for {MATERIAL}",
                        manifest_path.display(),
                        manifest.format_version,
                        manifest.material
                    ),
                });
            }
            manifest
        } else {
            let manifest = StoreManifest::empty();
            write_manifest(&root, &manifest)?;
            manifest
        };

        let store = Self {
            root,
            manifest,
            staged: FxHashMap::default(),
        };
        store.remove_orphans()?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &StoreManifest {
        &self.manifest
    }

    /// Deletes record files the manifest does not reference (left behind by an interrupted
    /// pass or by an earlier publish).
    fn remove_orphans(&self) -> Result<()> {
        let entries = fs::read_dir(&self.root).map_err(|source| TablebaseError::Io {
            stage: "dir_open_list",
            path: self.root.display().to_string(),
            source,
        })?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if self.manifest.collections.iter().any(|e| e.file == name) {
                continue;
            }
            warn!(file = %path.display(), "removing record file not listed in the manifest");
            if let Err(e) = fs::remove_file(&path) {
                warn!(file = %path.display(), error = %e, "could not remove orphaned record file");
            }
        }
        Ok(())
    }

    fn stage(&mut self, id: CollectionId) -> Result<&mut StagedCollection> {
        if !self.staged.contains_key(&id) {
            let file = format!(
                "{id}.g{}.{RECORD_EXTENSION}",
                self.manifest.generation + 1
            );
            let path = self.root.join(&file);
            let f = File::create(&path).map_err(|source| TablebaseError::Io {
                stage: "dir_stage_create",
                path: path.display().to_string(),
                source,
            })?;
            self.staged.insert(
                id,
                StagedCollection {
                    file,
                    path,
                    writer: BufWriter::new(f),
                    records: 0,
                },
            );
        }
        self.staged
            .get_mut(&id)
            .ok_or_else(|| TablebaseError::Invariant {
                stage: "dir_stage",
                detail: format!("staged copy of {id} vanished"),
            })
    }

    fn path_of(&self, id: CollectionId, stage: &'static str) -> Result<PathBuf> {
        self.manifest
            .entry(id)
            .map(|e| self.root.join(&e.file))
            .ok_or_else(|| TablebaseError::MissingCollection {
                stage,
                collection: id.to_string(),
            })
    }
}

impl PositionStore for DirStore {
    fn exists(&self, id: CollectionId) -> bool {
        self.manifest.entry(id).is_some()
    }

    fn scan(&self, id: CollectionId) -> Result<PositionScan<'_>> {
        let path = self.path_of(id, "dir_scan")?;
        let expected = self.manifest.entry(id).map_or(0, |e| e.records);
        let f = File::open(&path).map_err(|source| TablebaseError::Io {
            stage: "dir_scan_open",
            path: path.display().to_string(),
            source,
        })?;

        Ok(Box::new(RecordScan {
            lines: BufReader::new(f).lines(),
            collection: id.to_string(),
            path: path.display().to_string(),
            expected,
            read: 0,
            done: false,
        }))
    }

    fn append(&mut self, id: CollectionId, position: Position) -> Result<()> {
        let staged = self.stage(id)?;
        writeln!(staged.writer, "{}", Record(position)).map_err(|source| TablebaseError::Io {
            stage: "dir_append",
            path: staged.path.display().to_string(),
            source,
        })?;
        staged.records += 1;
        Ok(())
    }

    fn publish(&mut self, ids: &[CollectionId]) -> Result<()> {
        let mut published: Vec<CollectionEntry> = Vec::with_capacity(ids.len());
        for &id in ids {
            self.stage(id)?;
            let Some(staged) = self.staged.remove(&id) else {
                continue;
            };
            let (file, records) = staged.finish()?;
            published.push(CollectionEntry { id, file, records });
        }

        let mut manifest = self.manifest.clone();
        manifest.generation += 1;
        let mut superseded: Vec<String> = Vec::new();
        for entry in published {
            match manifest.collections.iter_mut().find(|e| e.id == entry.id) {
                Some(old) => superseded.push(std::mem::replace(old, entry).file),
                None => manifest.collections.push(entry),
            }
        }
        manifest.collections.sort_by_key(|e| e.id);

        write_manifest(&self.root, &manifest)?;
        self.manifest = manifest;
        debug!(
            generation = self.manifest.generation,
            collections = ?ids,
            "published collections"
        );

        for file in superseded {
            let path = self.root.join(&file);
            if let Err(e) = fs::remove_file(&path) {
                warn!(file = %path.display(), error = %e, "could not remove superseded record file");
            }
        }
        Ok(())
    }

    fn discard(&mut self) -> Result<()> {
        for (_, staged) in self.staged.drain() {
            drop(staged.writer);
            if let Err(e) = fs::remove_file(&staged.path) {
                warn!(file = %staged.path.display(), error = %e, "could not remove staged record file");
            }
        }
        Ok(())
    }

    fn count(&self, id: CollectionId) -> Result<usize> {
        self.manifest
            .entry(id)
            .map(|e| e.records)
            .ok_or_else(|| TablebaseError::MissingCollection {
                stage: "dir_count",
                collection: id.to_string(),
            })
    }

    fn depths(&self) -> Vec<u32> {
        // The manifest is kept sorted by id, and depths sort before the frontier.
        self.manifest
            .collections
            .iter()
            .filter_map(|e| match e.id {
                CollectionId::Depth(n) => Some(n),
                CollectionId::Undecided => None,
            })
            .collect()
    }
}

/// Decodes a record file line by line. Every line must be a record, and the file must hold
/// exactly the number of records the manifest lists for it.
struct RecordScan {
    lines: Lines<BufReader<File>>,
    collection: String,
    path: String,
    expected: usize,
    read: usize,
    done: bool,
}

impl RecordScan {
    fn malformed(&mut self, line: usize, reason: String) -> Option<Result<Position>> {
        self.done = true;
        Some(Err(TablebaseError::MalformedRecord {
            collection: self.collection.clone(),
            line,
            reason,
        }))
    }
}

impl Iterator for RecordScan {
    type Item = Result<Position>;

    fn next(&mut self) -> Option<Result<Position>> {
        if self.done {
            return None;
        }
        let line = match self.lines.next() {
            Some(Ok(line)) => line,
            Some(Err(source)) => {
                self.done = true;
                return Some(Err(TablebaseError::Io {
                    stage: "dir_scan_read",
                    path: self.path.clone(),
                    source,
                }));
            }
            None if self.read == self.expected => {
                self.done = true;
                return None;
            }
            None => {
                let reason = format!(
                    "file ends after {} records, manifest lists {}",
                    self.read, self.expected
                );
                return self.malformed(self.read + 1, reason);
            }
        };

        self.read += 1;
        if self.read > self.expected {
            let reason = format!("manifest lists only {} records", self.expected);
            return self.malformed(self.read, reason);
        }
        match line.parse::<Record>() {
            Ok(record) => Some(Ok(record.0)),
            Err(reason) => self.malformed(self.read, reason),
        }
    }
}

fn read_manifest(path: &Path) -> Result<StoreManifest> {
    let f = File::open(path).map_err(|source| TablebaseError::Io {
        stage: "dir_manifest_open",
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(f)).map_err(|source| TablebaseError::Manifest {
        path: path.display().to_string(),
        source,
    })
}

fn write_manifest(root: &Path, manifest: &StoreManifest) -> Result<()> {
    let tmp = root.join(MANIFEST_TMP_FILENAME);
    let f = File::create(&tmp).map_err(|source| TablebaseError::Io {
        stage: "dir_manifest_create",
        path: tmp.display().to_string(),
        source,
    })?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, manifest).map_err(|source| TablebaseError::Manifest {
        path: tmp.display().to_string(),
        source,
    })?;
    let f = w.into_inner().map_err(|e| TablebaseError::Io {
        stage: "dir_manifest_flush",
        path: tmp.display().to_string(),
        source: e.into_error(),
    })?;
    f.sync_all().map_err(|source| TablebaseError::Io {
        stage: "dir_manifest_sync",
        path: tmp.display().to_string(),
        source,
    })?;

    let path = root.join(MANIFEST_FILENAME);
    fs::rename(&tmp, &path).map_err(|source| TablebaseError::Io {
        stage: "dir_manifest_commit",
        path: path.display().to_string(),
        source,
    })
}
