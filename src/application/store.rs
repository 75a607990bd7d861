//! # Link Store
//!
//! Persistent mapping from server name to link, kept fully in memory and flushed to a JSON
//! document after every mutation. The document layout is `{"servers": {name: link}}`; other
//! top-level keys found on load are carried along untouched on every write.
//!
//! Entry order is insertion order (`serde_json` is built with `preserve_order`), and
//! overwriting a name keeps its original position.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::errors::{ReadCause, StoreError};
use crate::domain::types::LinkEntry;

const SERVERS_KEY: &str = "servers";

#[derive(Debug)]
pub struct LinkStore {
    path: PathBuf,
    servers: Map<String, Value>,
    extra: Map<String, Value>,
}

/// Borrowed view used for serialization, so a flush does not clone the store.
#[derive(Serialize)]
struct Document<'a> {
    servers: &'a Map<String, Value>,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

impl LinkStore {
    /// Loads the document at `path`. A missing file yields an empty store that will be
    /// created on the first `set`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("{}", crate::strings::logs::store_missing(&path.display().to_string()));
                return Ok(Self::empty(path));
            }
            Err(e) => return Err(read_error(&path, e.into())),
        };

        let document: Value =
            serde_json::from_str(&content).map_err(|e| read_error(&path, e.into()))?;

        let Value::Object(mut root) = document else {
            return Err(layout_error(&path, "top level is not an object".to_string()));
        };

        let servers = match root.remove(SERVERS_KEY) {
            None => Map::new(),
            Some(Value::Object(servers)) => servers,
            Some(_) => {
                return Err(layout_error(&path, format!("`{SERVERS_KEY}` is not an object")));
            }
        };

        if let Some((name, _)) = servers.iter().find(|(_, link)| !link.is_string()) {
            return Err(layout_error(&path, format!("link for `{name}` is not a string")));
        }

        Ok(Self {
            path,
            servers,
            extra: root,
        })
    }

    fn empty(path: PathBuf) -> Self {
        Self {
            path,
            servers: Map::new(),
            extra: Map::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.servers.get(name).and_then(Value::as_str)
    }

    /// Inserts or overwrites `name`, then flushes the whole document.
    ///
    /// On a write error the in-memory value has already changed; the file keeps its previous
    /// content until the next successful write.
    pub fn set(&mut self, name: &str, link: &str) -> Result<(), StoreError> {
        self.servers
            .insert(name.to_string(), Value::String(link.to_string()));
        self.persist()
    }

    pub fn list_keys(&self) -> Vec<String> {
        self.servers.keys().cloned().collect()
    }

    pub fn entries(&self) -> Vec<LinkEntry> {
        self.servers
            .iter()
            .filter_map(|(name, link)| link.as_str().map(|link| LinkEntry::new(name.clone(), link)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Writes to a sibling temp file and renames it over the target.
    fn persist(&self) -> Result<(), StoreError> {
        self.write_document().map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn write_document(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let document = Document {
            servers: &self.servers,
            extra: &self.extra,
        };
        let bytes = serde_json::to_vec_pretty(&document)?;

        let tmp = temp_path(&self.path);
        fs::write(&tmp, bytes)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn read_error(path: &Path, source: ReadCause) -> StoreError {
    StoreError::Read {
        path: path.to_path_buf(),
        source,
    }
}

fn layout_error(path: &Path, reason: String) -> StoreError {
    read_error(path, ReadCause::Layout(reason))
}
