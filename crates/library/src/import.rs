//! File input surface: locally selected audio turned into session handles

use auralis_core::EPHEMERAL_SCHEME;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Author shown for imported files
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// A locally selected audio source
pub trait AudioSource {
    /// Display name of the source, extension included
    fn file_name(&self) -> String;

    /// Session-scoped playable handle
    fn handle(&self) -> String;
}

/// A file on disk registered for the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAudioFile {
    path: PathBuf,
    handle: String,
}

impl LocalAudioFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AudioSource for LocalAudioFile {
    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    fn handle(&self) -> String {
        self.handle.clone()
    }
}

/// Registry of `blob:` handles issued during this process
///
/// Handles are never persisted and die with the registry.
#[derive(Debug, Default)]
pub struct SessionHandles {
    handles: HashMap<String, PathBuf>,
}

impl SessionHandles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh handle for `path`
    pub fn register(&mut self, path: impl Into<PathBuf>) -> LocalAudioFile {
        let path = path.into();
        let handle = format!("{}{}", EPHEMERAL_SCHEME, Uuid::new_v4());
        log::debug!("Registered {} as {}", path.display(), handle);
        self.handles.insert(handle.clone(), path.clone());
        LocalAudioFile { path, handle }
    }

    /// Resolves a handle issued by this registry
    pub fn resolve(&self, handle: &str) -> Option<&Path> {
        self.handles.get(handle).map(PathBuf::as_path)
    }

    /// Drops a handle, returns true if it was known
    pub fn revoke(&mut self, handle: &str) -> bool {
        self.handles.remove(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Strips the last extension from a file name
///
/// `"chapter.01.mp3"` becomes `"chapter.01"`. Names without an extension,
/// or made only of one, are returned unchanged.
pub fn title_from_file_name(name: &str) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => {
            let ext = &name[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                name.to_string()
            } else {
                name[..dot].to_string()
            }
        }
        _ => name.to_string(),
    }
}
