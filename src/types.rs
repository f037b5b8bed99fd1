// src/types.rs
use std::path::PathBuf;
use std::sync::Arc;

use sigview::{DecodeConfig, LoadOutcome};

/// Where the bytes of a load come from.
#[derive(Clone, Debug)]
pub enum FileSource {
    Path(PathBuf),
    // Dropped files on platforms that hand over contents instead of a path
    Bytes { name: String, bytes: Arc<[u8]> },
}

impl FileSource {
    pub fn display_name(&self) -> String {
        match self {
            FileSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            FileSource::Bytes { name, .. } => name.clone(),
        }
    }
}

// GUI -> loader thread
#[derive(Clone, Debug)]
pub enum GuiCommand {
    Load {
        source: FileSource,
        config: DecodeConfig,
    },
}

// loader thread -> GUI
#[derive(Clone, Debug)]
pub enum LoaderMessage {
    Log(String),
    Loaded(LoadOutcome),
}
