//! Subtitle documents on disk
//!
//! A document is a YAML file holding the media duration and one track per
//! flavor:
//!
//! ```yaml
//! duration: 120000
//! tracks:
//!   - flavor: en
//!     cues:
//!       - id: c1
//!         start_time: 1000
//!         end_time: 3500
//!         text: Hello
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use subline_core::{Cue, SubtitleStore, TimelineSource, Track};

/// Serialized form of a subtitle document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubtitleDocument {
    /// Media duration in milliseconds
    pub duration: u64,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl SubtitleDocument {
    /// Build a store; rejects cues whose end lies before their start
    pub fn into_store(self) -> Result<SubtitleStore> {
        let mut store = SubtitleStore::new(self.duration);
        for track in self.tracks {
            track
                .validate()
                .with_context(|| format!("Invalid cue in flavor '{}'", track.flavor))?;
            store.insert_track(track);
        }
        Ok(store)
    }

    /// Snapshot a store's tracks for saving
    pub fn from_store(store: &SubtitleStore, flavors: &[subline_core::FlavorId]) -> Self {
        Self {
            duration: store.duration(),
            tracks: flavors
                .iter()
                .filter_map(|flavor| store.track(flavor).cloned())
                .collect(),
        }
    }
}

/// Load a document from YAML
pub fn load_document(path: &Path) -> Result<SubtitleDocument> {
    log::info!("load_document: Loading from {:?}", path);
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read subtitle document: {:?}", path))?;
    let document: SubtitleDocument = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse subtitle document: {:?}", path))?;
    log::info!(
        "load_document: {} track(s), duration {}ms",
        document.tracks.len(),
        document.duration
    );
    Ok(document)
}

/// Save a document as YAML, creating parent directories
pub fn save_document(document: &SubtitleDocument, path: &Path) -> Result<()> {
    log::info!("save_document: Saving to {:?}", path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    let yaml = serde_yaml::to_string(document).context("Failed to serialize subtitle document")?;
    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write subtitle document: {:?}", path))?;
    Ok(())
}

/// Built-in document shown when no file is given
pub fn demo_document() -> SubtitleDocument {
    let english = [
        (1_000, 3_500, "Welcome back."),
        (4_000, 7_200, "Today we look at the harbour."),
        (8_000, 12_500, "Ships have docked here for centuries."),
        (14_000, 18_000, "Most of them carried grain."),
        (21_000, 24_000, "Some carried people."),
        (26_500, 31_000, "This is their story."),
    ];
    let german = [
        (1_000, 3_500, "Willkommen zurück."),
        (4_000, 7_200, "Heute geht es um den Hafen."),
        (8_000, 12_500, "Seit Jahrhunderten legen hier Schiffe an."),
    ];

    let cues = |prefix: &str, entries: &[(u64, u64, &str)]| -> Vec<Cue> {
        entries
            .iter()
            .enumerate()
            .map(|(i, (start, end, text))| {
                let mut cue = Cue::new(format!("{}-{}", prefix, i + 1), *start, *end, *text);
                cue.tree = serde_json::json!({
                    "type": "root",
                    "children": [{ "type": "text", "value": text }],
                });
                cue
            })
            .collect()
    };

    SubtitleDocument {
        duration: 40_000,
        tracks: vec![
            Track::new("en", cues("en", &english[..])),
            Track::new("de", cues("de", &german[..])),
        ],
    }
}
