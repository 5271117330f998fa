use crate::model::Event;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct EventsLocation {
    pub path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct EventsFile {
    events: Vec<Event>,
}

/// Resolve the events file: an explicit `--file` override wins, otherwise
/// the platform data directory.
pub fn locate_events_file(override_path: Option<PathBuf>) -> Result<EventsLocation> {
    if let Some(path) = override_path {
        return Ok(EventsLocation { path });
    }
    let dirs = ProjectDirs::from("", "", "almanac").context("locating data directory")?;
    Ok(EventsLocation {
        path: dirs.data_dir().join("events.yml"),
    })
}

/// A missing file is an empty calendar, not an error.
pub fn load_events(location: &EventsLocation) -> Result<Vec<Event>> {
    if !location.path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(&location.path)
        .with_context(|| format!("reading {:?}", location.path))?;
    let file: EventsFile = serde_yaml::from_str(&data).context("parsing events file")?;
    Ok(file.events)
}

pub fn save_events(location: &EventsLocation, events: &[Event]) -> Result<()> {
    if let Some(parent) = location.path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }
    let file = EventsFile {
        events: events.to_vec(),
    };
    let serialized = serde_yaml::to_string(&file).context("serializing events")?;
    fs::write(&location.path, serialized)
        .with_context(|| format!("writing {:?}", location.path))?;
    Ok(())
}
