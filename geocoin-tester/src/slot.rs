use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use geocoin_game::SnapshotSlot;

/// Save slot backed by a single file on disk.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSlot for FileSlot {
    type Error = io::Error;

    fn read(&self) -> Result<Option<String>, io::Error> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&self, value: &str) -> Result<(), io::Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, value)
    }

    fn clear(&self) -> Result<(), io::Error> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocoin_game::{GeocacheSession, WorldConfig};

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "geocoin-slot-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let slot = FileSlot::new(temp_path("missing"));
        assert!(slot.read().unwrap().is_none());
        slot.clear().unwrap();
    }

    #[test]
    fn write_read_clear() {
        let slot = FileSlot::new(temp_path("nested").join("save.json"));
        slot.write("{\"points\":3}").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("{\"points\":3}"));
        slot.clear().unwrap();
        assert!(!slot.path().exists());
    }

    #[test]
    fn session_survives_restart_through_file() {
        let path = temp_path("session");
        let mut first = GeocacheSession::start(WorldConfig::default(), FileSlot::new(&path)).unwrap();
        let cell = first.visible_caches()[0].cell;
        first.collect(cell).unwrap();
        let points = first.points();

        let second = GeocacheSession::start(WorldConfig::default(), FileSlot::new(&path)).unwrap();
        assert_eq!(second.points(), points);
        assert!(fs::read_to_string(&path).unwrap().contains("\"points\""));
        let _ = fs::remove_file(path);
    }
}
