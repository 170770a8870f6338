//! Last known device location, shared between the app and the widget.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use parking_lot::RwLock;

use crate::{
    error::{Result, WeatherError},
    model::Coordinates,
};

/// Single-value store for the last observed device position.
///
/// Every write replaces the previous value; there is no history and no expiry.
pub trait LocationStore: Send + Sync {
    fn write(&self, coords: Coordinates) -> Result<()>;

    /// `None` if nothing has been written yet.
    fn read(&self) -> Result<Option<Coordinates>>;
}

/// JSON file in a directory both processes can reach.
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a reader sees either the old pair or the new one.
#[derive(Debug, Clone)]
pub struct FileLocationStore {
    path: PathBuf,
}

impl FileLocationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl LocationStore for FileLocationStore {
    fn write(&self, coords: Coordinates) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }

        let json = serde_json::to_vec(&coords)
            .map_err(|e| WeatherError::Location(format!("encoding {coords:?}: {e}")))?;
        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, e))?;

        tracing::info!(
            latitude = coords.latitude,
            longitude = coords.longitude,
            "Saved last known location"
        );
        Ok(())
    }

    fn read(&self) -> Result<Option<Coordinates>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&self.path, e)),
        };

        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

/// In-process store for tests and single-process embedding.
#[derive(Debug, Default)]
pub struct MemoryLocationStore {
    value: RwLock<Option<Coordinates>>,
}

impl MemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocationStore for MemoryLocationStore {
    fn write(&self, coords: Coordinates) -> Result<()> {
        *self.value.write() = Some(coords);
        Ok(())
    }

    fn read(&self) -> Result<Option<Coordinates>> {
        Ok(*self.value.read())
    }
}

fn io_error(path: &Path, err: io::Error) -> WeatherError {
    WeatherError::Location(format!("{}: {err}", path.display()))
}
