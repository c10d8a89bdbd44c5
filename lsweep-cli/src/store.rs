//! On-disk persistence for engine state.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use lsweep_core::{PersistedState, Result, StateStore, SweepError};

/// Magic bytes at the start of a state file
pub const STATE_MAGIC: [u8; 4] = *b"LSWP";

/// Bump when the on-disk layout changes; older files are discarded
pub const STATE_VERSION: u32 = 1;

/// Default state file location under the platform data directory
pub fn default_state_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("lsweep").join("state.lsw"))
}

/// File-backed state store.
///
/// File format:
/// [4B] Magic "LSWP"
/// [4B] Version (u32 LE)
/// [4B] Payload length (u32 LE)
/// [NB] Payload (postcard)
/// [4B] CRC32 checksum of all preceding bytes
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_state(&self) -> Result<PersistedState> {
        let mut file = File::open(&self.path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        // Need at least: magic(4) + version(4) + payload_len(4) + checksum(4)
        if data.len() < 16 {
            return Err(SweepError::Store("state file too small".to_string()));
        }

        let checksum_offset = data.len() - 4;
        let stored = u32::from_le_bytes(
            data[checksum_offset..]
                .try_into()
                .map_err(|_| SweepError::Store("truncated checksum".to_string()))?,
        );
        if stored != crc32fast::hash(&data[..checksum_offset]) {
            return Err(SweepError::Store("state checksum mismatch".to_string()));
        }

        if data[..4] != STATE_MAGIC {
            return Err(SweepError::Store("invalid state magic".to_string()));
        }

        let version = u32::from_le_bytes(
            data[4..8]
                .try_into()
                .map_err(|_| SweepError::Store("truncated version".to_string()))?,
        );
        if version != STATE_VERSION {
            return Err(SweepError::Store(format!(
                "state version mismatch: expected {}, got {}",
                STATE_VERSION, version
            )));
        }

        let payload_len = u32::from_le_bytes(
            data[8..12]
                .try_into()
                .map_err(|_| SweepError::Store("truncated payload length".to_string()))?,
        ) as usize;
        if 12 + payload_len > checksum_offset {
            return Err(SweepError::Store("invalid payload length".to_string()));
        }

        postcard::from_bytes(&data[12..12 + payload_len])
            .map_err(|e| SweepError::Store(format!("failed to deserialize state: {}", e)))
    }
}

impl StateStore for FileStore {
    fn load(&mut self) -> Result<Option<PersistedState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        self.read_state().map(Some)
    }

    fn save(&mut self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut data = Vec::new();
        data.extend_from_slice(&STATE_MAGIC);
        data.extend_from_slice(&STATE_VERSION.to_le_bytes());

        let payload = postcard::to_allocvec(state)
            .map_err(|e| SweepError::Store(format!("failed to serialize state: {}", e)))?;
        data.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        data.extend_from_slice(&payload);

        let checksum = crc32fast::hash(&data);
        data.extend_from_slice(&checksum.to_le_bytes());

        // Write atomically by writing to a temp file then renaming
        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_state() -> PersistedState {
        PersistedState {
            enabled: true,
            selected: vec!["demo0000003vid".to_string(), "demo0000007vid".to_string()],
            panel_position: Some((64, 12)),
            ..PersistedState::default()
        }
    }

    #[test]
    fn test_missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join("state.lsw"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join("nested").join("state.lsw"));

        let state = sample_state();
        store.save(&state).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_corrupt_file_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.lsw");
        let mut store = FileStore::new(&path);
        store.save(&sample_state()).unwrap();

        // Flip a byte in the payload
        let mut data = fs::read(&path).unwrap();
        data[13] ^= 0xff;
        fs::write(&path, &data).unwrap();

        assert!(store.load().is_err());
    }

    #[test]
    fn test_wrong_magic_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.lsw");
        let mut store = FileStore::new(&path);
        store.save(&sample_state()).unwrap();

        let mut data = fs::read(&path).unwrap();
        data[0] = b'X';
        // Recompute the checksum so only the magic check can fail
        let len = data.len();
        let checksum = crc32fast::hash(&data[..len - 4]);
        data[len - 4..].copy_from_slice(&checksum.to_le_bytes());
        fs::write(&path, &data).unwrap();

        assert!(store.load().is_err());
    }
}
