use crate::domain::errors::KVStoreError;
use crate::ports::outbound::KeyValueStore;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// File-backed key-value store for single-node deployments without RocksDB.
///
/// The whole map is held in memory and rewritten to disk after every write
/// (temp file + fsync + rename). Suitable for the low write volume of a
/// single-operator service.
///
/// On-disk format: `[key_len:u32 LE][key][value_len:u32 LE][value]...`
pub struct FileBackedKVStore {
    data: HashMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
}

fn io_error(e: std::io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: e.to_string(),
    }
}

impl FileBackedKVStore {
    /// Open the store at `path`, loading existing contents.
    ///
    /// A missing file is an empty store. A truncated or otherwise
    /// undecodable file is a `CorruptionError`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::File::open(&path) {
            Ok(mut file) => {
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes).map_err(io_error)?;
                #[cfg(feature = "tracing-log")]
                tracing::info!(
                    "[fd-01] Found existing storage file: {} ({} bytes)",
                    path.display(),
                    bytes.len()
                );
                Self::decode(&bytes)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                #[cfg(feature = "tracing-log")]
                tracing::info!("[fd-01] No existing storage file at {}", path.display());
                HashMap::new()
            }
            Err(e) => return Err(io_error(e)),
        };

        #[cfg(feature = "tracing-log")]
        tracing::info!("[fd-01] Loaded {} keys from {}", data.len(), path.display());

        Ok(Self { data, path })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode(bytes: &[u8]) -> Result<HashMap<Vec<u8>, Vec<u8>>, KVStoreError> {
        let mut data = HashMap::new();
        let mut cursor = 0;

        while cursor < bytes.len() {
            let key = Self::read_chunk(bytes, &mut cursor)?;
            let value = Self::read_chunk(bytes, &mut cursor)?;
            data.insert(key, value);
        }

        Ok(data)
    }

    fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
        let truncated = |at: usize| KVStoreError::CorruptionError {
            message: format!("storage file truncated at byte {at}"),
        };

        let len_end = cursor.checked_add(4).ok_or_else(|| truncated(*cursor))?;
        let len_bytes: [u8; 4] = bytes
            .get(*cursor..len_end)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| truncated(*cursor))?;
        let len = u32::from_le_bytes(len_bytes) as usize;

        let end = len_end.checked_add(len).ok_or_else(|| truncated(len_end))?;
        let chunk = bytes.get(len_end..end).ok_or_else(|| truncated(len_end))?;
        *cursor = end;
        Ok(chunk.to_vec())
    }

    fn encode(&self) -> Result<Vec<u8>, KVStoreError> {
        let mut bytes = Vec::new();
        for (key, value) in &self.data {
            for chunk in [key, value] {
                let len = u32::try_from(chunk.len()).map_err(|_| KVStoreError::IOError {
                    message: format!("entry of {} bytes exceeds u32 length", chunk.len()),
                })?;
                bytes.extend_from_slice(&len.to_le_bytes());
                bytes.extend_from_slice(chunk);
            }
        }
        Ok(bytes)
    }

    fn save_to_file(&self) -> Result<(), KVStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let bytes = self.encode()?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_error)?;
        file.write_all(&bytes).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_error)?;

        Ok(())
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.data.insert(key.to_vec(), value.to_vec());
        self.save_to_file()
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        if self.data.remove(key).is_some() {
            self.save_to_file()?;
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }
}
