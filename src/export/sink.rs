use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;

/// Where a finished export is handed off for saving.
pub trait DownloadSink {
    fn save(&mut self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Writes exports into a directory, creating it on first use.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)?;
        info!("wrote {} ({mime}, {} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}

/// Keeps saved files in memory.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySink {
    pub files: Vec<(String, String, Vec<u8>)>,
}

#[cfg(test)]
impl MemorySink {
    pub fn text(&self, index: usize) -> String {
        String::from_utf8(self.files[index].2.clone()).unwrap()
    }
}

#[cfg(test)]
impl DownloadSink for MemorySink {
    fn save(&mut self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<PathBuf> {
        self.files
            .push((file_name.to_string(), mime.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}
