//! ファイルシステムからトランスクリプトを読む TranscriptSource 実装

use crate::domain::TranscriptFile;
use crate::ports::outbound::TranscriptSource;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 受け付ける拡張子
const ALLOWED_EXTENSION: &str = "txt";

pub struct FsTranscriptSource {
    fs: Arc<dyn FileSystem>,
}

impl FsTranscriptSource {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    fn load_one(&self, path: &Path) -> Result<TranscriptFile, Error> {
        let is_txt = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(ALLOWED_EXTENSION))
            .unwrap_or(false);
        if !is_txt {
            return Err(Error::invalid_argument(format!(
                "Only .txt transcripts are accepted: '{}'",
                path.display()
            )));
        }

        if !self.fs.metadata(path)?.is_file() {
            return Err(Error::invalid_argument(format!(
                "Not a transcript file: '{}'",
                path.display()
            )));
        }
        let bytes = self.fs.read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            Error::io_msg(format!(
                "Failed to decode '{}' as UTF-8: {}",
                path.display(),
                e
            ))
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(TranscriptFile::new(name, text))
    }
}

impl TranscriptSource for FsTranscriptSource {
    fn load(&self, paths: &[PathBuf]) -> Result<Vec<TranscriptFile>, Error> {
        paths.iter().map(|p| self.load_one(p)).collect()
    }
}
