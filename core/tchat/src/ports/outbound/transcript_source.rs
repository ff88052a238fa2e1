//! アップロード面（トランスクリプトの読み込み）Outbound ポート

use crate::domain::TranscriptFile;
use common::error::Error;
use std::path::PathBuf;

/// パス列から UTF-8 テキストのトランスクリプトを読む能力
///
/// 順序は引数の順を保つ。1 つでも読めなければ Err。
pub trait TranscriptSource: Send + Sync {
    fn load(&self, paths: &[PathBuf]) -> Result<Vec<TranscriptFile>, Error>;
}
