//! アップロードされたトランスクリプトと、その結合テキスト

use crate::domain::ContentFingerprint;

/// 1 ファイル分のトランスクリプト（表示名と本文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptFile {
    name: String,
    text: String,
}

impl TranscriptFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// アップロード順のトランスクリプト列。空にはならない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptBundle {
    files: Vec<TranscriptFile>,
}

impl TranscriptBundle {
    /// 空なら None
    pub fn new(files: Vec<TranscriptFile>) -> Option<Self> {
        if files.is_empty() {
            None
        } else {
            Some(Self { files })
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn files(&self) -> &[TranscriptFile] {
        &self.files
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name()).collect()
    }

    /// 各ファイルの前に `--- SOURCE: <name> ---` 見出しを付けて順に連結する
    pub fn combined_text(&self) -> CombinedText {
        let mut out = String::new();
        for file in &self.files {
            out.push_str(&format!("\n\n--- SOURCE: {} ---\n\n", file.name));
            out.push_str(&file.text);
        }
        CombinedText(out)
    }
}

/// 結合済みテキスト（キャッシュの本文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedText(String);

impl CombinedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn fingerprint(&self) -> ContentFingerprint {
        ContentFingerprint::of(&self.0)
    }
}

impl std::ops::Deref for CombinedText {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
