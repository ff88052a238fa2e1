//! 画面に出すキャプション文字列

use crate::domain::Usage;

/// 3 桁区切り（1234567 → "1,234,567"）
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `Tokens: <total> (Prompt: <prompt>[ [Cached: <cached>]], Response: <candidates>)`
///
/// cached が 0 のときは Cached 部分を出さない。
pub fn usage_caption(u: &Usage) -> String {
    let cached_info = if u.cached_tokens > 0 {
        format!(" [Cached: {}]", u.cached_tokens)
    } else {
        String::new()
    };
    format!(
        "Tokens: {} (Prompt: {}{}, Response: {})",
        u.total_tokens, u.prompt_tokens, cached_info, u.candidates_tokens
    )
}

/// `Active Context: <file1, file2, ...> • <N> tokens`
pub fn active_context_caption(file_names: &[&str], token_count: u64) -> String {
    format!(
        "Active Context: {} • {} tokens",
        file_names.join(", "),
        format_thousands(token_count)
    )
}
