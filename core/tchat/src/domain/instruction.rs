//! キャッシュに束縛する固定値（システム指示・表示名・資格情報の環境変数名）

/// API キーを読む環境変数
pub const API_KEY_ENV: &str = "AI_STUDIO_API_KEY";

/// キャッシュの表示名
pub const CACHE_DISPLAY_NAME: &str = "transcript_cache";

/// トランスクリプトに根拠を置くためのシステム指示
pub const SYSTEM_INSTRUCTION: &str = concat!(
    "You are a helpful analyst assistant whose knowledge is primarily grounded in the provided TRANSCRIPT. ",
    "Adhere to the following guidelines when answering:\n",
    "1. **Priority**: Always attempt to answer using the transcript first.\n",
    "2. **Out of Scope**: If the user asks about a topic not found in the transcript, you must explicitly state that the topic is 'outside the scope of the lesson.'\n",
    "3. **General Knowledge**: After the disclaimer, provide accurate, factual information about the topic using your general knowledge.\n",
    "4. **Synthesis**: If applicable, draw parallels or comparisons between this outside information and concepts found in the transcript.\n",
    "Constraint: Maintain strict factual accuracy and do not hallucinate information."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_instruction_guidelines() {
        assert!(SYSTEM_INSTRUCTION.starts_with("You are a helpful analyst assistant"));
        assert!(SYSTEM_INSTRUCTION.contains("'outside the scope of the lesson.'"));
        assert!(SYSTEM_INSTRUCTION.contains("do not hallucinate information."));
        assert_eq!(SYSTEM_INSTRUCTION.lines().count(), 6);
    }
}
