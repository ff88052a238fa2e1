use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// --no-interactive: API キーを問い合わせない（未設定ならエラー終了）
    pub non_interactive: bool,
    /// -v / --verbose: 構造化ログを stderr にも出す
    pub verbose: bool,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    /// 起動時にアップロードするトランスクリプト
    pub files: Vec<PathBuf>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("tchat")
        .about("Chat with an LLM grounded in uploaded transcripts")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("no-interactive")
                .long("no-interactive")
                .help("Never prompt for an API key")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Mirror structured log records to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("Specify LLM profile (gemini, echo)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Specify model name (e.g. gemini-3-pro-preview)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("files")
                .index(1)
                .value_name("FILE.txt")
                .help("Transcript files to upload at startup")
                .value_parser(value_parser!(PathBuf))
                .num_args(0..),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let profile = matches
        .get_one::<String>("profile")
        .map(|s| ProviderName::new(s.clone()));
    let model = matches
        .get_one::<String>("model")
        .map(|s| ModelName::new(s.clone()));
    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(|i| i.cloned().collect())
        .unwrap_or_default();

    Config {
        help: matches.get_flag("help"),
        non_interactive: matches.get_flag("no-interactive"),
        verbose: matches.get_flag("verbose"),
        profile,
        model,
        files,
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }
    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[cfg(test)]
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "tchat", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.help);
        assert!(!config.non_interactive);
        assert!(!config.verbose);
        assert!(config.profile.is_none());
        assert!(config.model.is_none());
        assert!(config.files.is_empty());
    }

    #[test]
    fn test_parse_args_no_args() {
        let config = parse_args_from(&["tchat"]).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_args_help_short() {
        let config = parse_args_from(&["tchat", "-h"]).unwrap();
        assert!(config.help);
    }

    #[test]
    fn test_parse_args_files_keep_order() {
        let config = parse_args_from(&["tchat", "b.txt", "a.txt"]).unwrap();
        assert_eq!(
            config.files,
            vec![PathBuf::from("b.txt"), PathBuf::from("a.txt")]
        );
    }

    #[test]
    fn test_parse_args_profile_and_model() {
        let config =
            parse_args_from(&["tchat", "-p", "echo", "--model", "gemini-x", "t.txt"]).unwrap();
        assert_eq!(config.profile, Some(ProviderName::new("echo")));
        assert_eq!(config.model, Some(ModelName::new("gemini-x")));
        assert_eq!(config.files.len(), 1);
    }

    #[test]
    fn test_parse_args_flags() {
        let config = parse_args_from(&["tchat", "--no-interactive", "-v"]).unwrap();
        assert!(config.non_interactive);
        assert!(config.verbose);
    }

    #[test]
    fn test_parse_args_unknown_option() {
        let err = parse_args_from(&["tchat", "--unknown"]).unwrap_err();
        assert!(err.is_usage());
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_parse_args_profile_requires_value() {
        let err = parse_args_from(&["tchat", "-p"]).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }
}
