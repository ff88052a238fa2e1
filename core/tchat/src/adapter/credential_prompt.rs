//! API キーの対話入力実装（CLI 境界）
//!
//! 端末のエコーを切ってから 1 行読む。端末でなければそのまま読む。
//! 入力待ち中に Ctrl+C で終了しても端末の設定を元に戻す。

use crate::ports::outbound::CredentialPrompt;
use common::error::Error;
use std::io::{self, BufRead, Write};
use std::os::unix::io::{AsRawFd, RawFd};

/// エコーを切った端末の状態。drop で元に戻す
struct EchoOff {
    saved: Option<libc::termios>,
    fd: RawFd,
}

impl EchoOff {
    fn set(fd: RawFd) -> io::Result<Self> {
        unsafe {
            if libc::isatty(fd) == 0 {
                return Ok(Self { saved: None, fd });
            }
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &mut termios) < 0 {
                return Err(io::Error::last_os_error());
            }
            let saved = termios;
            termios.c_lflag &= !libc::ECHO;
            termios.c_lflag |= libc::ECHONL;
            if libc::tcsetattr(fd, libc::TCSANOW, &termios) < 0 {
                return Err(io::Error::last_os_error());
            }
            restore_on_sigint(fd, saved);
            Ok(Self {
                saved: Some(saved),
                fd,
            })
        }
    }
}

impl Drop for EchoOff {
    fn drop(&mut self) {
        if let Some(saved) = self.saved {
            unsafe {
                libc::tcsetattr(self.fd, libc::TCSANOW, &saved);
            }
        }
    }
}

/// Ctrl+C で端末を戻してから終了する。ハンドラは初回のみ登録される（ctrlc の仕様）
fn restore_on_sigint(fd: RawFd, saved: libc::termios) {
    let _ = ctrlc::set_handler(move || {
        unsafe {
            libc::tcsetattr(fd, libc::TCSANOW, &saved);
        }
        std::process::exit(130);
    });
}

/// マスク付きの対話入力
pub struct CliCredentialPrompt;

impl CliCredentialPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliCredentialPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialPrompt for CliCredentialPrompt {
    fn prompt(&self) -> Result<Option<String>, Error> {
        eprint!("Enter Google API Key: ");
        let _ = io::stderr().flush();

        let stdin = io::stdin();
        let _echo = EchoOff::set(stdin.as_raw_fd())
            .map_err(|e| Error::io_msg(format!("Failed to configure terminal: {}", e)))?;
        let mut line = String::new();
        let n = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(format!("Failed to read API key: {}", e)))?;
        if n == 0 {
            eprintln!();
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
