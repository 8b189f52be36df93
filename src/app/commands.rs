//! Operator commands read from stdin

use std::str::FromStr;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Command forwarded to the tick loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Press the wired pause control
    PressPause,
    /// Toggle pause directly, control or not
    TogglePause,
    /// Log where the match stands
    Status,
    Quit,
}

impl FromStr for HostCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "p" | "pause" => Ok(Self::PressPause),
            "t" | "toggle" => Ok(Self::TogglePause),
            "s" | "status" => Ok(Self::Status),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command '{}'", other)),
        }
    }
}

/// Forward stdin lines as commands until stdin closes or the loop goes away
pub fn spawn_stdin_commands(tx: mpsc::Sender<HostCommand>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<HostCommand>() {
                Ok(command) => {
                    if tx.send(command).await.is_err() {
                        break;
                    }
                }
                Err(e) => warn!("{}", e),
            }
        }

        debug!("Stdin command reader stopped");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_forms() {
        assert_eq!("p".parse(), Ok(HostCommand::PressPause));
        assert_eq!(" Toggle ".parse(), Ok(HostCommand::TogglePause));
        assert_eq!("status".parse(), Ok(HostCommand::Status));
        assert_eq!("QUIT".parse(), Ok(HostCommand::Quit));
        assert!("jump".parse::<HostCommand>().is_err());
    }
}
