//! Console confirmation for the forced logout.

use std::io::IsTerminal;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use jb_core::ports::RecoveryPromptPort;

/// Prints the notice and waits for Enter on an interactive terminal.
/// Non-interactive runs acknowledge immediately.
pub struct ConsoleRecoveryPrompt;

pub const FORCED_LOGOUT_NOTICE: &str =
    "We could not finish loading your profile. You will be signed out so you can log in again.";

#[async_trait]
impl RecoveryPromptPort for ConsoleRecoveryPrompt {
    async fn confirm_forced_logout(&self, attempts: u32) -> anyhow::Result<()> {
        eprintln!("{FORCED_LOGOUT_NOTICE} ({attempts} attempts)");
        if !std::io::stdin().is_terminal() {
            return Ok(());
        }
        eprintln!("Press Enter to continue.");
        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await?;
        Ok(())
    }
}
