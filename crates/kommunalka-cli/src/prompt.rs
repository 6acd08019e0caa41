use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line-oriented input. `None` means stdin is closed.
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    pub async fn ask(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        print!("{label}: ");
        std::io::stdout().flush()?;
        let line = self.lines.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    /// `y`/`yes` (either case) is consent; anything else is not.
    pub async fn confirm(&mut self, label: &str) -> anyhow::Result<Option<bool>> {
        let answer = self.ask(&format!("{label} [y/N]")).await?;
        Ok(answer.map(|a| matches!(a.to_lowercase().as_str(), "y" | "yes")))
    }
}
