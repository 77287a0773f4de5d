use std::io::{self, Write};

use chat_directory::controller::Confirm;

/// `[y/N]` prompt on the controlling terminal.
pub struct StdinPrompt;

impl Confirm for StdinPrompt {
    fn confirm(&self, message: &str) -> bool {
        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(_) => is_affirmative(&input),
            Err(err) => {
                tracing::warn!(error = %err, "Could not read confirmation");
                false
            }
        }
    }
}

fn is_affirmative(input: &str) -> bool {
    matches!(
        input.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}
