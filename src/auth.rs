use tracing::debug;

use crate::config::AuthConfig;
use crate::error::{PortraitError, Result};

/// Try to run a CLI command and capture stdout as a token
fn try_cli_token(command: &str) -> Option<String> {
    let output = std::process::Command::new("sh")
        .args(["-c", command])
        .output()
        .ok()?;

    if output.status.success() {
        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !token.is_empty() {
            return Some(token);
        }
    }
    None
}

fn env_token(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|token| !token.is_empty())
}

/// Load a GitHub token, trying in order:
/// 1. Each configured env var
/// 2. The configured CLI command
pub fn load_token(config: &AuthConfig) -> Result<String> {
    for var in &config.token_env {
        if let Some(token) = env_token(var) {
            debug!(var = %var, "token from environment");
            return Ok(token);
        }
    }

    if let Some(cmd) = &config.token_command {
        if let Some(token) = try_cli_token(cmd) {
            debug!(command = %cmd, "token from command");
            return Ok(token);
        }
    }

    Err(PortraitError::Auth(
        "no GitHub token found; set GH_TOKEN or run 'gh auth login'".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(env: &[&str], command: Option<&str>) -> AuthConfig {
        AuthConfig {
            token_env: env.iter().map(|s| s.to_string()).collect(),
            token_command: command.map(str::to_string),
        }
    }

    #[test]
    fn cli_token_is_trimmed() {
        assert_eq!(try_cli_token("echo '  abc123  '"), Some("abc123".to_string()));
    }

    #[test]
    fn failing_command_yields_nothing() {
        assert_eq!(try_cli_token("false"), None);
        assert_eq!(try_cli_token("exit 3"), None);
    }

    #[test]
    fn empty_output_yields_nothing() {
        assert_eq!(try_cli_token("printf ''"), None);
    }

    #[test]
    fn unset_env_falls_through_to_command() {
        let cfg = config(&["GH_PORTRAIT_TEST_UNSET_TOKEN"], Some("echo from-cmd"));
        assert_eq!(load_token(&cfg).unwrap(), "from-cmd");
    }

    #[test]
    fn env_var_wins_over_command() {
        // PATH is always set; it stands in for a token here.
        let path = std::env::var("PATH").unwrap();
        let cfg = config(&["GH_PORTRAIT_TEST_UNSET_TOKEN", "PATH"], Some("echo from-cmd"));
        assert_eq!(load_token(&cfg).unwrap(), path);
    }

    #[test]
    fn no_source_is_auth_error() {
        let cfg = config(&["GH_PORTRAIT_TEST_UNSET_TOKEN"], Some("false"));
        match load_token(&cfg) {
            Err(PortraitError::Auth(msg)) => assert!(msg.contains("gh auth login")),
            other => panic!("expected Auth error, got {:?}", other),
        }

        let cfg = config(&[], None);
        assert!(matches!(load_token(&cfg), Err(PortraitError::Auth(_))));
    }
}
