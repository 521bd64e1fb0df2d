use std::time::Duration;

/// Error type for task engine invocations
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("could not start `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("`{command}` exited with {}: {}", status_label(*status), stderr.trim())]
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
    #[error("`{command}` timed out after {}s", timeout.as_secs())]
    Timeout { command: String, timeout: Duration },
    #[error("could not parse output of `{command}`: {source}")]
    Malformed {
        command: String,
        source: serde_json::Error,
    },
    #[error("io error while running `{command}`: {source}")]
    Io {
        command: String,
        source: std::io::Error,
    },
}

impl EngineError {
    /// True for failures of the process itself (missing executable, non-zero
    /// exit, timeout), as opposed to output that could not be parsed.
    pub fn is_invocation(&self) -> bool {
        !matches!(self, EngineError::Malformed { .. })
    }

    /// Diagnostic text suitable for showing in place of data.
    pub fn diagnostics(&self) -> String {
        match self {
            EngineError::Failed { stderr, .. } if !stderr.trim().is_empty() => {
                stderr.trim().to_string()
            }
            other => other.to_string(),
        }
    }
}

fn status_label(status: Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "no status (killed by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_message_includes_trimmed_stderr() {
        let err = EngineError::Failed {
            command: "task export".into(),
            status: Some(2),
            stderr: "No matches.\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "`task export` exited with status 2: No matches."
        );
        assert_eq!(err.diagnostics(), "No matches.");
    }

    #[test]
    fn diagnostics_fall_back_to_message() {
        let err = EngineError::Timeout {
            command: "task _config".into(),
            timeout: Duration::from_secs(10),
        };
        assert_eq!(err.diagnostics(), "`task _config` timed out after 10s");
        assert!(err.is_invocation());
    }

    #[test]
    fn malformed_is_not_an_invocation_failure() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = EngineError::Malformed {
            command: "task export".into(),
            source,
        };
        assert!(!err.is_invocation());
    }
}
