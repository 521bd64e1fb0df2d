use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use wait_timeout::ChildExt;

use super::error::EngineError;

/// Captured result of one engine process. A non-zero exit is not an error at
/// this level; callers decide what a failure means for their operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Executes the engine binary. The seam between the adapter and the OS.
pub trait CommandRunner {
    fn run(&self, args: &[String], timeout: Duration) -> Result<CommandOutput, EngineError>;

    /// Human-readable command line for logs and error messages.
    fn render(&self, args: &[String]) -> String;
}

/// Runs the engine as a real subprocess.
///
/// Standard input is never inherited, so the engine cannot block on an
/// interactive prompt. Output goes to anonymous temp files, not pipes, so the
/// child never blocks on a full pipe buffer while we wait on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRunner {
    pub binary: PathBuf,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("task"),
        }
    }
}

impl ProcessRunner {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, args: &[String], timeout: Duration) -> Result<CommandOutput, EngineError> {
        let rendered = self.render(args);
        let io_err = |source: std::io::Error| EngineError::Io {
            command: rendered.clone(),
            source,
        };

        let mut stdout_file = tempfile::tempfile().map_err(io_err)?;
        let mut stderr_file = tempfile::tempfile().map_err(io_err)?;

        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout_file.try_clone().map_err(io_err)?))
            .stderr(Stdio::from(stderr_file.try_clone().map_err(io_err)?))
            .spawn()
            .map_err(|source| EngineError::Spawn {
                command: rendered.clone(),
                source,
            })?;

        let status = match child.wait_timeout(timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(command = %rendered, ?timeout, "engine command timed out");
                return Err(EngineError::Timeout {
                    command: rendered.clone(),
                    timeout,
                });
            }
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(io_err(source));
            }
        };

        let stdout = read_back(&mut stdout_file).map_err(io_err)?;
        let stderr = read_back(&mut stderr_file).map_err(io_err)?;

        Ok(CommandOutput {
            status: status.code(),
            stdout,
            stderr,
        })
    }

    fn render(&self, args: &[String]) -> String {
        render_command(&self.binary, args)
    }
}

fn read_back(file: &mut File) -> std::io::Result<String> {
    file.seek(SeekFrom::Start(0))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn render_command(binary: &Path, args: &[String]) -> String {
    let mut rendered = binary.to_string_lossy().into_owned();
    for arg in args {
        rendered.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            rendered.push_str(&format!("{:?}", arg));
        } else {
            rendered.push_str(arg);
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn render_quotes_args_with_spaces() {
        let rendered = render_command(
            Path::new("task"),
            &args(&["uuid:abc", "modify", "description:two words", "due:"]),
        );
        assert_eq!(rendered, "task uuid:abc modify \"description:two words\" due:");
    }

    #[test]
    fn render_quotes_empty_args() {
        let rendered = render_command(Path::new("/usr/bin/task"), &args(&["", "export"]));
        assert_eq!(rendered, "/usr/bin/task \"\" export");
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let runner = ProcessRunner::new("/definitely/missing/task-binary");
        let err = runner
            .run(&args(&["export"]), Duration::from_secs(5))
            .expect_err("missing binary should fail");
        match err {
            EngineError::Spawn { command, source } => {
                assert!(command.contains("/definitely/missing/task-binary"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Spawn, got {other:?}"),
        }
    }

    #[test]
    fn output_success_requires_zero_status() {
        let ok = CommandOutput {
            status: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        };
        let failed = CommandOutput {
            status: Some(1),
            ..ok.clone()
        };
        let killed = CommandOutput {
            status: None,
            ..ok.clone()
        };
        assert!(ok.success());
        assert!(!failed.success());
        assert!(!killed.success());
    }
}
