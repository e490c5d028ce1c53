//! External classifier processes
//!
//! The engine talks to a long-lived classifier through a line protocol: one
//! line of text in, one line of `__label__<code> <probability>` pairs out.
//! Processes are created through [`ProcessSpawner`] so the supervisor can be
//! driven by in-memory fakes in tests.

use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// Prefix fastText puts in front of every label
pub const LABEL_PREFIX: &str = "__label__";

/// A running classifier speaking the line protocol
pub trait ClassifierProcess: Send {
    /// Send one line; the implementation appends the newline
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Read one response line, `None` at end of stream
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Terminate the process; must be safe to call more than once
    fn kill(&mut self);
}

/// Creates classifier processes
pub trait ProcessSpawner: Send + Sync {
    /// Start a fresh process
    fn spawn(&self) -> io::Result<Box<dyn ClassifierProcess>>;
}

/// An operating-system child process with piped stdin and stdout
#[derive(Debug)]
pub struct ChildProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl ChildProcess {
    /// Spawn `command` with piped stdin/stdout and discarded stderr
    pub fn spawn(mut command: Command) -> io::Result<Self> {
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        let mut child = command.spawn()?;
        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        match (stdin, stdout) {
            (Some(stdin), Some(stdout)) => Ok(Self {
                child,
                stdin,
                stdout: BufReader::new(stdout),
            }),
            _ => {
                let _ = child.kill();
                let _ = child.wait();
                Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "child process has no stdio pipes",
                ))
            }
        }
    }

    /// Operating-system process id
    pub fn id(&self) -> u32 {
        self.child.id()
    }
}

impl ClassifierProcess for ChildProcess {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.stdin.write_all(line.as_bytes())?;
        self.stdin.write_all(b"\n")?;
        self.stdin.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = self.stdout.read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn kill(&mut self) {
        // already-exited children report an error here
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Drop for ChildProcess {
    fn drop(&mut self) {
        self.kill();
    }
}

/// Spawns `<binary> predict-prob <model> - <k>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastTextSpawner {
    binary: PathBuf,
    model: PathBuf,
    top_k: usize,
}

impl FastTextSpawner {
    /// Spawner for a fastText binary and model
    pub fn new(binary: impl Into<PathBuf>, model: impl Into<PathBuf>, top_k: usize) -> Self {
        Self {
            binary: binary.into(),
            model: model.into(),
            top_k,
        }
    }

    /// The command that will be run
    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg("predict-prob")
            .arg(&self.model)
            .arg("-")
            .arg(self.top_k.to_string());
        command
    }
}

impl ProcessSpawner for FastTextSpawner {
    fn spawn(&self) -> io::Result<Box<dyn ClassifierProcess>> {
        let process = ChildProcess::spawn(self.command())?;
        log::debug!(
            "Started {} (pid {}) with model {}",
            self.binary.display(),
            process.id(),
            self.model.display()
        );
        Ok(Box::new(process))
    }
}

/// Parse one response line into `(label, probability)` pairs.
///
/// The `__label__` prefix is stripped when present. An odd number of tokens
/// or an unparsable probability is an error.
pub fn parse_predictions(line: &str) -> Result<Vec<(String, f64)>, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() % 2 != 0 {
        return Err(format!("odd number of tokens in response '{line}'"));
    }

    tokens
        .chunks_exact(2)
        .map(|pair| {
            let label = pair[0].strip_prefix(LABEL_PREFIX).unwrap_or(pair[0]);
            let prob: f64 = pair[1]
                .parse()
                .map_err(|_| format!("invalid probability '{}' for {label}", pair[1]))?;
            Ok((label.to_string(), prob))
        })
        .collect()
}
