use std::io::{self, BufRead, Write};

pub mod builtins;
pub mod parser;
pub mod process;
pub mod reader;

pub use builtins::Builtin;
pub use parser::{ArgVector, Args, ParseError, parse};
pub use reader::{InputLine, ReadError, ReadOutcome};

/// Result of a command execution.
#[derive(Debug, PartialEq, Eq)]
pub enum ShellStatus {
    /// The shell should continue running.
    Continue,
    /// The shell should exit. The shell always exits with status 0.
    Exit,
}

/// Errors raised while running a command.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("fork failed: {0}")]
    Fork(#[source] io::Error),
    #[error("wait failed: {0}")]
    Wait(#[source] io::Error),
    #[error("argument contains a NUL byte: {0:?}")]
    NulInArgument(String),
}

impl ShellError {
    /// Whether the shell has to terminate after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Fork(_) | ShellError::Wait(_))
    }
}

/// Compile-time defaults of the shell.
#[derive(Debug, Clone)]
pub struct Config {
    pub prompt: String,
    /// Maximum length of an input line in bytes, newline included.
    pub max_line: usize,
    /// Maximum number of tokens on a line.
    pub max_args: usize,
    /// Environment variable printed by the `home` builtin.
    pub lookup_var: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: ">>> ".to_string(),
            max_line: 256,
            max_args: 16,
            lookup_var: "HOME".to_string(),
        }
    }
}

/// State owned by the read-eval loop.
///
/// The line buffer and the argument vector are allocated once and reused
/// on every iteration.
pub struct Shell {
    config: Config,
    line: InputLine,
    argv: ArgVector,
}

impl Shell {
    pub fn new(config: Config) -> Self {
        let line = InputLine::with_limit(config.max_line);
        let argv = ArgVector::with_limit(config.max_args);
        Self { config, line, argv }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs one iteration of the loop: prompt, read, parse, dispatch.
    ///
    /// End of input and read errors both end the shell. Overlong lines,
    /// too many arguments and undecodable input are reported and skipped.
    pub fn step<R: BufRead, W: Write, E: Write>(
        &mut self,
        input: &mut R,
        stdout: &mut W,
        stderr: &mut E,
    ) -> Result<ShellStatus, ShellError> {
        match self.line.read_line(&self.config.prompt, input, stdout) {
            Ok(ReadOutcome::Line) => {}
            Ok(ReadOutcome::Eof) => {
                log::debug!("end of input");
                return Ok(ShellStatus::Exit);
            }
            Err(ReadError::Io(e)) => {
                log::debug!("read failed: {}", e);
                return Ok(ShellStatus::Exit);
            }
            Err(e @ ReadError::LineTooLong { .. }) => {
                let _ = writeln!(stderr, "minish: {}", e);
                return Ok(ShellStatus::Continue);
            }
        }

        let args = match parse(&mut self.line, &mut self.argv) {
            Ok(args) => args,
            Err(e) => {
                let _ = writeln!(stderr, "minish: {}", e);
                return Ok(ShellStatus::Continue);
            }
        };

        dispatch(args, &self.config.lookup_var, stdout, stderr)
    }
}

/// Orchestrates command execution.
///
/// An empty line does nothing. A builtin runs in-process; anything else
/// is treated as the path of an external program, which is run to
/// completion before returning.
pub fn dispatch<W: Write, E: Write>(
    args: Args<'_>,
    lookup_var: &str,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<ShellStatus, ShellError> {
    let Some(command) = args.program() else {
        return Ok(ShellStatus::Continue);
    };

    if let Ok(builtin) = command.parse::<Builtin>() {
        log::debug!("builtin {:?}", builtin);
        return Ok(builtin.execute(lookup_var, stdout, stderr));
    }

    match process::spawn_and_wait(args) {
        Ok(()) => Ok(ShellStatus::Continue),
        Err(e) if !e.is_fatal() => {
            let _ = writeln!(stderr, "minish: {}", e);
            Ok(ShellStatus::Continue)
        }
        Err(e) => Err(e),
    }
}
