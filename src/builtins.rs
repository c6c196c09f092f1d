use crate::ShellStatus;
use std::io::Write;
use std::str::FromStr;

/// Fixed usage text printed by `help`.
pub const HELP_TEXT: &str = "\
minish: a minimal shell

Type a program path followed by its arguments and press enter.
Programs are not searched for in PATH: give an absolute path or a
path relative to the current directory, e.g. ./target/debug/args.

Built-in commands:
  exit    leave the shell
  help    show this message
  home    print the value of $HOME
";

/// Enumeration of all supported builtin commands.
#[derive(Debug, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Help,
    Home,
}

impl FromStr for Builtin {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exit" => Ok(Builtin::Exit),
            "help" => Ok(Builtin::Help),
            "home" => Ok(Builtin::Home),
            _ => Err(()),
        }
    }
}

impl Builtin {
    /// Executes the builtin command.
    ///
    /// Arguments after the command name are ignored by every builtin.
    /// `lookup_var` is the environment variable printed by `home`.
    pub fn execute<W: Write, E: Write>(
        &self,
        lookup_var: &str,
        mut stdout: W,
        mut stderr: E,
    ) -> ShellStatus {
        match self {
            Builtin::Exit => ShellStatus::Exit,
            Builtin::Help => {
                let _ = write!(stdout, "{}", HELP_TEXT);
                ShellStatus::Continue
            }
            Builtin::Home => {
                match std::env::var(lookup_var) {
                    Ok(value) => {
                        let _ = writeln!(stdout, "{}", value);
                    }
                    Err(_) => {
                        let _ = writeln!(stderr, "home: {} not set", lookup_var);
                    }
                }
                ShellStatus::Continue
            }
        }
    }
}
