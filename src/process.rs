use crate::ShellError;
use crate::parser::Args;
use libc::{c_char, c_int, pid_t};
use std::ffi::CString;
use std::io::{self, Write};
use std::ptr;

/// Runs an external program to completion.
///
/// The child replaces its image with `args[0]` (no PATH search). If that
/// fails, the child reports it on stderr and exits; the parent never sees
/// the failure and simply reaps the child. The child's exit status is
/// discarded.
pub fn spawn_and_wait(args: Args<'_>) -> Result<(), ShellError> {
    let Some(program) = args.program() else {
        return Ok(());
    };

    let c_args = args
        .iter()
        .map(|arg| CString::new(arg).map_err(|_| ShellError::NulInArgument(arg.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    let mut argv: Vec<*const c_char> = c_args.iter().map(|arg| arg.as_ptr()).collect();
    argv.push(ptr::null());

    // Everything the child needs is prepared before fork, so the child
    // does not allocate.
    let prefix = format!("minish: {}: ", program);

    // Buffered output would otherwise be duplicated into the child.
    let _ = io::stdout().flush();

    match unsafe { libc::fork() } {
        -1 => Err(ShellError::Fork(io::Error::last_os_error())),
        0 => exec_or_report(&argv, prefix.as_bytes()),
        pid => {
            log::debug!("spawned {} as pid {}", program, pid);
            wait_for(pid)
        }
    }
}

/// Child side: replace the process image, or report and exit.
fn exec_or_report(argv: &[*const c_char], prefix: &[u8]) -> ! {
    unsafe {
        libc::execv(argv[0], argv.as_ptr());
    }

    let reason = exec_failure_reason(io::Error::last_os_error().raw_os_error());
    write_stderr(prefix);
    write_stderr(reason.as_bytes());
    write_stderr(b"\n");

    unsafe { libc::_exit(0) }
}

fn exec_failure_reason(errno: Option<c_int>) -> &'static str {
    match errno {
        Some(libc::ENOENT) => "No such file or directory",
        Some(libc::EACCES) => "Permission denied",
        Some(libc::ENOEXEC) => "Exec format error",
        Some(libc::ENOTDIR) => "Not a directory",
        Some(libc::E2BIG) => "Argument list too long",
        _ => "cannot execute",
    }
}

fn write_stderr(mut bytes: &[u8]) {
    while !bytes.is_empty() {
        let n = unsafe { libc::write(libc::STDERR_FILENO, bytes.as_ptr().cast(), bytes.len()) };
        if n <= 0 {
            if n == -1 && io::Error::last_os_error().kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return;
        }
        bytes = &bytes[n as usize..];
    }
}

/// Blocks until `pid` terminates.
fn wait_for(pid: pid_t) -> Result<(), ShellError> {
    let mut status: c_int = 0;
    loop {
        if unsafe { libc::waitpid(pid, &mut status, 0) } != -1 {
            break;
        }
        let e = io::Error::last_os_error();
        if e.kind() != io::ErrorKind::Interrupted {
            return Err(ShellError::Wait(e));
        }
    }

    if libc::WIFEXITED(status) {
        log::debug!("pid {} exited with status {}", pid, libc::WEXITSTATUS(status));
    } else if libc::WIFSIGNALED(status) {
        log::debug!("pid {} killed by signal {}", pid, libc::WTERMSIG(status));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ArgVector, parse};
    use crate::reader::InputLine;

    fn run(line: &str) -> Result<(), ShellError> {
        let mut input = InputLine::with_limit(256);
        let mut argv = ArgVector::with_limit(16);
        input.set(line.as_bytes()).unwrap();
        spawn_and_wait(parse(&mut input, &mut argv).unwrap())
    }

    #[test]
    fn runs_program_to_completion() {
        assert!(run("/bin/sh -c true\n").is_ok());
    }

    #[test]
    fn child_exit_status_is_ignored() {
        assert!(run("/bin/sh -c false\n").is_ok());
    }

    #[test]
    fn missing_program_does_not_fail_the_parent() {
        assert!(run("./definitely-not-a-program-here\n").is_ok());
        // the parent is still able to run commands afterwards
        assert!(run("/bin/sh -c true\n").is_ok());
    }

    #[test]
    fn empty_arguments_spawn_nothing() {
        assert!(run("   \n").is_ok());
    }

    #[test]
    fn nul_byte_in_argument_is_rejected_before_fork() {
        match run("/bin/sh a\0b\n") {
            Err(ShellError::NulInArgument(arg)) => assert_eq!(arg, "a\0b"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn failure_reasons() {
        assert_eq!(exec_failure_reason(Some(libc::ENOENT)), "No such file or directory");
        assert_eq!(exec_failure_reason(Some(libc::EACCES)), "Permission denied");
        assert_eq!(exec_failure_reason(None), "cannot execute");
    }
}
