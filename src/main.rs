use anyhow::Context;
use minish::{Config, Shell, ShellStatus};
use std::io;

fn run(shell: &mut Shell) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    loop {
        let status = shell
            .step(&mut input, &mut stdout, &mut stderr)
            .context("cannot continue")?;
        if status == ShellStatus::Exit {
            return Ok(());
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut shell = Shell::new(Config::default());
    log::debug!("starting with {:?}", shell.config());

    // Every way out of the shell, fatal errors included, exits with 0.
    if let Err(e) = run(&mut shell) {
        eprintln!("minish: {:#}", e);
    }
}
