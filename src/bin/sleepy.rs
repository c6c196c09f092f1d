//! Sleeps for `argv[1]` seconds, 5 by default.

use std::thread;
use std::time::Duration;

const DEFAULT_SECS: u64 = 5;

fn main() {
    let secs = match std::env::args().nth(1) {
        Some(arg) => arg.trim().parse().unwrap_or(0),
        None => DEFAULT_SECS,
    };

    println!("About to sleep.");
    thread::sleep(Duration::from_secs(secs));
    println!("Done sleeping.");
}
