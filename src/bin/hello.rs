//! Asks for a name and greets it.

use std::io::{self, Write};

fn main() -> io::Result<()> {
    print!("What is your name? ");
    io::stdout().flush()?;

    let mut name = String::new();
    io::stdin().read_line(&mut name)?;
    let name = name.trim_end_matches(['\n', '\r']);

    println!("Hello, {}. Nice to meet you!", name);
    Ok(())
}
