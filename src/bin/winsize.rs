//! Prints the size of the controlling terminal.

fn main() {
    match termion::terminal_size() {
        Ok((cols, rows)) => println!("rows: {}, cols: {}", rows, cols),
        Err(e) => {
            eprintln!("winsize: cannot read terminal size: {}", e);
            std::process::exit(1);
        }
    }
}
