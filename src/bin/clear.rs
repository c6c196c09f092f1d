use std::io::{self, Write};

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{}{}", termion::clear::All, termion::cursor::Goto(1, 1))?;
    stdout.flush()
}
