//! Prints the argument count and every argument it was started with.

fn main() {
    let args: Vec<String> = std::env::args().collect();
    println!("argc: {}", args.len());
    for (i, arg) in args.iter().enumerate() {
        println!("argv[{}]: {}", i, arg);
    }
}
