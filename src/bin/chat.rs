//! A minimal stdin/stdout REPL wired to [`kinship_reasoner::Engine`], in
//! the same spirit as the teacher's own demo binaries: not a server,
//! just enough of a shell to drive the engine interactively.

use kinship_reasoner::Engine;
use std::io::{self, BufRead, Write};

fn main() {
    env_logger::init();

    let mut engine = Engine::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Kinship reasoning engine. Type a statement or a question; Ctrl-D to exit.");
    loop {
        print!("> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                log::debug!("input: {trimmed}");
                let reply = engine.process(trimmed);
                log::debug!("reply: {reply}");
                println!("{reply}");
            }
            Err(err) => {
                eprintln!("error reading input: {err}");
                break;
            }
        }
    }
}
