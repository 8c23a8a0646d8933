// console/listener.rs

use crate::console::command_handler::{handle_command, Reply};
use crate::console::Console;
use std::io::{self, BufRead, Write};
use tracing::info;

/// Reads commands line by line until `/quit` or end of input and writes each
/// reply to `output`.
pub fn listen_for_commands<R: BufRead, W: Write>(
    console: &mut Console,
    input: R,
    mut output: W,
) -> io::Result<()> {
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        match handle_command(&line, console) {
            Reply::Quit => {
                info!("Session ended by user");
                return Ok(());
            }
            Reply::Text(reply) if reply.is_empty() => {}
            Reply::Text(reply) => writeln!(output, "{}", reply.trim_end())?,
        }
        write!(output, "> ")?;
        output.flush()?;
    }

    info!("Input closed, ending session");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use std::fs;

    #[test]
    fn stops_at_quit() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            offers_path: dir.path().join("offers.csv"),
            catalog_path: dir.path().join("catalog.csv"),
            ..AppConfig::default()
        };
        fs::write(&config.catalog_path, "Name,Walmart,Safeway\nRice,$1.00,$1.20\n").unwrap();
        let mut console = Console::new(config);

        let input = "/qty 2 Rice\n\n/quit\n/qty 9 Rice\n";
        let mut output = Vec::new();
        listen_for_commands(&mut console, input.as_bytes(), &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("✅ Rice: qty 2"));
        assert_eq!(console.basket.quantity("Rice"), Some(2));
    }
}
