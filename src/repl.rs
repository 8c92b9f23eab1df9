use std::io::{self, BufRead, Write};
use crate::executor::{Flow, Launcher};
use crate::shell::Shell;

/// Drops the line terminator. Empty lines and `#` comments give `None`.
pub fn strip_line(raw: &str) -> Option<&str> {
    let line = raw.strip_suffix('\n').unwrap_or(raw);
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() || line.starts_with('#') {
        None
    } else {
        Some(line)
    }
}

/// Feeds lines from `input` to the shell until end of input or `exit`.
pub struct Repl<R: BufRead> {
    input: R,
    interactive: bool,
}

impl<R: BufRead> Repl<R> {
    /// The prompt is only shown when `interactive` is set.
    pub fn new(input: R, interactive: bool) -> Self {
        Repl { input, interactive }
    }

    /// Returns the exit status for the shell process.
    pub fn run<L: Launcher>(&mut self, shell: &mut Shell<L>) -> i32 {
        let mut buf = String::new();
        loop {
            if self.interactive {
                print!("{}", shell.config().prompt);
                let _ = io::stdout().flush();
            }

            buf.clear();
            match self.input.read_line(&mut buf) {
                Ok(0) => {
                    // End with EOF (e.g. Ctrl+D)
                    if self.interactive {
                        println!();
                    }
                    return 0;
                }
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    eprintln!("scsh: {}", e);
                    continue;
                }
                Err(e) => {
                    eprintln!("scsh: {}", e);
                    return 1;
                }
            }

            let Some(line) = strip_line(&buf) else {
                continue;
            };
            match shell.exec_line(line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit(code)) => return code,
                Err(e) if e.is_fatal() => {
                    eprintln!("scsh: {}", e);
                    return 1;
                }
                Err(e) => eprintln!("scsh: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use super::*;
    use crate::ast::Command;
    use crate::config::Config;
    use crate::executor::{ExecError, WaitOutcome};

    #[derive(Default)]
    struct Recorder {
        launched: Vec<String>,
    }

    impl Launcher for Recorder {
        fn launch(&mut self, pipeline: &[Command]) -> Result<WaitOutcome, ExecError> {
            for cmd in pipeline {
                self.launched.push(cmd.argv.join(" "));
            }
            Ok(WaitOutcome::Exited(0))
        }
    }

    fn run_script(script: &str) -> (i32, Vec<String>) {
        let mut shell = Shell::with_launcher(Config::default(), Recorder::default());
        let code = Repl::new(Cursor::new(script.as_bytes()), false).run(&mut shell);
        (code, shell.launcher().launched.clone())
    }

    #[test]
    fn test_strip_line() {
        assert_eq!(strip_line("ls -la\n"), Some("ls -la"));
        assert_eq!(strip_line("ls\r\n"), Some("ls"));
        assert_eq!(strip_line("no newline"), Some("no newline"));
        assert_eq!(strip_line("\n"), None);
        assert_eq!(strip_line("# comment\n"), None);
        assert_eq!(strip_line("echo # not a comment\n"), Some("echo # not a comment"));
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let (code, launched) = run_script("# header\n\necho a\n   \necho b");
        assert_eq!(code, 0);
        assert_eq!(launched, vec!["echo a", "echo b"]);
    }

    #[test]
    fn test_bad_line_does_not_stop_the_loop() {
        let (code, launched) = run_script("echo \"open\n| wc\necho next\n");
        assert_eq!(code, 0);
        assert_eq!(launched, vec!["echo next"]);
    }

    #[test]
    fn test_exit_stops_reading() {
        let (code, launched) = run_script("echo a\nexit\necho never\n");
        assert_eq!(code, 0);
        assert_eq!(launched, vec!["echo a"]);
    }
}
