pub mod builder;

use thiserror::Error;
use crate::ast::CommandList;
use crate::lexer::Operator;

pub use builder::CommandBuilder;

pub trait Parser {
    fn parse(&mut self) -> Result<CommandList, BuildError>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("unexpected operator '{0}' as first token in a new command")]
    OperatorAtCommandStart(Operator),
    #[error("redirection target file expected after '{0}'")]
    MissingRedirectTarget(Operator),
    #[error("no command to build")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Command, Redirect, RedirectKind};
    use crate::lexer::Lexer;

    fn build(src: &str) -> Result<CommandList, BuildError> {
        let tokens = Lexer::new(src, 64).tokenize().expect("lexing failed");
        CommandBuilder::new(&tokens).parse()
    }

    fn cmd(argv: &[&str], op: Option<Operator>) -> Command {
        Command {
            argv: argv.iter().map(|s| s.to_string()).collect(),
            op,
            redirect: None,
        }
    }

    #[test]
    fn test_simple_command() {
        let list = build("echo hello").unwrap();
        assert_eq!(list.as_slice(), &[cmd(&["echo", "hello"], None)]);
    }

    #[test]
    fn test_and_or_sequence() {
        let list = build("echo ok && ls || echo err; echo end").unwrap();
        assert_eq!(
            list.as_slice(),
            &[
                cmd(&["echo", "ok"], Some(Operator::And)),
                cmd(&["ls"], Some(Operator::Or)),
                cmd(&["echo", "err"], Some(Operator::Sequence)),
                cmd(&["echo", "end"], None),
            ]
        );
    }

    #[test]
    fn test_multistage_pipeline() {
        let list = build("ls | grep foo | wc").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.pipeline_end(0), 3);
        assert_eq!(list.get(1), Some(&cmd(&["grep", "foo"], Some(Operator::Pipe))));
    }

    #[test]
    fn test_pipeline_end_stops_at_control_operator() {
        let list = build("a | b && c | d ; e").unwrap();
        assert_eq!(list.pipeline_end(0), 2);
        assert_eq!(list.pipeline_end(2), 4);
        assert_eq!(list.pipeline_end(4), 5);
    }

    #[test]
    fn test_redirect_out() {
        let list = build("ls > out.txt").unwrap();
        assert_eq!(
            list.as_slice(),
            &[Command {
                argv: vec!["ls".to_string()],
                op: None,
                redirect: Some(Redirect {
                    kind: RedirectKind::Out,
                    target: "out.txt".to_string(),
                }),
            }]
        );
    }

    #[test]
    fn test_redirect_composes_with_control_operator() {
        let list = build("echo a >> log.txt && echo b").unwrap();
        let first = list.get(0).unwrap();
        assert_eq!(first.argv, vec!["echo".to_string(), "a".to_string()]);
        assert_eq!(first.op, Some(Operator::And));
        assert_eq!(
            first.redirect,
            Some(Redirect {
                kind: RedirectKind::Append,
                target: "log.txt".to_string(),
            })
        );
        assert_eq!(list.get(1), Some(&cmd(&["echo", "b"], None)));
    }

    #[test]
    fn test_arguments_after_redirect_stay_in_argv() {
        let list = build("echo a > f b").unwrap();
        let first = list.get(0).unwrap();
        assert_eq!(first.argv, vec!["echo", "a", "b"]);
        assert_eq!(first.redirect.as_ref().map(|r| r.target.as_str()), Some("f"));
    }

    #[test]
    fn test_last_redirect_wins() {
        let list = build("echo a > one >> two").unwrap();
        assert_eq!(
            list.get(0).unwrap().redirect,
            Some(Redirect {
                kind: RedirectKind::Append,
                target: "two".to_string(),
            })
        );
    }

    #[test]
    fn test_trailing_sequence_ends_list() {
        let list = build("ls ;").unwrap();
        assert_eq!(list.as_slice(), &[cmd(&["ls"], Some(Operator::Sequence))]);
    }

    #[test]
    fn test_argv_rejoins_to_line() {
        let line = "grep -n foo   file.txt | sort -r";
        let list = build(line).unwrap();
        let rejoined: Vec<String> = list.as_slice().iter().map(|c| c.to_string()).collect();
        assert_eq!(rejoined.join(" "), "grep -n foo file.txt | sort -r");
    }

    #[test]
    fn test_operator_as_first_token() {
        assert_eq!(
            build("&& ls"),
            Err(BuildError::OperatorAtCommandStart(Operator::And))
        );
        assert_eq!(
            build("ls ; | wc"),
            Err(BuildError::OperatorAtCommandStart(Operator::Pipe))
        );
    }

    #[test]
    fn test_missing_redirect_target() {
        assert_eq!(
            build("ls >"),
            Err(BuildError::MissingRedirectTarget(Operator::RedirectOut))
        );
        assert_eq!(
            build("ls >> ; pwd"),
            Err(BuildError::MissingRedirectTarget(Operator::RedirectAppend))
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(build(""), Err(BuildError::Empty));
    }
}
