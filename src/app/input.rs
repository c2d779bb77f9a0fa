use thiserror::Error;

use crate::app::{Message, Model};
use crate::draft::{ClauseField, ClauseId, ClauseInit, MoveDirection};
use crate::markup::{MarkupAction, Selection};
use crate::template::Visibility;

/// A parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Feed a message to `update`
    Dispatch(Message),
    /// Validate and hand the template to the store
    Save,
    /// Print the clause list
    Show,
}

/// Problems with a single script line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
    #[error("no clause at position {position} (draft has {len})")]
    NoSuchClause { position: usize, len: usize },
    #[error("`{command}` does not accept `{value}`")]
    InvalidValue {
        command: &'static str,
        value: String,
    },    #[error("not valid UTF-8")]
    InvalidEncoding,
}

/// Parse one script line against the current draft.
///
/// Blank lines and `#` comments yield `Ok(None)`. Clauses are addressed by
/// their 1-based position in the draft.
pub fn parse_command(line: &str, model: &Model) -> Result<Option<Command>, InputError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (name, rest) = split_word(line);

    let command = match name {
        "add" => {
            let init = if rest.is_empty() {
                ClauseInit::default()
            } else {
                ClauseInit::default().with_title(decode(rest))
            };
            Command::Dispatch(Message::AddClause(init))
        }
        "dup" => Command::Dispatch(Message::DuplicateClause(clause_arg(model, "dup", rest)?.0)),
        "rm" => Command::Dispatch(Message::RemoveClause(clause_arg(model, "rm", rest)?.0)),
        "up" => Command::Dispatch(Message::MoveClause(
            clause_arg(model, "up", rest)?.0,
            MoveDirection::Up,
        )),
        "down" => Command::Dispatch(Message::MoveClause(
            clause_arg(model, "down", rest)?.0,
            MoveDirection::Down,
        )),
        "title" => {
            let (id, text) = clause_arg(model, "title", rest)?;
            Command::Dispatch(Message::UpdateField(id, ClauseField::Title(decode(text))))
        }
        "content" => {
            let (id, text) = clause_arg(model, "content", rest)?;
            Command::Dispatch(Message::UpdateField(id, ClauseField::Content(decode(text))))
        }
        "required" => {
            let (id, value) = clause_arg(model, "required", rest)?;
            let required = match value {
                "on" | "yes" | "true" => true,
                "off" | "no" | "false" => false,
                "" => {
                    return Err(InputError::MissingArgument {
                        command: "required",
                        what: "on or off",
                    });
                }
                other => {
                    return Err(InputError::InvalidValue {
                        command: "required",
                        value: other.to_string(),
                    });
                }
            };
            Command::Dispatch(Message::UpdateField(id, ClauseField::Required(required)))
        }
        "select" => {
            let (id, range) = clause_arg(model, "select", rest)?;
            let (start, end) = split_word(range);
            if start.is_empty() || end.is_empty() {
                return Err(InputError::MissingArgument {
                    command: "select",
                    what: "a start and end offset",
                });
            }
            Command::Dispatch(Message::Focus(
                id,
                Selection::new(number(start)?, number(end)?),
            ))
        }
        "blur" => Command::Dispatch(Message::Blur),
        "undo" => Command::Dispatch(Message::Undo),
        "redo" => Command::Dispatch(Message::Redo),
        "name" => Command::Dispatch(Message::Rename(decode(rest))),
        "description" => Command::Dispatch(Message::SetDescription(decode(rest))),
        "visibility" => {
            let visibility = rest
                .parse::<Visibility>()
                .map_err(|_| InputError::InvalidValue {
                    command: "visibility",
                    value: rest.to_string(),
                })?;
            Command::Dispatch(Message::SetVisibility(visibility))
        }
        "branch" => match rest {
            "" => {
                return Err(InputError::MissingArgument {
                    command: "branch",
                    what: "a branch id or `none`",
                });
            }
            "none" => Command::Dispatch(Message::SetBranch(None)),
            branch => Command::Dispatch(Message::SetBranch(Some(branch.to_string()))),
        },
        "new" => Command::Dispatch(Message::NewTemplate),
        "preview" => Command::Dispatch(Message::TogglePreview),
        "save" => Command::Save,
        "show" => Command::Show,
        other => match other.parse::<MarkupAction>() {
            Ok(action) => Command::Dispatch(Message::ApplyMarkup(action)),
            Err(_) => return Err(InputError::UnknownCommand(other.to_string())),
        },
    };
    Ok(Some(command))
}

/// Split off the first whitespace-delimited word.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}

fn number(text: &str) -> Result<usize, InputError> {
    text.parse()
        .map_err(|_| InputError::InvalidNumber(text.to_string()))
}

/// Resolve a leading 1-based clause position, returning the rest of the line.
fn clause_arg<'a>(
    model: &Model,
    command: &'static str,
    rest: &'a str,
) -> Result<(ClauseId, &'a str), InputError> {
    let (position, tail) = split_word(rest);
    if position.is_empty() {
        return Err(InputError::MissingArgument {
            command,
            what: "a clause position",
        });
    }
    let position = number(position)?;
    let len = model.draft.len();
    position
        .checked_sub(1)
        .and_then(|idx| model.draft.clauses().get(idx))
        .map(|clause| (clause.id.clone(), tail))
        .ok_or(InputError::NoSuchClause { position, len })
}

/// Decode `\n`, `\t` and `\\` escapes in a text argument.
fn decode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{Clause, SequentialIds};
    use crate::markup::HeadingLevel;
    use crate::template::TemplateRecord;

    fn model_with_two_clauses() -> Model {
        let record = TemplateRecord {
            sections: vec![
                Clause::from_init(ClauseId::new("a"), ClauseInit::default()),
                Clause::from_init(ClauseId::new("b"), ClauseInit::default()),
            ],
            ..TemplateRecord::new("org")
        };
        Model::new(record, Box::new(SequentialIds::default()), 10)
    }

    fn parse(line: &str) -> Result<Option<Command>, InputError> {
        parse_command(line, &model_with_two_clauses())
    }

    fn dispatch(line: &str) -> Message {
        match parse(line) {
            Ok(Some(Command::Dispatch(msg))) => msg,
            other => panic!("expected dispatch for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("   "), Ok(None));
        assert_eq!(parse("# note"), Ok(None));
    }

    #[test]
    fn test_positions_resolve_to_ids() {
        assert_eq!(dispatch("rm 2"), Message::RemoveClause(ClauseId::new("b")));
        assert_eq!(
            dispatch("up 2"),
            Message::MoveClause(ClauseId::new("b"), MoveDirection::Up)
        );
    }

    #[test]
    fn test_position_out_of_range() {
        assert_eq!(
            parse("rm 3"),
            Err(InputError::NoSuchClause { position: 3, len: 2 })
        );
        assert_eq!(
            parse("rm 0"),
            Err(InputError::NoSuchClause { position: 0, len: 2 })
        );
    }

    #[test]
    fn test_content_decodes_escapes() {
        assert_eq!(
            dispatch(r"content 1 a\nb\tc \\n"),
            Message::UpdateField(
                ClauseId::new("a"),
                ClauseField::Content("a\nb\tc \\n".to_string())
            )
        );
    }

    #[test]
    fn test_title_keeps_inner_spaces() {
        assert_eq!(
            dispatch("title 1 Governing  Law"),
            Message::UpdateField(
                ClauseId::new("a"),
                ClauseField::Title("Governing  Law".to_string())
            )
        );
    }

    #[test]
    fn test_required_values() {
        assert_eq!(
            dispatch("required 2 on"),
            Message::UpdateField(ClauseId::new("b"), ClauseField::Required(true))
        );
        assert!(matches!(
            parse("required 2 maybe"),
            Err(InputError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse("required 2"),
            Err(InputError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_select_builds_focus() {
        assert_eq!(
            dispatch("select 1 4 0"),
            Message::Focus(ClauseId::new("a"), Selection::new(0, 4))
        );
        assert_eq!(
            parse("select 1 x 2"),
            Err(InputError::InvalidNumber("x".to_string()))
        );
    }

    #[test]
    fn test_add_with_and_without_title() {
        assert_eq!(dispatch("add"), Message::AddClause(ClauseInit::default()));
        assert_eq!(
            dispatch("add Term and Termination"),
            Message::AddClause(ClauseInit::default().with_title("Term and Termination"))
        );
    }

    #[test]
    fn test_markup_names() {
        assert_eq!(dispatch("bold"), Message::ApplyMarkup(MarkupAction::Bold));
        assert_eq!(
            dispatch("h3"),
            Message::ApplyMarkup(MarkupAction::Heading(HeadingLevel::H3))
        );
    }

    #[test]
    fn test_save_show_and_unknown() {
        assert_eq!(parse("save"), Ok(Some(Command::Save)));
        assert_eq!(parse("show"), Ok(Some(Command::Show)));
        assert_eq!(
            parse("frobnicate"),
            Err(InputError::UnknownCommand("frobnicate".to_string()))
        );
    }

    #[test]
    fn test_branch_and_visibility() {
        assert_eq!(dispatch("branch none"), Message::SetBranch(None));
        assert_eq!(
            dispatch("branch north"),
            Message::SetBranch(Some("north".to_string()))
        );
        assert_eq!(
            dispatch("visibility branch"),
            Message::SetVisibility(Visibility::Branch)
        );
        assert!(parse("visibility team").is_err());
    }
}
