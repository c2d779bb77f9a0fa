use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};

use crate::app::Model;
use crate::preview::{self, Preview};

/// How a draft preview is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Terminal text with bold/italic/underline attributes
    #[default]
    Styled,
    /// Terminal text without attributes
    Plain,
    /// Preview markup
    Html,
}

/// Write the read-only preview of every clause.
pub fn write_draft(out: &mut impl Write, model: &Model, mode: OutputMode) -> io::Result<()> {
    if mode == OutputMode::Html {
        return write_html(out, model);
    }
    let styled = mode == OutputMode::Styled;
    let name = model.template.name.trim();
    if !name.is_empty() {
        heading(out, &name.to_uppercase(), styled)?;
        queue!(out, Print("\n"))?;
    }
    for clause in &model.draft {
        let marker = if clause.required { " (required)" } else { "" };
        heading(out, &format!("{}{marker}", clause.title), styled)?;
        preview::write_terminal(out, &Preview::parse(&clause.content), styled)?;
    }
    out.flush()
}

fn heading(out: &mut impl Write, text: &str, styled: bool) -> io::Result<()> {
    if styled {
        queue!(
            out,
            SetAttribute(Attribute::Bold),
            SetAttribute(Attribute::Underlined),
            Print(text),
            SetAttribute(Attribute::Reset),
            Print("\n"),
        )
    } else {
        queue!(out, Print(text), Print("\n"))
    }
}

fn write_html(out: &mut impl Write, model: &Model) -> io::Result<()> {
    writeln!(out, "<h1>{}</h1>", preview::escape(&model.template.name))?;
    for clause in &model.draft {
        let required = if clause.required { " data-required" } else { "" };
        writeln!(out, "<section{required}>")?;
        writeln!(out, "<header>{}</header>", preview::escape(&clause.title))?;
        let markup = preview::render(&clause.content);
        if !markup.is_empty() {
            writeln!(out, "{markup}")?;
        }
        writeln!(out, "</section>")?;
    }
    out.flush()
}

/// Write the clause list with positions, ids and history depth.
pub fn write_outline(out: &mut impl Write, model: &Model) -> io::Result<()> {
    let name = if model.template.name.is_empty() {
        "(untitled)"
    } else {
        model.template.name.as_str()
    };
    let dirty = if model.dirty { " *" } else { "" };
    writeln!(
        out,
        "{name}{dirty} [{} | undo {} | redo {}]",
        model.template.visibility,
        model.history.undo_depth(),
        model.history.redo_depth()
    )?;
    for (idx, clause) in model.draft.iter().enumerate() {
        let focused = model
            .focus
            .as_ref()
            .filter(|focus| focus.clause == clause.id);
        let cursor = if focused.is_some() { '>' } else { ' ' };
        let required = if clause.required { " (required)" } else { "" };
        writeln!(
            out,
            "{cursor}{}. {}{required} <{}>",
            idx + 1,
            clause.title,
            clause.id
        )?;
        for line in clause.content.lines() {
            writeln!(out, "     {line}")?;
        }
        if let Some(focus) = focused {
            writeln!(
                out,
                "     selection {}..{}",
                focus.selection.start(),
                focus.selection.end()
            )?;
        }
    }
    out.flush()
}
