use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::warn;

use crate::app::{App, Command, InputError, Message, Model, ToastLevel, parse_command, update, view};

impl App {
    /// Run script commands from `input` against `model`.
    ///
    /// Previews and outlines go to `out`; toasts and bad lines go to
    /// `diag`. A bad line is reported and skipped, never fatal.
    pub fn run(
        &mut self,
        mut model: Model,
        mut input: impl BufRead,
        out: &mut impl Write,
        diag: &mut impl Write,
    ) -> Result<Model> {
        let mut buf = Vec::new();
        let mut line_no = 0_usize;
        loop {
            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .with_context(|| format!("Failed to read script line {}", line_no + 1))?;
            if read == 0 {
                break;
            }
            line_no += 1;
            let parsed = std::str::from_utf8(&buf)
                .map_err(|_| InputError::InvalidEncoding)
                .and_then(|line| parse_command(line, &model));
            let command = match parsed {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    warn!(line = line_no, %err, "skipping script line");
                    writeln!(diag, "line {line_no}: {err}")?;
                    continue;
                }
            };
            model = self.execute(model, command, out)?;
            model = report_toast(model, diag)?;
        }
        Ok(model)
    }

    fn execute(&mut self, model: Model, command: Command, out: &mut impl Write) -> Result<Model> {
        match command {
            Command::Dispatch(msg) => {
                let toggles_preview = matches!(msg, Message::TogglePreview);
                let model = update(model, msg);
                if toggles_preview && model.preview_visible {
                    view::write_draft(out, &model, self.output)?;
                }
                Ok(model)
            }
            Command::Save => Ok(self.save(model)),
            Command::Show => {
                view::write_outline(out, &model)?;
                Ok(model)
            }
        }
    }
}

fn report_toast(model: Model, diag: &mut impl Write) -> Result<Model> {
    let Some((level, message)) = model.toast() else {
        return Ok(model);
    };
    let tag = match level {
        ToastLevel::Info => "info",
        ToastLevel::Error => "error",
    };
    writeln!(diag, "[{tag}] {message}")?;
    Ok(update(model, Message::DismissToast))
}
