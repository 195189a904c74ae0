use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use unicode_width::UnicodeWidthStr;

use crate::config::{Config, DEFAULT_PROGRESS_WIDTH};
use crate::task::BoardState;
use crate::view::{self, Progress};

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
    progress_width: usize,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => io::stdout().is_terminal(),
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };
        let progress_width = cfg
            .get_usize("progress.width")?
            .unwrap_or(DEFAULT_PROGRESS_WIDTH);

        Ok(Self {
            color,
            progress_width,
        })
    }

    pub fn plain(progress_width: usize) -> Self {
        Self {
            color: false,
            progress_width,
        }
    }

    /// Displayed tasks as a table, numbered by display position, followed by
    /// the progress readout.
    #[tracing::instrument(skip(self, out, state))]
    pub fn write_board<W: Write>(&self, mut out: W, state: &BoardState) -> anyhow::Result<()> {
        let headers = vec![
            "#".to_string(),
            "ID".to_string(),
            "Done".to_string(),
            "Task".to_string(),
        ];

        let rows: Vec<Vec<String>> = view::displayed_tasks(state)
            .into_iter()
            .enumerate()
            .map(|(idx, task)| {
                let check = if task.completed { "[x]" } else { "[ ]" };
                let text = if task.completed {
                    self.paint(&task.text, self.completed_style(state.dark_mode))
                } else {
                    task.text.clone()
                };
                vec![
                    self.paint(&(idx + 1).to_string(), "33"),
                    task.id.to_string(),
                    check.to_string(),
                    text,
                ]
            })
            .collect();

        if rows.is_empty() {
            writeln!(out, "No tasks to show.")?;
        } else {
            write_table(&mut out, headers, rows)?;
        }
        writeln!(out)?;
        self.write_progress(&mut out, &Progress::of(&state.tasks), state.dark_mode)?;

        if !state.show_completed {
            let hidden = state.tasks.iter().filter(|task| task.completed).count();
            if hidden > 0 {
                writeln!(out, "({hidden} completed hidden)")?;
            }
        }

        Ok(())
    }

    pub fn write_progress<W: Write>(
        &self,
        mut out: W,
        progress: &Progress,
        dark_mode: bool,
    ) -> anyhow::Result<()> {
        let width = self.progress_width;
        let filled = ((progress.percent() / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        let bar = format!("{}{}", "#".repeat(filled), "-".repeat(width - filled));
        let bar_color = if dark_mode { "36" } else { "34" };

        writeln!(
            out,
            "[{}] {:>3.0}%  {}",
            self.paint(&bar, bar_color),
            progress.percent(),
            progress.summary()
        )?;
        Ok(())
    }

    fn completed_style(&self, dark_mode: bool) -> &'static str {
        if dark_mode { "9;90" } else { "9;2" }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for (header, width) in headers.iter().zip(&widths) {
        write!(writer, "{header:width$} ", width = *width)?;
    }
    writeln!(writer)?;

    for width in &widths {
        write!(writer, "{:-<width$} ", "", width = *width)?;
    }
    writeln!(writer)?;

    for row in rows {
        for (cell, width) in row.iter().zip(&widths) {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = width.saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
