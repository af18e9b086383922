//! Orchestration of the carry-over pipeline for one day.

use std::path::PathBuf;

use anyhow::Result;
use time::Date;

use crate::app::extract::extract_from_path;
use crate::app::locate::Locator;
use crate::app::parse::parse_bullets;
use crate::app::render::render_open_todos;
use crate::app::report::EntryRenderer;
use crate::domain::errors::DailyError;
use crate::domain::format::{EntryFormat, EntryLayout};
use crate::infra::config::Config;
use crate::infra::fs::write_new_entry;

/// Builds and writes daily entries from the previous entry's open TODO items.
pub struct Journal {
    layout: EntryLayout,
    format: EntryFormat,
    locator: Locator,
    renderer: EntryRenderer,
}

impl Journal {
    pub fn new(layout: EntryLayout, format: EntryFormat, lookback_days: u32) -> Result<Self> {
        Ok(Self {
            locator: Locator::new(layout.clone(), lookback_days),
            layout,
            format,
            renderer: EntryRenderer::new()?,
        })
    }

    /// Build a journal from loaded configuration, including any custom template.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut journal = Self::new(
            config.layout(),
            config.entry_format(),
            config.journal.lookback_days(),
        )?;
        if let Some(template) = config.journal.template() {
            journal.renderer = EntryRenderer::from_template_file(&template)?;
        }
        Ok(journal)
    }

    pub fn entry_path(&self, date: Date) -> PathBuf {
        self.layout.path_for(date)
    }

    /// Open TODO items from the most recent previous entry, rendered as bullet lines.
    ///
    /// Returns an empty string when there is no previous entry in the lookback window.
    pub fn carried_todos(&self, today: Date) -> Result<String> {
        let previous = match self.locator.find_previous(today) {
            Ok(path) => path,
            Err(err @ DailyError::NoPreviousEntry { .. }) => {
                tracing::info!(reason = %err, "starting with an empty TODO list");
                return Ok(String::new());
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(path = %previous.display(), "carrying TODO items forward");
        let lines = extract_from_path(&previous, &self.format)?;
        let forest = parse_bullets(lines.as_slice(), &self.format);
        Ok(render_open_todos(&forest, &self.format))
    }

    /// The full entry text for `today`.
    pub fn compose(&self, today: Date) -> Result<String> {
        let todo = self.carried_todos(today)?;
        self.renderer.render(today, &todo, &self.format)
    }

    /// Write the entry for `today` to its dated path, refusing to replace an existing file.
    pub fn write(&self, today: Date) -> Result<PathBuf> {
        let path = self.entry_path(today);
        if path.exists() {
            return Err(DailyError::AlreadyExists { path }.into());
        }
        let entry = self.compose(today)?;
        write_new_entry(&path, &entry)?;
        tracing::info!(path = %path.display(), "wrote daily entry");
        Ok(path)
    }
}
