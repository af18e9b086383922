//! Assembly of the full daily entry from the carried-over TODO block.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use minijinja::Environment;
use serde::Serialize;
use time::Date;
use time::macros::format_description;

use crate::domain::format::EntryFormat;

const BUILTIN_TEMPLATE: &str = "daily_entry";

const DEFAULT_ENTRY_TEMPLATE: &str = "# {{ date }}

## TODO

{{ start }}

{{ todo }}

{{ end }}

---";

/// Heading date such as `March  3, 2024`: full month name, space-padded day, four-digit year.
pub fn heading_date(date: Date) -> Result<String> {
    date.format(format_description!(
        "[month repr:long] [day padding:space], [year]"
    ))
    .context("failed to format entry date")
}

/// Renders entries from the built-in layout or a user-supplied template file.
pub struct EntryRenderer {
    env: Environment<'static>,
    custom: Option<CustomTemplate>,
}

struct CustomTemplate {
    path: PathBuf,
    source: String,
}

impl EntryRenderer {
    /// Create a renderer using the built-in entry layout.
    pub fn new() -> Result<Self> {
        Ok(Self {
            env: default_environment()?,
            custom: None,
        })
    }

    /// Create a renderer that uses the template stored at `path`.
    pub fn from_template_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to load entry template from {}", path.display()))?;
        let renderer = Self {
            env: default_environment()?,
            custom: Some(CustomTemplate {
                path: path.to_path_buf(),
                source,
            }),
        };
        // Parse once up front so syntax errors are reported before any lookup.
        renderer.with_custom_env(|_| Ok(()))?;
        Ok(renderer)
    }

    /// Produce the entry for `date` with `todo` placed between the markers.
    pub fn render(&self, date: Date, todo: &str, format: &EntryFormat) -> Result<String> {
        let context = EntryContext {
            date: heading_date(date)?,
            start: format.todo_start(),
            todo,
            end: format.todo_end(),
        };

        if self.custom.is_some() {
            return self.with_custom_env(|env| {
                env.get_template("custom")
                    .and_then(|template| template.render(&context))
                    .map_err(|err| anyhow!("failed to render custom entry template: {err}"))
            });
        }

        self.env
            .get_template(BUILTIN_TEMPLATE)
            .and_then(|template| template.render(&context))
            .map_err(|err| anyhow!("failed to render daily entry: {err}"))
    }

    fn with_custom_env<T>(&self, f: impl FnOnce(&Environment<'_>) -> Result<T>) -> Result<T> {
        let Some(custom) = &self.custom else {
            return Err(anyhow!("no custom entry template configured"));
        };
        let mut env = Environment::new();
        env.add_template("custom", &custom.source).map_err(|err| {
            anyhow!(
                "invalid entry template '{}': {err}",
                custom.path.display()
            )
        })?;
        f(&env)
    }
}

fn default_environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template(BUILTIN_TEMPLATE, DEFAULT_ENTRY_TEMPLATE)
        .map_err(|err| anyhow!("failed to register built-in entry template: {err}"))?;
    Ok(env)
}

#[derive(Serialize)]
struct EntryContext<'a> {
    date: String,
    start: &'a str,
    todo: &'a str,
    end: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn heading_date_pads_day_with_space() {
        assert_eq!(heading_date(date!(2024 - 03 - 03)).unwrap(), "March  3, 2024");
        assert_eq!(heading_date(date!(2024 - 03 - 13)).unwrap(), "March 13, 2024");
        assert_eq!(heading_date(date!(1999 - 12 - 31)).unwrap(), "December 31, 1999");
    }

    #[test]
    fn renders_builtin_layout() {
        let renderer = EntryRenderer::new().unwrap();
        let entry = renderer
            .render(date!(2024 - 01 - 15), "* [ ] ship it", &EntryFormat::default())
            .unwrap();
        assert_eq!(
            entry,
            "# January 15, 2024\n\n## TODO\n\n<!-- [TODO_START] -->\n\n* [ ] ship it\n\n<!-- [TODO_END] -->\n\n---"
        );
    }

    #[test]
    fn empty_block_keeps_markers() {
        let renderer = EntryRenderer::new().unwrap();
        let entry = renderer
            .render(date!(2024 - 01 - 15), "", &EntryFormat::default())
            .unwrap();
        assert!(entry.contains("<!-- [TODO_START] -->\n\n\n\n<!-- [TODO_END] -->"));
    }

    #[test]
    fn markup_in_todo_text_is_not_escaped() {
        let renderer = EntryRenderer::new().unwrap();
        let entry = renderer
            .render(date!(2024 - 01 - 15), "* [ ] fix <b>&</b> \"quotes\"", &EntryFormat::default())
            .unwrap();
        assert!(entry.contains("* [ ] fix <b>&</b> \"quotes\""));
    }

    #[test]
    fn custom_template_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("entry.md.j2");
        fs::write(&path, "Day: {{ date }}\n{{ start }}\n{{ todo }}\n{{ end }}\n").unwrap();

        let renderer = EntryRenderer::from_template_file(&path).unwrap();
        let entry = renderer
            .render(date!(2024 - 02 - 01), "* [ ] x", &EntryFormat::default())
            .unwrap();
        assert_eq!(
            entry,
            "Day: February  1, 2024\n<!-- [TODO_START] -->\n* [ ] x\n<!-- [TODO_END] -->"
        );
    }

    #[test]
    fn broken_custom_template_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("broken.j2");
        fs::write(&path, "{{ date ").unwrap();
        assert!(EntryRenderer::from_template_file(&path).is_err());
        assert!(EntryRenderer::from_template_file(&temp.path().join("missing.j2")).is_err());
    }
}
