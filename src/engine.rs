use indexmap::IndexMap;

use crate::error::Error;
use crate::lines;

/// The underlying INI engine: ordered, comment-blind key/value storage.
///
/// Comments and blank lines are discarded on load;
/// [`CommentedIni`](crate::CommentedIni) layers comment preservation on top
/// of this type without touching its parsing or rendering rules. Section
/// names and keys are trimmed, case-preserving, and compared verbatim.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Ini {
    sections: IndexMap<String, IndexMap<String, String>>,
}

impl Ini {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses structural lines into the store. Additive: loading a second
    /// source keeps earlier sections and keys, later values win on clashes.
    pub fn load_lines(&mut self, input: &[String]) -> Result<(), Error> {
        let mut current: Option<String> = None;
        for (idx, raw) in input.iter().enumerate() {
            if lines::is_comment_or_blank(raw) {
                continue;
            }
            if let Some(name) = lines::section_name(raw) {
                self.sections.entry(name.to_string()).or_default();
                current = Some(name.to_string());
                continue;
            }
            let (key, value) = lines::split_assignment(raw).ok_or_else(|| Error::InvalidLine {
                line: idx + 1,
                text: raw.trim().to_string(),
            })?;
            if key.is_empty() {
                return Err(Error::InvalidLine {
                    line: idx + 1,
                    text: raw.trim().to_string(),
                });
            }
            let section = current.clone().ok_or_else(|| Error::MissingSectionHeader {
                line: idx + 1,
                text: raw.trim().to_string(),
            })?;
            self.sections
                .entry(section)
                .or_default()
                .insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    /// Loads purely programmatic content, no parsing involved.
    pub fn load_mapping<S, O>(&mut self, mapping: S)
    where
        S: IntoIterator<Item = (String, O)>,
        O: IntoIterator<Item = (String, String)>,
    {
        for (section, options) in mapping {
            let entry = self.sections.entry(section).or_default();
            for (key, value) in options {
                entry.insert(key, value);
            }
        }
    }

    /// Renders the structural content: `[name]` headers followed by one
    /// `key = value` (or `key=value`) line per option, insertion order, no
    /// comments, no blank separators.
    pub fn serialize(&self, space_around_delimiters: bool) -> String {
        let delimiter = if space_around_delimiters { " = " } else { "=" };
        let mut out = String::new();
        for (name, options) in &self.sections {
            out.push('[');
            out.push_str(name);
            out.push_str("]\n");
            for (key, value) in options {
                out.push_str(key);
                out.push_str(delimiter);
                out.push_str(value);
                out.push('\n');
            }
        }
        out
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|options| options.get(key))
            .map(String::as_str)
    }

    /// Sets an option, creating the section if needed.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Removes one option, returning its value. The section stays alive
    /// even when its last option goes; use [`remove_section`](Self::remove_section)
    /// to drop it entirely.
    pub fn remove_option(&mut self, section: &str, key: &str) -> Option<String> {
        self.sections
            .get_mut(section)
            .and_then(|options| options.shift_remove(key))
    }

    pub fn remove_section(&mut self, section: &str) -> Option<IndexMap<String, String>> {
        self.sections.shift_remove(section)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    pub fn has_option(&self, section: &str, key: &str) -> bool {
        self.sections
            .get(section)
            .is_some_and(|options| options.contains_key(key))
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn options(&self, section: &str) -> Option<Vec<&str>> {
        self.sections
            .get(section)
            .map(|options| options.keys().map(String::as_str).collect())
    }
}
