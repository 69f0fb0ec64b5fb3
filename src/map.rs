use indexmap::IndexMap;
use tracing::debug;

use crate::lines;
use crate::lines::HEADER;

/// Two-level map from location tokens to comment blocks: section token
/// (`"[name]"` or [`HEADER`]) to key token (key name or [`HEADER`]) to the
/// raw comment and blank lines that preceded that location in the source.
///
/// Insertion order mirrors file order, which the restorer and the
/// reconciler both rely on.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommentMap {
    pub(crate) sections: IndexMap<String, IndexMap<String, Vec<String>>>,
}

impl CommentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks raw source lines and attaches each run of comment/blank lines
    /// to the location token it belongs with:
    ///
    /// - a block above a key sticks to that key;
    /// - a block above a section header stays above it by sticking to
    ///   whatever token came before the header;
    /// - a trailing block at end of input sticks to the last token seen.
    ///
    /// Additive across calls: loading further sources extends existing
    /// blocks and adds new tokens alongside the old ones.
    pub fn update_from_lines<I, S>(&mut self, input: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut section = HEADER.to_string();
        let mut key = HEADER.to_string();
        let mut pending: Vec<String> = Vec::new();

        for line in input {
            let line = line.as_ref();
            if lines::is_comment_or_blank(line) {
                pending.push(line.to_string());
                continue;
            }
            if let Some(name) = lines::section_name(line) {
                self.commit(&section, &key, &mut pending);
                section = format!("[{name}]");
                key = HEADER.to_string();
                // Seed the header bucket so the section always has an
                // anchor for reconciliation.
                self.commit(&section, &key, &mut Vec::new());
            } else {
                key = lines::key_token(line).to_string();
                self.commit(&section, &key, &mut pending);
            }
        }
        self.commit(&section, &key, &mut pending);

        debug!(sections = self.sections.len(), "comment map updated");
    }

    /// Extends the block at `(section, key)`, creating the entry when it is
    /// missing. Extending rather than overwriting keeps earlier loads and a
    /// trailing end-of-file block intact.
    fn commit(&mut self, section: &str, key: &str, pending: &mut Vec<String>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .entry(key.to_string())
            .or_default()
            .append(pending);
    }

    /// The comment block attached to a location token, if any.
    pub fn block(&self, section: &str, key: &str) -> Option<&[String]> {
        self.sections
            .get(section)
            .and_then(|keys| keys.get(key))
            .map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
