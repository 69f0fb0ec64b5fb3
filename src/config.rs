//! Comment-preserving INI configuration.
//!
//! This module provides [`CommentedIni`], the main entry point: an INI
//! config that remembers where comments and blank lines sat in the loaded
//! sources and puts them back when writing, even after options or whole
//! sections were changed or removed in between.
//!
//! # Overview
//!
//! [`CommentedIni`] wires together three pieces:
//!
//! - the [`Ini`] engine, which owns structural content and knows nothing
//!   about comments;
//! - a [`CommentMap`] built at load time, attaching each run of comment and
//!   blank lines to the section or key it preceded;
//! - a pre-write reconciliation pass that re-homes comments whose anchor
//!   was deleted, so nothing is lost.
//!
//! # Example
//!
//! ```
//! use commented_ini::CommentedIni;
//!
//! let source = "\
//! ## deployment settings
//! [server]
//! ## keep in sync with the proxy
//! port = 8080
//! host = example.test
//! ";
//!
//! let mut config = CommentedIni::new();
//! config.read_from_lines(source.as_bytes())?;
//!
//! config.set("server", "port", "9090");
//! config.remove_option("server", "host");
//!
//! let out = config.writes(true);
//! assert!(out.contains("# deployment settings"));
//! assert!(out.contains("# keep in sync with the proxy"));
//! assert!(out.contains("port = 9090"));
//! # Ok::<(), commented_ini::Error>(())
//! ```

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use crate::engine::Ini;
use crate::error::Error;
use crate::map::CommentMap;

/// An INI configuration that survives read-modify-write round trips with
/// its comments intact.
///
/// # Lifecycle
///
/// 1. **Load** with [`read`](Self::read) or
///    [`read_from_lines`](Self::read_from_lines); both capture comments.
///    [`read_from_string`](Self::read_from_string) and
///    [`read_from_mapping`](Self::read_from_mapping) feed the engine only.
/// 2. **Mutate** through [`set`](Self::set),
///    [`remove_option`](Self::remove_option) and
///    [`remove_section`](Self::remove_section); the comment map is left
///    alone until write time.
/// 3. **Write** with [`write`](Self::write) or [`writes`](Self::writes):
///    the engine renders structure only, orphaned comments are reconciled,
///    and every surviving block is re-interleaved.
///
/// An instance that never loaded from text behaves exactly like the bare
/// engine on write: no comment artifacts, no behavior change.
#[derive(Debug, Default)]
pub struct CommentedIni {
    engine: Ini,
    /// `None` until the first text-based load; never shared between
    /// instances.
    comments: Option<CommentMap>,
}

impl CommentedIni {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and parses the given files in order.
    ///
    /// Files that cannot be opened or read are skipped and simply omitted
    /// from the returned list; parse errors in a readable file propagate.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use commented_ini::CommentedIni;
    ///
    /// let mut config = CommentedIni::new();
    /// let loaded = config.read(&["defaults.ini", "site.ini"])?;
    /// println!("loaded {} files", loaded.len());
    /// # Ok::<(), commented_ini::Error>(())
    /// ```
    pub fn read<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<Vec<PathBuf>, Error> {
        let mut read_ok = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(err) => {
                    debug!(path = %path.display(), %err, "skipping unreadable config file");
                    continue;
                }
            };
            self.ingest(text.lines().map(str::to_string).collect())?;
            read_ok.push(path.to_path_buf());
        }
        Ok(read_ok)
    }

    /// Reads from an already-open stream, capturing comments the same way
    /// [`read`](Self::read) does.
    pub fn read_from_lines<R: BufRead>(&mut self, reader: R) -> Result<(), Error> {
        let input = reader.lines().collect::<Result<Vec<_>, _>>()?;
        self.ingest(input)
    }

    /// Parses a string through the engine alone. Comments in string-sourced
    /// input are not preserved; this path is deliberately not intercepted.
    pub fn read_from_string(&mut self, text: &str) -> Result<(), Error> {
        let input: Vec<String> = text.lines().map(str::to_string).collect();
        self.engine.load_lines(&input)
    }

    /// Loads purely programmatic content. Bypasses comment capture
    /// entirely; in-memory config has no comments to preserve.
    pub fn read_from_mapping<S, O>(&mut self, mapping: S)
    where
        S: IntoIterator<Item = (String, O)>,
        O: IntoIterator<Item = (String, String)>,
    {
        self.engine.load_mapping(mapping);
    }

    /// Engine first: a source the engine rejects must not leave its
    /// comments behind in the map.
    fn ingest(&mut self, input: Vec<String>) -> Result<(), Error> {
        self.engine.load_lines(&input)?;
        self.comments
            .get_or_insert_with(CommentMap::new)
            .update_from_lines(&input);
        Ok(())
    }

    /// Serializes the configuration with comments restored and writes it to
    /// `destination`.
    ///
    /// The engine renders structure into an intermediate buffer first; the
    /// comment map is then reconciled against live state (relocating blocks
    /// whose key or section was deleted since load) and re-interleaved.
    /// With no map present the engine's output passes through verbatim.
    pub fn write<W: Write>(
        &mut self,
        mut destination: W,
        space_around_delimiters: bool,
    ) -> Result<(), Error> {
        let text = self.writes(space_around_delimiters);
        destination.write_all(text.as_bytes())?;
        Ok(())
    }

    /// [`write`](Self::write), returning the final text instead.
    pub fn writes(&mut self, space_around_delimiters: bool) -> String {
        let rendered = self.engine.serialize(space_around_delimiters);
        match self.comments.as_mut() {
            Some(map) => {
                map.reconcile(&self.engine);
                map.restore(&rendered)
            }
            None => rendered,
        }
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.engine.get(section, key)
    }

    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.engine.set(section, key, value);
    }

    pub fn remove_option(&mut self, section: &str, key: &str) -> Option<String> {
        self.engine.remove_option(section, key)
    }

    pub fn remove_section(&mut self, section: &str) -> Option<IndexMap<String, String>> {
        self.engine.remove_section(section)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.engine.has_section(section)
    }

    pub fn has_option(&self, section: &str, key: &str) -> bool {
        self.engine.has_option(section, key)
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.engine.sections()
    }

    pub fn options(&self, section: &str) -> Option<Vec<&str>> {
        self.engine.options(section)
    }

    /// The comment map, for inspection. `None` when nothing was loaded from
    /// a text source.
    pub fn comments(&self) -> Option<&CommentMap> {
        self.comments.as_ref()
    }
}
