use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),

    /// A line that is neither a comment, a blank, nor a section header and
    /// carries no `=`/`:` delimiter (or an empty key).
    ///
    /// The line number is 1-based and relative to the source being loaded,
    /// not to everything loaded so far.
    #[error("line {line}: not a valid key/value assignment: {text:?}")]
    InvalidLine { line: usize, text: String },

    /// A key/value assignment appeared before any `[section]` header.
    #[error("line {line}: option {text:?} found before any section header")]
    MissingSectionHeader { line: usize, text: String },
}
