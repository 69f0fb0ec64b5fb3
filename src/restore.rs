use crate::lines;
use crate::lines::HEADER;
use crate::map::CommentMap;

impl CommentMap {
    /// Re-interleaves mapped comment blocks into the engine's rendered,
    /// comment-free text.
    ///
    /// Blocks were captured above the line they preceded and are re-emitted
    /// directly after that line's rendering. Mapper and restorer walk tokens
    /// in the same file order, so output ordering relative to other tokens
    /// is preserved even though textual adjacency flips from before to
    /// after.
    pub(crate) fn restore(&self, rendered: &str) -> String {
        let mut out: Vec<&str> = Vec::new();
        if let Some(block) = self.block(HEADER, HEADER) {
            out.extend(block.iter().map(String::as_str));
        }

        let mut section = HEADER.to_string();
        for line in rendered.lines() {
            out.push(line);
            let token = match lines::section_name(line) {
                Some(name) => {
                    section = format!("[{name}]");
                    HEADER
                }
                None => lines::key_token(line),
            };
            if let Some(block) = self.block(&section, token) {
                out.extend(block.iter().map(String::as_str));
            }
        }

        if out.is_empty() {
            String::new()
        } else {
            let mut text = out.join("\n");
            text.push('\n');
            text
        }
    }
}
