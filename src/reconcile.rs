use tracing::debug;

use crate::engine::Ini;
use crate::lines;
use crate::lines::HEADER;
use crate::map::CommentMap;

impl CommentMap {
    /// Relocates comment blocks whose anchor was deleted through the engine
    /// since load, so no comment silently disappears on write.
    ///
    /// Sections are walked in reverse insertion order and keys in reverse
    /// within each section. Orphaned blocks accumulate reversed in a buffer
    /// that persists across sections; the first surviving anchor met while
    /// walking backward absorbs the buffer re-reversed, which restores the
    /// original file order of stacked orphans. A dead section loses its map
    /// entry after every bucket, header included, has been orphaned.
    /// Anything still buffered at the end floats to the top-of-file bucket.
    ///
    /// Never fails: the worst outcome is a block landing on a less precise
    /// anchor than the one it started on.
    pub(crate) fn reconcile(&mut self, engine: &Ini) {
        let mut orphaned: Vec<String> = Vec::new();

        let section_tokens: Vec<String> = self.sections.keys().rev().cloned().collect();
        for token in section_tokens {
            // The top-of-file bucket carries no liveness; skip anything
            // that is not a bracketed header.
            let Some(name) = lines::section_name(&token).map(str::to_string) else {
                continue;
            };
            let section_alive = engine.has_section(&name);

            let keys: Vec<String> = match self.sections.get(&token) {
                Some(section_map) => section_map.keys().rev().cloned().collect(),
                None => continue,
            };
            for key in keys {
                let alive = if key == HEADER {
                    section_alive
                } else {
                    engine.has_option(&name, &key)
                };
                if alive {
                    if !orphaned.is_empty() {
                        debug!(
                            section = %token,
                            key = %key,
                            lines = orphaned.len(),
                            "relocating orphaned comments onto surviving anchor"
                        );
                        self.sections
                            .entry(token.clone())
                            .or_default()
                            .entry(key)
                            .or_default()
                            .extend(orphaned.drain(..).rev());
                    }
                } else if let Some(block) = self
                    .sections
                    .get_mut(&token)
                    .and_then(|section_map| section_map.shift_remove(&key))
                {
                    orphaned.extend(block.into_iter().rev());
                }
            }

            if !section_alive {
                self.sections.shift_remove(&token);
            }
        }

        if !orphaned.is_empty() {
            debug!(
                lines = orphaned.len(),
                "no surviving anchor; floating orphaned comments to top of file"
            );
            self.sections
                .entry(HEADER.to_string())
                .or_default()
                .entry(HEADER.to_string())
                .or_default()
                .extend(orphaned.drain(..).rev());
        }
    }
}
