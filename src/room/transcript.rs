//! Transcript storage with a bottom-pinned scroll model.

/// Rendered transcript blocks plus the visible-window scroll state.
///
/// The scroll position is measured in lines from the top. Appending re-pins
/// it to the maximum scrollable extent, so the latest entry is always inside
/// the viewport, at initial history load as well as on every new message.
#[derive(Debug)]
pub struct Transcript {
    blocks: Vec<String>,
    viewport_rows: usize,
    scroll_top: usize,
}

impl Transcript {
    pub fn new(viewport_rows: usize) -> Self {
        Self {
            blocks: Vec::new(),
            viewport_rows,
            scroll_top: 0,
        }
    }

    /// Append a rendered block, scroll to the bottom edge and return the block
    pub fn append(&mut self, block: String) -> &str {
        self.blocks.push(block);
        self.scroll_to_bottom();
        self.blocks.last().map(String::as_str).unwrap_or("")
    }

    /// Total rendered line count
    pub fn total_lines(&self) -> usize {
        self.blocks.iter().map(|block| block.lines().count()).sum()
    }

    /// Maximum scrollable extent in lines
    pub fn max_scroll(&self) -> usize {
        self.total_lines().saturating_sub(self.viewport_rows)
    }

    /// Current scroll position in lines from the top
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.max_scroll();
    }

    /// Lines currently inside the viewport
    pub fn visible_window(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .flat_map(|block| block.lines())
            .skip(self.scroll_top)
            .take(self.viewport_rows)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
