//! Chat screen state management

use crate::application::conversation::Conversation;
use crate::config::AppConfig;
use crate::domain::ResponseShape;

/// Chat screen state: the conversation plus everything the view needs
pub struct ChatState {
    /// Conversation turns and current result set
    pub conversation: Conversation,
    /// Current input buffer
    pub input: String,
    /// Cursor position in input, in characters
    pub cursor_pos: usize,
    /// Scroll offset for the transcript
    pub scroll_offset: u16,
    /// Number of exchanges still waiting for a reply
    pub pending: usize,
    /// Loading animation frame
    pub loading_frame: usize,
    /// Status message
    pub status_message: Option<String>,
    /// How the backend packs reply data
    pub shape: ResponseShape,
    /// Whether the table shows the company column
    pub show_company: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl ChatState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            conversation: Conversation::new(&config.assistant_label, &config.greeting),
            input: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            pending: 0,
            loading_frame: 0,
            status_message: None,
            shape: config.response_shape,
            show_company: config.show_company,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    /// Mark one more exchange as in flight
    pub fn begin_request(&mut self) {
        self.pending += 1;
        self.status_message = None;
        self.scroll_to_bottom();
    }

    /// Mark one exchange as settled
    pub fn finish_request(&mut self) {
        self.pending = self.pending.saturating_sub(1);
        self.scroll_to_bottom();
    }

    /// Get the current input and clear it
    pub fn take_input(&mut self) -> String {
        self.cursor_pos = 0;
        std::mem::take(&mut self.input)
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len())
    }

    fn char_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor_pos);
        self.input.insert(idx, c);
        self.cursor_pos += 1;
    }

    /// Delete character before cursor (backspace)
    pub fn delete_char(&mut self) {
        if self.cursor_pos > 0 {
            let idx = self.byte_index(self.cursor_pos - 1);
            self.input.remove(idx);
            self.cursor_pos -= 1;
        }
    }

    /// Delete character at cursor (delete key)
    pub fn delete_char_forward(&mut self) {
        if self.cursor_pos < self.char_len() {
            let idx = self.byte_index(self.cursor_pos);
            self.input.remove(idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_pos < self.char_len() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_pos = self.char_len();
    }

    /// Scroll transcript up; `max_scroll` resolves the pinned-to-bottom state
    pub fn scroll_up(&mut self, max_scroll: u16) {
        self.scroll_offset = self.scroll_offset.min(max_scroll);
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self, max_scroll: u16) {
        if self.scroll_offset < max_scroll {
            self.scroll_offset += 1;
        }
    }

    /// Scroll to bottom of transcript
    pub fn scroll_to_bottom(&mut self) {
        // Resolved during render once the content height is known
        self.scroll_offset = u16::MAX;
    }

    /// Clear the conversation
    pub fn clear_conversation(&mut self) {
        self.conversation.clear();
        self.scroll_offset = 0;
        self.status_message = Some("Conversation cleared".into());
    }

    /// Update loading animation frame
    pub fn tick_loading(&mut self) {
        if self.is_loading() {
            self.loading_frame = (self.loading_frame + 1) % 4;
        }
    }

    /// Check if input is a command
    pub fn is_command(&self) -> bool {
        self.input.starts_with('/') || self.input.starts_with(':')
    }

    /// Get command name if input is a command
    pub fn get_command(&self) -> Option<&str> {
        if self.is_command() {
            let cmd = self.input.trim_start_matches(|c| c == '/' || c == ':');
            cmd.split_whitespace().next()
        } else {
            None
        }
    }
}
