/// Text typed into the query editor. The cursor always sits at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuffer {
    text: String,
}

impl QueryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Control characters are ignored; command keys are filtered by the caller.
    pub fn append(&mut self, c: char) {
        if !c.is_control() {
            self.text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Width in chars, used to place the caret
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
