/// Browser location and session history, as seen by the router.
pub trait History {
    /// Path component of the current location, without query or fragment.
    fn pathname(&self) -> String;

    /// Push a new entry and make it current, without a document reload.
    /// Forward entries beyond the cursor are discarded.
    fn push_state(&mut self, url: &str);

    /// Number of entries in the session history.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move the cursor by `delta` entries. Returns false (and stays put)
    /// when the target is out of range.
    fn go(&mut self, delta: isize) -> bool;
}

/// In-process session history: an entry stack with a cursor.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    pub fn new(initial_url: &str) -> Self {
        Self {
            entries: vec![initial_url.to_string()],
            cursor: 0,
        }
    }

    pub fn current_url(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn pathname(&self) -> String {
        pathname_of(self.current_url()).to_string()
    }

    fn push_state(&mut self, url: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(url.to_string());
        self.cursor = self.entries.len() - 1;
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn go(&mut self, delta: isize) -> bool {
        let Some(target) = self.cursor.checked_add_signed(delta) else {
            return false;
        };
        if target >= self.entries.len() {
            return false;
        }
        self.cursor = target;
        true
    }
}

/// Strip `?query` and `#fragment` from a root-relative URL.
pub fn pathname_of(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}
