use log::debug;
use parking_lot::Mutex;

/// Routing service the search flow drives
pub trait Navigator: Send + Sync {
    /// Path currently displayed
    fn location(&self) -> String;

    /// Navigate to `path`
    fn push(&self, path: &str);
}

/// In-memory history stack
#[derive(Debug)]
pub struct HistoryNavigator {
    entries: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(vec![start.into()]),
        }
    }

    /// Every path visited, oldest first
    pub fn history(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for HistoryNavigator {
    fn location(&self) -> String {
        self.entries.lock().last().cloned().unwrap_or_else(|| "/".to_string())
    }

    fn push(&self, path: &str) {
        debug!("Navigating to {}", path);
        self.entries.lock().push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_updates_location() {
        let nav = HistoryNavigator::new("/foods");
        nav.push("/recipes/food/52771");
        assert_eq!(nav.location(), "/recipes/food/52771");
        assert_eq!(nav.history(), vec!["/foods", "/recipes/food/52771"]);
    }
}
