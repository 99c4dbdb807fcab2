#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    Form,
}

/// Active locale plus the screens visited to reach the current one.
#[derive(Debug, Clone)]
pub struct Router {
    locale: String,
    current: Screen,
    history: Vec<Screen>,
}

impl Router {
    pub fn new(locale: impl Into<String>, start: Screen) -> Self {
        Self {
            locale: locale.into(),
            current: start,
            history: Vec::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn navigate(&mut self, to: Screen) {
        if to != self.current {
            self.history.push(self.current);
            self.current = to;
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Return to the previous screen. Returns false when there is none.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(prev) => {
                self.current = prev;
                true
            }
            None => false,
        }
    }
}
