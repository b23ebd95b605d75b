//! The "Game" menu: Restart and Quit.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuItem {
    Restart,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 2] = [MenuItem::Restart, MenuItem::Quit];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Restart => "Restart",
            MenuItem::Quit => "Quit",
        }
    }
}

pub struct Menu {
    open: bool,
    cursor: usize,
}

impl Menu {
    pub fn new() -> Self {
        Menu { open: false, cursor: 0 }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opening always puts the cursor back on the first item.
    pub fn open(&mut self) {
        self.open = true;
        self.cursor = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn up(&mut self) {
        self.cursor = (self.cursor + MenuItem::ALL.len() - 1) % MenuItem::ALL.len();
    }

    pub fn down(&mut self) {
        self.cursor = (self.cursor + 1) % MenuItem::ALL.len();
    }

    /// Close the menu and return the highlighted item.
    pub fn select(&mut self) -> MenuItem {
        self.open = false;
        MenuItem::ALL[self.cursor]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_both_ways() {
        let mut m = Menu::new();
        m.open();
        assert_eq!(m.cursor(), 0);
        m.up();
        assert_eq!(m.cursor(), 1);
        m.down();
        assert_eq!(m.cursor(), 0);
        m.down();
        m.down();
        assert_eq!(m.cursor(), 0);
    }

    #[test]
    fn select_closes_and_returns_item() {
        let mut m = Menu::new();
        m.open();
        m.down();
        assert_eq!(m.select(), MenuItem::Quit);
        assert!(!m.is_open());

        m.open();
        assert_eq!(m.select(), MenuItem::Restart);
    }
}
