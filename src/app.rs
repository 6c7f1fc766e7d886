pub const BUY_QUANTITIES: [u32; 3] = [1, 10, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Computers,
    Upgrades,
    Prestige,
}

impl Panel {
    pub fn title(self) -> &'static str {
        match self {
            Panel::Computers => "Computers",
            Panel::Upgrades => "Upgrades",
            Panel::Prestige => "Prestige",
        }
    }
}

#[derive(Debug, Default)]
pub struct App {
    panel: Panel,
    pub selected_factory: usize,
    pub selected_upgrade: usize,
    pub selected_prestige: usize,
    quantity_index: usize,
    pub confirm_prestige: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn next_panel(&mut self) {
        self.panel = match self.panel {
            Panel::Computers => Panel::Upgrades,
            Panel::Upgrades => Panel::Prestige,
            Panel::Prestige => Panel::Computers,
        };
    }

    pub fn previous_panel(&mut self) {
        self.panel = match self.panel {
            Panel::Computers => Panel::Prestige,
            Panel::Upgrades => Panel::Computers,
            Panel::Prestige => Panel::Upgrades,
        };
    }

    pub fn quantity(&self) -> u32 {
        BUY_QUANTITIES[self.quantity_index.min(BUY_QUANTITIES.len() - 1)]
    }

    pub fn raise_quantity(&mut self) {
        if self.quantity_index + 1 < BUY_QUANTITIES.len() {
            self.quantity_index += 1;
        }
    }

    pub fn lower_quantity(&mut self) {
        self.quantity_index = self.quantity_index.saturating_sub(1);
    }

    fn selection_mut(&mut self) -> &mut usize {
        match self.panel {
            Panel::Computers => &mut self.selected_factory,
            Panel::Upgrades => &mut self.selected_upgrade,
            Panel::Prestige => &mut self.selected_prestige,
        }
    }

    /// Move the focused panel's cursor, wrapping at both ends.
    pub fn move_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let selection = self.selection_mut();
        let mut idx = *selection as isize + delta;
        if idx < 0 {
            idx = len as isize - 1;
        } else if idx >= len as isize {
            idx = 0;
        }
        *selection = idx as usize;
    }

    /// Keep cursors inside lists that shrink as upgrades are bought.
    pub fn clamp_selections(&mut self, factories: usize, upgrades: usize, prestige: usize) {
        clamp(&mut self.selected_factory, factories);
        clamp(&mut self.selected_upgrade, upgrades);
        clamp(&mut self.selected_prestige, prestige);
    }
}

fn clamp(selection: &mut usize, len: usize) {
    if len == 0 {
        *selection = 0;
    } else if *selection >= len {
        *selection = len - 1;
    }
}
