use super::{MenuAction, MenuDescriptor, MenuGateway, MenuId, ScreenPoint};

/// Where menus are drawn: every menu is a column of equally tall rows
/// anchored at `origin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuLayout {
    pub origin: ScreenPoint,
    pub width: i32,
    pub row_height: i32,
}

impl MenuLayout {
    pub fn contains(&self, menu: &MenuDescriptor, point: ScreenPoint) -> bool {
        let height = self.row_height * menu.row_count() as i32;
        point.x >= self.origin.x
            && point.x < self.origin.x + self.width
            && point.y >= self.origin.y
            && point.y < self.origin.y + height
    }

    /// Index of the entry under `point`, skipping the title and text rows.
    pub fn entry_at(&self, menu: &MenuDescriptor, point: ScreenPoint) -> Option<usize> {
        if !self.contains(menu, point) || self.row_height <= 0 {
            return None;
        }
        let row = ((point.y - self.origin.y) / self.row_height) as usize;
        let index = row.checked_sub(1 + menu.lines.len())?;
        (index < menu.entries.len()).then_some(index)
    }

    /// Centre of the row showing entry `index`.
    pub fn entry_point(&self, menu: &MenuDescriptor, index: usize) -> ScreenPoint {
        let row = (1 + menu.lines.len() + index) as i32;
        ScreenPoint::new(
            self.origin.x + self.width / 2,
            self.origin.y + row * self.row_height + self.row_height / 2,
        )
    }
}

/// In-memory [`MenuGateway`]: a stack of descriptors, the last one active.
#[derive(Clone, Debug)]
pub struct MenuStack {
    layout: MenuLayout,
    menus: Vec<MenuDescriptor>,
    hovered_entry: Option<usize>,
}

impl MenuStack {
    pub fn new(layout: MenuLayout) -> Self {
        Self {
            layout,
            menus: Vec::new(),
            hovered_entry: None,
        }
    }

    pub fn layout(&self) -> MenuLayout {
        self.layout
    }

    pub fn depth(&self) -> usize {
        self.menus.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuDescriptor> {
        self.menus.iter()
    }
}

impl MenuGateway for MenuStack {
    fn open(&mut self, menu: MenuDescriptor) {
        tracing::debug!(menu = %menu.id, "opening menu");
        self.hovered_entry = None;
        self.menus.push(menu);
    }

    fn close_active(&mut self) -> Option<MenuId> {
        self.hovered_entry = None;
        let closed = self.menus.pop().map(|menu| menu.id);
        if let Some(id) = closed {
            tracing::debug!(menu = %id, "closed menu");
        }
        closed
    }

    fn replace(&mut self, id: MenuId, menu: MenuDescriptor) -> bool {
        match self.menus.iter_mut().rev().find(|open| open.id == id) {
            Some(open) => {
                *open = menu;
                true
            }
            None => false,
        }
    }

    fn is_position_inside(&self, point: ScreenPoint) -> bool {
        self.menus
            .last()
            .is_some_and(|menu| self.layout.contains(menu, point))
    }

    fn active_menu(&self) -> Option<&MenuDescriptor> {
        self.menus.last()
    }

    fn click(&mut self, point: ScreenPoint) -> Option<MenuAction> {
        let menu = self.menus.last()?;
        let index = self.layout.entry_at(menu, point)?;
        menu.entries.get(index).map(|entry| entry.action)
    }

    fn motion(&mut self, point: ScreenPoint) {
        self.hovered_entry = self
            .menus
            .last()
            .and_then(|menu| self.layout.entry_at(menu, point));
    }

    fn hovered_entry(&self) -> Option<usize> {
        self.hovered_entry
    }

    fn clear(&mut self) {
        self.hovered_entry = None;
        self.menus.clear();
    }
}
