use ratatui::layout::Rect;

/// Transient sub-panels, each owned by the mode that opens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Help,
    KindPicker,
    QueryEditor,
    Detail,
}

impl Panel {
    /// Requested (height, width); shrunk to fit small terminals
    pub fn size(self) -> (u16, u16) {
        match self {
            Panel::Help => (15, 40),
            Panel::KindPicker => (10, 30),
            Panel::QueryEditor => (3, 60),
            Panel::Detail => (20, 90),
        }
    }
}

/// Tracks terminal size and which sub-panels are open. Geometry is always
/// derived from the size passed in, never stored.
#[derive(Debug, Clone, Default)]
pub struct LayoutManager {
    width: u16,
    height: u16,
    open: Vec<Panel>,
}

impl LayoutManager {
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn open(&mut self, panel: Panel) {
        if !self.open.contains(&panel) {
            self.open.push(panel);
        }
    }

    pub fn close(&mut self, panel: Panel) {
        self.open.retain(|p| *p != panel);
    }

    pub fn close_all(&mut self) {
        self.open.clear();
    }

    pub fn is_open(&self, panel: Panel) -> bool {
        self.open.contains(&panel)
    }

    /// Open panels, bottom first
    pub fn panels(&self) -> &[Panel] {
        &self.open
    }

    /// Rows of the result list for the current size
    pub fn visible_rows(&self) -> usize {
        visible_rows(root_panel(self.area()))
    }
}

/// Root panel: the whole terminal minus the status line
pub fn root_panel(area: Rect) -> Rect {
    Rect {
        height: area.height.saturating_sub(1),
        ..area
    }
}

pub fn status_line(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    }
}

/// Inside of a bordered panel
pub fn visible_rows(panel: Rect) -> usize {
    panel.height.saturating_sub(2) as usize
}

pub fn panel_rect(panel: Panel, area: Rect) -> Rect {
    let (height, width) = panel.size();
    centered(height, width, area)
}

/// Rect of at most `height` x `width`, centered in `outer`
pub fn centered(height: u16, width: u16, outer: Rect) -> Rect {
    let height = height.min(outer.height);
    let width = width.min(outer.width);

    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}
