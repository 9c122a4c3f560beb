//! Framebuffer and shade types for a monochrome terminal screen.
//!
//! The game targets a one-color display, so cells carry a shade instead of a
//! full style. The palette that turns shades into terminal colors lives with the
//! output side.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Brightness of a cell on a monochrome display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shade {
    /// Background
    #[default]
    Off,
    /// Frame and static labels
    Dim,
    /// Blocks and live text
    Lit,
}

/// Colors used for each shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub dim: Rgb,
    pub lit: Rgb,
}

impl Palette {
    pub fn color(&self, shade: Shade) -> Rgb {
        match shade {
            Shade::Off => self.background,
            Shade::Dim => self.dim,
            Shade::Lit => self.lit,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        // Blue-white on black, like a small OLED panel.
        Self {
            background: Rgb::new(0, 0, 0),
            dim: Rgb::new(90, 110, 140),
            lit: Rgb::new(200, 230, 255),
        }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub shade: Shade,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        shade: Shade::Off,
    };
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// 2D framebuffer of shaded character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, shade: Shade) {
        self.set(x, y, Cell { ch, shade });
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, shade: Shade) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, shade);
            cx += 1;
        }
    }

    /// Write `s` centered inside the span `[x, x + width)` of row `y`
    pub fn put_str_centered(&mut self, x: u16, width: u16, y: u16, s: &str, shade: Shade) {
        let len = s.chars().count() as u16;
        let offset = width.saturating_sub(len) / 2;
        self.put_str(x + offset, y, s, shade);
    }

    /// Write the last `digits` decimal digits of `value`, zero-padded
    pub fn put_number(&mut self, x: u16, y: u16, value: u32, digits: u16, shade: Shade) {
        let mut rest = value;
        for i in (0..digits).rev() {
            let digit = (rest % 10) as u8;
            rest /= 10;
            self.put_char(x + i, y, char::from(b'0' + digit), shade);
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, shade: Shade) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, shade);
            }
        }
    }

    /// Text of one row, for tests and debugging
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .map(|x| self.get(x, y).map_or(' ', |cell| cell.ch))
            .collect()
    }
}
