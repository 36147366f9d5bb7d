use std::fmt;
use std::str::FromStr;

/// 24-bit packed colour in the host's byte order: red in the low byte, blue in the high byte.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Color {
        Color(r as u32 | (g as u32) << 8 | (b as u32) << 16)
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (
            (self.0 & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            ((self.0 >> 16) & 0xFF) as u8,
        )
    }
}

/// Displays as `#RRGGBB`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.rgb();
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected a colour like #RRGGBB, got {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 {
            return Err(ParseColorError(s.to_string()));
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| ParseColorError(s.to_string()))?;
        Ok(Color::from_rgb(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FillKind {
    Solid,
    /// Cleared fill, the slide background shows through.
    #[default]
    Background,
    /// Gradient, pattern, picture and the like. Applied as solid.
    Other,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DashPattern {
    #[default]
    Solid,
    Dotted,
    Dashed,
    DashDot,
    DashDotDot,
}

impl DashPattern {
    /// Code used by the settings file.
    pub fn code(self) -> i32 {
        match self {
            DashPattern::Solid => 1,
            DashPattern::Dotted => 2,
            DashPattern::Dashed => 3,
            DashPattern::DashDot => 4,
            DashPattern::DashDotDot => 5,
        }
    }

    pub fn from_code(code: i32) -> DashPattern {
        match code {
            2 => DashPattern::Dotted,
            3 => DashPattern::Dashed,
            4 => DashPattern::DashDot,
            5 => DashPattern::DashDotDot,
            1 => DashPattern::Solid,
            other => {
                log::warn!("Unknown dash style code {other}, using solid");
                DashPattern::Solid
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
            Edge::Right => "right",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderSide {
    pub visible: bool,
    pub color: Color,
    /// Points.
    pub weight: f32,
    pub dash: DashPattern,
}

impl Default for BorderSide {
    fn default() -> Self {
        BorderSide {
            visible: true,
            color: Color::BLACK,
            weight: 0.75,
            dash: DashPattern::Solid,
        }
    }
}

/// Four values indexed by [`Edge`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Sides<T> {
    pub top: T,
    pub bottom: T,
    pub left: T,
    pub right: T,
}

impl<T: Copy> Sides<T> {
    pub fn uniform(value: T) -> Sides<T> {
        Sides {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }

    pub fn get(&self, edge: Edge) -> T {
        match edge {
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
            Edge::Right => self.right,
        }
    }
}

impl<T> Sides<T> {
    pub fn get_mut(&mut self, edge: Edge) -> &mut T {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Bottom => &mut self.bottom,
            Edge::Left => &mut self.left,
            Edge::Right => &mut self.right,
        }
    }
}

/// Visual attributes of one table section.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CellStyle {
    pub fill_kind: FillKind,
    pub fill_color: Color,
    /// 0.0 opaque, 1.0 fully transparent.
    pub fill_transparency: f32,
    /// Empty means "leave the cell's font alone".
    pub font_name: String,
    /// Points, 0 means "leave the cell's size alone".
    pub font_size: f32,
    pub font_bold: bool,
    pub font_italic: bool,
    pub font_color: Color,
    /// Text frame insets in points.
    pub margins: Sides<f32>,
    pub borders: Sides<BorderSide>,
}

/// Header and body styles of a table.
///
/// `None` marks a section that could not be sampled; rows using it are left
/// untouched on apply.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TableLayout {
    pub header: Option<CellStyle>,
    pub body: Option<CellStyle>,
}

impl TableLayout {
    pub fn new(header: CellStyle, body: CellStyle) -> TableLayout {
        TableLayout {
            header: Some(header),
            body: Some(body),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.body.is_none()
    }

    /// Style for a 1-based row.
    pub fn for_row(&self, row: usize) -> Option<&CellStyle> {
        if row == 1 {
            self.header.as_ref()
        } else {
            self.body.as_ref()
        }
    }
}
