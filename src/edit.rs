use crate::styles::{CellStyle, Color, Sides};

/// Changes to one section of the default layout, as entered by the user.
///
/// Values are clamped to the ranges the settings editor accepts rather than
/// rejected.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StyleEdit {
    pub fill_color: Option<Color>,
    /// Percent, 0 to 100.
    pub transparency_percent: Option<f32>,
    pub font_color: Option<Color>,
    pub font_name: Option<String>,
    pub font_size: Option<f32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub margins: Option<Sides<f32>>,
}

pub const FONT_SIZE_RANGE: (f32, f32) = (1.0, 200.0);
pub const MARGIN_RANGE: (f32, f32) = (0.0, 100.0);

impl StyleEdit {
    pub fn is_empty(&self) -> bool {
        *self == StyleEdit::default()
    }

    pub fn apply_to(&self, style: &mut CellStyle) {
        if let Some(color) = self.fill_color {
            style.fill_color = color;
        }
        if let Some(percent) = self.transparency_percent {
            style.fill_transparency = clamp(percent, 0.0, 100.0) / 100.0;
        }
        if let Some(color) = self.font_color {
            style.font_color = color;
        }
        if let Some(name) = &self.font_name {
            style.font_name = name.trim().to_string();
        }
        if let Some(size) = self.font_size {
            style.font_size = clamp(size, FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1);
        }
        if let Some(bold) = self.bold {
            style.font_bold = bold;
        }
        if let Some(italic) = self.italic {
            style.font_italic = italic;
        }
        if let Some(margins) = self.margins {
            let (min, max) = MARGIN_RANGE;
            style.margins = Sides {
                top: clamp(margins.top, min, max),
                bottom: clamp(margins.bottom, min, max),
                left: clamp(margins.left, min, max),
                right: clamp(margins.right, min, max),
            };
        }
    }
}

fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        log::warn!("Ignoring NaN, using {min}");
        return min;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("{value} is out of range {min}..={max}, using {clamped}");
    }
    clamped
}
