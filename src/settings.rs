//! Default table layout persisted as XML in the user's config directory.
//!
//! ```xml
//! <DefaultTableSettings>
//!   <HeaderStyle>
//!     <FillForeColorRGB>12874308</FillForeColorRGB>
//!     <FontName>Meiryo</FontName>
//!     <BorderTop><Visible>true</Visible><DashStyle>1</DashStyle></BorderTop>
//!     ...
//!   </HeaderStyle>
//!   <BodyStyle>...</BodyStyle>
//! </DefaultTableSettings>
//! ```

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use xml::reader::{EventReader, XmlEvent};
use xml::writer::{EmitterConfig, EventWriter, XmlEvent as WriteEvent};

use crate::styles::{BorderSide, CellStyle, Color, DashPattern, Edge, FillKind, Sides, TableLayout};

const ROOT: &str = "DefaultTableSettings";
const HEADER: &str = "HeaderStyle";
const BODY: &str = "BodyStyle";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings: {0}")]
    Read(#[from] xml::reader::Error),
    #[error("cannot write settings: {0}")]
    Write(#[from] xml::writer::Error),
    #[error("expected <DefaultTableSettings> as root element, found <{0}>")]
    UnexpectedRoot(String),
    #[error("invalid value {value:?} in <{field}>")]
    InvalidValue { field: String, value: String },
}

/// Built-in default: blue header with white text, white body with black text.
pub fn builtin_default() -> TableLayout {
    let header = CellStyle {
        fill_kind: FillKind::Solid,
        fill_color: Color::from_rgb(68, 114, 196),
        fill_transparency: 0.0,
        font_name: "游ゴシック".to_string(),
        font_size: 11.0,
        font_bold: false,
        font_italic: false,
        font_color: Color::WHITE,
        margins: Sides {
            top: 3.6,
            bottom: 3.6,
            left: 7.2,
            right: 7.2,
        },
        borders: Sides::uniform(BorderSide::default()),
    };
    let body = CellStyle {
        fill_color: Color::WHITE,
        font_color: Color::BLACK,
        ..header.clone()
    };
    TableLayout::new(header, body)
}

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> SettingsStore {
        SettingsStore { path: path.into() }
    }

    /// `<config dir>/table-painter/DefaultTableSettings.xml`
    pub fn at_default_location() -> SettingsStore {
        SettingsStore::new(settings_path(dirs::config_dir()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: a missing or broken file yields [`builtin_default`].
    pub fn load_default_layout(&self) -> TableLayout {
        if !self.path.exists() {
            log::debug!("No settings at {:?}, using built-in default", self.path);
            return builtin_default();
        }
        match self.read() {
            Ok(layout) => layout,
            Err(e) => {
                log::warn!("Ignoring settings: {e}");
                builtin_default()
            }
        }
    }

    pub fn read(&self) -> Result<TableLayout, SettingsError> {
        let file = File::open(&self.path).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse(BufReader::new(file))
    }

    pub fn save_default_layout(&self, layout: &TableLayout) -> Result<(), SettingsError> {
        let io_error = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let file = File::create(&self.path).map_err(io_error)?;
        let mut out = write(BufWriter::new(file), layout)?;
        out.flush().map_err(io_error)?;
        log::info!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

/// Reads a layout. Sections absent from the document keep the built-in
/// default; fields absent from a present section stay zero or empty, except
/// borders, which fall back to [`BorderSide::default`].
pub fn parse(reader: impl Read) -> Result<TableLayout, SettingsError> {
    let mut layout = builtin_default();
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();

    for event in EventReader::new(reader) {
        match event? {
            XmlEvent::StartElement { name, .. } => {
                let tag = name.local_name;
                if path.is_empty() && tag != ROOT {
                    return Err(SettingsError::UnexpectedRoot(tag));
                }
                if path.len() == 1 {
                    if let Some(section) = section_mut(&mut layout, &tag) {
                        *section = Some(persisted_style(CellStyle::default()));
                        log::debug!("Reading <{tag}>");
                    }
                }
                path.push(tag);
                text.clear();
            }
            XmlEvent::Characters(chunk) | XmlEvent::CData(chunk) => text.push_str(&chunk),
            XmlEvent::EndElement { .. } => {
                let segments: Vec<&str> = path.iter().map(String::as_str).collect();
                match segments.as_slice() {
                    [_, section, field] if edge_of(field).is_none() => {
                        if let Some(Some(style)) = section_mut(&mut layout, section) {
                            assign_style(style, field, text.trim())?;
                        }
                    }
                    [_, section, border, field] => {
                        let edge = edge_of(border);
                        if let (Some(Some(style)), Some(edge)) = (section_mut(&mut layout, section), edge) {
                            assign_border(style.borders.get_mut(edge), field, text.trim())?;
                        }
                    }
                    _ => {}
                }
                text.clear();
                path.pop();
            }
            XmlEvent::EndDocument => break,
            _ => {}
        }
    }
    Ok(layout)
}

/// Writes `layout` and hands back the underlying writer. Empty sections are
/// left out.
pub fn write<W: Write>(writer: W, layout: &TableLayout) -> Result<W, SettingsError> {
    let mut w = EmitterConfig::new()
        .perform_indent(true)
        .create_writer(writer);
    w.write(WriteEvent::start_element(ROOT))?;
    for (tag, style) in [(HEADER, &layout.header), (BODY, &layout.body)] {
        if let Some(style) = style {
            w.write(WriteEvent::start_element(tag))?;
            write_style(&mut w, style)?;
            w.write(WriteEvent::end_element())?;
        }
    }
    w.write(WriteEvent::end_element())?;
    Ok(w.into_inner())
}

fn write_style<W: Write>(w: &mut EventWriter<W>, style: &CellStyle) -> Result<(), SettingsError> {
    leaf(w, "FillForeColorRGB", style.fill_color.0)?;
    leaf(w, "FillTransparency", style.fill_transparency)?;
    leaf(w, "FontColorRGB", style.font_color.0)?;
    leaf(w, "FontName", &style.font_name)?;
    leaf(w, "FontSize", style.font_size)?;
    leaf(w, "FontBold", style.font_bold)?;
    leaf(w, "FontItalic", style.font_italic)?;
    for edge in Edge::ALL {
        leaf(w, &format!("Margin{}", edge_tag(edge)), style.margins.get(edge))?;
    }
    for edge in Edge::ALL {
        let border = style.borders.get(edge);
        w.write(WriteEvent::start_element(
            format!("Border{}", edge_tag(edge)).as_str(),
        ))?;
        leaf(w, "Visible", border.visible)?;
        leaf(w, "ColorRGB", border.color.0)?;
        leaf(w, "Weight", border.weight)?;
        leaf(w, "DashStyle", border.dash.code())?;
        w.write(WriteEvent::end_element())?;
    }
    Ok(())
}

fn leaf<W: Write>(
    w: &mut EventWriter<W>,
    tag: &str,
    value: impl ToString,
) -> Result<(), SettingsError> {
    w.write(WriteEvent::start_element(tag))?;
    let value = value.to_string();
    if !value.is_empty() {
        w.write(WriteEvent::characters(&value))?;
    }
    w.write(WriteEvent::end_element())?;
    Ok(())
}

/// Persisted sections are always solid fills with default borders.
fn persisted_style(style: CellStyle) -> CellStyle {
    CellStyle {
        fill_kind: FillKind::Solid,
        borders: Sides::uniform(BorderSide::default()),
        ..style
    }
}

fn section_mut<'a>(layout: &'a mut TableLayout, tag: &str) -> Option<&'a mut Option<CellStyle>> {
    match tag {
        HEADER => Some(&mut layout.header),
        BODY => Some(&mut layout.body),
        other => {
            log::debug!("Ignoring unknown section <{other}>");
            None
        }
    }
}

fn settings_path(config_dir: Option<PathBuf>) -> PathBuf {
    let dir = config_dir.unwrap_or_else(|| {
        log::warn!("No config directory, keeping settings in the current directory");
        PathBuf::from(".")
    });
    dir.join("table-painter").join("DefaultTableSettings.xml")
}

fn edge_tag(edge: Edge) -> &'static str {
    match edge {
        Edge::Top => "Top",
        Edge::Bottom => "Bottom",
        Edge::Left => "Left",
        Edge::Right => "Right",
    }
}

fn edge_of(tag: &str) -> Option<Edge> {
    let side = tag.strip_prefix("Border")?;
    Edge::ALL.into_iter().find(|&edge| edge_tag(edge) == side)
}

fn assign_style(style: &mut CellStyle, field: &str, text: &str) -> Result<(), SettingsError> {
    match field {
        "FillForeColorRGB" => style.fill_color = color(field, text)?,
        "FillTransparency" => style.fill_transparency = bounded(field, value(field, text)?, 0.0, 1.0),
        "FontColorRGB" => style.font_color = color(field, text)?,
        "FontName" => style.font_name = text.to_string(),
        "FontSize" => style.font_size = value(field, text)?,
        "FontBold" => style.font_bold = boolean(field, text)?,
        "FontItalic" => style.font_italic = boolean(field, text)?,
        "MarginTop" => style.margins.top = margin(field, text)?,
        "MarginBottom" => style.margins.bottom = margin(field, text)?,
        "MarginLeft" => style.margins.left = margin(field, text)?,
        "MarginRight" => style.margins.right = margin(field, text)?,
        other => log::debug!("Ignoring unknown field <{other}>"),
    }
    Ok(())
}

fn assign_border(border: &mut BorderSide, field: &str, text: &str) -> Result<(), SettingsError> {
    match field {
        "Visible" => border.visible = boolean(field, text)?,
        "ColorRGB" => border.color = color(field, text)?,
        "Weight" => border.weight = weight(field, text)?,
        "DashStyle" => border.dash = DashPattern::from_code(value(field, text)?),
        other => log::debug!("Ignoring unknown border field <{other}>"),
    }
    Ok(())
}

fn invalid(field: &str, text: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        value: text.to_string(),
    }
}

fn value<T: FromStr>(field: &str, text: &str) -> Result<T, SettingsError> {
    text.parse().map_err(|_| invalid(field, text))
}

/// Pulls an out-of-range value back into `min..=max`.
fn bounded(field: &str, value: f32, min: f32, max: f32) -> f32 {
    let clamped = if value.is_nan() { min } else { value.clamp(min, max) };
    if clamped != value {
        log::warn!("<{field}> {value} is out of range {min}..={max}, using {clamped}");
    }
    clamped
}

fn margin(field: &str, text: &str) -> Result<f32, SettingsError> {
    Ok(bounded(field, value(field, text)?, 0.0, f32::MAX))
}

/// Border weights must be positive; anything else falls back to the default weight.
fn weight(field: &str, text: &str) -> Result<f32, SettingsError> {
    let weight: f32 = value(field, text)?;
    if weight > 0.0 {
        Ok(weight)
    } else {
        let fallback = BorderSide::default().weight;
        log::warn!("<{field}> {weight} is not a positive weight, using {fallback}");
        Ok(fallback)
    }
}

fn color(field: &str, text: &str) -> Result<Color, SettingsError> {
    let packed: i64 = value(field, text)?;
    Ok(Color((packed & 0xFFFFFF) as u32))
}

fn boolean(field: &str, text: &str) -> Result<bool, SettingsError> {
    match text {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(invalid(field, text)),
    }
}
