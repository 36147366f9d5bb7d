//! Typed view of the host document model.
//!
//! Every attribute accessor may fail on its own: hosts commonly reject a
//! property for a given shape or theme while accepting its neighbours.

use std::fmt;

use crate::styles::{Color, DashPattern, Edge, FillKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("{0} is not supported here")]
    Unsupported(&'static str),
    #[error("{0} is locked")]
    Locked(&'static str),
    #[error("no cell at row {row}, column {column}")]
    NoCell { row: usize, column: usize },
    #[error("host call failed: {0}")]
    Call(String),
}

/// Host boolean that may also report a mixed state across a text range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    True,
    False,
    Mixed,
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value {
            TriState::True
        } else {
            TriState::False
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub i32);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape #{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    None,
    Slides,
    Shapes,
    /// Caret or text range inside a shape, e.g. a table cell being edited.
    Text,
}

pub trait Selection {
    fn kind(&self) -> SelectionKind;
    /// First selected shape, if it holds a table.
    fn table_shape(&self) -> Result<Option<Box<dyn TableShape + '_>>, HostError>;
}

pub trait TableShape {
    fn id(&self) -> ShapeId;
    fn table(&self) -> &dyn Table;
}

/// Rows and columns are 1-based.
pub trait Table {
    fn rows(&self) -> usize;
    fn columns(&self) -> usize;
    fn cell(&self, row: usize, column: usize) -> Result<Box<dyn Cell + '_>, HostError>;
}

#[cfg_attr(test, unimock::unimock(api = CellMock))]
pub trait Cell {
    fn fill_kind(&self) -> Result<FillKind, HostError>;
    fn fill_color(&self) -> Result<Color, HostError>;
    fn fill_transparency(&self) -> Result<f32, HostError>;
    fn set_fill_solid(&self) -> Result<(), HostError>;
    fn set_fill_background(&self) -> Result<(), HostError>;
    fn set_fill_color(&self, color: Color) -> Result<(), HostError>;
    fn set_fill_transparency(&self, transparency: f32) -> Result<(), HostError>;

    fn font_name(&self) -> Result<String, HostError>;
    fn font_size(&self) -> Result<f32, HostError>;
    fn font_bold(&self) -> Result<TriState, HostError>;
    fn font_italic(&self) -> Result<TriState, HostError>;
    fn font_color(&self) -> Result<Color, HostError>;
    fn set_font_name(&self, name: &str) -> Result<(), HostError>;
    fn set_font_size(&self, size: f32) -> Result<(), HostError>;
    fn set_font_bold(&self, bold: bool) -> Result<(), HostError>;
    fn set_font_italic(&self, italic: bool) -> Result<(), HostError>;
    fn set_font_color(&self, color: Color) -> Result<(), HostError>;

    fn margin(&self, edge: Edge) -> Result<f32, HostError>;
    fn set_margin(&self, edge: Edge, points: f32) -> Result<(), HostError>;

    fn border_visible(&self, edge: Edge) -> Result<TriState, HostError>;
    fn border_color(&self, edge: Edge) -> Result<Color, HostError>;
    fn border_weight(&self, edge: Edge) -> Result<f32, HostError>;
    fn border_dash(&self, edge: Edge) -> Result<DashPattern, HostError>;
    fn set_border_visible(&self, edge: Edge, visible: bool) -> Result<(), HostError>;
    fn set_border_color(&self, edge: Edge, color: Color) -> Result<(), HostError>;
    fn set_border_weight(&self, edge: Edge, points: f32) -> Result<(), HostError>;
    fn set_border_dash(&self, edge: Edge, dash: DashPattern) -> Result<(), HostError>;
}
