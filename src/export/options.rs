use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six LaTeX grid environments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridType {
    #[default]
    LongTable,
    Tabular,
    Tabbing,
    Array,
    Matrix,
    SpecialMatrix,
}

impl GridType {
    pub const ALL: [GridType; 6] = [
        GridType::LongTable,
        GridType::Tabular,
        GridType::Tabbing,
        GridType::Array,
        GridType::Matrix,
        GridType::SpecialMatrix,
    ];

    /// Display label, also accepted by `from_str`
    pub fn label(&self) -> &'static str {
        match self {
            GridType::LongTable => "longtable",
            GridType::Tabular => "tabular",
            GridType::Tabbing => "tabbing",
            GridType::Array => "array",
            GridType::Matrix => "matrix",
            GridType::SpecialMatrix => "Special Matrix",
        }
    }
}

impl fmt::Display for GridType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GridType {
    type Err = GridError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim() {
            "longtable" => Ok(GridType::LongTable),
            "tabular" => Ok(GridType::Tabular),
            "tabbing" => Ok(GridType::Tabbing),
            "array" => Ok(GridType::Array),
            "matrix" => Ok(GridType::Matrix),
            "Special Matrix" | "special-matrix" | "specialmatrix" => Ok(GridType::SpecialMatrix),
            other => Err(GridError::UnknownGridType(other.to_string())),
        }
    }
}

/// Column alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];

    pub fn display_name(&self) -> &'static str {
        match self {
            Alignment::Left => "Left",
            Alignment::Center => "Center",
            Alignment::Right => "Right",
        }
    }

    /// Column-spec code: the lowercase first character of the display name
    pub fn code(&self) -> char {
        self.display_name()
            .chars()
            .next()
            .map_or('l', |c| c.to_ascii_lowercase())
    }
}

/// Matched delimiters placed around an array or matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decoration {
    #[default]
    None,
    Parentheses,
    Brackets,
    Bars,
}

impl Decoration {
    pub const ALL: [Decoration; 4] = [
        Decoration::None,
        Decoration::Parentheses,
        Decoration::Brackets,
        Decoration::Bars,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Decoration::None => "None",
            Decoration::Parentheses => "()",
            Decoration::Brackets => "[]",
            Decoration::Bars => "||",
        }
    }

    /// Left and right delimiter characters, `None` for no decoration
    pub fn delimiters(&self) -> Option<(char, char)> {
        if *self == Decoration::None {
            return None;
        }
        let mut chars = self.display_name().chars();
        Some((chars.next()?, chars.next()?))
    }
}

/// amsmath bracket-matrix environments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialMatrixKind {
    #[default]
    PMatrix,
    BMatrix,
    VMatrix,
    DoubleVMatrix,
}

impl SpecialMatrixKind {
    pub const ALL: [SpecialMatrixKind; 4] = [
        SpecialMatrixKind::PMatrix,
        SpecialMatrixKind::BMatrix,
        SpecialMatrixKind::VMatrix,
        SpecialMatrixKind::DoubleVMatrix,
    ];

    /// Environment name
    pub fn name(&self) -> &'static str {
        match self {
            SpecialMatrixKind::PMatrix => "pmatrix",
            SpecialMatrixKind::BMatrix => "bmatrix",
            SpecialMatrixKind::VMatrix => "vmatrix",
            SpecialMatrixKind::DoubleVMatrix => "Vmatrix",
        }
    }
}

/// Border and division toggles shared by table and array dialects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Borders {
    pub border: bool,
    pub first_row: bool,
    pub all_rows: bool,
    pub first_column: bool,
    pub all_columns: bool,
}

impl Borders {
    /// Divider left of the first column
    pub fn left_of_first(&self) -> bool {
        self.border || self.all_columns
    }

    /// Divider right of column `col` in a grid with `cols` columns
    pub fn right_of(&self, col: usize, cols: usize) -> bool {
        self.all_columns
            || (col == 0 && self.first_column)
            || (col + 1 == cols && self.border)
    }

    /// Rule directly after the column spec
    pub fn rule_on_top(&self) -> bool {
        self.border || self.all_rows
    }

    /// Rule below row `row` in a grid with `rows` rows
    pub fn rule_below(&self, row: usize, rows: usize) -> bool {
        self.all_rows || (row == 0 && self.first_row) || (row + 1 == rows && self.border)
    }
}

/// Styling for column-header rows or row-header columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderStyle {
    pub align: Alignment,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Header rows (column header) or header columns (row header)
    pub count: usize,
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self {
            align: Alignment::Left,
            bold: false,
            italic: false,
            underline: false,
            count: 1,
        }
    }
}

/// longtable / tabular options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    pub align: Alignment,
    pub borders: Borders,
    pub column_header: Option<HeaderStyle>,
    pub row_header: Option<HeaderStyle>,
}

/// tabbing options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabbingOptions {
    /// Uniform tab-stop width in points
    pub column_width_pt: u32,
}

impl TabbingOptions {
    /// Widest tab stop the editor offers
    pub const MAX_WIDTH_PT: u32 = 1000;

    /// Stop width within `0..=MAX_WIDTH_PT`
    pub fn width_pt(&self) -> u32 {
        self.column_width_pt.min(Self::MAX_WIDTH_PT)
    }
}

impl Default for TabbingOptions {
    fn default() -> Self {
        Self {
            column_width_pt: 20,
        }
    }
}

/// array options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayOptions {
    pub align: Alignment,
    pub borders: Borders,
    pub decoration: Decoration,
}

/// matrix options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixOptions {
    pub decoration: Decoration,
}

/// One dialect together with the options that apply to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dialect {
    LongTable(TableOptions),
    Tabular(TableOptions),
    Tabbing(TabbingOptions),
    Array(ArrayOptions),
    Matrix(MatrixOptions),
    SpecialMatrix(SpecialMatrixKind),
}

impl Dialect {
    pub fn grid_type(&self) -> GridType {
        match self {
            Dialect::LongTable(_) => GridType::LongTable,
            Dialect::Tabular(_) => GridType::Tabular,
            Dialect::Tabbing(_) => GridType::Tabbing,
            Dialect::Array(_) => GridType::Array,
            Dialect::Matrix(_) => GridType::Matrix,
            Dialect::SpecialMatrix(_) => GridType::SpecialMatrix,
        }
    }
}

/// Everything the export engine needs for one LaTeX render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    pub dialect: Dialect,
    /// `$...$` per cell (table/tabbing) or `\[ ... \]` around the body
    pub math_mode: bool,
    /// Wrap output in a scope resetting `\arraystretch` to 1.0
    pub stretch: bool,
}

impl FormatOptions {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            math_mode: false,
            stretch: false,
        }
    }

    pub fn with_math_mode(mut self, math_mode: bool) -> Self {
        self.math_mode = math_mode;
        self
    }

    pub fn with_stretch(mut self, stretch: bool) -> Self {
        self.stretch = stretch;
        self
    }

    pub fn grid_type(&self) -> GridType {
        self.dialect.grid_type()
    }
}

/// Option sets for every dialect plus the selected grid type.
///
/// This is what the options panel edits and what the config file stores;
/// switching grid type keeps each dialect's settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportPreferences {
    pub grid_type: GridType,
    pub table: TableOptions,
    pub tabbing: TabbingOptions,
    pub array: ArrayOptions,
    pub matrix: MatrixOptions,
    pub special_matrix: SpecialMatrixKind,
    pub math_mode: bool,
    pub stretch: bool,
}

impl ExportPreferences {
    /// Options for the selected grid type
    pub fn format_options(&self) -> FormatOptions {
        self.format_options_for(self.grid_type)
    }

    /// Options for an arbitrary grid type using the stored settings
    pub fn format_options_for(&self, grid_type: GridType) -> FormatOptions {
        let dialect = match grid_type {
            GridType::LongTable => Dialect::LongTable(self.table),
            GridType::Tabular => Dialect::Tabular(self.table),
            GridType::Tabbing => Dialect::Tabbing(self.tabbing),
            GridType::Array => Dialect::Array(self.array),
            GridType::Matrix => Dialect::Matrix(self.matrix),
            GridType::SpecialMatrix => Dialect::SpecialMatrix(self.special_matrix),
        };
        FormatOptions {
            dialect,
            math_mode: self.math_mode,
            stretch: self.stretch,
        }
    }
}
