#[path = "fixtures/sample_grids.rs"]
mod sample_grids;

use latex_grid_editor::codec::parse_markup_table;
use latex_grid_editor::export::{
    self, Alignment, ArrayOptions, Borders, Decoration, Dialect, ExportFormat, ExportPreferences,
    FormatOptions, GridType, HeaderStyle, MatrixOptions, TableOptions,
};
use assert_matches::assert_matches;
use latex_grid_editor::{ClipboardChannel, EditorConfig, EditorSession, GridError, MemoryClipboard};
use pretty_assertions::assert_eq;
use sample_grids::{abcd, matrix};

fn bordered_tabular() -> FormatOptions {
    FormatOptions::new(Dialect::Tabular(TableOptions {
        align: Alignment::Left,
        borders: Borders {
            border: true,
            ..Default::default()
        },
        ..Default::default()
    }))
}

#[test]
fn test_tabular_with_border() {
    let out = export::render_markup(&abcd(), &bordered_tabular());

    assert_eq!(
        out,
        "\\begin{tabular}{|ll|} \\hline \n\
         a & b \\\\ \n\
         c & d \\\\  \\hline \n\
         \\end{tabular} \n"
    );
}

#[test]
fn test_bracket_literal() {
    let m = matrix(&[&["1", "2"], &["3", "4"]]);
    assert_eq!(export::render(&m, &ExportFormat::Brackets), "[[1,2],[3,4]]");
}

#[test]
fn test_markup_paste() {
    assert_eq!(parse_markup_table("a & b \\\\ c & d \\\\"), abcd());
}

#[test]
fn test_exported_table_parses_back() {
    let borders = Borders {
        border: true,
        all_rows: true,
        all_columns: true,
        ..Default::default()
    };
    let prefs = ExportPreferences {
        table: TableOptions {
            borders,
            ..Default::default()
        },
        array: ArrayOptions {
            borders,
            decoration: Decoration::Parentheses,
            ..Default::default()
        },
        matrix: MatrixOptions {
            decoration: Decoration::Bars,
        },
        math_mode: true,
        stretch: true,
        ..Default::default()
    };
    let m = matrix(&[&["x", "y", "z"], &["1", "2", "3"]]);
    let wrapped: Vec<Vec<String>> = m
        .iter()
        .map(|row| row.iter().map(|cell| format!("${}$", cell)).collect())
        .collect();

    for grid_type in GridType::ALL {
        let out = export::render_markup(&m, &prefs.format_options_for(grid_type));
        // table and tabbing cells carry their own `$`; the math grids do not
        let expected = match grid_type {
            GridType::LongTable | GridType::Tabular | GridType::Tabbing => &wrapped,
            GridType::Array | GridType::Matrix | GridType::SpecialMatrix => &m,
        };
        assert_eq!(&parse_markup_table(&out), expected, "{}:\n{}", grid_type, out);
    }
}

#[test]
fn test_longtable_full_output() {
    let table = TableOptions {
        align: Alignment::Center,
        borders: Borders {
            first_row: true,
            ..Default::default()
        },
        column_header: Some(HeaderStyle {
            bold: true,
            ..Default::default()
        }),
        row_header: None,
    };
    let options = FormatOptions::new(Dialect::LongTable(table)).with_stretch(true);
    let out = export::render_markup(&matrix(&[&["N", "V"], &["1", "2"]]), &options);

    assert_eq!(
        out,
        "% Package: \\usepackage{longtable} \n\n\
         { \n\
         \\renewcommand{\\arraystretch}{1.0}\n\n\
         \\begin{longtable}[l]{cc}\n\
         \\multicolumn{1}{l}{\\textbf{N}} & \\multicolumn{1}{l}{\\textbf{V}} \\\\  \\hline \n\
         \\endhead \n\
         \\endfoot \n\
         \\endlastfoot \n\
         1 & 2 \\\\ \n\
         \\end{longtable} \n\
         } \n"
    );
}

#[test]
fn test_every_grid_type_renders() {
    let prefs = ExportPreferences::default();
    for grid_type in GridType::ALL {
        let out = export::render_markup(&abcd(), &prefs.format_options_for(grid_type));
        assert!(out.contains('a') && out.contains('d'), "{}: {}", grid_type, out);
        assert!(out.contains("\\end{"), "{}: {}", grid_type, out);
    }
}

#[test]
fn test_array_bars_with_all_lines() {
    let array = ArrayOptions {
        align: Alignment::Right,
        borders: Borders {
            all_rows: true,
            all_columns: true,
            ..Default::default()
        },
        decoration: Decoration::Brackets,
    };
    let out = export::render_markup(&abcd(), &FormatOptions::new(Dialect::Array(array)));
    assert_eq!(
        out,
        "\\left[\n\
         \\begin{array}{|r|r|} \\hline \n\
         a & b \\\\  \\hline \n\
         c & d \\\\  \\hline \n\
         \\end{array} \n\
         \\right]\n"
    );
}

#[test]
fn test_unknown_format_tag() {
    let prefs = ExportPreferences::default();
    assert_matches!(
        ExportFormat::from_tag("docx", &prefs),
        Err(GridError::UnknownGridType(tag)) if tag == "docx"
    );
}

#[test]
fn test_session_copy_round_trip() {
    let mut session = EditorSession::new(
        Box::new(MemoryClipboard::with_text("a & b \\\\ c & d \\\\")),
        &EditorConfig::default(),
    );
    assert!(session.paste_markup().unwrap());
    assert_eq!(session.grid().contents(), abcd());

    session.preferences_mut().grid_type = GridType::Tabular;
    session.preferences_mut().table.borders.border = true;
    assert_eq!(
        session.markup_text(),
        export::render_markup(&abcd(), &bordered_tabular())
    );

    let mut clipboard = MemoryClipboard::new();
    clipboard
        .set_text(&session.export_text(&ExportFormat::Html))
        .unwrap();
    assert!(clipboard.text().starts_with("<TABLE BORDER=1"));
}
