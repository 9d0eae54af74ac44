use crate::clipboard::SystemClipboard;
use crate::config::EditorConfig;
use crate::export::{
    Alignment, Borders, Decoration, ExportFormat, GridType, HeaderStyle, SpecialMatrixKind,
    TabbingOptions,
};
use crate::grid::{MAX_COLS, MAX_ROWS};
use crate::range::{CellPos, CellRange};
use crate::session::EditorSession;
use egui::{Key, Modifiers};
use std::path::PathBuf;

const CELL_WIDTH: f32 = 90.0;
const ROW_HEIGHT: f32 = 22.0;

/// Main application state
pub struct GridEditorApp {
    /// Grid, clipboard, export preferences and current file
    session: EditorSession,

    /// Persisted settings; export preferences are written back on demand
    config: EditorConfig,

    /// UI state
    ui_state: UiState,

    /// Status message
    status_message: String,
}

#[derive(Default)]
struct UiState {
    /// Row count in the size spinner
    rows_input: usize,

    /// Column count in the size spinner
    cols_input: usize,

    /// Grid size the spinners were last synced to
    synced_size: (usize, usize),

    /// Text used by Fill All
    fill_text: String,

    /// Path used by Open and Save As
    path_input: String,

    /// Cell being edited inline
    editing: Option<CellEdit>,

    /// Focus the inline editor on the next frame
    focus_editor: bool,

    /// Show the LaTeX preview under the options
    show_preview: bool,

    /// Last column-header style, restored when the header is switched back on
    column_header_style: HeaderStyle,

    /// Last row-header style
    row_header_style: HeaderStyle,
}

struct CellEdit {
    pos: CellPos,
    buffer: String,
}

/// Labels and count bound of one table-header control
struct HeaderSlot {
    id: &'static str,
    label: &'static str,
    count_label: &'static str,
    max_count: usize,
}

const COLUMN_HEADER: HeaderSlot = HeaderSlot {
    id: "column_header",
    label: "Column header",
    count_label: "Rows",
    max_count: MAX_ROWS,
};

const ROW_HEADER: HeaderSlot = HeaderSlot {
    id: "row_header",
    label: "Row header",
    count_label: "Columns",
    max_count: MAX_COLS,
};

/// Format entries of the Export > Copy As menu
const COPY_AS_FORMATS: [ExportFormat; 7] = [
    ExportFormat::TabDelimited,
    ExportFormat::Html,
    ExportFormat::Brackets,
    ExportFormat::Braces,
    ExportFormat::AngleBrackets,
    ExportFormat::Maxima,
    ExportFormat::Sage,
];

impl Default for GridEditorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl GridEditorApp {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::load())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let session = EditorSession::new(Box::new(SystemClipboard), &config);
        Self {
            ui_state: UiState {
                rows_input: session.grid().rows(),
                cols_input: session.grid().cols(),
                synced_size: (session.grid().rows(), session.grid().cols()),
                show_preview: true,
                ..Default::default()
            },
            session,
            config,
            status_message: "Welcome to the LaTeX Grid Editor!".to_string(),
        }
    }

    /// Reset the size spinners whenever an edit changed the grid size
    fn sync_size_inputs(&mut self) {
        let size = (self.session.grid().rows(), self.session.grid().cols());
        if size != self.ui_state.synced_size {
            self.ui_state.synced_size = size;
            (self.ui_state.rows_input, self.ui_state.cols_input) = size;
        }
    }

    // ========== Commands ==========

    fn undo(&mut self) {
        self.ui_state.editing = None;
        self.status_message = if self.session.undo() {
            "↶ Undone".to_string()
        } else {
            "⚠ Nothing to undo".to_string()
        };
    }

    fn redo(&mut self) {
        self.ui_state.editing = None;
        self.status_message = if self.session.redo() {
            "↷ Redone".to_string()
        } else {
            "⚠ Nothing to redo".to_string()
        };
    }

    fn copy_markup(&mut self) {
        self.status_message = match self.session.copy_markup() {
            Ok(()) => format!(
                "✓ Copied LaTeX {} to clipboard",
                self.session.preferences().grid_type
            ),
            Err(e) => format!("❌ Failed to copy: {:#}", e),
        };
    }

    fn copy_as(&mut self, format: ExportFormat) {
        self.status_message = match self.session.copy_as(&format) {
            Ok(()) => format!("✓ Copied {}", format.description()),
            Err(e) => format!("❌ Failed to copy: {:#}", e),
        };
    }

    fn copy_selection(&mut self) {
        self.status_message = match self.session.copy_selection() {
            Ok(true) => "✓ Copied selection".to_string(),
            Ok(false) => "⚠ No cells selected".to_string(),
            Err(e) => format!("❌ Failed to copy: {:#}", e),
        };
    }

    fn paste(&mut self) {
        self.ui_state.editing = None;
        self.status_message = match self.session.paste() {
            Ok(true) => "✓ Pasted".to_string(),
            Ok(false) => "⚠ Nothing to paste".to_string(),
            Err(e) => format!("❌ Paste failed: {:#}", e),
        };
    }

    fn paste_markup(&mut self) {
        self.ui_state.editing = None;
        self.status_message = match self.session.paste_markup() {
            Ok(true) => "✓ Imported LaTeX table".to_string(),
            Ok(false) => "⚠ Clipboard holds no LaTeX table rows".to_string(),
            Err(e) => format!("❌ Paste failed: {:#}", e),
        };
    }

    fn open(&mut self) {
        let Some(path) = self.path_from_input() else {
            return;
        };
        self.ui_state.editing = None;
        self.status_message = match self.session.open(&path) {
            Ok(()) => format!("✓ Opened {}", path.display()),
            Err(e) => format!("❌ {:#}", e),
        };
    }

    fn save(&mut self) {
        if self.session.current_path().is_none() {
            self.save_as();
            return;
        }
        self.status_message = match self.session.save_current() {
            Ok(()) => "✓ Grid saved".to_string(),
            Err(e) => format!("❌ Save failed: {:#}", e),
        };
    }

    fn save_as(&mut self) {
        let Some(path) = self.path_from_input() else {
            return;
        };
        self.status_message = match self.session.save(&path) {
            Ok(()) => format!("✓ Saved to {}", path.display()),
            Err(e) => format!("❌ Save failed: {:#}", e),
        };
    }

    fn save_preferences(&mut self) {
        self.config.export = *self.session.preferences();
        self.status_message = match self.config.save() {
            Ok(()) => "✓ Preferences saved".to_string(),
            Err(e) => format!("❌ Failed to save preferences: {:#}", e),
        };
    }

    fn path_from_input(&mut self) -> Option<PathBuf> {
        let text = self.ui_state.path_input.trim();
        if text.is_empty() {
            self.status_message = "⚠ Enter a file path in the toolbar first".to_string();
            return None;
        }
        Some(PathBuf::from(text))
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::Z)) {
            self.undo();
        }
        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::Y)) {
            self.redo();
        }
        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::L)) {
            self.copy_markup();
        }
    }

    // ========== Rendering ==========

    /// Render the entire UI
    fn render_ui(&mut self, ctx: &egui::Context) {
        self.handle_shortcuts(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| self.render_file_menu(ui, ctx));
                ui.menu_button("Edit", |ui| self.render_edit_menu(ui));
                ui.menu_button("Table", |ui| self.render_table_menu(ui));
                ui.menu_button("Export", |ui| self.render_export_menu(ui));
            });
        });

        // Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.render_toolbar(ui);
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let grid = self.session.grid();
                    let history = grid.history();
                    ui.label(format!(
                        "{} x {}  |  step {}/{}",
                        grid.rows(),
                        grid.cols(),
                        history.cursor() + 1,
                        history.len()
                    ));
                });
            });
        });

        // Right panel (export options)
        egui::SidePanel::right("options_panel")
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_options_panel(ui);
                });
            });

        // Central panel (cells)
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_cells(ui);
        });

        self.sync_size_inputs();
    }

    fn render_file_menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if ui.button("New").clicked() {
            self.ui_state.editing = None;
            self.session.new_grid();
            self.status_message = "New grid".to_string();
            ui.close_menu();
        }
        if ui.button("Open").clicked() {
            self.open();
            ui.close_menu();
        }
        if ui.button("Save").clicked() {
            self.save();
            ui.close_menu();
        }
        if ui.button("Save As").clicked() {
            self.save_as();
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Quit").clicked() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn render_edit_menu(&mut self, ui: &mut egui::Ui) {
        if ui
            .add_enabled(self.session.grid().can_undo(), egui::Button::new("Undo (Ctrl+Z)"))
            .clicked()
        {
            self.undo();
            ui.close_menu();
        }
        if ui
            .add_enabled(self.session.grid().can_redo(), egui::Button::new("Redo (Ctrl+Y)"))
            .clicked()
        {
            self.redo();
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Copy All").clicked() {
            self.status_message = match self.session.copy_all() {
                Ok(()) => "✓ Copied grid".to_string(),
                Err(e) => format!("❌ Failed to copy: {:#}", e),
            };
            ui.close_menu();
        }
        if ui.button("Copy Selection").clicked() {
            self.copy_selection();
            ui.close_menu();
        }
        if ui.button("Paste").clicked() {
            self.paste();
            ui.close_menu();
        }
        if ui.button("Paste LaTeX Table").clicked() {
            self.paste_markup();
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Select All").clicked() {
            self.session.grid_mut().select_all();
            ui.close_menu();
        }
        if ui.button("Erase Selection").clicked() {
            self.ui_state.editing = None;
            self.session.grid_mut().erase_selection();
            ui.close_menu();
        }
        if ui.button("Trim All").clicked() {
            self.session.grid_mut().trim_all();
            self.status_message = "✓ Trimmed whitespace".to_string();
            ui.close_menu();
        }
        if ui.button("Fill All").clicked() {
            let text = self.ui_state.fill_text.clone();
            self.session.grid_mut().fill_all(&text);
            self.status_message = format!("✓ Filled with \"{}\"", text);
            ui.close_menu();
        }
        if ui.button("Clear All").clicked() {
            self.ui_state.editing = None;
            self.session.grid_mut().clear();
            ui.close_menu();
        }
    }

    fn render_table_menu(&mut self, ui: &mut egui::Ui) {
        let mut edited = true;
        let grid = self.session.grid_mut();
        if ui.button("Insert Row Above").clicked() {
            grid.insert_row_above();
        } else if ui.button("Insert Row Below").clicked() {
            grid.insert_row_below();
        } else if ui.button("Insert Column Before").clicked() {
            grid.insert_column_before();
        } else if ui.button("Insert Column After").clicked() {
            grid.insert_column_after();
        } else if ui.button("Delete Rows").clicked() {
            grid.delete_rows();
        } else if ui.button("Delete Columns").clicked() {
            grid.delete_columns();
        } else if ui.button("Delete Rows and Columns").clicked() {
            grid.delete_rows_and_columns();
        } else if ui.button("Transpose").clicked() {
            grid.transpose();
        } else if ui.button("Reset").clicked() {
            grid.reset();
        } else {
            edited = false;
        }

        if edited {
            self.ui_state.editing = None;
            ui.close_menu();
        }
    }

    fn render_export_menu(&mut self, ui: &mut egui::Ui) {
        if ui.button("Copy LaTeX (Ctrl+L)").clicked() {
            self.copy_markup();
            ui.close_menu();
        }
        ui.menu_button("Copy As", |ui| {
            for format in COPY_AS_FORMATS {
                if ui.button(format.description()).clicked() {
                    self.copy_as(format);
                    ui.close_menu();
                }
            }
        });
        ui.separator();
        if ui.button("Save Preferences").clicked() {
            self.save_preferences();
            ui.close_menu();
        }
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Rows:");
            ui.add(egui::DragValue::new(&mut self.ui_state.rows_input).range(1..=MAX_ROWS));
            ui.label("Columns:");
            ui.add(egui::DragValue::new(&mut self.ui_state.cols_input).range(1..=MAX_COLS));
            if ui.button("Resize").clicked() {
                self.ui_state.editing = None;
                let (rows, cols) = (self.ui_state.rows_input, self.ui_state.cols_input);
                self.session.grid_mut().resize(rows, cols);
                self.status_message = format!("Grid is now {} x {}", rows, cols);
            }

            ui.separator();
            ui.label("Fill:");
            ui.add(egui::TextEdit::singleline(&mut self.ui_state.fill_text).desired_width(60.0));

            ui.separator();
            ui.label("File:");
            ui.add(
                egui::TextEdit::singleline(&mut self.ui_state.path_input)
                    .hint_text("table.json")
                    .desired_width(220.0),
            );
            if ui.button("📂 Open").clicked() {
                self.open();
            }
            if ui.button("💾 Save").clicked() {
                self.save();
            }
        });
    }

    /// Render the export options panel
    fn render_options_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Export Options");
        ui.separator();

        let prefs = self.session.preferences_mut();

        ui.label("Grid type:");
        egui::ComboBox::from_id_salt("grid_type")
            .selected_text(prefs.grid_type.label())
            .show_ui(ui, |ui| {
                for grid_type in GridType::ALL {
                    ui.selectable_value(&mut prefs.grid_type, grid_type, grid_type.label());
                }
            });

        ui.checkbox(&mut prefs.math_mode, "Math mode");
        if prefs.grid_type != GridType::Tabbing {
            ui.checkbox(&mut prefs.stretch, "Reset array stretch");
        }
        ui.separator();

        match prefs.grid_type {
            GridType::LongTable | GridType::Tabular => {
                let table = &mut prefs.table;
                alignment_combo(ui, "table_align", &mut table.align);
                borders_ui(ui, &mut table.borders);
                ui.separator();
                header_ui(
                    ui,
                    &COLUMN_HEADER,
                    &mut table.column_header,
                    &mut self.ui_state.column_header_style,
                );
                header_ui(
                    ui,
                    &ROW_HEADER,
                    &mut table.row_header,
                    &mut self.ui_state.row_header_style,
                );
            }
            GridType::Tabbing => {
                ui.horizontal(|ui| {
                    ui.label("Column width (pt):");
                    ui.add(
                        egui::DragValue::new(&mut prefs.tabbing.column_width_pt)
                            .range(0..=TabbingOptions::MAX_WIDTH_PT),
                    );
                });
            }
            GridType::Array => {
                let array = &mut prefs.array;
                alignment_combo(ui, "array_align", &mut array.align);
                borders_ui(ui, &mut array.borders);
                decoration_ui(ui, &mut array.decoration);
            }
            GridType::Matrix => {
                decoration_ui(ui, &mut prefs.matrix.decoration);
            }
            GridType::SpecialMatrix => {
                ui.label("Environment:");
                for kind in SpecialMatrixKind::ALL {
                    ui.radio_value(&mut prefs.special_matrix, kind, kind.name());
                }
            }
        }

        ui.separator();
        if ui.button("📋 Copy LaTeX").clicked() {
            self.copy_markup();
        }
        ui.checkbox(&mut self.ui_state.show_preview, "Show preview");

        if self.ui_state.show_preview {
            let mut preview = self.session.markup_text();
            ui.add(
                egui::TextEdit::multiline(&mut preview)
                    .font(egui::TextStyle::Monospace)
                    .interactive(false)
                    .desired_width(f32::INFINITY),
            );
        }
    }

    /// Render the editable cell table
    fn render_cells(&mut self, ui: &mut egui::Ui) {
        let rows = self.session.grid().rows();
        let cols = self.session.grid().cols();
        let mut commit: Option<(CellPos, String, bool)> = None;
        let mut clicked: Option<(CellPos, bool)> = None;
        let mut cancel = false;

        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show_rows(ui, ROW_HEIGHT, rows, |ui, row_range| {
                egui::Grid::new("cells")
                    .striped(true)
                    .min_col_width(CELL_WIDTH)
                    .start_row(row_range.start)
                    .show(ui, |ui| {
                        for row in row_range {
                            ui.label(format!("{}", row + 1));
                            for col in 0..cols {
                                let pos = CellPos::new(row, col);
                                match &mut self.ui_state.editing {
                                    Some(edit) if edit.pos == pos => {
                                        let response = ui.add(
                                            egui::TextEdit::singleline(&mut edit.buffer)
                                                .desired_width(CELL_WIDTH),
                                        );
                                        if self.ui_state.focus_editor {
                                            response.request_focus();
                                            self.ui_state.focus_editor = false;
                                        }
                                        if response.lost_focus() {
                                            let (escape, enter) = ui.input(|i| {
                                                (i.key_pressed(Key::Escape), i.key_pressed(Key::Enter))
                                            });
                                            if escape {
                                                cancel = true;
                                            } else {
                                                commit = Some((pos, edit.buffer.clone(), enter));
                                            }
                                        }
                                    }
                                    _ => {
                                        let grid = self.session.grid();
                                        let selected = grid
                                            .selection_bounds()
                                            .is_some_and(|range| range.contains(pos));
                                        let text = grid.cell(row, col).unwrap_or_default();
                                        let response = ui.add_sized(
                                            [CELL_WIDTH, ROW_HEIGHT - 4.0],
                                            egui::SelectableLabel::new(selected, text),
                                        );
                                        if response.clicked() {
                                            let extend = ui.input(|i| i.modifiers.shift);
                                            clicked = Some((pos, extend));
                                        }
                                    }
                                }
                            }
                            ui.end_row();
                        }
                    });
            });

        if cancel {
            self.ui_state.editing = None;
        }

        if let Some((pos, buffer, advance)) = commit {
            self.ui_state.editing = None;
            self.commit_edit(CellEdit { pos, buffer });
            if advance {
                let grid = self.session.grid_mut();
                grid.advance_active_cell();
                let next = grid.active_cell();
                self.start_editing(next);
            }
        }

        if let Some((pos, extend)) = clicked {
            // clicking away keeps what was typed
            if let Some(edit) = self.ui_state.editing.take() {
                self.commit_edit(edit);
            }
            let grid = self.session.grid_mut();
            if extend {
                let anchor = grid.active_cell();
                if let Err(e) = grid.select(CellRange::new(anchor, pos)) {
                    self.status_message = format!("❌ {}", e);
                }
            } else if grid.set_active_cell(pos).is_ok() {
                self.start_editing(pos);
            }
        }
    }

    /// Write an inline edit back to the grid if the text changed
    fn commit_edit(&mut self, edit: CellEdit) {
        let CellEdit { pos, buffer } = edit;
        let grid = self.session.grid_mut();
        if grid.cell(pos.row, pos.col).is_ok_and(|current| current != buffer) {
            if let Err(e) = grid.set_cell(pos.row, pos.col, buffer) {
                self.status_message = format!("❌ {}", e);
            }
        }
    }

    fn start_editing(&mut self, pos: CellPos) {
        let buffer = self
            .session
            .grid()
            .cell(pos.row, pos.col)
            .unwrap_or_default()
            .to_string();
        self.ui_state.editing = Some(CellEdit { pos, buffer });
        self.ui_state.focus_editor = true;
    }
}

fn alignment_combo(ui: &mut egui::Ui, id: &str, align: &mut Alignment) {
    ui.horizontal(|ui| {
        ui.label("Alignment:");
        egui::ComboBox::from_id_salt(id)
            .selected_text(align.display_name())
            .show_ui(ui, |ui| {
                for option in Alignment::ALL {
                    ui.selectable_value(align, option, option.display_name());
                }
            });
    });
}

fn borders_ui(ui: &mut egui::Ui, borders: &mut Borders) {
    ui.label("Lines:");
    ui.checkbox(&mut borders.border, "Border");
    ui.checkbox(&mut borders.first_row, "Below first row");
    ui.checkbox(&mut borders.all_rows, "Between all rows");
    ui.checkbox(&mut borders.first_column, "After first column");
    ui.checkbox(&mut borders.all_columns, "Between all columns");
}

fn decoration_ui(ui: &mut egui::Ui, decoration: &mut Decoration) {
    ui.horizontal(|ui| {
        ui.label("Delimiters:");
        for option in Decoration::ALL {
            ui.radio_value(decoration, option, option.display_name());
        }
    });
}

/// Switch a header on or off. Its style is parked in `remembered` while off.
fn toggle_header(header: &mut Option<HeaderStyle>, remembered: &mut HeaderStyle, enabled: bool) {
    if enabled {
        *header = Some(header.unwrap_or(*remembered));
    } else if let Some(style) = header.take() {
        *remembered = style;
    }
}

fn header_ui(
    ui: &mut egui::Ui,
    slot: &HeaderSlot,
    header: &mut Option<HeaderStyle>,
    remembered: &mut HeaderStyle,
) {
    let mut enabled = header.is_some();
    if ui.checkbox(&mut enabled, slot.label).changed() {
        toggle_header(header, remembered, enabled);
    }
    let Some(style) = header.as_mut() else {
        return;
    };
    ui.indent(slot.id, |ui| {
        ui.horizontal(|ui| {
            ui.checkbox(&mut style.bold, "Bold");
            ui.checkbox(&mut style.italic, "Italic");
            ui.checkbox(&mut style.underline, "Underline");
        });
        ui.horizontal(|ui| {
            ui.label(format!("{}:", slot.count_label));
            ui.add(egui::DragValue::new(&mut style.count).range(1..=slot.max_count));
        });
        alignment_combo(ui, &format!("{}_align", slot.id), &mut style.align);
    });
}

impl eframe::App for GridEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_ui(ctx);
    }
}
