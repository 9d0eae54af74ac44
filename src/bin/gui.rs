use eframe::egui;
use latex_grid_editor::{logging, GridEditorApp};

fn main() -> eframe::Result<()> {
    logging::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("LaTeX Grid Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "LaTeX Grid Editor",
        options,
        Box::new(|_cc| Ok(Box::new(GridEditorApp::new()))),
    )
}
