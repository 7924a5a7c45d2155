// care-board
// Main entry point

use care_board::ui::BoardApp;

fn main() -> Result<(), eframe::Error> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting care-board");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("care-board")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "care-board",
        options,
        Box::new(|cc| Ok(Box::new(BoardApp::new(cc)))),
    )
}
