use dcfview::config::ConfigManager;
use dcfview::ui::DcfApp;
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = ConfigManager::new();
    let config_path = ConfigManager::default_path();
    if let Err(e) = config.load(config_path.as_deref()) {
        log::error!("{}; falling back to defaults", e);
    }

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([900.0, 560.0])
            .with_title("DCF Intrinsic Value Estimator"),
        ..Default::default()
    };

    eframe::run_native(
        "dcfview",
        native_options,
        Box::new(move |cc| Ok(Box::new(DcfApp::new(cc, config, config_path)))),
    )
}
