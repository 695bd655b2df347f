mod support;
mod dockside;
mod gui;

use tracing::info;

fn main() {
    tracing_subscriber::fmt::init();

    let config = match dockside::Config::load("dockside.yaml") {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load dockside.yaml: {err}");
            std::process::exit(1);
        }
    };
    info!(log_file = config.log_file.as_str(), "starting dockside");

    match gui::Gui::new(config) {
        Ok(gui) => gui.run(),
        Err(err) => {
            eprintln!("Failed to open the operation log: {err}");
            std::process::exit(1);
        }
    }
}
