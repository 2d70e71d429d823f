use anyhow::Context;
use bobamap::prelude::*;

/// Standalone bubble tea finder
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bobamap::logging::init();

    let config = FinderConfig::from_env().context("a Google Maps API key is required")?;
    let finder = BubbleTeaFinder::with_google(config).context("failed to build providers")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Bubble Tea Finder"),
        ..Default::default()
    };

    eframe::run_native(
        "bobamap-app",
        options,
        Box::new(|_cc| Box::new(FinderApp::new(finder))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(())
}

struct FinderApp {
    finder: BubbleTeaFinder,
    panel: FinderPanel,
}

impl FinderApp {
    fn new(finder: BubbleTeaFinder) -> Self {
        log::info!(
            "starting at {} (zoom {})",
            finder.viewport().center,
            finder.viewport().zoom
        );
        Self {
            finder,
            panel: FinderPanel::new(),
        }
    }
}

impl eframe::App for FinderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.panel.show(ctx, &mut self.finder);
    }
}
