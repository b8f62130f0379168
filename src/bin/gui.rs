use std::path::PathBuf;

use clap::Parser;
use drop_image_picker::gui_app;
use drop_image_picker::settings::Settings;
use drop_image_picker::telemetry;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "picker_gui", about = "Drag & drop / tap-to-pick image picker demo", version)]
struct Cli {
    /// JSON settings file; missing fields keep their defaults
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    subtitle: Option<String>,

    /// Glyph shown above the title
    #[arg(long)]
    icon: Option<String>,

    /// Accent colour as #RRGGBB or #RRGGBBAA
    #[arg(long)]
    accent: Option<String>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log: String,
}

impl Cli {
    fn settings(self) -> Settings {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path).unwrap_or_else(|err| {
                warn!("{err}; using default settings");
                Settings::default()
            }),
            None => Settings::default(),
        };
        if let Some(title) = self.title {
            settings.title = title;
        }
        if let Some(subtitle) = self.subtitle {
            settings.subtitle = subtitle;
        }
        if let Some(icon) = self.icon {
            settings.icon = icon;
        }
        if let Some(accent) = self.accent {
            settings.accent = accent;
        }
        settings
    }
}

fn main() -> iced::Result {
    let cli = Cli::parse();
    telemetry::init_tracing(&cli.log);
    gui_app::run_iced_app(cli.settings())
}
