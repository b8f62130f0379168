use clap::Parser;
use image::GenericImageView;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use drop_image_picker::picker::{Bounds, DropOutcome, DropTarget, PickerConfig, read_dropped_file};
use drop_image_picker::settings::Settings;
use drop_image_picker::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "picker_thumb",
    about = "Feed an image file through the picker's drop path and write the thumbnail",
    version
)]
struct Cli {
    /// Image file to ingest
    input: PathBuf,

    /// Target width in pixels
    #[arg(long, default_value_t = 300)]
    width: u32,

    /// Target height in pixels
    #[arg(long, default_value_t = 250)]
    height: u32,

    /// Where to write the thumbnail (format follows the extension)
    #[arg(short = 'o', long = "output", default_value = "thumbnail.png")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    telemetry::init_tracing("warn");
    let cli = Cli::parse();

    let settings = Settings::default();
    let config = PickerConfig::new(
        settings.title.clone(),
        settings.subtitle.clone(),
        settings.icon.clone(),
        settings.accent_color()?,
        |image: Arc<image::DynamicImage>| {
            let (width, height) = image.dimensions();
            println!("decoded {width}x{height}");
        },
    );
    let mut target = DropTarget::new(config);

    let payload = read_dropped_file(cli.input.clone()).await?;
    let job = match target.accept_drop([payload], Bounds::new(cli.width, cli.height)) {
        DropOutcome::Accepted(job) => job,
        DropOutcome::Rejected(err) => return Err(format!("{}: {err}", cli.input.display()).into()),
    };

    target.complete_thumbnail(job.run().await);
    let Some(preview) = target.state().preview() else {
        return Err("no preview after ingest".into());
    };
    if !preview.is_thumbnail() {
        return Err(format!("thumbnail generation failed for {}", cli.input.display()).into());
    }

    let (width, height) = preview.dimensions();
    preview.image().save(&cli.output)?;
    println!("wrote {width}x{height} thumbnail to {}", cli.output.display());
    Ok(())
}
