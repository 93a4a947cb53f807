use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use trackshot::process_track;

/// Render a GPX or KML track file as an annotated PNG image.
#[derive(Debug, Parser)]
#[command(name = "trackshot", version, about)]
struct Args {
    /// Track file to visualize (.gpx or .kml)
    input: PathBuf,

    /// Output PNG path (defaults to the input name with a .png extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the summary as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let file_name = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let bytes = std::fs::read(&args.input)?;

    let summary = process_track(&file_name, &bytes)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("png"));
    std::fs::write(&output, &summary.image_png)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.caption);
        println!("Image written to {}", output.display());
        if let Some(link) = &summary.maps_link {
            println!("{link}");
        }
    }

    Ok(())
}
