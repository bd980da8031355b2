use std::path::PathBuf;

use clap::{Parser, Subcommand};
use coa_pdf::{Assets, Error, FieldRecord, OverflowPolicy, RenderOptions};

#[derive(Parser)]
#[command(
    name = "coa-pdf",
    about = "Render single-page Certificate of Analysis PDFs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON record into a one-page PDF
    Render {
        /// JSON record file
        record: PathBuf,

        /// Output file (defaults to "<product name>.pdf")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory holding tru_herb_logo.png and footer.png (defaults to $COA_ASSETS or ./images)
        #[arg(long)]
        assets: Option<PathBuf>,

        /// Logo image, overrides the one in the assets directory
        #[arg(long)]
        logo: Option<PathBuf>,

        /// Footer banner image, overrides the one in the assets directory
        #[arg(long)]
        footer: Option<PathBuf>,

        /// Keep the product title as typed instead of upper-casing it
        #[arg(long)]
        no_uppercase_title: bool,

        /// Smallest shrink factor applied to the body
        #[arg(long, default_value_t = RenderOptions::DEFAULT_MIN_SCALE)]
        min_scale: f32,

        /// Fail instead of clipping when the body does not fit at --min-scale
        #[arg(long)]
        fail_on_overflow: bool,
    },

    /// Print a JSON record pre-filled with the form defaults
    Template,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            record,
            output,
            assets,
            logo,
            footer,
            no_uppercase_title,
            min_scale,
            fail_on_overflow,
        } => {
            let text = std::fs::read_to_string(&record).map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!("{}: {}", e, record.display()),
                ))
            })?;
            let record = FieldRecord::from_json(&text)?;

            let mut assets = match assets {
                Some(dir) => Assets::from_dir(dir),
                None => Assets::default(),
            };
            if let Some(logo) = logo {
                assets.logo = logo;
            }
            if let Some(footer) = footer {
                assets.footer = footer;
            }

            let options = RenderOptions {
                uppercase_title: !no_uppercase_title,
                min_scale,
                overflow: if fail_on_overflow {
                    OverflowPolicy::Fail
                } else {
                    OverflowPolicy::Clip
                },
                ..RenderOptions::default()
            };

            let rendered = coa_pdf::render_coa(&record, &assets, &options)?;
            let output = output.unwrap_or_else(|| PathBuf::from(rendered.file_name()));
            std::fs::write(&output, rendered.as_bytes())?;

            println!(
                "Wrote {} (scale {:.3}{})",
                output.display(),
                rendered.scale(),
                if rendered.is_clipped() { ", clipped" } else { "" }
            );
        }
        Commands::Template => {
            println!("{}", FieldRecord::template().to_json()?);
        }
    }

    Ok(())
}
