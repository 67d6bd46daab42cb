use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use serde_json::json;
use swatch_api::PaletteServiceClient;
use swatch_engine::{ExportFormat, GenerationLifecycle, accessibility_report, export_all, gradients, variations};
use swatch_types::{Palette, SavedPalette, Style};
use swatch_util::{FileStorage, KeyValueStorage, LastGenerationStore, PaletteStore};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "swatch", version, about = "Generate color palettes from text prompts")]
struct Cli {
    /// Print JSON instead of plain text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ask the generation service for a palette.
    Generate {
        prompt: String,
        #[arg(long, short)]
        style: Option<Style>,
        /// Keep the result as a saved palette with this name.
        #[arg(long, value_name = "NAME")]
        save: Option<String>,
    },
    /// Show the most recent generation.
    Last,
    /// Accessibility, variations and gradients for a palette.
    Inspect {
        /// Saved palette id; defaults to the most recent generation.
        #[arg(long)]
        id: Option<String>,
    },
    /// Render a palette as CSS, SCSS or Tailwind.
    Export {
        /// Omit to print every format.
        #[arg(long, short)]
        format: Option<ExportFormat>,
        #[arg(long)]
        id: Option<String>,
    },
    /// Manage saved palettes.
    Saved {
        #[command(subcommand)]
        command: SavedCommand,
    },
    /// List the available styles.
    Styles,
}

#[derive(Debug, Subcommand)]
enum SavedCommand {
    List,
    /// Save the most recent generation.
    Add {
        #[arg(long, default_value = "")]
        name: String,
    },
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::with_defaults());

    match cli.command {
        Command::Generate { prompt, style, save } => run_generate(storage, &prompt, style, save.as_deref(), cli.json).await,
        Command::Last => run_last(storage, cli.json),
        Command::Inspect { id } => run_inspect(&resolve_palette(storage, id.as_deref())?, cli.json),
        Command::Export { format, id } => run_export(&resolve_palette(storage, id.as_deref())?, format, cli.json),
        Command::Saved { command } => run_saved(storage, command, cli.json),
        Command::Styles => run_styles(cli.json),
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run_generate(storage: Arc<dyn KeyValueStorage>, prompt: &str, style: Option<Style>, save: Option<&str>, json: bool) -> Result<()> {
    let client = PaletteServiceClient::new_from_env().context("failed to configure the generation service client")?;
    debug!(base_url = client.base_url(), "using generation service");

    let lifecycle = GenerationLifecycle::new(Arc::new(client), Some(LastGenerationStore::new(storage.clone())));
    let snapshot = lifecycle.submit(prompt, style).await;
    if let Some(error) = snapshot.error {
        bail!(error);
    }
    let generated = lifecycle.result().context("generation finished without a palette")?;

    let saved = match save {
        Some(name) => {
            let store = PaletteStore::load_all(storage);
            Some(
                store
                    .add(&generated.palette, name, &generated.prompt)
                    .context("failed to write saved palettes")?,
            )
        }
        None => None,
    };

    if json {
        let out = json!({
            "prompt": generated.prompt,
            "style": generated.style,
            "colors": generated.palette,
            "saved": saved,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_palette(&generated.palette);
    if let Some(saved) = saved {
        println!("saved as {}", saved.id);
    }
    Ok(())
}

fn run_last(storage: Arc<dyn KeyValueStorage>, json: bool) -> Result<()> {
    let Some(last) = LastGenerationStore::new(storage).load() else {
        println!("No palette generated yet");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&last)?);
        return Ok(());
    }

    println!("{} ({})", last.prompt, last.style.label());
    print_palette(&last.palette);
    Ok(())
}

fn run_inspect(palette: &Palette, json: bool) -> Result<()> {
    let report = accessibility_report(palette);
    let shades: Vec<_> = palette.iter().map(|color| (color, variations(color))).collect();
    let pairs = gradients(palette);

    if json {
        let out = json!({
            "accessibility": report,
            "variations": shades
                .iter()
                .map(|(color, set)| json!({ "color": color, "variations": set }))
                .collect::<Vec<_>>(),
            "gradients": pairs
                .iter()
                .map(|gradient| json!({ "from": gradient.from, "to": gradient.to, "css": gradient.to_css() }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Accessibility");
    for entry in &report {
        println!("  {}. {}  luminance {:.2}  {}", entry.index, entry.color, entry.luminance, entry.suggestion);
    }
    println!("Variations");
    for (color, set) in &shades {
        println!(
            "  {}  lighter {}  darker {}  saturated {}  desaturated {}",
            color, set.lighter, set.darker, set.saturated, set.desaturated
        );
    }
    println!("Gradients");
    for gradient in &pairs {
        println!("  {}", gradient.to_css());
    }
    Ok(())
}

fn run_export(palette: &Palette, format: Option<ExportFormat>, json: bool) -> Result<()> {
    let exports = match format {
        Some(format) => vec![(format, format.render(palette))],
        None => export_all(palette),
    };

    if json {
        let out: serde_json::Map<String, serde_json::Value> = exports
            .into_iter()
            .map(|(format, text)| (format.as_str().to_string(), text.into()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if let [(_, text)] = exports.as_slice() {
        println!("{text}");
        return Ok(());
    }
    let blocks: Vec<_> = exports
        .iter()
        .map(|(format, text)| format!("/* {} */\n{text}", format.label()))
        .collect();
    println!("{}", blocks.join("\n\n"));
    Ok(())
}

fn run_saved(storage: Arc<dyn KeyValueStorage>, command: SavedCommand, json: bool) -> Result<()> {
    let store = PaletteStore::load_all(storage.clone());
    match command {
        SavedCommand::List => {
            let palettes = store.palettes();
            if json {
                println!("{}", serde_json::to_string_pretty(&palettes)?);
            } else if palettes.is_empty() {
                println!("No saved palettes");
            } else {
                for (position, saved) in palettes.iter().enumerate() {
                    println!("{}  {}  {}", saved.id, saved.display_name(position), saved.colors.to_strings().join(" "));
                }
            }
        }
        SavedCommand::Add { name } => {
            let saved = save_last_generation(&store, storage, &name)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else {
                println!("saved as {}", saved.id);
            }
        }
        SavedCommand::Delete { id } => {
            if !store.remove(&id).context("failed to write saved palettes")? {
                bail!("no saved palette with id '{id}'");
            }
            if json {
                println!("{}", json!({ "deleted": id }));
            } else {
                println!("deleted {id}");
            }
        }
    }
    Ok(())
}

fn run_styles(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&Style::ALL)?);
        return Ok(());
    }
    for style in Style::ALL {
        let marker = if style == Style::default() { " (default)" } else { "" };
        println!("{:<14}{}{marker}", style.as_str(), style.label());
    }
    Ok(())
}

fn save_last_generation(store: &PaletteStore, storage: Arc<dyn KeyValueStorage>, name: &str) -> Result<SavedPalette> {
    let last = LastGenerationStore::new(storage)
        .load()
        .context("no palette generated yet; run `swatch generate <prompt>` first")?;
    store
        .add(&last.palette, name, &last.prompt)
        .context("failed to write saved palettes")
}

/// Saved palette `id`, or the most recent generation when no id is given.
fn resolve_palette(storage: Arc<dyn KeyValueStorage>, id: Option<&str>) -> Result<Palette> {
    match id {
        Some(id) => PaletteStore::load_all(storage)
            .get(id)
            .map(|saved| saved.colors)
            .ok_or_else(|| anyhow!("no saved palette with id '{id}'")),
        None => LastGenerationStore::new(storage)
            .load()
            .map(|generated| generated.palette)
            .context("no palette generated yet; run `swatch generate <prompt>` first"),
    }
}

fn print_palette(palette: &Palette) {
    for color in palette {
        println!("{color}  {}", color.to_rgb());
    }
}
