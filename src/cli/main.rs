use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use promptscan::common::resolve_storage_path;
use promptscan::image2text::OcrConfig;
use promptscan::normalize::normalize;
use promptscan::process::{scan_image_paths, ProcessorConfig};
use promptscan::share::{copy_text, CopyFlavor};
use promptscan::store::{PromptFilter, PromptStore, SavedPrompt, SqliteStorage};
use promptscan_app::common::init_logger_exe;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "A CLI tool to extract, polish and keep AI prompts from images", long_about = None)]
struct Cli {
    #[arg(long, global = true, help = "prompt library database (defaults to ~/.promptscan/promptscan.db)")]
    db: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// OCR one or more images; pages are joined with a blank line
    Scan {
        #[arg(long = "image", required = true, num_args = 1.., help = "input image(s) (png, jpeg, webp, ...)")]
        images: Vec<PathBuf>,
        #[arg(long, help = "run Magic Polish on the extracted text")]
        polish: bool,
        #[arg(long, help = "save the result to the library")]
        save: bool,
        #[arg(long, help = "Tesseract language, e.g. eng or swe")]
        lang: Option<String>,
        #[arg(long, help = "Tesseract page segmentation mode")]
        psm: Option<u32>,
    },
    /// Clean up text from a file or stdin
    Polish {
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Save text from a file or stdin
    Save {
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long, help = "polish before saving")]
        polish: bool,
    },
    /// List saved prompts, newest first
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },
    /// List every tag in the library
    Tags,
    /// Delete a saved prompt
    Remove { id: String },
    /// Print text transformed for a copy target
    Copy {
        #[arg(long, default_value = "standard", help = "standard, midjourney or chatgpt")]
        flavor: String,
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    init_logger_exe();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Scan {
            images,
            polish,
            save,
            lang,
            psm,
        } => {
            let config = ProcessorConfig::new(OcrConfig::new(lang, None, psm, None), polish);
            let outcome = scan_image_paths(&images, None, &config)
                .await
                .context("Scanning failed. Try again.")?;

            if let Some(normalized) = &outcome.normalized {
                if normalized.extracted_count > 0 {
                    log::info!("Extracted {} prompts", normalized.extracted_count);
                } else {
                    log::info!("Text polished & cleaned");
                }
            }
            log::info!("Mean OCR confidence {:.1}", outcome.confidence);
            println!("{}", outcome.final_text());

            if save {
                save_text(cli.db.as_deref(), outcome.final_text())?;
            }
        }
        Command::Polish { file } => {
            let raw = read_input(file)?;
            let result = normalize(&raw);
            log::info!("Extracted {} prompts", result.extracted_count);
            println!("{}", result.cleaned_text);
        }
        Command::Save { file, polish } => {
            let raw = read_input(file)?;
            let text = if polish {
                normalize(&raw).cleaned_text
            } else {
                raw.trim().to_string()
            };
            save_text(cli.db.as_deref(), &text)?;
        }
        Command::List { search, tag } => {
            let store = open_store(cli.db.as_deref())?;
            let prompts = store.search(&PromptFilter::new(search.clone(), tag.clone()));
            if prompts.is_empty() {
                if search.is_some() || tag.is_some() {
                    println!("No matches found.");
                } else {
                    println!("Your library is empty. Start scanning!");
                }
            }
            for prompt in &prompts {
                print_prompt(prompt);
            }
        }
        Command::Tags => {
            let store = open_store(cli.db.as_deref())?;
            for tag in store.tags() {
                println!("{}", tag);
            }
        }
        Command::Remove { id } => {
            let store = open_store(cli.db.as_deref())?;
            store.remove(&id)?;
            println!("Removed {}", id);
        }
        Command::Copy { flavor, file } => {
            let text = read_input(file)?;
            let output = copy_text(text.trim_end(), CopyFlavor::from(flavor.as_str()));
            log::debug!("Copying as {}", output.flavor);
            println!("{}", output.text);
            if let Some(url) = output.open_url {
                log::info!("Paste it into {}", url);
            }
        }
    }

    Ok(())
}

fn open_store(db: Option<&str>) -> Result<PromptStore<SqliteStorage>> {
    let path = resolve_storage_path(db)?;
    Ok(PromptStore::new(SqliteStorage::open(path)?))
}

fn save_text(db: Option<&str>, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Nothing to save: text is empty");
    }
    let store = open_store(db)?;
    let prompt = store.save(text)?;
    println!("Saved {} [{}]", prompt.id, prompt.tags.join(", "));
    Ok(())
}

fn read_input(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn print_prompt(prompt: &SavedPrompt) {
    let created = chrono::DateTime::from_timestamp_millis(prompt.created_at)
        .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| prompt.created_at.to_string());

    println!("{}  {}  [{}]", prompt.id, created, prompt.tags.join(", "));
    println!("{}", prompt.text);
    println!();
}
