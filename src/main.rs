use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use torah_layout::block::{PresetKind, PRESETS};
use torah_layout::config::{StoreConfig, StudioConfig};
use torah_layout::document::{DocumentDraft, DocumentId, ProjectDraft, ProjectId};
use torah_layout::render;
use torah_layout::store::{FileStore, Repository};
use torah_layout::studio::Studio;

#[derive(Debug, Parser)]
#[command(name = "torah-layout", version, about = "Block-based document layout to HTML")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Store directory (overrides the config's backend)
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a document payload JSON to HTML. Blocks that fail to decode are skipped.
    Render {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Strictly validate a document payload JSON.
    Validate { input: PathBuf },
    /// List the role presets the bundled stylesheet styles.
    Roles,
    #[command(subcommand)]
    Project(ProjectCommand),
    #[command(subcommand)]
    Document(DocumentCommand),
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    List,
}

#[derive(Debug, Subcommand)]
enum DocumentCommand {
    /// Create a document from a payload JSON
    Create {
        #[arg(long)]
        project: ProjectId,
        input: PathBuf,
    },
    /// Replace a document's title, description and blocks
    Update {
        #[arg(long)]
        project: ProjectId,
        #[arg(long)]
        document: DocumentId,
        input: PathBuf,
    },
    List {
        #[arg(long)]
        project: ProjectId,
    },
    Show {
        #[arg(long)]
        project: ProjectId,
        #[arg(long)]
        document: DocumentId,
    },
    Export {
        #[arg(long)]
        project: ProjectId,
        #[arg(long)]
        document: DocumentId,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Render { input, output } => {
            let payload = read_payload(&input)?;
            let html = render::render_value(&payload)
                .with_context(|| format!("invalid document {}", input.display()))?;
            write_output(output.as_deref(), &html)?;
        }
        Command::Validate { input } => {
            let payload = read_payload(&input)?;
            match DocumentDraft::from_value(&payload) {
                Ok(draft) => println!("OK ({} blocks)", draft.blocks.len()),
                Err(err) => {
                    for violation in err.violations() {
                        eprintln!("{violation}");
                    }
                    process::exit(2);
                }
            }
        }
        Command::Roles => {
            for preset in PRESETS {
                let kind = match preset.kind {
                    PresetKind::Text => "text",
                    PresetKind::Image => "image",
                };
                println!("{:<26}{:<7}{}", preset.id, kind, preset.label);
            }
        }
        Command::Project(cmd) => {
            let config = load_config(cli.config.as_deref(), cli.store)?;
            run_project(open_studio(&config)?, cmd)?;
        }
        Command::Document(cmd) => {
            let config = load_config(cli.config.as_deref(), cli.store)?;
            run_document(open_studio(&config)?, cmd)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, store: Option<PathBuf>) -> anyhow::Result<StudioConfig> {
    let config = match path {
        Some(path) => StudioConfig::load(path)?,
        None => StudioConfig::v0(),
    };
    Ok(match store {
        Some(root) => config.with_store_root(root),
        None => config,
    })
}

/// Each invocation is its own process, so only the filesystem backend can
/// carry projects and documents from one command to the next.
fn open_studio(config: &StudioConfig) -> anyhow::Result<Studio<FileStore>> {
    match &config.store {
        StoreConfig::Filesystem { root } => Ok(Studio::new(FileStore::open(root.clone())?)),
        StoreConfig::Memory => anyhow::bail!(
            "the memory backend does not persist between commands; \
             use a filesystem backend or pass --store <dir>"
        ),
    }
}

fn read_payload(path: &Path) -> anyhow::Result<Value> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn write_output(path: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            println!("{contents}");
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_project<R: Repository>(mut studio: Studio<R>, cmd: ProjectCommand) -> anyhow::Result<()> {
    match cmd {
        ProjectCommand::Create { name, description } => {
            let draft = ProjectDraft { name, description };
            print_json(&studio.create_project(draft)?)
        }
        ProjectCommand::List => print_json(&studio.list_projects()?),
    }
}

fn run_document<R: Repository>(mut studio: Studio<R>, cmd: DocumentCommand) -> anyhow::Result<()> {
    match cmd {
        DocumentCommand::Create { project, input } => {
            let draft = DocumentDraft::from_value(&read_payload(&input)?)?;
            print_json(&studio.create_document(project, draft)?)
        }
        DocumentCommand::Update {
            project,
            document,
            input,
        } => {
            let draft = DocumentDraft::from_value(&read_payload(&input)?)?;
            print_json(&studio.update_document(project, document, draft)?)
        }
        DocumentCommand::List { project } => print_json(&studio.list_documents(project)?),
        DocumentCommand::Show { project, document } => {
            print_json(&studio.get_document(project, document)?)
        }
        DocumentCommand::Export {
            project,
            document,
            output,
        } => {
            let export = studio.export_html(project, document)?;
            log::info!("exported {} at {}", export.document_id, export.version);
            write_output(output.as_deref(), &export.html)
        }
    }
}
