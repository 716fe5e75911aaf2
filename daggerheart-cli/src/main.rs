mod output;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::debug;
use std::io::Write;
use std::path::PathBuf;

use daggerheart_game::{
    Archetype, Character, CharacterForge, CharacterRequest, ClassId, DirectoryReferenceLoader,
    EquipmentSelection, ReferenceLoader, RngBundle, StaticReferenceLoader, choose_equipment,
};

use output::{OutputTarget, write_listing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON character record
    Json,
    /// Human-readable character sheet
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Classes,
    Subclasses,
    Ancestries,
    Communities,
    Weapons,
    Armor,
    Archetypes,
}

#[derive(Debug, Parser)]
#[command(name = "daggerheart-cli", version)]
#[command(about = "Generate Daggerheart SRD characters from an archetype or explicit class")]
struct Args {
    /// Target level (1-10)
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    level: i64,

    /// Tank, Damage, Sneaky, Support, Healer, Face, Control, Random or Any
    #[arg(long)]
    archetype: Option<String>,

    /// Explicit class; overrides the archetype heuristic
    #[arg(long = "class")]
    class_name: Option<String>,

    /// Explicit subclass; must belong to the class when both are given
    #[arg(long = "subclass")]
    subclass_name: Option<String>,

    /// Primary weapon to equip
    #[arg(long)]
    primary: Option<String>,

    /// Secondary weapon to equip
    #[arg(long)]
    secondary: Option<String>,

    /// Armor to equip
    #[arg(long)]
    armor: Option<String>,

    /// Pick starting gear from the archetype's suggestions when none is named
    #[arg(long)]
    auto_equip: bool,

    /// Character name
    #[arg(long)]
    name: Option<String>,

    /// Generation seed; the same seed and options rebuild the same character
    #[arg(long)]
    seed: Option<u64>,

    /// Read reference tables from this directory instead of the embedded set
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write the result to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// List reference entries and exit
    #[arg(long, value_enum)]
    list: Option<ListKind>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.data_dir.clone() {
        Some(dir) => run(&args, DirectoryReferenceLoader::new(dir)),
        None => run(&args, StaticReferenceLoader),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run<L: ReferenceLoader>(args: &Args, loader: L) -> Result<()> {
    let source = loader.source();
    let forge = CharacterForge::new(loader)
        .with_context(|| format!("failed to load reference data from {source}"))?;

    if let Some(kind) = args.list {
        let mut target = OutputTarget::new(args.output.clone())?;
        write_listing(&mut target, forge.reference(), kind)?;
        target.flush()?;
        return Ok(());
    }

    let plan = GenerationPlan::from_args(args);
    debug!("generation plan: {plan:?}");
    let rngs = RngBundle::from_user_seed(plan.seed);
    let mut character = forge
        .create_character(&plan.request, &rngs)
        .context("character generation failed")?;

    let selection = equipment_selection(args, &character, &rngs);
    if !selection.is_empty() {
        selection.apply(&mut character, forge.reference());
    }

    let mut target = OutputTarget::new(args.output.clone())?;
    write_character(&mut target, &character, args.format, plan.seed)?;
    target.flush()?;

    if args.output.is_some() || args.format == OutputFormat::Json {
        announce(&character, plan.seed);
    }
    Ok(())
}

/// Treat blank-like values as absent.
fn normalize(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") || trimmed.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The archetype label to request: as given, else the one the chosen class
/// plays best, else a wildcard.
fn resolve_archetype_label(archetype: Option<String>, class_name: Option<&str>) -> String {
    if let Some(label) = archetype {
        return label;
    }
    class_name
        .and_then(|name| name.parse::<ClassId>().ok())
        .map_or_else(
            || "Random".to_string(),
            |class| Archetype::infer_from_class(class).name().to_string(),
        )
}

#[derive(Debug)]
struct GenerationPlan {
    request: CharacterRequest,
    seed: u64,
}

impl GenerationPlan {
    fn from_args(args: &Args) -> Self {
        let class_name = normalize(args.class_name.as_deref());
        let label = resolve_archetype_label(
            normalize(args.archetype.as_deref()),
            class_name.as_deref(),
        );
        let mut request = CharacterRequest::new(args.level, label);
        request.class_name = class_name;
        request.subclass_name = normalize(args.subclass_name.as_deref());
        request.name = normalize(args.name.as_deref());
        Self {
            request,
            seed: args.seed.unwrap_or_else(rand::random),
        }
    }
}

fn equipment_selection(args: &Args, character: &Character, rngs: &RngBundle) -> EquipmentSelection {
    let selection = EquipmentSelection {
        primary: normalize(args.primary.as_deref()),
        secondary: normalize(args.secondary.as_deref()),
        armor: normalize(args.armor.as_deref()),
    };
    if selection.is_empty() && args.auto_equip {
        return choose_equipment(character.effective_archetype(), &mut *rngs.equipment());
    }
    selection
}

fn write_character(
    target: &mut OutputTarget,
    character: &Character,
    format: OutputFormat,
    seed: u64,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *target, character)
                .context("failed to serialize character")?;
            writeln!(target)?;
        }
        OutputFormat::Text => {
            write!(target, "{character}")?;
            writeln!(target, "Seed: {seed}")?;
        }
    }
    Ok(())
}

fn announce(character: &Character, seed: u64) {
    let label = format!("Level {}", character.level);
    let summary = format!(
        "{} {} - {}",
        label.as_str().bold(),
        character.char_class,
        character.subclass
    );
    eprintln!("{summary} [seed {}]", seed.to_string().as_str().bright_cyan());
}
