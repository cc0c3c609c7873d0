use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use snoplus_style::demo::{self, Aspect, DemoOptions};
use snoplus_style::{OutputFormat, StyleConfig, StyleProfile, storage};

#[derive(Parser, Debug)]
#[command(
    name = "snoplus-style",
    version,
    about = "Apply the SNO+ plot style and render the reference figures"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render example1D and example2D under the chosen style.
    Render(RenderArgs),
    /// Print the resolved style profile as JSON.
    Style(StyleArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Preset {
    /// Times fonts, for publications.
    Publication,
    /// Sans-serif fonts, for slides.
    Slides,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Pdf,
    Svg,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AspectArg {
    /// 800x600
    #[value(name = "4:3")]
    Standard,
    /// 1600x900
    #[value(name = "16:9")]
    Wide,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Directory the figures are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Pdf)]
    format: Format,
    /// Style preset.
    #[arg(long, value_enum, default_value_t = Preset::Publication)]
    preset: Preset,
    /// Canvas aspect ratio.
    #[arg(long, value_enum, default_value_t = AspectArg::Standard)]
    aspect: AspectArg,
    /// Seed for the random fills.
    #[arg(long, default_value_t = demo::DEFAULT_SEED)]
    seed: u64,
    /// Also save the run report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Style preset.
    #[arg(long, value_enum, default_value_t = Preset::Publication)]
    preset: Preset,
    /// Save to a file instead of printing.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn preset_config(p: Preset) -> StyleConfig {
    match p {
        Preset::Publication => StyleConfig::publication(),
        Preset::Slides => StyleConfig::slides(),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Style(args) => cmd_style(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let opts = DemoOptions {
        out_dir: args.out_dir,
        format: match args.format {
            Format::Pdf => OutputFormat::Pdf,
            Format::Svg => OutputFormat::Svg,
        },
        style: preset_config(args.preset),
        aspect: match args.aspect {
            AspectArg::Standard => Aspect::Standard,
            AspectArg::Wide => Aspect::Wide,
        },
        seed: args.seed,
    };
    let report = demo::run(&opts)?;

    for fig in &report.figures {
        match &fig.error {
            None => eprintln!("Wrote {}", fig.path.display()),
            Some(e) => eprintln!("Failed {}: {}", fig.path.display(), e),
        }
    }
    if let Some(path) = args.report.as_ref() {
        storage::save_json(&report, path)?;
        eprintln!("Saved report to {}", path.display());
    }
    if !report.all_ok() {
        anyhow::bail!("some figures could not be exported");
    }
    Ok(())
}

fn cmd_style(args: StyleArgs) -> Result<()> {
    let cfg = preset_config(args.preset);
    let profile = StyleProfile::build(&cfg)?;
    match args.out.as_ref() {
        Some(path) => {
            storage::save_json(profile.config(), path)?;
            eprintln!("Saved style `{}` to {}", profile.name(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(profile.config())?),
    }
    Ok(())
}
