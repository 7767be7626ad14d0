use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use speech_emotion::{
    render_all, write_artifacts, AnalysisReport, AppConfig, EmotionAnalyzer, SvgRenderer,
    PROMPT_MESSAGE,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

/// Logs go to stderr so JSON reports on stdout stay parseable
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Parser, Debug)]
#[command(
    name = "speech_emotion",
    about = "Acoustic emotion spectrum of a speech clip (no datasets, no models)"
)]
struct Cli {
    /// JSON configuration file (missing fields use defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn execute(self) -> Result<()> {
        let config = load_config(self.config)?;
        match self.command {
            Command::Analyze(args) => analyze_command(&config, args),
            Command::ShowConfig => show_config_command(&config),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a WAV or MP3 speech file and print the report.
    Analyze(AnalyzeArgs),
    /// Print the effective configuration as JSON.
    ShowConfig,
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    /// Speech file to analyze (wav/mp3)
    file: Option<PathBuf>,
    /// Directory receiving the chart artifacts.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
    /// Skip chart rendering.
    #[arg(long)]
    no_render: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

fn load_config(path: Option<PathBuf>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::default(),
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn analyze_command(config: &AppConfig, args: AnalyzeArgs) -> Result<()> {
    let Some(file) = args.file else {
        println!("{PROMPT_MESSAGE}");
        return Ok(());
    };

    let analyzer = EmotionAnalyzer::new(&config.analysis).context("building analyzer")?;
    let analysis = analyzer
        .analyze_file(&file)
        .with_context(|| format!("analyzing {}", file.display()))?;

    let artifacts = if args.no_render {
        Vec::new()
    } else {
        let renderer = SvgRenderer::new(&config.render).context("building renderer")?;
        let spectrogram = analyzer.spectrogram(&analysis.clip, config.render.top_db);
        let rendered = render_all(&renderer, &analysis.spectrum, &analysis.clip, &spectrogram);
        write_artifacts(&args.out_dir, &rendered)
            .with_context(|| format!("writing charts to {}", args.out_dir.display()))?
    };

    let report = AnalysisReport::new(file.display().to_string(), &analysis, artifacts);
    match args.format {
        ReportFormat::Text => print!("{report}"),
        ReportFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn show_config_command(config: &AppConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
