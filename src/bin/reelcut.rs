use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

use reelcut::{
    CompiledTimeline, CompilerConfig, MediaLocationResolver, ResolutionMode, TimelineCompiler,
    TimelineDocument,
};

#[derive(Parser, Debug)]
#[command(name = "reelcut", version)]
struct Cli {
    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a timeline JSON into a render manifest.
    Compile(CompileArgs),
    /// Resolve source references against the media store.
    Resolve(ResolveArgs),
    /// Compile timelines and report warnings and fingerprints without writing manifests.
    Probe(ProbeArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Compiler configuration JSON. Missing files fall back to defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root of the analyzed media store.
    #[arg(long)]
    store_root: Option<PathBuf>,

    /// Source resolution policy.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Base URL of the media API.
    #[arg(long)]
    remote_base_url: Option<String>,

    /// Frame rate for documents that do not declare one.
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    /// Map segment references onto local store files.
    Local,
    /// Map segment references onto URLs under the remote base URL.
    Remote,
}

#[derive(Args, Debug)]
struct CompileArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output manifest path. Writes to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print the manifest.
    #[arg(long, default_value_t = false)]
    pretty: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// Source references to resolve.
    #[arg(required = true)]
    refs: Vec<String>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Args, Debug)]
struct ProbeArgs {
    /// Input timeline JSON files.
    #[arg(long = "in", required = true)]
    in_paths: Vec<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);
    match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
        Command::Resolve(args) => cmd_resolve(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn init_logging(verbose: bool, json: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<CompilerConfig> {
    let mut config = CompilerConfig::load_or_default(args.config.as_deref())?;
    if let Some(root) = &args.store_root {
        config.resolver.store_root = root.clone();
    }
    if let Some(mode) = args.mode {
        config.resolver.mode = match mode {
            ModeArg::Local => ResolutionMode::LocalFile,
            ModeArg::Remote => ResolutionMode::RemotePassthrough,
        };
    }
    if let Some(url) = &args.remote_base_url {
        config.resolver.remote_base_url = url.clone();
    }
    if let Some(fps) = args.fps {
        config.default_frame_rate = fps;
    }
    for warning in config.validate() {
        tracing::warn!("config: {warning}");
    }
    Ok(config)
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let doc = TimelineDocument::from_path(&args.in_path)
        .with_context(|| format!("load timeline '{}'", args.in_path.display()))?;
    let compiled = TimelineCompiler::new(config).compile(&doc)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&compiled)
    } else {
        serde_json::to_string(&compiled)
    }
    .context("serialize render manifest")?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json)
                .with_context(|| format!("write manifest '{}'", out.display()))?;
            eprintln!(
                "wrote {} ({} instructions, {} warnings)",
                out.display(),
                compiled.instructions.len(),
                compiled.warnings.len()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write manifest to stdout")?;
        }
    }
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let resolver = MediaLocationResolver::new(config.resolver);

    let mut stdout = std::io::stdout().lock();
    for reference in &args.refs {
        let line = match resolver.resolve(reference) {
            Ok(source) => serde_json::json!({ "reference": reference, "resolved": source }),
            Err(error) => serde_json::json!({
                "reference": reference,
                "message": error.to_string(),
                "error": error,
            }),
        };
        writeln!(stdout, "{line}").context("write resolution to stdout")?;
    }
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let compiler = TimelineCompiler::new(config);

    let mut docs = Vec::with_capacity(args.in_paths.len());
    for path in &args.in_paths {
        docs.push(
            TimelineDocument::from_path(path)
                .with_context(|| format!("load timeline '{}'", path.display()))?,
        );
    }

    let mut failed = 0usize;
    for (path, result) in args.in_paths.iter().zip(compiler.compile_batch(&docs)) {
        match result {
            Ok(compiled) => print_probe(path, &compiled),
            Err(e) => {
                failed += 1;
                println!("{}: error: {e}", path.display());
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} timelines failed to compile", args.in_paths.len());
    }
    Ok(())
}

fn print_probe(path: &std::path::Path, compiled: &CompiledTimeline) {
    let c = &compiled.composition;
    println!(
        "{}: {}x{} @ {}fps, {} frames, {} instructions, fingerprint {}",
        path.display(),
        c.width,
        c.height,
        c.fps,
        c.duration_in_frames,
        compiled.instructions.len(),
        compiled.fingerprint()
    );
    for w in &compiled.warnings {
        println!("  warning: {w}");
    }
}
