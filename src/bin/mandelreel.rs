use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use mandelreel::{
    FailurePolicy, Palette, ProgressSink as _, RenderSession, RenderSessionOpts, StatusWriter,
    split_directory,
};

#[derive(Parser, Debug)]
#[command(
    name = "mandelreel",
    version,
    about = "Render Mandelbrot escape-time documents into PNG frames"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,

    #[command(flatten)]
    render: RenderArgs,

    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split unsplit `mandelbrot_nums_<name>.json` documents into `_0` / `_1` siblings.
    Split(SplitArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Directory holding `mandelbrot_nums_<name>_<tag>.json` documents.
    #[arg(long, env = "MANDELREEL_INPUT_DIR", default_value = "files")]
    input_dir: PathBuf,

    /// Directory receiving `<name>_<tag>_<frame>.png` images. Must exist.
    #[arg(long, env = "MANDELREEL_OUTPUT_DIR", default_value = "imgs")]
    output_dir: PathBuf,

    /// Coloring rule.
    #[arg(long, value_enum, default_value_t = PaletteChoice::Hue)]
    palette: PaletteChoice,

    /// Skip failed or unpaired units instead of stopping; the exit code is still non-zero.
    #[arg(long)]
    keep_going: bool,
}

#[derive(Args, Debug)]
struct SplitArgs {
    /// Directory holding the unsplit documents; halves are written next to them.
    #[arg(long, env = "MANDELREEL_INPUT_DIR", default_value = "files")]
    input_dir: PathBuf,

    /// Skip documents that cannot be split instead of stopping.
    #[arg(long)]
    keep_going: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PaletteChoice {
    Hue,
    Grayscale,
}

impl From<PaletteChoice> for Palette {
    fn from(c: PaletteChoice) -> Self {
        match c {
            PaletteChoice::Hue => Palette::Hue,
            PaletteChoice::Grayscale => Palette::Grayscale,
        }
    }
}

fn failure_policy(keep_going: bool) -> FailurePolicy {
    if keep_going {
        FailurePolicy::KeepGoing
    } else {
        FailurePolicy::Abort
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match cli.cmd {
        Some(Command::Split(args)) => cmd_split(args),
        None => cmd_render(cli.render),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::INFO,
        (false, 2) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let opts = RenderSessionOpts {
        palette: args.palette.into(),
        failure_policy: failure_policy(args.keep_going),
    };
    tracing::info!(
        input = %args.input_dir.display(),
        output = %args.output_dir.display(),
        palette = %opts.palette,
        "starting render"
    );

    let mut status = StatusWriter::new(std::io::stdout().lock());
    let mut session = match RenderSession::new(&args.input_dir, &args.output_dir, opts) {
        Ok(session) => session,
        Err(err) => {
            status.failed(&err);
            return Err(err).context("render session setup");
        }
    };
    let report = session.run(&mut status)?;

    if !report.is_success() {
        anyhow::bail!(
            "{} unit(s) failed and {} unit(s) were skipped",
            report.units_failed,
            report.units_skipped
        );
    }
    Ok(())
}

fn cmd_split(args: SplitArgs) -> anyhow::Result<()> {
    let mut status = StatusWriter::new(std::io::stdout().lock());
    let report = split_directory(&args.input_dir, failure_policy(args.keep_going), &mut status)
        .with_context(|| format!("split documents in '{}'", args.input_dir.display()))?;

    if report.documents_failed > 0 {
        anyhow::bail!("{} document(s) could not be split", report.documents_failed);
    }
    Ok(())
}
