//! CLI binary for pagepack.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConvertConfig`, writes the resulting JPEGs to disk, and prints a
//! summary (or a JSON manifest).

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pagepack::{
    convert_input, plan_input, ConvertConfig, ConvertProgressCallback, DocumentOutput,
    ProgressCallback, ZoomPolicy,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar per document, advanced per group.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Create a callback whose bar length is set by `on_document_start`
    /// (groups are only known once the document has been opened).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening document…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl ConvertProgressCallback for CliProgressCallback {
    fn on_document_start(&self, name: &str, total_pages: usize, group_count: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} groups  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(group_count as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
        self.bar.reset_eta();
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!(
                "{name}: {total_pages} page(s) → {group_count} payload(s)"
            ))
        ));
    }

    fn on_group_start(&self, group_idx: usize, group_count: usize) {
        self.bar
            .set_message(format!("group {}/{}", group_idx + 1, group_count));
    }

    fn on_group_complete(&self, group_idx: usize, group_count: usize, payload_bytes: usize) {
        self.bar.println(format!(
            "  {} Group {:>3}/{:<3}  {}",
            green("✓"),
            group_idx + 1,
            group_count,
            dim(&format!("{:>7} bytes", payload_bytes)),
        ));
        self.bar.inc(1);
    }

    fn on_document_complete(&self, _name: &str, _group_count: usize) {
        self.bar.finish_and_clear();
    }

    fn on_document_error(&self, _name: &str, _error: &str) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a PDF with defaults (medium tiers: zoom 0.45, 4 pages/payload)
  pagepack report.pdf

  # Sharp pages, one per payload
  pagepack --image-quality 5 --pdf-quality 5 report.pdf

  # Cheap mode: tiny pages, 8 per payload, into a chosen directory
  pagepack --image-quality 1 --pdf-quality 1 -o out/ report.pdf

  # Mixed tiers: readable pages, few attachments
  pagepack --image-quality 4 --pdf-quality 2 report.pdf

  # Several inputs; one bad file does not stop the others
  pagepack a.pdf photo.png scan.jpg -o out/

  # JSON manifest (captions, dimensions, page ranges, stats) on stdout
  pagepack --json report.pdf -o out/ > manifest.json

  # Show the partitioning a tier selection would produce, render nothing
  pagepack --plan-only --pdf-quality 2 report.pdf

QUALITY TIERS:
  Tier  Zoom (standard)  Pages per payload
  ────  ───────────────  ─────────────────
  5     1.0              1
  4     0.7              2
  3     0.45             4        (default for both selectors)
  2     0.3              6
  1     0.2              8

  --image-quality picks the zoom column, --pdf-quality the pages column;
  they are independent. --zoom-policy compact swaps in a steeper zoom
  table (1.0, 0.5, 0.33, 0.25, 1/6).

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Path to an existing libpdfium — skips auto-download
  PDFIUM_FETCH_CACHE_DIR  Override the default pdfium cache directory

  PDFium (~30 MB) is downloaded automatically on first PDF run and cached
  in ~/.cache/pagepack/pdfium-7690/. Image-only runs never touch it.
"#;

/// Convert PDFs and images into caption-labelled JPEG payloads.
#[derive(Parser, Debug)]
#[command(
    name = "pagepack",
    version,
    about = "Convert PDFs and images into caption-labelled JPEG payloads",
    long_about = "Convert PDF documents and raster images (PNG, JPEG, GIF, WebP) into \
JPEG payloads sized for vision-model APIs. PDFs are rasterised at a quality-tier zoom and \
stacked several pages per payload; every payload carries a caption naming its source pages.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input files: PDFs and/or images. Kind is sniffed from content,
    /// not the extension.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory to write JPEGs into (created if missing).
    #[arg(short, long, env = "PAGEPACK_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Image quality tier 1–5: picks the zoom factor.
    #[arg(long, env = "PAGEPACK_IMAGE_QUALITY", default_value_t = 3,
          value_parser = clap::value_parser!(u8).range(1..=5))]
    image_quality: u8,

    /// PDF quality tier 1–5: picks pages-per-payload.
    #[arg(long, env = "PAGEPACK_PDF_QUALITY", default_value_t = 3,
          value_parser = clap::value_parser!(u8).range(1..=5))]
    pdf_quality: u8,

    /// Zoom table: standard or compact.
    #[arg(long, env = "PAGEPACK_ZOOM_POLICY", value_enum, default_value = "standard")]
    zoom_policy: ZoomPolicyArg,

    /// JPEG quality factor (1–100).
    #[arg(long, env = "PAGEPACK_JPEG_QUALITY", default_value_t = 95,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    jpeg_quality: u8,

    /// Composite canvas pixel budget.
    #[arg(long, env = "PAGEPACK_MAX_CANVAS_PIXELS", default_value_t = 100_000_000)]
    max_canvas_pixels: u64,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PAGEPACK_PASSWORD")]
    password: Option<String>,

    /// Print a JSON manifest (captions, dimensions, stats) to stdout.
    #[arg(long, env = "PAGEPACK_JSON")]
    json: bool,

    /// Show how each input would be partitioned; render nothing.
    #[arg(long)]
    plan_only: bool,

    /// Disable progress bar.
    #[arg(long, env = "PAGEPACK_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PAGEPACK_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PAGEPACK_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum ZoomPolicyArg {
    Standard,
    Compact,
}

impl From<ZoomPolicyArg> for ZoomPolicy {
    fn from(v: ZoomPolicyArg) -> Self {
        match v {
            ZoomPolicyArg::Standard => ZoomPolicy::STANDARD,
            ZoomPolicyArg::Compact => ZoomPolicy::COMPACT,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Ensure the PDFium engine is available ────────────────────────────
    // Only needed when a PDF is among the inputs; sniffed cheaply via the
    // header so image-only runs never download anything. First PDF run
    // fetches ~30 MB from bblanchon/pdfium-binaries; later runs are an
    // instant path check.
    let any_pdf = cli.inputs.iter().any(|p| {
        std::fs::read(p)
            .map(|b| b.starts_with(b"%PDF"))
            .unwrap_or(false)
    });

    if any_pdf && !pdfium_fetch::is_pdfium_cached() {
        if !cli.quiet {
            let dl_bar = ProgressBar::new(0);
            dl_bar.set_style(
                ProgressStyle::with_template(
                    "{spinner:.cyan} {prefix:.bold}  \
                     [{bar:42.green/238}] {bytes}/{total_bytes}  ETA {eta_precise}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏  ")
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
            );
            dl_bar.set_prefix("PDF engine");
            dl_bar.set_message("Connecting…");
            dl_bar.enable_steady_tick(Duration::from_millis(80));

            let bar = dl_bar.clone();
            // block_in_place keeps the reference lifetime valid (no 'static
            // requirement) while still offloading the blocking download from
            // the async executor's hot path.
            tokio::task::block_in_place(|| {
                pdfium_fetch::ensure_pdfium_library(Some(&|downloaded, total| {
                    if let Some(t) = total {
                        if bar.length().unwrap_or(0) != t {
                            bar.set_length(t);
                        }
                    }
                    bar.set_position(downloaded);
                }))
            })
            .context("Failed to download PDFium engine")?;

            dl_bar.finish_with_message("ready ✓");
        } else {
            tokio::task::block_in_place(|| pdfium_fetch::ensure_pdfium_library(None))
                .context("Failed to download PDFium engine")?;
        }
    }

    // ── Plan-only mode ───────────────────────────────────────────────────
    if cli.plan_only {
        return run_plan_only(&cli).await;
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new_dynamic() as Arc<dyn ConvertProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    std::fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            cli.output_dir.display()
        )
    })?;

    // ── Run conversion: one input at a time, failures isolated ───────────
    let mut manifest = Vec::new();
    let mut failures = 0usize;

    for path in &cli.inputs {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let outcome = match std::fs::read(path) {
            Ok(bytes) => convert_input(bytes, name.clone(), &config).await,
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", red("✘"), bold(&name), e);
                continue;
            }
        };

        match outcome {
            Ok(output) => {
                let files = write_payloads(&output, &cli.output_dir)?;

                if !cli.quiet && !cli.json {
                    eprintln!(
                        "{} {}  {} payload(s), {} bytes  {}",
                        green("✔"),
                        bold(&name),
                        output.stats.payload_count,
                        output.stats.total_payload_bytes,
                        dim(&format!(
                            "render {}ms, encode {}ms",
                            output.stats.render_duration_ms, output.stats.encode_duration_ms
                        )),
                    );
                }

                if cli.json {
                    manifest.push(serde_json::json!({
                        "name": output.name,
                        "stats": output.stats,
                        "payloads": output.payloads,
                        "files": files,
                    }));
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", red("✘"), bold(&name), e);
            }
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
    }

    if failures > 0 {
        eprintln!(
            "{} {}/{} input(s) failed",
            red("✘"),
            failures,
            cli.inputs.len()
        );
        std::process::exit(1);
    }

    Ok(())
}

/// Map CLI args to `ConvertConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConvertConfig> {
    let mut builder = ConvertConfig::builder()
        .tiers(cli.image_quality, cli.pdf_quality)
        .context("Invalid quality tier")?
        .zoom_policy(cli.zoom_policy.clone().into())
        .jpeg_quality(cli.jpeg_quality)
        .max_canvas_pixels(cli.max_canvas_pixels);

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Write each payload to `<output_dir>/<stem>[_pages_A-B].jpg`, returning
/// the written paths.
fn write_payloads(output: &DocumentOutput, dir: &Path) -> Result<Vec<PathBuf>> {
    let stem = Path::new(&output.name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| output.name.clone());

    let mut files = Vec::with_capacity(output.payloads.len());
    for payload in &output.payloads {
        let filename = match payload.page_range {
            Some((a, b)) if a == b => format!("{stem}_page_{a}.jpg"),
            Some((a, b)) => format!("{stem}_pages_{a}-{b}.jpg"),
            None => format!("{stem}.jpg"),
        };
        let path = dir.join(filename);
        std::fs::write(&path, &payload.bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        files.push(path);
    }

    Ok(files)
}

/// Print each document's partition plan without rendering anything.
async fn run_plan_only(cli: &Cli) -> Result<()> {
    let config = build_config(cli, None)?;
    let mut plans = Vec::new();

    for path in &cli.inputs {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

        // plan_input classifies first, so a standalone image prints its
        // trivial single-payload plan instead of a PDF-open error.
        let plan = plan_input(bytes, name.clone(), &config)
            .await
            .with_context(|| format!("Failed to plan {name}"))?;

        if cli.json {
            plans.push(plan);
        } else {
            println!(
                "{}: {} page(s), zoom {}, {} page(s)/payload → {} payload(s)",
                bold(&plan.name),
                plan.total_pages,
                plan.zoom,
                plan.pages_per_group,
                plan.group_count
            );
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&plans)?);
    }
    Ok(())
}
