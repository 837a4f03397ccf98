use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use pdf_nup::{BandOrder, CropSpec, GenerationOptions, LayoutKind, SourceDocument};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfnup", about = "Multi-up label and note sheets from PDF", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cropped labels only, N per sheet
    Plain {
        #[command(flatten)]
        common: CommonArgs,

        /// Label rows per page
        #[arg(long)]
        rows: Option<usize>,

        /// Label columns per page
        #[arg(long)]
        columns: Option<usize>,
    },

    /// Cropped labels plus a thank-you note for each
    Hybrid {
        #[command(flatten)]
        common: CommonArgs,

        /// Label rows per page
        #[arg(long)]
        rows: Option<usize>,

        /// Label columns per page
        #[arg(long)]
        columns: Option<usize>,

        /// Note rows per page
        #[arg(long)]
        note_rows: Option<usize>,

        /// Note columns per page
        #[arg(long)]
        note_columns: Option<usize>,

        /// Put the notes above the labels
        #[arg(long)]
        notes_first: bool,
    },

    /// Thank-you notes only, one per customer
    Notes {
        #[command(flatten)]
        common: CommonArgs,

        /// Note rows per page
        #[arg(long)]
        rows: Option<usize>,

        /// Note columns per page
        #[arg(long)]
        columns: Option<usize>,

        /// One note per source page instead of one per unique name
        #[arg(long)]
        per_page: bool,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Input PDF file
    #[arg(short, long)]
    input: PathBuf,

    /// Output PDF file
    #[arg(short, long)]
    output: PathBuf,

    /// Load options from a JSON file instead of the mode's preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective options to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Output paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Output orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Outer margin in mm
    #[arg(long)]
    margin: Option<f32>,

    /// Space between slots in mm
    #[arg(long)]
    gutter: Option<f32>,

    /// Render resolution for the cropped region
    #[arg(long)]
    dpi: Option<f32>,

    /// Region of each page to keep, in points from the top-left: x0,y0,x1,y1
    #[arg(long, value_delimiter = ',')]
    crop: Option<Vec<f32>>,

    /// Text of the line preceding the customer name
    #[arg(long)]
    label: Option<String>,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<PaperArg> for pdf_nup::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

impl From<OrientationArg> for pdf_nup::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl CommonArgs {
    /// Start from the JSON config if given, else the preset, then apply overrides
    async fn options(&self, preset: GenerationOptions) -> Result<GenerationOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let loaded = GenerationOptions::load(path).await?;
                if loaded.layout.name() != preset.layout.name() {
                    bail!(
                        "{} holds a {} layout, not {}",
                        path.display(),
                        loaded.layout.name(),
                        preset.layout.name()
                    );
                }
                loaded
            }
            None => preset,
        };

        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if let Some(orientation) = self.orientation {
            options.orientation = orientation.into();
        }
        if let Some(margin) = self.margin {
            options.margin_mm = margin;
        }
        if let Some(gutter) = self.gutter {
            options.gutter_mm = gutter;
        }
        if let Some(dpi) = self.dpi {
            options.render_dpi = dpi;
        }
        if let Some(crop) = &self.crop {
            let [x0, y0, x1, y1] = crop.as_slice() else {
                bail!("--crop takes four values: x0,y0,x1,y1");
            };
            options.crop = CropSpec::new(*x0, *y0, *x1, *y1);
        }
        if let Some(label) = &self.label {
            options.names.label = label.clone();
        }
        Ok(options)
    }
}

#[cfg(feature = "pdfium")]
fn raster_backend() -> pdf_nup::Result<pdf_nup::PdfiumBackend> {
    pdf_nup::PdfiumBackend::bind()
}

#[cfg(not(feature = "pdfium"))]
fn raster_backend() -> pdf_nup::Result<Unavailable> {
    Err(pdf_nup::NupError::Config(
        "pdfnup was built without the pdfium feature; only `notes` is available".to_string(),
    ))
}

#[cfg(not(feature = "pdfium"))]
struct Unavailable;

#[cfg(not(feature = "pdfium"))]
impl pdf_nup::RasterBackend for Unavailable {
    fn open<'a>(
        &'a self,
        _source: &'a SourceDocument,
    ) -> pdf_nup::Result<Box<dyn pdf_nup::PageRasterizer + 'a>> {
        Err(pdf_nup::NupError::Config("no raster backend".to_string()))
    }
}

/// Number of items a run would place: pages, or unique names for notes
fn item_count(source: &SourceDocument, options: &GenerationOptions) -> usize {
    match options.layout {
        LayoutKind::Notes { .. } if options.names.unique => {
            let names = pdf_nup::extract_all_names(source, &options.names);
            pdf_nup::names::unique_names(&names).len()
        }
        _ => source.page_count(),
    }
}

fn print_statistics(source_pages: usize, items: usize, options: &GenerationOptions) -> Result<()> {
    let stats = pdf_nup::statistics_for(items, options)?;
    println!("Composition Statistics:");
    println!("  Layout: {}", options.layout.name());
    println!("  Source pages: {}", source_pages);
    println!("  Items: {}", stats.items);
    println!("  Per page: {}", stats.capacity);
    println!("  Output pages: {}", stats.output_pages);
    if stats.output_pages > 0 {
        println!("  Items on last page: {}", stats.last_page_items);
    }
    Ok(())
}

async fn run(common: &CommonArgs, options: GenerationOptions) -> Result<()> {
    options.validate()?;

    if let Some(path) = &common.save_config {
        options.save(path).await?;
        info!("Saved options to {}", path.display());
    }

    let source = pdf_nup::load_source(&common.input).await?;
    let source_pages = source.page_count();

    if common.stats_only {
        return print_statistics(source_pages, item_count(&source, &options), &options);
    }

    let report =
        pdf_nup::generate_from(source, &common.output, options.clone(), raster_backend).await?;
    print_statistics(source_pages, report.items, &options)?;
    if report.fallback_names > 0 {
        println!("  Placeholder names: {}", report.fallback_names);
    }
    println!(
        "Composed {} pages to {}",
        report.output_pages(),
        common.output.display()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Plain {
            common,
            rows,
            columns,
        } => {
            let mut options = common.options(GenerationOptions::plain()).await?;
            if let LayoutKind::Raster {
                rows: r,
                columns: c,
            } = &mut options.layout
            {
                *r = rows.unwrap_or(*r);
                *c = columns.unwrap_or(*c);
            }
            run(&common, options).await?;
        }

        Commands::Hybrid {
            common,
            rows,
            columns,
            note_rows,
            note_columns,
            notes_first,
        } => {
            let mut options = common.options(GenerationOptions::hybrid()).await?;
            if let LayoutKind::Hybrid {
                raster_rows,
                raster_columns,
                note_rows: nr,
                note_columns: nc,
                order,
            } = &mut options.layout
            {
                *raster_rows = rows.unwrap_or(*raster_rows);
                *raster_columns = columns.unwrap_or(*raster_columns);
                *nr = note_rows.unwrap_or(*nr);
                *nc = note_columns.unwrap_or(*nc);
                if notes_first {
                    *order = BandOrder::NotesFirst;
                }
            }
            run(&common, options).await?;
        }

        Commands::Notes {
            common,
            rows,
            columns,
            per_page,
        } => {
            let mut options = common.options(GenerationOptions::notes()).await?;
            if let LayoutKind::Notes {
                rows: r,
                columns: c,
            } = &mut options.layout
            {
                *r = rows.unwrap_or(*r);
                *c = columns.unwrap_or(*c);
            }
            if per_page {
                options.names.unique = false;
            }
            run(&common, options).await?;
        }
    }

    Ok(())
}
