//! Document I/O around the synchronous composition core

use super::compose;
use crate::options::GenerationOptions;
use crate::raster::RasterBackend;
use crate::render::ThankYouNote;
use crate::source::SourceDocument;
use crate::types::*;
use lopdf::Document;
use std::path::Path;
use tempfile::NamedTempFile;

/// Load and parse a source PDF
pub async fn load_source(path: impl AsRef<Path>) -> Result<SourceDocument> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| NupError::open(&path, e))?;
    tokio::task::spawn_blocking(move || SourceDocument::from_bytes(path, bytes)).await?
}

/// Save the composed document.
///
/// The bytes go to a temporary file next to `path` that replaces the
/// destination only once fully written, so a failure never leaves a
/// truncated file behind.
pub async fn save_output(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        doc.save_to(&mut file)?;
        file.as_file().sync_all()?;
        file.persist(&path).map_err(|e| e.error)?;
        Ok::<_, NupError>(())
    })
    .await?
}

/// Compose `input` into `output` with the default thank-you notes.
///
/// `make_backend` runs on the blocking thread that does the composition,
/// and only for layouts with a raster grid, so backends need not be `Send`.
pub async fn generate<B, F>(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: GenerationOptions,
    make_backend: F,
) -> Result<CompositionReport>
where
    B: RasterBackend,
    F: FnOnce() -> Result<B> + Send + 'static,
{
    options.validate()?;
    let source = load_source(input).await?;
    generate_from(source, output, options, make_backend).await
}

/// Like [`generate`], for a source that is already loaded
pub async fn generate_from<B, F>(
    source: SourceDocument,
    output: impl AsRef<Path>,
    options: GenerationOptions,
    make_backend: F,
) -> Result<CompositionReport>
where
    B: RasterBackend,
    F: FnOnce() -> Result<B> + Send + 'static,
{
    options.validate()?;
    let (doc, report) = tokio::task::spawn_blocking(move || {
        let notes = ThankYouNote::new(options.note.clone());
        if options.layout.uses(ItemSource::Raster) {
            let backend = make_backend()?;
            compose(&source, Some(&backend as &dyn RasterBackend), &options, &notes)
        } else {
            compose(&source, None, &options, &notes)
        }
    })
    .await??;

    save_output(doc, output).await?;
    Ok(report)
}
