// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tool implementations behind the CLI subcommands.
//
// Each function runs one tool end to end and returns its error unhandled;
// `main` turns it into the message the user sees.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use pagesift_core::config::AppConfig;
use pagesift_core::error::{PageSiftError, Result};
use pagesift_core::{InputKind, Sensitivity};
use pagesift_document::convert::{GREYSCALE_SCALE, IMAGE_EXPORT_SCALE};
use pagesift_document::{
    AnalysisCache, BlankPageSession, PageImageFormat, PageScope, PageSource, PdfEditor, PdfPages,
    RasterPages, RasterPdfWriter, RenderPage, greyscale_pdf, render_page_images,
    render_thumbnails,
};
use serde::Serialize;
use tracing::{info, instrument};

// -- Inputs -------------------------------------------------------------------

/// What the user pointed a blank page tool at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Pdf(PathBuf),
    /// One image per page, in page order.
    PageImages(Vec<PathBuf>),
}

impl Input {
    /// Classify the input paths by extension. Either exactly one PDF or only
    /// page images.
    pub fn from_paths(paths: &[PathBuf]) -> Result<Self> {
        let kinds = paths
            .iter()
            .map(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(InputKind::from_extension)
                    .ok_or_else(|| {
                        PageSiftError::Load(format!(
                            "{} is neither a PDF nor a supported image",
                            path.display()
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        match kinds.as_slice() {
            [] => Err(PageSiftError::Load("no input files given".into())),
            [InputKind::Pdf] => Ok(Self::Pdf(paths[0].clone())),
            kinds if kinds.iter().all(|kind| *kind == InputKind::PageImages) => {
                Ok(Self::PageImages(paths.to_vec()))
            }
            _ => Err(PageSiftError::Load(
                "give either one PDF or a list of page images, not both".into(),
            )),
        }
    }

    /// The file output names are derived from.
    fn primary_path(&self) -> &Path {
        match self {
            Self::Pdf(path) => path,
            // `from_paths` never builds an empty list.
            Self::PageImages(paths) => paths.first().map_or(Path::new("pages"), PathBuf::as_path),
        }
    }
}

/// `<dir>/<stem>-<suffix>.pdf` next to `input`.
pub fn default_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".into());
    input.with_file_name(format!("{stem}-{suffix}.pdf"))
}

/// `<dir>/<stem>-<suffix>/` next to `path`.
fn sibling_dir(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".into());
    path.with_file_name(format!("{stem}-{suffix}"))
}

/// `<dir>/<stem>-removed/` next to the output document.
fn thumbnail_dir_for(output: &Path) -> PathBuf {
    sibling_dir(output, "removed")
}

fn sensitivity_or_default(requested: Option<i64>, config: &AppConfig) -> Result<Sensitivity> {
    match requested {
        Some(percent) => Sensitivity::new(percent),
        None => Ok(config.analysis.default_sensitivity),
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "Output written");
    println!("Wrote {}", path.display());
    Ok(())
}

// -- Blank page tools ---------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub sensitivity: Option<i64>,
    pub json: bool,
    pub thumbnails: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct RemoveBlankOptions {
    pub sensitivity: Option<i64>,
    pub output: Option<PathBuf>,
    pub thumbnails: Option<PathBuf>,
}

/// Machine-readable analysis result printed by `analyze --json`.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub sensitivity: Sensitivity,
    pub total_pages: usize,
    pub blank_pages: Vec<u32>,
    pub pages: Vec<PageReport>,
}

#[derive(Debug, Serialize)]
pub struct PageReport {
    pub page: u32,
    pub blankness: f64,
    pub blank: bool,
}

impl AnalysisReport {
    pub fn new<P>(cache: &AnalysisCache<P>, sensitivity: Sensitivity) -> Self {
        let pages: Vec<PageReport> = cache
            .iter()
            .map(|entry| PageReport {
                page: entry.page_number(),
                blankness: entry.blankness(),
                blank: entry.is_blank(sensitivity),
            })
            .collect();
        Self {
            sensitivity,
            total_pages: pages.len(),
            blank_pages: pages.iter().filter(|p| p.blank).map(|p| p.page).collect(),
            pages,
        }
    }
}

/// Analyse the input and report its blank pages.
#[instrument(skip_all, fields(inputs = inputs.len()))]
pub async fn analyze(inputs: &[PathBuf], options: &AnalyzeOptions, config: &AppConfig) -> Result<()> {
    let sensitivity = sensitivity_or_default(options.sensitivity, config)?;
    match Input::from_paths(inputs)? {
        Input::Pdf(path) => analyze_source(&PdfPages::open(&path)?, sensitivity, options, config).await,
        Input::PageImages(paths) => {
            analyze_source(&RasterPages::open(&paths)?, sensitivity, options, config).await
        }
    }
}

async fn analyze_source<S: PageSource>(
    source: &S,
    sensitivity: Sensitivity,
    options: &AnalyzeOptions,
    config: &AppConfig,
) -> Result<()> {
    let mut session = BlankPageSession::new(config.analysis.clone());
    session.load(source).await?;
    let summary = session.reclassify(sensitivity)?;
    let cache = session.cache().ok_or(PageSiftError::NotAnalyzed)?;

    if options.json {
        let report = AnalysisReport::new(cache, sensitivity);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{summary}");
    }

    if let Some(dir) = &options.thumbnails {
        write_thumbnails(cache, &summary.blank_pages, dir, config).await?;
    }
    Ok(())
}

/// Remove the blank pages and write the remaining pages to a new PDF.
#[instrument(skip_all, fields(inputs = inputs.len()))]
pub async fn remove_blank(
    inputs: &[PathBuf],
    options: &RemoveBlankOptions,
    config: &AppConfig,
) -> Result<()> {
    let sensitivity = sensitivity_or_default(options.sensitivity, config)?;
    let input = Input::from_paths(inputs)?;
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output(input.primary_path(), "no-blank"));
    let thumbnails = options.thumbnails.clone().or_else(|| {
        config
            .output
            .write_thumbnails
            .then(|| thumbnail_dir_for(&output))
    });

    let bytes = match &input {
        Input::Pdf(path) => {
            let document = PdfPages::open(path)?;
            let mut session = BlankPageSession::new(config.analysis.clone());
            let keep =
                plan_removal(&mut session, &document, sensitivity, thumbnails.as_deref(), config)
                    .await?;
            let rebuilt = PdfEditor::open(path).and_then(|editor| editor.copy_pages(&keep));
            session.complete_export(rebuilt)?
        }
        Input::PageImages(paths) => {
            let document = RasterPages::open(paths)?;
            let mut session = BlankPageSession::new(config.analysis.clone());
            let keep =
                plan_removal(&mut session, &document, sensitivity, thumbnails.as_deref(), config)
                    .await?;
            let writer = RasterPdfWriter::new(config.output.raster_dpi);
            let rebuilt = document
                .select(&keep)
                .and_then(|pages| writer.create_from_pages(&pages));
            session.complete_export(rebuilt)?
        }
    };

    write_output(&output, &bytes)
}

/// Load, report, preview, and plan. Benign outcomes come back as errors.
async fn plan_removal<S: PageSource>(
    session: &mut BlankPageSession<S::Page>,
    source: &S,
    sensitivity: Sensitivity,
    thumbnails: Option<&Path>,
    config: &AppConfig,
) -> Result<Vec<usize>> {
    session.load(source).await?;
    let summary = session.reclassify(sensitivity)?;
    println!("{summary}");

    let keep = session.plan_export(sensitivity)?;

    if let Some(dir) = thumbnails {
        let cache = session.cache().ok_or(PageSiftError::NotAnalyzed)?;
        write_thumbnails(cache, &summary.blank_pages, dir, config).await?;
    }
    Ok(keep)
}

async fn write_thumbnails<P: RenderPage>(
    cache: &AnalysisCache<P>,
    page_numbers: &[u32],
    dir: &Path,
    config: &AppConfig,
) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let thumbnails = render_thumbnails(cache, page_numbers, config.analysis.thumbnail_scale).await?;
    for thumbnail in &thumbnails {
        thumbnail.write_to_dir(dir)?;
    }
    println!("Wrote {} thumbnail(s) to {}", thumbnails.len(), dir.display());
    Ok(())
}

// -- PDF page tools -----------------------------------------------------------

fn edit_pdf(
    input: &Path,
    output: Option<PathBuf>,
    suffix: &str,
    edit: impl FnOnce(&PdfEditor) -> Result<Vec<u8>>,
) -> Result<()> {
    let editor = PdfEditor::open(input)?;
    let bytes = edit(&editor)?;
    let output = output.unwrap_or_else(|| default_output(input, suffix));
    write_output(&output, &bytes)
}

pub fn delete_pages(input: &Path, output: Option<PathBuf>, pages: &str) -> Result<()> {
    edit_pdf(input, output, "deleted", |editor| editor.delete_pages(pages))
}

pub fn reverse(input: &Path, output: Option<PathBuf>) -> Result<()> {
    edit_pdf(input, output, "reversed", PdfEditor::reverse_pages)
}

pub fn remove_annotations(
    input: &Path,
    output: Option<PathBuf>,
    pages: Option<&str>,
    types: &[String],
) -> Result<()> {
    let scope = pages.map_or(PageScope::All, |text| PageScope::Ranges(text.to_string()));
    let subtypes: BTreeSet<String> = types
        .iter()
        .map(|t| t.trim().trim_start_matches('/').to_string())
        .filter(|t| !t.is_empty())
        .collect();
    edit_pdf(input, output, "no-annotations", |editor| {
        editor.remove_annotations(&scope, &subtypes)
    })
}

pub fn remove_metadata(input: &Path, output: Option<PathBuf>) -> Result<()> {
    edit_pdf(input, output, "no-metadata", PdfEditor::remove_metadata)
}

// -- Conversion tools ---------------------------------------------------------

/// Combine page images into one PDF.
#[instrument(skip_all, fields(inputs = inputs.len()))]
pub fn images_to_pdf(inputs: &[PathBuf], output: Option<PathBuf>, config: &AppConfig) -> Result<()> {
    let input = Input::from_paths(inputs)?;
    let Input::PageImages(paths) = &input else {
        return Err(PageSiftError::Load(
            "images-to-pdf takes page images, not a PDF".into(),
        ));
    };
    let writer = RasterPdfWriter::new(config.output.raster_dpi);
    let bytes = pagesift_document::images_to_pdf(paths, &writer)?;
    let output = output.unwrap_or_else(|| default_output(input.primary_path(), "combined"));
    write_output(&output, &bytes)
}

/// Render every page of a PDF into `output_dir` as one image file per page.
#[instrument(skip_all, fields(input = %input.display()))]
pub async fn pdf_to_images(
    input: &Path,
    output_dir: Option<PathBuf>,
    format: PageImageFormat,
) -> Result<()> {
    let document = PdfPages::open(input)?;
    let pages = render_page_images(&document, IMAGE_EXPORT_SCALE, format).await?;

    let dir = output_dir.unwrap_or_else(|| sibling_dir(input, "images"));
    std::fs::create_dir_all(&dir)?;
    for page in &pages {
        page.write_to_dir(&dir)?;
    }
    info!(dir = %dir.display(), pages = pages.len(), "Page images written");
    println!("Wrote {} page image(s) to {}", pages.len(), dir.display());
    Ok(())
}

/// Write a greyscale raster copy of a PDF.
#[instrument(skip_all, fields(input = %input.display()))]
pub async fn greyscale(input: &Path, output: Option<PathBuf>) -> Result<()> {
    let document = PdfPages::open(input)?;
    let bytes = greyscale_pdf(&document, GREYSCALE_SCALE).await?;
    let output = output.unwrap_or_else(|| default_output(input, "greyscale"));
    write_output(&output, &bytes)
}

// -- Configuration ------------------------------------------------------------

pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(PageSiftError::Config(format!(
            "{} already exists (use --force to replace it)",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    AppConfig::default().save(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use pagesift_core::Generation;
    use pagesift_document::PageAnalysis;

    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn single_pdf_input() {
        assert_eq!(
            Input::from_paths(&paths(&["scan.PDF"])).unwrap(),
            Input::Pdf(PathBuf::from("scan.PDF"))
        );
    }

    #[test]
    fn page_image_inputs_keep_their_order() {
        let input = Input::from_paths(&paths(&["p2.png", "p1.jpg"])).unwrap();
        assert_eq!(input, Input::PageImages(paths(&["p2.png", "p1.jpg"])));
    }

    #[test]
    fn mixed_or_unknown_inputs_are_rejected() {
        for bad in [
            paths(&["a.pdf", "b.png"]),
            paths(&["a.pdf", "b.pdf"]),
            paths(&["notes.txt"]),
            paths(&[]),
        ] {
            assert!(
                matches!(Input::from_paths(&bad), Err(PageSiftError::Load(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn default_output_sits_next_to_input() {
        assert_eq!(
            default_output(Path::new("/tmp/scans/report.pdf"), "no-blank"),
            PathBuf::from("/tmp/scans/report-no-blank.pdf")
        );
    }

    #[test]
    fn thumbnails_default_next_to_output() {
        assert_eq!(
            thumbnail_dir_for(Path::new("out/clean.pdf")),
            PathBuf::from("out/clean-removed")
        );
    }

    #[test]
    fn sensitivity_flag_overrides_config() {
        let config = AppConfig::default();
        assert_eq!(sensitivity_or_default(None, &config).unwrap().percent(), 99);
        assert_eq!(sensitivity_or_default(Some(80), &config).unwrap().percent(), 80);
        assert!(matches!(
            sensitivity_or_default(Some(101), &config),
            Err(PageSiftError::InvalidSensitivity(101))
        ));
    }

    #[test]
    fn report_lists_every_page() {
        let entries = vec![
            PageAnalysis::new(1, 0.4, ()),
            PageAnalysis::new(2, 1.0, ()),
        ];
        let cache = AnalysisCache::from_unordered(Generation::default(), entries);
        let report = AnalysisReport::new(&cache, Sensitivity::new(99).unwrap());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sensitivity"], 99);
        assert_eq!(json["total_pages"], 2);
        assert_eq!(json["blank_pages"], serde_json::json!([2]));
        assert_eq!(json["pages"][0]["blank"], false);
    }

    fn write_page(dir: &Path, name: &str, colour: [u8; 4]) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(60, 80, Rgba(colour)).save(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn remove_blank_from_page_images_writes_pdf_and_thumbnails() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = vec![
            write_page(dir.path(), "p1.png", [0, 0, 0, 255]),
            write_page(dir.path(), "p2.png", [255, 255, 255, 255]),
            write_page(dir.path(), "p3.png", [0, 0, 0, 255]),
        ];
        let options = RemoveBlankOptions {
            thumbnails: Some(dir.path().join("removed")),
            ..Default::default()
        };

        remove_blank(&inputs, &options, &AppConfig::default())
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("p1-no-blank.pdf")).unwrap();
        assert_eq!(PdfEditor::from_bytes(&written).unwrap().page_count(), 2);
        assert!(dir.path().join("removed").join("page-002.png").exists());
    }

    #[tokio::test]
    async fn all_blank_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = vec![
            write_page(dir.path(), "p1.png", [255, 255, 255, 255]),
            write_page(dir.path(), "p2.png", [255, 255, 255, 255]),
        ];

        let err = remove_blank(&inputs, &RemoveBlankOptions::default(), &AppConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PageSiftError::AllPagesBlank));
        assert!(!dir.path().join("p1-no-blank.pdf").exists());
    }

    #[test]
    fn images_to_pdf_combines_pages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = vec![
            write_page(dir.path(), "scan1.png", [0, 0, 0, 255]),
            write_page(dir.path(), "scan2.png", [255, 255, 255, 255]),
        ];

        images_to_pdf(&inputs, None, &AppConfig::default()).unwrap();

        let written = std::fs::read(dir.path().join("scan1-combined.pdf")).unwrap();
        assert_eq!(PdfEditor::from_bytes(&written).unwrap().page_count(), 2);
    }

    #[test]
    fn images_to_pdf_rejects_a_pdf() {
        let err = images_to_pdf(&paths(&["doc.pdf"]), None, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, PageSiftError::Load(_)));
    }

    fn two_page_pdf(dir: &Path) -> PathBuf {
        let path = dir.join("doc.pdf");
        let black = RgbaImage::from_pixel(30, 40, Rgba([0, 0, 0, 255]));
        let red = RgbaImage::from_pixel(30, 40, Rgba([255, 0, 0, 255]));
        RasterPdfWriter::new(72.0)
            .write_to_file(&[&black, &red], &path)
            .unwrap();
        path
    }

    #[tokio::test]
    async fn pdf_to_images_writes_one_file_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let input = two_page_pdf(dir.path());

        pdf_to_images(&input, None, PageImageFormat::Png).await.unwrap();

        let out = dir.path().join("doc-images");
        let first = image::open(out.join("page-001.png")).unwrap();
        assert!((first.width() as i64 - 60).abs() <= 1, "{}", first.width());
        assert!(out.join("page-002.png").exists());
        assert!(!out.join("page-003.png").exists());
    }

    #[tokio::test]
    async fn greyscale_writes_a_copy_with_every_page() {
        let dir = tempfile::tempdir().unwrap();
        let input = two_page_pdf(dir.path());
        let output = dir.path().join("grey.pdf");

        greyscale(&input, Some(output.clone())).await.unwrap();

        let written = std::fs::read(&output).unwrap();
        assert_eq!(PdfEditor::from_bytes(&written).unwrap().page_count(), 2);
    }

    #[tokio::test]
    async fn conversion_of_a_missing_pdf_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.pdf");
        assert!(greyscale(&missing, None).await.is_err());
        assert!(pdf_to_images(&missing, None, PageImageFormat::Jpeg).await.is_err());
    }

    #[test]
    fn init_config_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagesift").join("config.json");

        init_config(&path, false).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
        assert!(matches!(
            init_config(&path, false),
            Err(PageSiftError::Config(_))
        ));
        init_config(&path, true).unwrap();
    }
}
