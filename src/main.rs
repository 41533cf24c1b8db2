//! docview - Entry Point

use clap::Parser;
use docview::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config, validate,
    ViewerConfig,
};
use docview::geometry::ContainerRect;
use docview::layout::LayoutType;
use docview::model::{
    AppError, Datasource, InvalidPageId, NoClipboard, NoNavigation, PageId, TextBox,
    TracingNotifier,
};
use docview::state::{ViewerEvent, ViewerStore};
use docview::text_layer::{HostContext, PointerEvent, TextLayerEngine};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// docview - replay viewer state for a document datasource
#[derive(Parser, Debug)]
#[command(name = "docview")]
#[command(version)]
#[command(about = "Load a datasource, apply viewer operations and print events as JSON lines")]
pub struct Args {
    /// Path to the datasource JSON file
    pub datasource: PathBuf,

    /// Layout for single-document datasources (grid, single-scrollable, single-page)
    #[arg(short, long)]
    pub layout: Option<LayoutType>,

    /// Default zoom level in percent
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub zoom: Option<u32>,

    /// Select this page id after loading
    #[arg(short, long, value_parser = parse_page_id)]
    pub page: Option<PageId>,

    /// OCR text boxes (JSON array) of the current page
    #[arg(long)]
    pub ocr: Option<PathBuf>,

    /// Drag a rubber band over the OCR text and print the selection
    #[arg(
        long,
        num_args = 4,
        value_names = ["X1", "Y1", "X2", "Y2"],
        requires = "ocr",
        allow_negative_numbers = true
    )]
    pub select: Option<Vec<f64>>,

    /// Natural page width used by the text layer
    #[arg(long, default_value_t = 1000.0)]
    pub page_width: f64,

    /// Natural page height used by the text layer
    #[arg(long, default_value_t = 1000.0)]
    pub page_height: f64,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_page_id(raw: &str) -> Result<PageId, InvalidPageId> {
    PageId::new(raw)
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = load_config_with_precedence(args.config.clone())?;
        let merged = merge_config(config_file)?;
        let with_env = apply_env_overrides(merged);
        validate(apply_cli_overrides(with_env, args.layout, args.zoom))?
    };

    docview::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    run(&args, config)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let contents = std::fs::read_to_string(path).map_err(|source| AppError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

fn print_event(event: &ViewerEvent) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(e) => warn!(error = %e, "Failed to serialize event"),
    }
}

fn run(args: &Args, config: ViewerConfig) -> Result<(), AppError> {
    let datasource: Datasource = read_json(&args.datasource)?;
    let text_config = config.text_layer;

    let mut store = ViewerStore::new(config, Box::new(TracingNotifier));
    store.subscribe(print_event);
    store.update_datasource(datasource);

    if let Some(page) = &args.page {
        store.change_page_by_id(page);
    }

    if let Some(ocr_path) = &args.ocr {
        let boxes: Vec<TextBox> = read_json(ocr_path)?;
        let target = store
            .state()
            .current_page()
            .or_else(|| store.datasource().page_at(0));

        match target {
            Some(page) => {
                let host = HostContext::new(
                    page.document_id,
                    page.page_id,
                    args.page_width,
                    args.page_height,
                    Some(store.state().rotation),
                )?;
                let mut engine = TextLayerEngine::new(
                    text_config,
                    Box::new(NoClipboard),
                    Box::new(NoNavigation),
                );
                engine.initialize(host)?;
                engine.on_resize(ContainerRect::new(
                    args.page_width,
                    args.page_height,
                    0.0,
                    0.0,
                ));
                engine.set_text_boxes(boxes);

                if let Some([x1, y1, x2, y2]) = args.select.as_deref() {
                    let now = Instant::now();
                    engine.handle_pointer(PointerEvent::down(*x1, *y1, now));
                    engine.handle_pointer(PointerEvent::drag(*x2, *y2, now));
                    engine.handle_pointer(PointerEvent::up(*x2, *y2, now));
                    let selection = serde_json::json!({
                        "type": "Selection",
                        "text": engine.rubber_band().map(|band| band.text()),
                        "rect": engine.rubber_band().map(|band| band.actual()),
                    });
                    println!("{selection}");
                }
            }
            None => warn!("Datasource has no pages, ignoring OCR input"),
        }
    }

    println!("{}", serde_json::to_string(&store.layout())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["docview", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["docview", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_datasource_is_required() {
        let result = Args::try_parse_from(["docview"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["docview", "ds.json"]);
        assert_eq!(args.datasource, PathBuf::from("ds.json"));
        assert_eq!(args.layout, None);
        assert_eq!(args.zoom, None);
        assert_eq!(args.page, None);
        assert_eq!(args.ocr, None);
        assert_eq!(args.select, None);
        assert_eq!(args.page_width, 1000.0);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_layout_parses_names() {
        let args = Args::parse_from(["docview", "ds.json", "--layout", "single-page"]);
        assert_eq!(args.layout, Some(LayoutType::SinglePage));

        let args = Args::parse_from(["docview", "ds.json", "-l", "grid"]);
        assert_eq!(args.layout, Some(LayoutType::Grid));
    }

    #[test]
    fn test_layout_rejects_unknown_name() {
        let result = Args::try_parse_from(["docview", "ds.json", "--layout", "carousel"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zoom_rejects_zero() {
        let result = Args::try_parse_from(["docview", "ds.json", "--zoom", "0"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_page_rejects_empty_id() {
        let result = Args::try_parse_from(["docview", "ds.json", "--page", ""]);
        assert!(result.is_err());

        let args = Args::parse_from(["docview", "ds.json", "-p", "p3"]);
        assert_eq!(args.page.map(|p| p.to_string()), Some("p3".to_string()));
    }

    #[test]
    fn test_select_takes_four_values_and_requires_ocr() {
        let args = Args::parse_from([
            "docview", "ds.json", "--ocr", "ocr.json", "--select", "5", "5", "200", "200",
        ]);
        assert_eq!(args.select, Some(vec![5.0, 5.0, 200.0, 200.0]));

        let result = Args::try_parse_from(["docview", "ds.json", "--select", "1", "2", "3", "4"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_config_flag() {
        let args = Args::parse_from(["docview", "ds.json", "--config", "/tmp/docview.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/docview.toml")));
    }
}
