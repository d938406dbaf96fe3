//! Report renderers.
//!
//! Renderers are selected by name through an explicit registry; unknown
//! names are an error, a missing name falls back to [`DEFAULT_RENDERER`].

mod delimited;
mod json;
mod plain;
mod rows;
mod table;


use std::collections::HashMap;

use thiserror::Error;

use crate::report::Report;

use delimited::DelimitedRenderer;
use json::JsonRenderer;
use plain::PlainRenderer;
use table::TableRenderer;

pub const DEFAULT_RENDERER: &str = "plain";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown output format '{0}'")]
    UnknownRenderer(String),

    #[error("failed to write delimited output")]
    Csv(#[from] csv::Error),

    #[error("failed to write JSON output")]
    Json(#[from] serde_json::Error),
}

/// Renders an accumulated [`Report`] into output text.
pub trait Renderer {
    fn render(&self, report: &Report, path_stats: bool) -> Result<String, RenderError>;
}

type RendererBuilder = fn() -> Box<dyn Renderer>;

fn build_plain() -> Box<dyn Renderer> {
    Box::new(PlainRenderer)
}

fn build_table() -> Box<dyn Renderer> {
    Box::new(TableRenderer::simple())
}

fn build_grid() -> Box<dyn Renderer> {
    Box::new(TableRenderer::grid())
}

fn build_csv() -> Box<dyn Renderer> {
    Box::new(DelimitedRenderer::csv())
}

fn build_tsv() -> Box<dyn Renderer> {
    Box::new(DelimitedRenderer::tsv())
}

fn build_json() -> Box<dyn Renderer> {
    Box::new(JsonRenderer)
}

fn builders() -> HashMap<&'static str, RendererBuilder> {
    let mut map = HashMap::new();

    map.insert("plain", build_plain as RendererBuilder);
    map.insert("table", build_table as RendererBuilder);
    map.insert("grid", build_grid as RendererBuilder);
    map.insert("csv", build_csv as RendererBuilder);
    map.insert("tsv", build_tsv as RendererBuilder);
    map.insert("json", build_json as RendererBuilder);

    map
}

/// All registered renderer names, sorted.
pub fn renderer_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = builders().keys().copied().collect();
    names.sort_unstable();
    names
}

/// Select a renderer by name, defaulting to `plain`.
pub fn by_name(name: Option<&str>) -> Result<Box<dyn Renderer>, RenderError> {
    let name = name.unwrap_or(DEFAULT_RENDERER);
    match builders().get(name) {
        Some(build) => Ok(build()),
        None => Err(RenderError::UnknownRenderer(name.to_string())),
    }
}

/// Empty-report placeholder shared by the human-readable renderers.
const NO_REQUESTS: &str = "Zero requests analyzed.";
