use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ImportError;
use crate::graph::{CategoryGraph, GraphBuilder};

use super::parser::{
    parse_article_id, split_fields, DiagnosticKind, ImportSource, LineDiagnostic, ParsedLine,
};

/// The three TAB-separated input files.
#[derive(Debug, Clone)]
pub struct ImportPaths {
    /// `child<TAB>parent`
    pub edges: PathBuf,
    /// `articleId<TAB>title<TAB>categoryName`
    pub articles: PathBuf,
    /// `articleId<TAB>type`
    pub types: PathBuf,
}

/// Per-line problems collected during import. Nothing here is fatal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub edges_added: usize,
    pub articles_linked: usize,
    pub types_assigned: u64,
    /// Type lines naming an article that was never created.
    pub types_skipped: u64,
    /// Category names referenced by article lines but absent from the edges.
    pub ignored_categories: Vec<String>,
    pub diagnostics: Vec<LineDiagnostic>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.ignored_categories.is_empty()
    }
}

/// Visit every line of `reader`, turning undecodable lines into diagnostics.
fn for_each_line<R: BufRead>(
    reader: R,
    source: ImportSource,
    report: &mut ImportReport,
    mut visit: impl FnMut(usize, &str, &mut ImportReport),
) -> Result<(), ImportError> {
    for (index, raw) in reader.split(b'\n').enumerate() {
        let line_no = index + 1;
        let raw = raw.map_err(|source_err| ImportError::Read {
            kind: source,
            line: index,
            source: source_err,
        })?;
        match std::str::from_utf8(&raw) {
            Ok(line) => visit(line_no, line, report),
            Err(_) => report.diagnostics.push(LineDiagnostic {
                source,
                line: line_no,
                kind: DiagnosticKind::InvalidUtf8,
            }),
        }
    }
    Ok(())
}

fn reject(report: &mut ImportReport, source: ImportSource, line: usize, kind: DiagnosticKind) {
    report.diagnostics.push(LineDiagnostic { source, line, kind });
}

/// Load `child<TAB>parent` lines, creating categories on first mention.
pub fn load_edges<R: BufRead>(
    builder: &mut GraphBuilder,
    reader: R,
    report: &mut ImportReport,
) -> Result<(), ImportError> {
    let source = ImportSource::Edges;
    for_each_line(reader, source, report, |line_no, line, report| {
        match split_fields(line, source) {
            ParsedLine::Blank => {}
            ParsedLine::Malformed(kind) => reject(report, source, line_no, kind),
            ParsedLine::Fields(fields) => {
                if builder.add_edge_named(fields[0], fields[1]) {
                    report.edges_added += 1;
                }
            }
        }
    })
}

/// Load `articleId<TAB>title<TAB>categoryName` lines. Lines naming an
/// unknown category are recorded in `ignored_categories`.
pub fn load_articles<R: BufRead>(
    builder: &mut GraphBuilder,
    reader: R,
    report: &mut ImportReport,
) -> Result<(), ImportError> {
    let source = ImportSource::Articles;
    for_each_line(reader, source, report, |line_no, line, report| {
        let fields = match split_fields(line, source) {
            ParsedLine::Blank => return,
            ParsedLine::Malformed(kind) => return reject(report, source, line_no, kind),
            ParsedLine::Fields(fields) => fields,
        };
        let original_id = match parse_article_id(fields[0]) {
            Ok(id) => id,
            Err(kind) => return reject(report, source, line_no, kind),
        };
        let Some(category) = builder.category_id(fields[2]) else {
            report.ignored_categories.push(fields[2].to_string());
            return;
        };
        let article = builder.get_or_create_article(original_id, fields[1]);
        if builder.tag_article(article, category) {
            report.articles_linked += 1;
        }
    })
}

/// Load `articleId<TAB>type` lines. Unknown article ids are skipped.
pub fn load_types<R: BufRead>(
    builder: &mut GraphBuilder,
    reader: R,
    report: &mut ImportReport,
) -> Result<(), ImportError> {
    let source = ImportSource::Types;
    for_each_line(reader, source, report, |line_no, line, report| {
        let fields = match split_fields(line, source) {
            ParsedLine::Blank => return,
            ParsedLine::Malformed(kind) => return reject(report, source, line_no, kind),
            ParsedLine::Fields(fields) => fields,
        };
        match parse_article_id(fields[0]) {
            Ok(id) if builder.set_article_type(id, fields[1]) => report.types_assigned += 1,
            Ok(_) => report.types_skipped += 1,
            Err(kind) => reject(report, source, line_no, kind),
        }
    })
}

fn open(path: &Path, kind: ImportSource) -> Result<BufReader<File>, ImportError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ImportError::Open {
            kind,
            path: path.to_path_buf(),
            source,
        })
}

/// Read the three files in order (edges, articles, types) and freeze.
pub fn import_graph(paths: &ImportPaths) -> Result<(CategoryGraph, ImportReport), ImportError> {
    let mut builder = GraphBuilder::new();
    let mut report = ImportReport::default();

    tracing::info!(path = %paths.edges.display(), "loading categories");
    load_edges(
        &mut builder,
        open(&paths.edges, ImportSource::Edges)?,
        &mut report,
    )?;
    tracing::info!(
        categories = builder.category_count(),
        edges = report.edges_added,
        "categories loaded"
    );

    tracing::info!(path = %paths.articles.display(), "loading articles");
    load_articles(
        &mut builder,
        open(&paths.articles, ImportSource::Articles)?,
        &mut report,
    )?;
    tracing::info!(
        articles = builder.article_count(),
        ignored = report.ignored_categories.len(),
        "articles loaded"
    );

    tracing::info!(path = %paths.types.display(), "loading types");
    load_types(
        &mut builder,
        open(&paths.types, ImportSource::Types)?,
        &mut report,
    )?;
    tracing::info!(
        assigned = report.types_assigned,
        skipped = report.types_skipped,
        "types loaded"
    );

    if !report.diagnostics.is_empty() {
        tracing::warn!(count = report.diagnostics.len(), "malformed input lines skipped");
        for d in report.diagnostics.iter().take(10) {
            tracing::warn!("{d}");
        }
    }

    let graph = builder.freeze()?;
    Ok((graph, report))
}
