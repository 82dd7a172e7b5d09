// File: crates/demo/src/main.rs
// Summary: Demo loads a CSV of numeric columns (one series per column) and renders it as SVG and PNG.
// Usage: grafico-demo <data.csv> [--kind line|area|stacked|bar|parallel] [--options opts.json]
//        [--size 640x360] [--out dir]

use anyhow::{Context, Result};
use grafico_core::{AnyGraph, Chart, ChartKind, DataInput, HostElement, UserOptions};
use grafico_render_skia::SkiaRenderer;
use indexmap::IndexMap;
use log::{info, warn};
use std::path::{Path, PathBuf};

struct Args {
    input: PathBuf,
    kind: ChartKind,
    options: Option<PathBuf>,
    size: (f64, f64),
    out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1))?;
    info!("Using input file: {}", args.input.display());

    let (labels, data) = load_columns(&args.input)
        .with_context(|| format!("failed to load CSV '{}'", args.input.display()))?;
    if data.is_empty() {
        anyhow::bail!("no numeric columns loaded; check headers/delimiter.");
    }
    info!("Loaded {} series x {} rows", data.len(), labels.len());

    let mut options = match &args.options {
        Some(p) => {
            let text = std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            UserOptions::from_json(&text).with_context(|| format!("parsing options {}", p.display()))?
        }
        None => UserOptions::default(),
    };
    // Row labels from the first column when it is not numeric
    if options.labels.is_none() && !labels.is_empty() {
        options.labels = Some(labels);
    }

    let host = HostElement::sized(args.size.0, args.size.1).with_background("#ffffff");
    let chart = Chart::render(AnyGraph::from(args.kind), &host, DataInput::Named(data), options)
        .with_context(|| format!("rendering {:?} chart", args.kind))?;

    std::fs::create_dir_all(&args.out).with_context(|| format!("creating {}", args.out.display()))?;
    let stem = out_stem(&args.input, args.kind);

    let svg_path = args.out.join(format!("{stem}.svg"));
    std::fs::write(&svg_path, chart.surface().to_svg()).with_context(|| format!("writing {}", svg_path.display()))?;
    info!("Wrote {}", svg_path.display());

    let png_path = args.out.join(format!("{stem}.png"));
    SkiaRenderer::new().write_png(chart.surface(), &png_path)?;
    info!("Wrote {}", png_path.display());

    Ok(())
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Args> {
    let mut input = None;
    let mut kind = ChartKind::Line;
    let mut options = None;
    let mut size = (640.0, 360.0);
    let mut out = PathBuf::from("target/out");

    while let Some(arg) = it.next() {
        let mut value = |name: &str| it.next().with_context(|| format!("{name} needs a value"));
        match arg.as_str() {
            "--kind" => kind = value("--kind")?.parse()?,
            "--options" => options = Some(PathBuf::from(value("--options")?)),
            "--size" => size = parse_size(&value("--size")?)?,
            "--out" => out = PathBuf::from(value("--out")?),
            flag if flag.starts_with("--") => anyhow::bail!("unknown flag {flag}"),
            _ => input = Some(PathBuf::from(&arg)),
        }
    }

    let input = input.context("usage: grafico-demo <data.csv> [--kind K] [--options F] [--size WxH] [--out DIR]")?;
    Ok(Args { input, kind, options, size, out })
}

fn parse_size(s: &str) -> Result<(f64, f64)> {
    let (w, h) = s.split_once('x').with_context(|| format!("size '{s}' is not WIDTHxHEIGHT"))?;
    Ok((w.trim().parse()?, h.trim().parse()?))
}

/// Output name like line_<stem>.
fn out_stem(input: &Path, kind: ChartKind) -> String {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    format!("{}_{}", format!("{kind:?}").to_lowercase(), stem)
}

/// Load a CSV with a header row. Numeric columns become series named by their header;
/// a non-numeric first column becomes the row labels.
fn load_columns(path: &Path) -> Result<(Vec<String>, IndexMap<String, Vec<f64>>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(str::to_string).collect::<Vec<_>>();
    let records = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;

    let numeric = |ix: usize| records.iter().all(|r| r.get(ix).is_some_and(|s| s.parse::<f64>().is_ok()));
    let label_column = !headers.is_empty() && !numeric(0);

    let mut labels = Vec::new();
    if label_column {
        labels = records.iter().map(|r| r.get(0).unwrap_or_default().to_string()).collect();
    }

    let mut data = IndexMap::new();
    for (ix, name) in headers.iter().enumerate() {
        if label_column && ix == 0 {
            continue;
        }
        if !numeric(ix) {
            warn!("skipping non-numeric column '{name}'");
            continue;
        }
        let values = records
            .iter()
            .filter_map(|r| r.get(ix).and_then(|s| s.parse::<f64>().ok()))
            .collect::<Vec<_>>();
        data.insert(name.clone(), values);
    }
    Ok((labels, data))
}
