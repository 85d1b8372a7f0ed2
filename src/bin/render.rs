//! Renders the canonical positional-encoding figure to an SVG file: a
//! similarity heatmap, a causally masked attention matrix and a labeled
//! flow arrow between them.

use attnviz::color::{lerp, Rgb};
use attnviz::config::Theme;
use attnviz::diagram::{self, BorderOptions, EdgeLabels, MatrixOptions};
use attnviz::encoding;
use attnviz::geometry::{draw_lines, LineOptions, Point};
use attnviz::surface::Document;
use attnviz::{rng_from_env, typeset};
use std::env;
use std::fs;

/// Parses CLI arguments: `[output-path] [--positions N] [--d-model N]
/// [--theme PATH]`.
fn parse_cli<I>(mut args: I) -> (String, usize, usize, Option<String>)
where
    I: Iterator<Item = String>,
{
    let mut out = "attention.svg".to_string();
    let mut positions = 10usize;
    let mut d_model = 64usize;
    let mut theme = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--positions" => {
                if let Some(v) = args.next() {
                    positions = v.parse().unwrap_or(10);
                }
            }
            "--d-model" => {
                if let Some(v) = args.next() {
                    d_model = v.parse().unwrap_or(64);
                }
            }
            "--theme" => theme = args.next(),
            _ => out = arg,
        }
    }

    (out, positions, d_model, theme)
}

fn main() {
    tracing_subscriber::fmt::init();

    let (out_path, positions, d_model, theme_path) = parse_cli(env::args().skip(1));
    let theme = theme_path
        .as_deref()
        .and_then(Theme::from_path)
        .unwrap_or_default();

    let cell = 16.0;
    let grid = positions as f32 * cell;
    let margin = 60.0;
    let gap = 80.0;
    let width = margin * 2.0 + grid;
    let height = margin * 2.0 + grid * 2.0 + gap;

    let mut doc = Document::new(width, height);
    let root = doc.root_mut();
    root.rect(width, height).fill(&theme.background);

    // Similarity heatmap: cells colored by normalized dot product, so
    // the decay away from the diagonal is visible directly.
    let sim = encoding::similarity_matrix(positions, d_model);
    let (mut lo, mut hi) = (f32::INFINITY, f32::NEG_INFINITY);
    for &v in &sim.data {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    let span = if hi > lo { hi - lo } else { 1.0 };

    let start = Rgb::from_hex(&theme.color_start);
    let end = Rgb::from_hex(&theme.color_end);
    let heatmap = root.group();
    heatmap.translate(margin, margin);
    for i in 0..positions {
        for j in 0..positions {
            let t = (sim.get(i, j) - lo) / span;
            heatmap
                .rect(cell - 1.0, cell - 1.0)
                .move_to(j as f32 * cell + 0.5, i as f32 * cell + 0.5)
                .fill(&lerp(end, start, t).to_string());
        }
    }
    diagram::border(heatmap, &{
        let mut b = BorderOptions::new(grid, grid);
        b.label = "similarity".to_string();
        b
    });

    // Causally masked attention matrix below the heatmap.
    let mut rng = rng_from_env();
    let engine = typeset::engine();
    let mask_y = margin + grid + gap;
    let masked = root.group();
    masked.translate(margin, mask_y);
    let opts = MatrixOptions {
        rows: positions,
        cols: positions,
        cell_width: cell,
        cell_height: cell,
        fill: theme.cell_fill.clone(),
        stroke: theme.cell_stroke.clone(),
        color_start: theme.color_start.clone(),
        color_end: theme.color_end.clone(),
        mask_upper_diagonal: true,
        mask_color: theme.mask_color.clone(),
        labels_bottom: EdgeLabels {
            center: "softmax(QK^T)V".to_string(),
            ..EdgeLabels::default()
        },
        ..MatrixOptions::default()
    };
    diagram::matrix(masked, &mut rng, Some(engine), &opts);

    // Flow arrow from the heatmap around to the masked matrix.
    let arrow_points = [
        Point::from((margin + grid + 10.0, margin + grid / 2.0)),
        Point::from((margin + grid + 40.0, margin + grid / 2.0)),
        Point::from((margin + grid + 40.0, mask_y + grid / 2.0)),
        Point::from((margin + grid + 10.0, mask_y + grid / 2.0)),
    ];
    let line_opts = LineOptions {
        color: theme.arrow_color.clone(),
        with_arrow: true,
        ..LineOptions::default()
    };
    draw_lines(root, &arrow_points, &line_opts);

    match fs::write(&out_path, doc.to_svg()) {
        Ok(()) => tracing::info!(path = %out_path, positions, d_model, "figure written"),
        Err(err) => {
            tracing::error!(path = %out_path, error = %err, "failed to write figure");
            std::process::exit(1);
        }
    }
}
