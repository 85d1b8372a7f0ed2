//! Matrix-grid figures and ancillary shapes for attention diagrams.
//!
//! The cell grid supports the coloring policies the figures rely on:
//! random gradient sampling, per-row solid colors, Toeplitz (diagonal
//! offset) lookup for relative-position schemes, and upper-triangle
//! masking for causal attention. The random source is injected so test
//! fixtures can pin a seed.

use crate::color::lerp_hex;
use crate::surface::Node;
use crate::typeset::{render_math_label, Typesetter};
use rand::Rng;

/// Diagonal-offset coloring. Cells are colored by `row - col`; offsets
/// without a configured color fall back to the random gradient.
#[derive(Clone, Debug)]
pub struct ToeplitzConfig {
    pub offsets: Vec<i64>,
    pub colors: Vec<String>,
    /// Clamp offsets into `[-clip_to, clip_to]` before lookup, folding
    /// extreme diagonals into the nearest defined band.
    pub clip_to: Option<i64>,
}

/// Up to three typeset labels along one edge of a matrix.
#[derive(Clone, Debug)]
pub struct EdgeLabels {
    pub left: String,
    pub center: String,
    pub right: String,
    pub font_size: f32,
    pub color: String,
}

impl Default for EdgeLabels {
    fn default() -> Self {
        EdgeLabels {
            left: String::new(),
            center: String::new(),
            right: String::new(),
            font_size: 14.0,
            color: "#ffffff".to_string(),
        }
    }
}

impl EdgeLabels {
    fn is_empty(&self) -> bool {
        self.left.is_empty() && self.center.is_empty() && self.right.is_empty()
    }
}

/// Styling for plain-text row/column labels.
#[derive(Clone, Debug)]
pub struct AxisLabelStyle {
    pub font_size: f32,
    pub color: String,
    /// Pixel offset from the matrix edge.
    pub offset: f32,
    /// Rotation in degrees about the label anchor; 0 disables.
    pub rotate: f32,
}

#[derive(Clone, Debug)]
pub struct MatrixOptions {
    pub rows: usize,
    pub cols: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    /// Background fill behind the cells.
    pub fill: String,
    /// Outer border stroke.
    pub stroke: String,
    /// Gradient endpoints for randomly colored cells.
    pub color_start: String,
    pub color_end: String,
    /// Outer border corner radius.
    pub radius: f32,
    /// Render cells with `col > row` as an opaque mask (causal masking).
    pub mask_upper_diagonal: bool,
    pub mask_color: String,
    /// Per-row solid colors; overrides the gradient where present.
    pub row_colors: Option<Vec<String>>,
    pub toeplitz: Option<ToeplitzConfig>,
    /// Thick border behind the matrix to focus attention.
    pub highlight: bool,
    pub highlight_color: String,
    pub highlight_width: f32,
    pub labels_top: EdgeLabels,
    pub labels_bottom: EdgeLabels,
    pub label_y_top: f32,
    /// Vertical position of the bottom labels; defaults to just below
    /// the matrix when `None`.
    pub label_y_bottom: Option<f32>,
    pub label_x_top: f32,
    pub label_x_bottom: f32,
    pub row_labels: Option<Vec<String>>,
    pub row_label_style: AxisLabelStyle,
    pub col_labels: Option<Vec<String>>,
    pub col_label_style: AxisLabelStyle,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        MatrixOptions {
            rows: 5,
            cols: 64,
            cell_width: 4.0,
            cell_height: 8.0,
            fill: "#1e3a5f".to_string(),
            stroke: "#3b82f6".to_string(),
            color_start: "#fde047".to_string(),
            color_end: "#3b82f6".to_string(),
            radius: 2.0,
            mask_upper_diagonal: false,
            mask_color: "#374151".to_string(),
            row_colors: None,
            toeplitz: None,
            highlight: false,
            highlight_color: "#fde047".to_string(),
            highlight_width: 3.0,
            labels_top: EdgeLabels::default(),
            labels_bottom: EdgeLabels::default(),
            label_y_top: -25.0,
            label_y_bottom: None,
            label_x_top: 0.0,
            label_x_bottom: 0.0,
            row_labels: None,
            row_label_style: AxisLabelStyle {
                font_size: 10.0,
                color: "#d4d4d4".to_string(),
                offset: -5.0,
                rotate: 0.0,
            },
            col_labels: None,
            col_label_style: AxisLabelStyle {
                font_size: 10.0,
                color: "#d4d4d4".to_string(),
                offset: 5.0,
                rotate: -45.0,
            },
        }
    }
}

/// Render a matrix of colored cells onto the surface and return the
/// created group for further composition.
///
/// Coloring precedence per cell: the causal mask wins outright, then
/// Toeplitz lookup, then per-row colors, then the random gradient.
/// Unmasked cells get a random opacity in `[0.5, 0.9)` from the
/// injected `rng`. Typeset edge labels render only when an `engine`
/// is supplied.
pub fn matrix<'a, R: Rng>(
    surface: &'a mut Node,
    rng: &mut R,
    engine: Option<&dyn Typesetter>,
    opts: &MatrixOptions,
) -> &'a mut Node {
    let width = opts.cols as f32 * opts.cell_width;
    let height = opts.rows as f32 * opts.cell_height;
    let group = surface.group();

    // Highlight border is drawn first so it sits behind the matrix.
    if opts.highlight {
        group
            .rect(
                width + opts.highlight_width * 2.0,
                height + opts.highlight_width * 2.0,
            )
            .move_to(-opts.highlight_width, -opts.highlight_width)
            .fill("none")
            .stroke(&opts.highlight_color, opts.highlight_width)
            .radius(opts.radius + 2.0);
    }

    group
        .rect(width, height)
        .fill(&opts.fill)
        .stroke(&opts.stroke, 1.0)
        .radius(opts.radius);

    for r in 0..opts.rows {
        for c in 0..opts.cols {
            let x = c as f32 * opts.cell_width;
            let y = r as f32 * opts.cell_height;

            if opts.mask_upper_diagonal && c > r {
                group
                    .rect(opts.cell_width - 1.0, opts.cell_height - 1.0)
                    .move_to(x + 0.5, y + 0.5)
                    .fill(&opts.mask_color)
                    .opacity(0.8);
                continue;
            }

            let opacity = 0.5 + rng.gen::<f32>() * 0.4;
            let color = cell_color(rng, opts, r, c);
            group
                .rect(opts.cell_width - 1.0, opts.cell_height - 1.0)
                .move_to(x + 0.5, y + 0.5)
                .fill(&color)
                .opacity(opacity);
        }
    }

    if let Some(engine) = engine {
        if !opts.labels_top.is_empty() {
            render_edge_labels(
                group,
                engine,
                &opts.labels_top,
                width,
                opts.label_y_top,
                opts.label_x_top,
            );
        }
        if !opts.labels_bottom.is_empty() {
            let y = opts.label_y_bottom.unwrap_or(height + 15.0);
            render_edge_labels(
                group,
                engine,
                &opts.labels_bottom,
                width,
                y,
                opts.label_x_bottom,
            );
        }
    }

    if let Some(row_labels) = &opts.row_labels {
        let style = &opts.row_label_style;
        for (i, label) in row_labels.iter().enumerate() {
            let color = opts
                .row_colors
                .as_ref()
                .and_then(|v| v.get(i))
                .map(String::as_str)
                .unwrap_or(&style.color);
            // No text metrics on a bare element tree; estimate width the
            // same way the border label does.
            let est_width = label.chars().count() as f32 * style.font_size * 0.6;
            group
                .text(label)
                .font("sans-serif", style.font_size)
                .fill(color)
                .move_to(
                    style.offset - est_width,
                    i as f32 * opts.cell_height + opts.cell_height / 2.0 - style.font_size / 2.0,
                );
        }
    }

    if let Some(col_labels) = &opts.col_labels {
        let style = &opts.col_label_style;
        for (i, label) in col_labels.iter().enumerate() {
            let x = i as f32 * opts.cell_width + opts.cell_width / 2.0;
            let y = height + style.offset;
            let text = group
                .text(label)
                .font("sans-serif", style.font_size)
                .fill(&style.color)
                .move_to(x, y);
            if style.rotate != 0.0 {
                text.rotate(style.rotate, x, y);
            }
        }
    }

    group
}

fn cell_color<R: Rng>(rng: &mut R, opts: &MatrixOptions, r: usize, c: usize) -> String {
    if let Some(toeplitz) = &opts.toeplitz {
        let mut offset = r as i64 - c as i64;
        if let Some(clip) = toeplitz.clip_to {
            offset = offset.clamp(-clip, clip);
        }
        let lookup = toeplitz
            .offsets
            .iter()
            .position(|&o| o == offset)
            .and_then(|idx| toeplitz.colors.get(idx));
        return match lookup {
            Some(color) => color.clone(),
            None => lerp_hex(&opts.color_start, &opts.color_end, rng.gen()).to_string(),
        };
    }
    if let Some(color) = opts.row_colors.as_ref().and_then(|v| v.get(r)) {
        return color.clone();
    }
    lerp_hex(&opts.color_start, &opts.color_end, rng.gen()).to_string()
}

fn render_edge_labels(
    group: &mut Node,
    engine: &dyn Typesetter,
    labels: &EdgeLabels,
    width: f32,
    y: f32,
    x_offset: f32,
) {
    if !labels.left.is_empty() {
        render_math_label(
            group,
            engine,
            &labels.left,
            x_offset,
            y,
            &labels.color,
            labels.font_size,
        );
    }
    if !labels.center.is_empty() {
        if let Some(metrics) = render_math_label(
            group,
            engine,
            &labels.center,
            0.0,
            y,
            &labels.color,
            labels.font_size,
        ) {
            group
                .child_mut(metrics.node)
                .translate(width / 2.0 - metrics.width / 2.0 + x_offset, y);
        }
    }
    if !labels.right.is_empty() {
        if let Some(metrics) = render_math_label(
            group,
            engine,
            &labels.right,
            0.0,
            y,
            &labels.color,
            labels.font_size,
        ) {
            group
                .child_mut(metrics.node)
                .translate(width - metrics.width - 5.0 + x_offset, y);
        }
    }
}

/// Options for [`border`].
#[derive(Clone, Debug)]
pub struct BorderOptions {
    pub width: f32,
    pub height: f32,
    /// Label shown in the top-right corner, over a patch that masks the
    /// dashes behind it. Empty disables the label.
    pub label: String,
    pub color: String,
    pub bg_color: String,
    pub stroke_width: f32,
    pub dasharray: String,
    pub corner_radius: f32,
    pub font_size: f32,
}

impl BorderOptions {
    pub fn new(width: f32, height: f32) -> Self {
        BorderOptions {
            width,
            height,
            label: String::new(),
            color: "#6b7280".to_string(),
            bg_color: "#0a0a1a".to_string(),
            stroke_width: 1.5,
            dasharray: "8,4".to_string(),
            corner_radius: 8.0,
            font_size: 14.0,
        }
    }
}

/// Dashed rounded rectangle with an optional corner label, used to
/// group related figures. Returns the created group.
pub fn border<'a>(group: &'a mut Node, opts: &BorderOptions) -> &'a mut Node {
    let border_group = group.group();

    border_group
        .rect(opts.width, opts.height)
        .fill("none")
        .stroke(&opts.color, opts.stroke_width)
        .stroke_dash(&opts.dasharray)
        .radius(opts.corner_radius);

    if !opts.label.is_empty() {
        let label_width = opts.label.chars().count() as f32 * (opts.font_size * 0.6) + 10.0;
        let label_height = opts.font_size + 4.0;
        let label_x = opts.width - label_width - 10.0;
        let label_y = -label_height / 2.0;

        border_group
            .rect(label_width, label_height)
            .move_to(label_x, label_y)
            .fill(&opts.bg_color);

        border_group
            .text(&opts.label)
            .font("sans-serif", opts.font_size)
            .set("font-weight", "bold")
            .fill(&opts.color)
            .move_to(label_x + 5.0, label_y + 1.0);
    }

    border_group
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Symbol {
    #[default]
    Plus,
    Cross,
}

/// Options for [`circle_symbol`].
#[derive(Clone, Debug)]
pub struct CircleSymbolOptions {
    pub symbol: Symbol,
    pub color: String,
    pub radius: f32,
    pub stroke_width: f32,
}

impl Default for CircleSymbolOptions {
    fn default() -> Self {
        CircleSymbolOptions {
            symbol: Symbol::Plus,
            color: "#60a5fa".to_string(),
            radius: 12.0,
            stroke_width: 1.5,
        }
    }
}

/// Circle with an addition or multiplication symbol inside, centered at
/// the origin; callers translate the returned group into place.
pub fn circle_symbol<'a>(group: &'a mut Node, opts: &CircleSymbolOptions) -> &'a mut Node {
    let symbol_group = group.group();
    let line_len = opts.radius * 0.5;

    symbol_group
        .circle(opts.radius * 2.0)
        .fill("none")
        .stroke(&opts.color, opts.stroke_width);

    match opts.symbol {
        Symbol::Plus => {
            symbol_group
                .line(-line_len, 0.0, line_len, 0.0)
                .stroke(&opts.color, opts.stroke_width + 0.5);
            symbol_group
                .line(0.0, -line_len, 0.0, line_len)
                .stroke(&opts.color, opts.stroke_width + 0.5);
        }
        Symbol::Cross => {
            symbol_group
                .line(-line_len, -line_len, line_len, line_len)
                .stroke(&opts.color, opts.stroke_width);
            symbol_group
                .line(-line_len, line_len, line_len, -line_len)
                .stroke(&opts.color, opts.stroke_width);
        }
    }

    symbol_group
}
