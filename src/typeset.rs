//! Math label typesetting behind a process-wide engine instance.
//!
//! The engine is shared state with an explicit lifecycle: unloaded until
//! the first [`install`] or [`engine`] call, then ready for the rest of
//! the process. Initialization is an atomic init-or-attach on a
//! [`OnceLock`], so any number of concurrent callers converge on the
//! same instance and the installation side effect happens exactly once.
//! There is no timeout and no way to replace an installed engine.

use crate::surface::Node;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesetError {
    #[error("empty formula")]
    EmptyFormula,
    #[error("typesetting failed: {0}")]
    Engine(String),
}

/// A typeset formula in the engine's native `ex` unit system. `root`
/// holds the vector elements (paths, rects) making up the rendering.
#[derive(Clone, Debug)]
pub struct TexFragment {
    pub width_ex: f32,
    pub height_ex: f32,
    pub root: Node,
}

/// Converts a TeX formula string into vector markup.
pub trait Typesetter: Send + Sync {
    fn tex_to_svg(&self, tex: &str) -> Result<TexFragment, TypesetError>;
}

static ENGINE: OnceLock<Box<dyn Typesetter>> = OnceLock::new();
static INSTALLS: AtomicUsize = AtomicUsize::new(0);

/// Install `engine` as the process-wide typesetter and return the shared
/// instance. The first caller wins; if an engine is already installed
/// the argument is dropped and the existing instance is returned.
pub fn install(engine: Box<dyn Typesetter>) -> &'static dyn Typesetter {
    ENGINE
        .get_or_init(|| {
            INSTALLS.fetch_add(1, Ordering::SeqCst);
            engine
        })
        .as_ref()
}

/// Fetch the process-wide typesetter, installing the built-in
/// [`BoxTypesetter`] if nothing has been installed yet.
pub fn engine() -> &'static dyn Typesetter {
    ENGINE
        .get_or_init(|| {
            INSTALLS.fetch_add(1, Ordering::SeqCst);
            Box::new(BoxTypesetter)
        })
        .as_ref()
}

/// Number of engine installations performed so far; at most 1 per
/// process.
pub fn install_count() -> usize {
    INSTALLS.load(Ordering::SeqCst)
}

/// Fallback engine rendering each glyph as a filled box. Layout stays
/// stable when no real TeX engine is wired in, the labels just read as
/// redacted bars.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxTypesetter;

const GLYPH_ADVANCE_EX: f32 = 0.5;
const GLYPH_WIDTH_EX: f32 = 0.4;

impl Typesetter for BoxTypesetter {
    fn tex_to_svg(&self, tex: &str) -> Result<TexFragment, TypesetError> {
        // TeX grouping and math-mode delimiters carry no visible glyphs.
        let visible: String = tex.chars().filter(|c| !"{}$\\^_".contains(*c)).collect();
        if visible.trim().is_empty() {
            return Err(TypesetError::EmptyFormula);
        }

        let mut root = Node::new("g");
        let mut x = 0.0;
        for ch in visible.chars() {
            if !ch.is_whitespace() {
                root.rect(GLYPH_WIDTH_EX, 1.0).move_to(x, -1.0);
            }
            x += GLYPH_ADVANCE_EX;
        }
        Ok(TexFragment {
            width_ex: x,
            height_ex: 1.0,
            root,
        })
    }
}

/// Size and location of a rendered label.
#[derive(Clone, Copy, Debug)]
pub struct LabelMetrics {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Child index of the label group within the surface it was drawn
    /// into, for callers that reposition labels after measuring.
    pub node: usize,
}

/// Approximate pixels per `ex` at a given font size.
pub fn ex_to_px(font_size: f32) -> f32 {
    font_size * 0.45
}

/// Typeset `tex` and place it on the surface at `(x, y)`, recolored to
/// `color` and scaled from `ex` units to pixels via [`ex_to_px`].
///
/// Engine failures degrade gracefully: the failure is logged, nothing is
/// drawn, and `None` is returned. Callers treat an absent label as a
/// no-op, never as fatal.
pub fn render_math_label(
    group: &mut Node,
    engine: &dyn Typesetter,
    tex: &str,
    x: f32,
    y: f32,
    color: &str,
    font_size: f32,
) -> Option<LabelMetrics> {
    let fragment = match engine.tex_to_svg(tex) {
        Ok(fragment) => fragment,
        Err(err) => {
            tracing::warn!(formula = tex, error = %err, "math label typesetting failed");
            return None;
        }
    };

    let scale = ex_to_px(font_size);
    let width = fragment.width_ex * scale;
    let height = fragment.height_ex * scale;

    let node = group.len();
    let label = group.group();
    label.translate(x, y);

    let mut content = fragment.root;
    recolor(&mut content, color);

    let mut inner = Node::new("svg");
    inner
        .set("width", width)
        .set("height", height)
        .set(
            "viewBox",
            format!(
                "0 {} {} {}",
                -fragment.height_ex, fragment.width_ex, fragment.height_ex
            ),
        )
        .set("style", "overflow: visible");
    inner.adopt(content);
    label.adopt(inner);

    Some(LabelMetrics {
        width,
        height,
        node,
    })
}

/// Rewrite the fill of every path and rect in the fragment. The engine
/// emits glyph outlines in its own color; labels take the diagram's.
fn recolor(node: &mut Node, color: &str) {
    if node.tag() == "path" || node.tag() == "rect" {
        node.set("fill", color);
    }
    for i in 0..node.len() {
        recolor(node.child_mut(i), color);
    }
}
