//! A minimal SVG element tree. Stands in for the vector-graphics
//! container a presentation layer would supply: diagram helpers draw
//! into a [`Node`] and the result serializes to SVG markup.

use crate::geometry::Point;
use std::fmt::Write as _;

/// One SVG element: tag, attributes in insertion order, optional text
/// content and child elements.
#[derive(Clone, Debug)]
pub struct Node {
    tag: &'static str,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(tag: &'static str) -> Node {
        Node {
            tag,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        self.tag
    }

    /// Set an attribute, replacing any previous value under the same name.
    pub fn set(&mut self, name: &str, value: impl ToString) -> &mut Node {
        let value = value.to_string();
        if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name.to_string(), value));
        }
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.children[idx]
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append an already-built element, returning a handle to it.
    pub fn adopt(&mut self, node: Node) -> &mut Node {
        self.children.push(node);
        self.children.last_mut().unwrap()
    }

    // Shape factories, mirroring the fluent container API the diagrams
    // were written against.

    pub fn group(&mut self) -> &mut Node {
        self.adopt(Node::new("g"))
    }

    pub fn rect(&mut self, width: f32, height: f32) -> &mut Node {
        let mut n = Node::new("rect");
        n.set("width", width).set("height", height);
        self.adopt(n)
    }

    pub fn path(&mut self, d: &str) -> &mut Node {
        let mut n = Node::new("path");
        n.set("d", d);
        self.adopt(n)
    }

    pub fn polygon(&mut self, points: &[Point]) -> &mut Node {
        let mut spec = String::new();
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                spec.push(' ');
            }
            let _ = write!(spec, "{},{}", p.x, p.y);
        }
        let mut n = Node::new("polygon");
        n.set("points", spec);
        self.adopt(n)
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> &mut Node {
        let mut n = Node::new("line");
        n.set("x1", x1).set("y1", y1).set("x2", x2).set("y2", y2);
        self.adopt(n)
    }

    /// Circle of the given diameter, centered at the origin until moved.
    pub fn circle(&mut self, diameter: f32) -> &mut Node {
        let mut n = Node::new("circle");
        n.set("r", diameter / 2.0);
        self.adopt(n)
    }

    pub fn text(&mut self, content: &str) -> &mut Node {
        let mut n = Node::new("text");
        n.text = Some(content.to_string());
        self.adopt(n)
    }

    // Fluent attribute helpers.

    pub fn fill(&mut self, value: &str) -> &mut Node {
        self.set("fill", value)
    }

    pub fn stroke(&mut self, color: &str, width: f32) -> &mut Node {
        self.set("stroke", color).set("stroke-width", width)
    }

    pub fn stroke_dash(&mut self, pattern: &str) -> &mut Node {
        self.set("stroke-dasharray", pattern)
    }

    pub fn opacity(&mut self, value: f32) -> &mut Node {
        self.set("opacity", value)
    }

    /// Corner radius for rects.
    pub fn radius(&mut self, r: f32) -> &mut Node {
        self.set("rx", r).set("ry", r)
    }

    /// Position a shape by its x/y attributes.
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Node {
        self.set("x", x).set("y", y)
    }

    /// Position a circle by its center.
    pub fn center(&mut self, cx: f32, cy: f32) -> &mut Node {
        self.set("cx", cx).set("cy", cy)
    }

    /// Translate a group, replacing any previous translation but keeping
    /// other transforms out of scope (diagrams only ever translate groups).
    pub fn translate(&mut self, x: f32, y: f32) -> &mut Node {
        self.set("transform", format!("translate({} {})", x, y))
    }

    /// Append a rotation about `(cx, cy)` to the current transform.
    pub fn rotate(&mut self, angle: f32, cx: f32, cy: f32) -> &mut Node {
        let rot = format!("rotate({} {} {})", angle, cx, cy);
        let combined = match self.attr("transform") {
            Some(existing) => format!("{} {}", existing, rot),
            None => rot,
        };
        self.set("transform", combined)
    }

    pub fn font(&mut self, family: &str, size: f32) -> &mut Node {
        self.set("font-family", family).set("font-size", size)
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        self.write_svg(&mut out);
        out
    }

    fn write_svg(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if self.text.is_none() && self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_svg(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// A top-level drawing: a root group wrapped in an `<svg>` element.
pub struct Document {
    width: f32,
    height: f32,
    root: Node,
}

impl Document {
    pub fn new(width: f32, height: f32) -> Document {
        Document {
            width,
            height,
            root: Node::new("g"),
        }
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn to_svg(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">{}</svg>",
            self.width,
            self.height,
            self.width,
            self.height,
            self.root.to_svg()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_nested_elements() {
        let mut g = Node::new("g");
        g.rect(10.0, 20.0).move_to(1.0, 2.0).fill("#ff0000");
        let svg = g.to_svg();
        assert_eq!(
            svg,
            "<g><rect width=\"10\" height=\"20\" x=\"1\" y=\"2\" fill=\"#ff0000\"/></g>"
        );
    }

    #[test]
    fn set_replaces_existing_attribute() {
        let mut n = Node::new("rect");
        n.set("fill", "red").set("fill", "blue");
        assert_eq!(n.attr("fill"), Some("blue"));
    }

    #[test]
    fn escapes_text_content() {
        let mut g = Node::new("g");
        g.text("a < b & c");
        assert!(g.to_svg().contains("a &lt; b &amp; c"));
    }
}
