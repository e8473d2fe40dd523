//! SVG element records and their serialization.
//!
//! The renderer never concatenates markup directly. It builds a [`Document`]
//! out of small [`Element`] records carrying position, size, style class and
//! content, so geometry can be inspected in tests, and serializes the whole
//! tree in one final pass with [`Document::to_svg`].

const SVG_NS: &str = "http://www.w3.org/2000/svg";

const FONT_STACK: &str = "'Segoe UI', Ubuntu, 'Helvetica Neue', Arial, sans-serif";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub rx: u32,
    pub class: Option<&'static str>,
    pub fill: Option<&'static str>,
    pub filter: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circle {
    pub cx: u32,
    pub cy: u32,
    pub r: u32,
    pub class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub x: u32,
    pub y: u32,
    pub class: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub class: &'static str,
    pub children: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Rect(Rect),
    Circle(Circle),
    Text(Text),
    Image(Image),
    Group(Group),
}

impl Element {
    pub fn class(&self) -> Option<&'static str> {
        match self {
            Element::Rect(rect) => rect.class,
            Element::Circle(circle) => Some(circle.class),
            Element::Text(text) => Some(text.class),
            Element::Image(_) => None,
            Element::Group(group) => Some(group.class),
        }
    }

    fn write(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            Element::Rect(rect) => {
                out.push_str(&format!(
                    "{}<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\"",
                    indent, rect.x, rect.y, rect.width, rect.height, rect.rx
                ));
                if let Some(class) = rect.class {
                    out.push_str(&format!(" class=\"{}\"", class));
                }
                if let Some(fill) = rect.fill {
                    out.push_str(&format!(" fill=\"{}\"", escape_xml(fill)));
                }
                if let Some(filter) = rect.filter {
                    out.push_str(&format!(" filter=\"{}\"", escape_xml(filter)));
                }
                out.push_str("/>\n");
            }
            Element::Circle(circle) => {
                out.push_str(&format!(
                    "{}<circle cx=\"{}\" cy=\"{}\" r=\"{}\" class=\"{}\"/>\n",
                    indent, circle.cx, circle.cy, circle.r, circle.class
                ));
            }
            Element::Text(text) => {
                out.push_str(&format!(
                    "{}<text x=\"{}\" y=\"{}\" class=\"{}\">{}</text>\n",
                    indent,
                    text.x,
                    text.y,
                    text.class,
                    escape_xml(&text.content)
                ));
            }
            Element::Image(image) => {
                out.push_str(&format!(
                    "{}<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid slice\" href=\"{}\"/>\n",
                    indent,
                    image.x,
                    image.y,
                    image.width,
                    image.height,
                    escape_xml(&image.href)
                ));
            }
            Element::Group(group) => {
                out.push_str(&format!("{}<g class=\"{}\">\n", indent, group.class));
                for child in &group.children {
                    child.write(out, depth + 1);
                }
                out.push_str(&format!("{}</g>\n", indent));
            }
        }
    }
}

/// A complete SVG document: canvas size plus top-level elements in paint order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub width: u32,
    pub height: u32,
    pub elements: Vec<Element>,
}

impl Document {
    pub fn new(width: u32, height: u32) -> Self {
        Document {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// All elements (at any depth) carrying the given style class.
    pub fn elements_with_class(&self, class: &str) -> Vec<&Element> {
        fn collect<'a>(elements: &'a [Element], class: &str, found: &mut Vec<&'a Element>) {
            for element in elements {
                if element.class() == Some(class) {
                    found.push(element);
                }
                if let Element::Group(group) = element {
                    collect(&group.children, class, found);
                }
            }
        }

        let mut found = Vec::new();
        collect(&self.elements, class, &mut found);
        found
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "<svg xmlns=\"{ns}\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            ns = SVG_NS,
            w = self.width,
            h = self.height
        ));
        out.push_str(&defs());
        for element in &self.elements {
            element.write(&mut out, 1);
        }
        out.push_str("</svg>\n");
        out
    }
}

fn defs() -> String {
    format!(
        r##"  <defs>
    <style>
      .title {{ fill: #1DB954; font: 700 26px {font}; }}
      .subtitle {{ fill: #B3B3B3; font: 400 14px {font}; }}
      .name {{ fill: #FFFFFF; font: 600 13px {font}; }}
      .meta {{ fill: #969696; font: 400 12px {font}; }}
      .card {{ fill: #181818; stroke: #282828; stroke-width: 1; }}
      .placeholder {{ fill: #282828; }}
      .glyph {{ fill: none; stroke: #1DB954; stroke-width: 3; }}
    </style>
    <linearGradient id="bg-gradient" x1="0" y1="0" x2="0" y2="1">
      <stop offset="0%" stop-color="#1E1E1E"/>
      <stop offset="100%" stop-color="#121212"/>
    </linearGradient>
    <filter id="card-shadow" x="-10%" y="-10%" width="120%" height="130%">
      <feDropShadow dx="0" dy="4" stdDeviation="4" flood-color="#000000" flood-opacity="0.5"/>
    </filter>
  </defs>
"##,
        font = FONT_STACK
    )
}

/// Escapes the five XML special characters for text and attribute content.
///
/// Characters XML 1.0 does not allow at all (most C0 controls, surrogates
/// and U+FFFE/U+FFFF) are dropped, so arbitrary names still yield a
/// well-formed document.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

// XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}
