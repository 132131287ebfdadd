use minisite_renderer::tracking::{init_key, init_snippet, script_key, script_url};
use minisite_renderer::{is_script_url, Action, VNode, VisualTree};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Errors that can occur during HTML compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Invalid tag name: {0}")]
    InvalidTag(String),

    #[error("Invalid attribute name `{name}` on <{tag}>")]
    InvalidAttribute { tag: String, name: String },

    #[error("Failed to serialize page data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    pub lang: String,
    /// Used when the tree carries no head (preview trees)
    pub fallback_title: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            lang: "en".to_string(),
            fallback_title: "MiniSite".to_string(),
        }
    }
}

/// Indentation-aware output buffer; indentation and newlines only in pretty mode
struct Writer {
    options: CompileOptions,
    depth: usize,
    out: String,
}

impl Writer {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            out: String::new(),
        }
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn pad(&mut self) {
        if self.options.pretty {
            for _ in 0..self.depth {
                self.out.push_str(&self.options.indent);
            }
        }
    }

    fn end_line(&mut self) {
        if self.options.pretty {
            self.out.push('\n');
        }
    }

    fn line(&mut self, text: &str) {
        self.pad();
        self.write(text);
        self.end_line();
    }

    /// Write `line` and nest what follows
    fn open(&mut self, line: &str) {
        self.line(line);
        self.depth += 1;
    }

    fn close(&mut self, line: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(line);
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Compile a rendered page into a standalone HTML document
#[instrument(skip(tree, options), fields(nodes = tree.nodes.len(), widgets = tree.widgets.len()))]
pub fn compile_to_html(tree: &VisualTree, options: CompileOptions) -> Result<String, CompileError> {
    let lang = escape_html(&options.lang);
    let mut w = Writer::new(options);

    w.line("<!DOCTYPE html>");
    w.open(&format!("<html lang=\"{}\">", lang));
    write_head(tree, &mut w);

    w.open("<body>");
    for node in &tree.nodes {
        compile_node(node, &mut w)?;
    }
    if !tree.widgets.is_empty() {
        let data = serde_json::to_string(&tree.widgets)?;
        w.open("<script type=\"application/json\" id=\"minisite-widgets\">");
        w.line(&escape_script(&data));
        w.close("</script>");
    }
    w.close("</body>");
    w.close("</html>");

    let html = w.finish();
    debug!(bytes = html.len(), "compiled page");
    Ok(html)
}

fn write_head(tree: &VisualTree, w: &mut Writer) {
    w.open("<head>");
    w.line("<meta charset=\"UTF-8\">");
    w.line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");

    let title = tree
        .head
        .as_ref()
        .map_or(w.options.fallback_title.as_str(), |head| head.title.as_str());
    let title = format!("<title>{}</title>", escape_html(title));
    w.line(&title);

    if let Some(head) = &tree.head {
        for (attr, key, content) in head.meta_tags() {
            w.line(&format!(
                "<meta {}=\"{}\" content=\"{}\">",
                attr.as_str(),
                key,
                escape_html(content)
            ));
        }
    }

    for pixel in &tree.pixels {
        w.line(&format!(
            "<script id=\"{}\">{}</script>",
            init_key(pixel.provider),
            escape_script(&init_snippet(pixel.provider, &pixel.id))
        ));
        w.line(&format!(
            "<script async id=\"{}\" src=\"{}\"></script>",
            script_key(pixel.provider),
            escape_html(&script_url(pixel.provider, &pixel.id))
        ));
    }

    w.close("</head>");
}

fn compile_node(node: &VNode, w: &mut Writer) -> Result<(), CompileError> {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            action,
            block_id,
        } => {
            let mut attributes = attributes.clone();
            if let Some(id) = block_id {
                attributes.insert("data-block-id".to_string(), id.to_string());
            }
            if let Some(action) = action {
                attributes.insert("data-action".to_string(), serde_json::to_string(action)?);
                if matches!(action, Action::OpenCheckout { .. }) {
                    // Checkout opens a form; the target is never a plain link
                    attributes.remove("href");
                }
            }
            compile_tag(tag, &attributes, styles, children, w)
        }

        VNode::Text { content } => {
            w.line(&escape_html(content));
            Ok(())
        }

        VNode::Placeholder { message, block_id } => {
            let id = block_id
                .as_ref()
                .map(|id| format!(" data-block-id=\"{}\"", escape_html(id.as_str())))
                .unwrap_or_default();
            w.line(&format!(
                "<div class=\"placeholder\"{}>{}</div>",
                id,
                escape_html(message)
            ));
            Ok(())
        }
    }
}

fn compile_tag(
    name: &str,
    attributes: &BTreeMap<String, String>,
    styles: &BTreeMap<String, String>,
    children: &[VNode],
    w: &mut Writer,
) -> Result<(), CompileError> {
    if !is_valid_name(name) {
        return Err(CompileError::InvalidTag(name.to_string()));
    }

    let mut open = format!("<{}", name);
    for (attr_name, value) in attributes {
        open.push_str(&compile_attribute(name, attr_name, value)?);
    }
    if !styles.is_empty() {
        let declarations: Vec<String> = styles
            .iter()
            .map(|(key, value)| format!("{}: {};", key, escape_html(value)))
            .collect();
        open.push_str(&format!(" style=\"{}\"", declarations.join(" ")));
    }

    if children.is_empty() {
        if is_self_closing(name) {
            open.push_str(" />");
        } else {
            open.push_str(&format!("></{}>", name));
        }
        w.line(&open);
        return Ok(());
    }

    open.push('>');
    w.open(&open);
    for child in children {
        compile_node(child, w)?;
    }
    w.close(&format!("</{}>", name));
    Ok(())
}

/// ` name="value"`, or an error for names that could smuggle script
fn compile_attribute(tag: &str, name: &str, value: &str) -> Result<String, CompileError> {
    if !is_valid_name(name) || name.starts_with("on") {
        return Err(CompileError::InvalidAttribute {
            tag: tag.to_string(),
            name: name.to_string(),
        });
    }

    let value = if name == "href" && is_script_url(value) {
        warn!(tag, "replaced script href");
        "#"
    } else {
        value
    };

    Ok(format!(" {}=\"{}\"", name, escape_html(value)))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// JSON inside a script element must not close it
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
