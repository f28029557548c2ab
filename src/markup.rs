use serde::Serialize;

/// Renderable fragments of the hybrid markdown+LaTeX mini-language used by
/// AI-produced lesson text. Parsing is pure; clients decide how to render
/// each node (KaTeX for math, styled text for the rest).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    MathBlock { tex: String },
    Bullet { spans: Vec<Span> },
    Line { spans: Vec<Span> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Span {
    Text { text: String },
    Bold { text: String },
    Italic { text: String },
    Math { tex: String },
}

/// Split `$$…$$` display-math blocks out first, then treat everything
/// between them line by line.
pub fn parse(content: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut rest = content;

    while let Some(open) = rest.find("$$") {
        let (before, tail) = rest.split_at(open);
        match tail[2..].find("$$") {
            Some(close) => {
                push_text_nodes(&mut nodes, before);
                nodes.push(Node::MathBlock {
                    tex: tail[2..2 + close].trim().to_string(),
                });
                rest = &tail[2 + close + 2..];
            }
            None => break,
        }
    }
    push_text_nodes(&mut nodes, rest);
    nodes
}

fn push_text_nodes(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    for line in text.split('\n') {
        if line.is_empty() && nodes.is_empty() {
            continue;
        }
        let trimmed = line.trim_start();
        if let Some(item) = trimmed.strip_prefix("* ") {
            nodes.push(Node::Bullet {
                spans: parse_spans(item),
            });
        } else {
            nodes.push(Node::Line {
                spans: parse_spans(line),
            });
        }
    }
    // A trailing split artifact: text ending in '\n' produces one empty line.
    if let Some(Node::Line { spans }) = nodes.last() {
        if spans.is_empty() && text.ends_with('\n') {
            nodes.pop();
        }
    }
}

fn parse_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('$') {
        let tail = &rest[open + 1..];
        match tail.find('$') {
            // `$…$` only counts as math when non-empty, mirroring the
            // renderer this grammar comes from.
            Some(close) if close > 0 => {
                push_emphasis(&mut spans, &rest[..open]);
                spans.push(Span::Math {
                    tex: tail[..close].to_string(),
                });
                rest = &tail[close + 1..];
            }
            _ => break,
        }
    }
    push_emphasis(&mut spans, rest);
    spans
}

fn push_emphasis(spans: &mut Vec<Span>, text: &str) {
    let mut rest = text;
    while let Some(open) = rest.find("**") {
        let tail = &rest[open + 2..];
        match tail.find("**") {
            Some(close) if close > 0 => {
                push_italic(spans, &rest[..open]);
                spans.push(Span::Bold {
                    text: tail[..close].to_string(),
                });
                rest = &tail[close + 2..];
            }
            _ => break,
        }
    }
    push_italic(spans, rest);
}

fn push_italic(spans: &mut Vec<Span>, text: &str) {
    let mut rest = text;
    while let Some(open) = rest.find('*') {
        let tail = &rest[open + 1..];
        match tail.find('*') {
            Some(close) if close > 0 => {
                push_plain(spans, &rest[..open]);
                spans.push(Span::Italic {
                    text: tail[..close].to_string(),
                });
                rest = &tail[close + 1..];
            }
            _ => break,
        }
    }
    push_plain(spans, rest);
}

fn push_plain(spans: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        spans.push(Span::Text {
            text: text.to_string(),
        });
    }
}
