use std::sync::LazyLock;

use regex::Regex;

// Email alternative first: at a shared start position it wins.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<email>[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})|(?P<url>https?://\S+)")
        .expect("link pattern compiles")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    Email,
    Url,
}

/// An email address or URL found inside a subline. Offsets are byte offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkMatch {
    pub kind: LinkKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl LinkMatch {
    /// Annotation target: `mailto:` for addresses, the text itself for URLs.
    pub fn target(&self) -> String {
        match self.kind {
            LinkKind::Email => format!("mailto:{}", self.text),
            LinkKind::Url => self.text.clone(),
        }
    }
}

/// Find every email and URL in `line`, left to right, without overlap.
pub fn scan_links(line: &str) -> Vec<LinkMatch> {
    LINK_RE
        .captures_iter(line)
        .filter_map(|caps| {
            let (kind, m) = match (caps.name("email"), caps.name("url")) {
                (Some(m), _) => (LinkKind::Email, m),
                (None, Some(m)) => (LinkKind::Url, m),
                (None, None) => return None,
            };
            Some(LinkMatch {
                kind,
                text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            })
        })
        .collect()
}

/// A piece of a subline: either plain text or a link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Link(LinkMatch),
}

/// Split a subline into plain gaps and link matches, in order. Empty gaps are
/// omitted.
pub fn segments(line: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in scan_links(line) {
        if m.start > last {
            out.push(Segment::Plain(&line[last..m.start]));
        }
        last = m.end;
        out.push(Segment::Link(m));
    }
    if last < line.len() {
        out.push(Segment::Plain(&line[last..]));
    }
    out
}
