//! Lenient single-pass parser for `#`-delimited documents.
//!
//! A document is split into [`Section`]s at every line whose trimmed form
//! starts with `#`. Inside a section, fenced code blocks become
//! [`SnippetKind::Code`] snippets and the prose between them becomes
//! [`SnippetKind::Text`] snippets. Parsing never fails: unterminated or odd
//! constructs degrade to the closest reasonable snippet.

use serde::{Deserialize, Serialize};

const FENCE: &str = "```";

/// Kind of a [`Snippet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnippetKind {
    Text,
    Code,
}

/// A text or code fragment within a [`Section`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(rename = "type")]
    pub kind: SnippetKind,
    /// Fence language tag; only meaningful for code snippets.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
    pub content: String,
}

impl Snippet {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: SnippetKind::Text,
            language: String::new(),
            content: content.into(),
        }
    }

    pub fn code(language: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: SnippetKind::Code,
            language: language.into(),
            content: content.into(),
        }
    }

    pub fn is_code(&self) -> bool {
        self.kind == SnippetKind::Code
    }
}

/// Ordered snippets of one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snippets(pub Vec<Snippet>);

impl Snippets {
    /// Returns the first code snippet tagged `json`.
    pub fn find_json(&self) -> Option<&Snippet> {
        self.0
            .iter()
            .find(|s| s.kind == SnippetKind::Code && s.language == "json")
    }

    /// Concatenates every text snippet, each followed by a newline.
    pub fn combine_texts(&self) -> String {
        let mut out = String::new();
        for snippet in self.0.iter().filter(|s| s.kind == SnippetKind::Text) {
            out.push_str(&snippet.content);
            out.push('\n');
        }
        out
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snippet> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Snippets {
    type Item = &'a Snippet;
    type IntoIter = std::slice::Iter<'a, Snippet>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A titled group of snippets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Header text as written, without the leading `#` marks.
    pub title: String,
    pub snippets: Snippets,
}

/// Sections of one document, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sections(pub Vec<Section>);

impl Sections {
    /// Looks up a section by title.
    ///
    /// A title matches when it equals `title` exactly or when its lowercase
    /// form equals `title`. A lowercase query therefore finds `Options`,
    /// `OPTIONS` and `options`, while a mixed-case query only finds a title
    /// spelled identically.
    ///
    /// # Examples
    ///
    /// ```
    /// use docschema_markdown::parse_sections;
    ///
    /// let sections = parse_sections("# OPTIONS\n# Examples\n");
    /// assert!(sections.find("options").is_some());
    /// assert!(sections.find("Options").is_none());
    /// assert!(sections.find("Examples").is_some());
    /// ```
    pub fn find(&self, title: &str) -> Option<&Section> {
        self.0
            .iter()
            .find(|s| s.title == title || s.title.to_lowercase() == title)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Sections {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Accumulation state of the section currently being filled.
struct SectionBuilder {
    title: String,
    snippets: Vec<Snippet>,
    text_lines: Vec<String>,
    /// `Some(language)` while inside a fenced block.
    code_language: Option<String>,
    code_lines: Vec<String>,
}

impl SectionBuilder {
    fn new(title: String) -> Self {
        Self {
            title,
            snippets: Vec::new(),
            text_lines: Vec::new(),
            code_language: None,
            code_lines: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        if self.code_language.is_some() {
            self.code_lines.push(line.to_string());
        } else {
            self.text_lines.push(line.to_string());
        }
    }

    fn toggle_fence(&mut self, marker: &str) {
        match self.code_language.take() {
            Some(language) => {
                let content = std::mem::take(&mut self.code_lines).join("\n");
                self.snippets.push(Snippet::code(language, content));
            }
            None => {
                self.flush_text();
                self.code_language = Some(marker.trim().to_string());
                self.code_lines.clear();
            }
        }
    }

    fn flush_text(&mut self) {
        let lines = std::mem::take(&mut self.text_lines);
        let text = lines.join("\n");
        let text = text.trim();
        if !text.is_empty() {
            self.snippets.push(Snippet::text(text));
        }
    }

    /// Emits whatever is pending; an unclosed fence still yields its code.
    fn finish(mut self) -> Section {
        match self.code_language.take() {
            Some(language) => {
                let content = std::mem::take(&mut self.code_lines).join("\n");
                self.snippets.push(Snippet::code(language, content));
            }
            None => self.flush_text(),
        }
        Section {
            title: self.title,
            snippets: Snippets(self.snippets),
        }
    }
}

/// Splits a document into sections.
///
/// Content before the first header is ignored. Header titles keep their
/// case; leading `#` marks and surrounding whitespace are stripped.
///
/// # Examples
///
/// ```
/// use docschema_markdown::{parse_sections, SnippetKind};
///
/// let doc = "# Examples\nList files:\n```sh\nls -la\n```\n";
/// let sections = parse_sections(doc);
/// assert_eq!(sections.len(), 1);
///
/// let snippets = &sections.find("examples").unwrap().snippets;
/// assert_eq!(snippets.len(), 2);
/// assert_eq!(snippets.0[0].kind, SnippetKind::Text);
/// assert_eq!(snippets.0[1].language, "sh");
/// assert_eq!(snippets.0[1].content, "ls -la");
/// ```
pub fn parse_sections(content: &str) -> Sections {
    let mut sections = Vec::new();
    let mut current: Option<SectionBuilder> = None;

    for line in content.split('\n') {
        let trimmed = line.trim();

        if trimmed.starts_with('#') {
            if let Some(builder) = current.take() {
                sections.push(builder.finish());
            }
            let title = trimmed.trim_start_matches('#').trim();
            current = Some(SectionBuilder::new(title.to_string()));
            continue;
        }

        let Some(builder) = current.as_mut() else {
            continue;
        };

        if let Some(marker) = trimmed.strip_prefix(FENCE) {
            builder.toggle_fence(marker);
            continue;
        }

        builder.push_line(line);
    }

    if let Some(builder) = current.take() {
        sections.push(builder.finish());
    }

    Sections(sections)
}
