//! MDX body rendering with syntax highlighting

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::{Captures, Regex};
use std::ops::Range;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::helpers::html_escape;

lazy_static! {
    static ref CALLOUT: Regex = Regex::new(r"(?s)<Callout>(.*?)</Callout>").unwrap();
    static ref CODE_BLOCK: Regex = Regex::new(r"(?s)<CodeBlock>(.*?)</CodeBlock>").unwrap();
}

/// Renders MDX documents to HTML
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render an MDX body to HTML
    pub fn render(&self, source: &str) -> String {
        let markdown = expand_components(&strip_module_lines(source));

        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(&markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            if let Some((lang, code)) = code_block.as_mut() {
                match event {
                    Event::Text(text) => code.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        let highlighted = self.highlight_code(code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                        code_block = None;
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                event => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let highlighted = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
            .and_then(|theme| {
                highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
            });

        match highlighted {
            Some(highlighted) if self.line_numbers => {
                self.add_line_numbers(&highlighted, &html_escape(lang))
            }
            Some(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                html_escape(lang),
                highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                html_escape(lang),
                html_escape(code)
            ),
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            lang,
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop top-level MDX `import`/`export` statements, leaving fenced code alone
fn strip_module_lines(source: &str) -> String {
    let mut in_fence = false;
    let mut out = String::with_capacity(source.len());

    for line in source.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
        }
        if !in_fence && (line.starts_with("import ") || line.starts_with("export ")) {
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }

    out
}

/// Lower the site's MDX components to plain HTML blocks.
///
/// Fenced code and inline code spans are literal and left untouched.
fn expand_components(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut prose = String::new();
    let mut in_fence = false;

    for line in markdown.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let is_fence = trimmed.starts_with("```") || trimmed.starts_with("~~~");
        if is_fence || in_fence {
            out.push_str(&expand_prose(&prose));
            prose.clear();
            out.push_str(line);
            if is_fence {
                in_fence = !in_fence;
            }
        } else {
            prose.push_str(line);
        }
    }
    out.push_str(&expand_prose(&prose));

    out
}

/// Expand components in text outside fences, skipping inline code spans
fn expand_prose(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let spans = code_spans(text);
    let with_code = CODE_BLOCK.replace_all(text, |caps: &Captures| {
        if in_spans(&spans, caps.get(0).map_or(0, |m| m.start())) {
            return caps[0].to_string();
        }
        format!(
            "\n<pre class=\"code-block\"><code>{}</code></pre>\n",
            html_escape(caps[1].trim_matches('\n'))
        )
    });

    let spans = code_spans(&with_code);
    // Blank lines around the inner text keep it parsed as markdown
    CALLOUT
        .replace_all(&with_code, |caps: &Captures| {
            if in_spans(&spans, caps.get(0).map_or(0, |m| m.start())) {
                return caps[0].to_string();
            }
            format!("\n<div class=\"callout\">\n\n{}\n\n</div>\n", caps[1].trim())
        })
        .into_owned()
}

/// Byte ranges of backtick code spans: a run of backticks up to the next run of equal length
fn code_spans(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let run_at = |i: usize| bytes[i..].iter().take_while(|&&b| b == b'`').count();

    let mut spans = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        let open = run_at(i);
        let mut j = i + open;
        let mut close = None;
        while j < bytes.len() {
            if bytes[j] == b'`' {
                let len = run_at(j);
                if len == open {
                    close = Some(j + len);
                    break;
                }
                j += len;
            } else {
                j += 1;
            }
        }
        match close {
            Some(end) => {
                spans.push(i..end);
                i = end;
            }
            None => i += open,
        }
    }
    spans
}

fn in_spans(spans: &[Range<usize>], pos: usize) -> bool {
    spans.iter().any(|span| span.contains(&pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains("highlight rust"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_line_numbers() {
        let renderer = MarkdownRenderer::with_options("base16-ocean.dark", true);
        let html = renderer.render("```\na\nb\n```");
        assert!(html.contains(r#"<span class="line-number">2</span>"#));
    }

    #[test]
    fn test_callout_component() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Intro\n\n<Callout>Read **this** first</Callout>\n");
        assert!(html.contains(r#"<div class="callout">"#));
        assert!(html.contains("<strong>this</strong>"));
        assert!(!html.contains("<Callout>"));
    }

    #[test]
    fn test_code_block_component_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("<CodeBlock>\nlet a = b < c;\n</CodeBlock>\n");
        assert!(html.contains(r#"<pre class="code-block"><code>let a = b &lt; c;</code></pre>"#));
    }

    #[test]
    fn test_components_in_code_stay_literal() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render(
            "```\n<Callout>Hi</Callout>\n```\n\nUse `<CodeBlock>x</CodeBlock>` inline.\n",
        );
        assert!(!html.contains(r#"class="callout""#));
        assert!(!html.contains("callout&quot;"));
        assert!(html.contains("Callout&gt;Hi"));
        assert!(!html.contains(r#"class="code-block""#));
        assert!(html.contains("<code>&lt;CodeBlock&gt;x&lt;/CodeBlock&gt;</code>"));
    }

    #[test]
    fn test_components_after_fence_still_expand() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\ncode\n```\n\n<Callout>Note</Callout>\n");
        assert!(html.contains(r#"<div class="callout">"#));
    }

    #[test]
    fn test_code_spans() {
        assert_eq!(code_spans("a `b` c"), vec![2..5]);
        assert_eq!(code_spans("``a ` b`` x `y"), vec![0..9]);
    }

    #[test]
    fn test_fence_info_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```x\"><script>\nbody\n```\n");
        assert!(!html.contains("<script>"));
        assert!(html.contains("highlight x&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_strip_module_lines() {
        let source = "import X from './x'\n\n# Title\n\n```js\nimport y from 'y'\n```\n";
        let stripped = strip_module_lines(source);
        assert!(!stripped.contains("import X"));
        assert!(stripped.contains("import y from 'y'"));
    }
}
