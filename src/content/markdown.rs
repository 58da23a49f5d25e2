//! Markdown rendering with syntax highlighting

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;

lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
    static ref THEME_SET: ThemeSet = ThemeSet::load_defaults();
}

/// Markdown renderer with optional syntax highlighting
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    highlight: bool,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Plain renderer, code blocks are escaped but not highlighted
    pub fn new() -> Self {
        Self {
            highlight: false,
            theme_name: "base16-ocean.dark".to_string(),
            line_numbers: false,
        }
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        Self {
            highlight: config.enable,
            theme_name: config.theme.clone(),
            line_numbers: config.line_number,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(markdown, options);

        let mut html_output = String::new();
        if !self.highlight {
            html::push_html(&mut html_output, parser);
            return html_output;
        }

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            let lang = lang.split_whitespace().next().unwrap_or("").to_string();
                            (!lang.is_empty()).then_some(lang)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight_code(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                _ => events.push(event),
            }
        }

        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = SYNTAX_SET
            .find_syntax_by_token(lang)
            .or_else(|| SYNTAX_SET.find_syntax_by_extension(lang))
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

        let theme = THEME_SET
            .themes
            .get(&self.theme_name)
            .or_else(|| THEME_SET.themes.values().next());

        let highlighted = theme
            .and_then(|theme| highlighted_html_for_string(code, &SYNTAX_SET, syntax, theme).ok());

        let class = html_escape(lang);
        match highlighted {
            Some(highlighted) if self.line_numbers => add_line_numbers(&highlighted, &class),
            Some(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                class, highlighted
            ),
            None => {
                tracing::debug!("No highlighting available for `{}`, emitting plain code", lang);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    class,
                    html_escape(code)
                )
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap highlighted code in a table with a line-number gutter; `class` must be escaped
fn add_line_numbers(code: &str, class: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        class,
        gutter,
        lines.join("\n")
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
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
    fn test_render_lists_and_emphasis() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("1. **Hierarchy**: size\n2. *Contrast*\n");
        assert!(html.contains("<ol>"));
        assert!(html.contains("<strong>Hierarchy</strong>"));
        assert!(html.contains("<em>Contrast</em>"));
    }

    #[test]
    fn test_plain_code_block_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\n<b>&</b>\n```");
        assert!(html.contains("&lt;b&gt;&amp;&lt;/b&gt;"));
    }

    #[test]
    fn test_highlighted_code_block() {
        let renderer = MarkdownRenderer::from_config(&HighlightConfig {
            enable: true,
            line_number: true,
            theme: "base16-ocean.dark".to_string(),
        });
        let html = renderer.render("```rust\nfn main() {}\n```\n\nafter");
        assert!(html.contains(r#"<figure class="highlight rust">"#));
        assert!(html.contains("line-number"));
        assert!(html.contains("<p>after</p>"));
    }

    #[test]
    fn test_fence_language_is_escaped() {
        let renderer = MarkdownRenderer::from_config(&HighlightConfig::default());
        let html = renderer.render("```\"><script>\nx\n```\n");
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"class="highlight &quot;&gt;&lt;script&gt;""#));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = MarkdownRenderer::from_config(&HighlightConfig::default());
        let md = "# Title\n\n```js\nconst a = 1;\n```\n";
        assert_eq!(renderer.render(md), renderer.render(md));
    }
}
