//! Markdown Rendering
//!
//! Assistant replies arrive as Markdown; render them to HTML with
//! pulldown-cmark (tables and strikethrough enabled, no highlighting).

use pulldown_cmark::{html::push_html, Options, Parser};

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Render a chat message body to HTML
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, options());
    let mut html = String::new();
    push_html(&mut html, parser);
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_lists_and_emphasis() {
        let html = render_markdown("**年费**提醒：\n- 第3年\n- 第4年");
        assert!(html.contains("<strong>年费</strong>"));
        assert!(html.contains("<li>"));
    }

    #[test]
    fn plain_text_passes_through_as_a_paragraph() {
        let html = render_markdown("你好");
        assert!(html.contains("<p>你好</p>"));
    }
}
