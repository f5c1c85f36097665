//! HTML rendering for the results page. Kept as plain string building; the
//! page is a single list and everything user-controlled goes through
//! [`escape_html`].

use std::fmt::Write;
use toxwatch_model::Label;
use toxwatch_store::ClassifiedPost;

pub fn render_page(posts: &[ClassifiedPost]) -> String {
    let mut out = String::with_capacity(1024 + posts.len() * 512);
    out.push_str(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>toxwatch</title>\n<style>\n\
         body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }\n\
         article { border-bottom: 1px solid #ddd; padding: 0.75rem 0; }\n\
         .toxic { color: #b00020; font-weight: bold; }\n\
         .non-toxic { color: #2e7d32; }\n\
         p.body { white-space: pre-wrap; color: #444; }\n\
         </style>\n</head>\n<body>\n<h1>toxwatch</h1>\n",
    );

    if posts.is_empty() {
        out.push_str("<p>No classified posts yet.</p>\n");
    } else {
        for post in posts {
            let label_class = match post.verdict.label {
                Label::Toxic => "toxic",
                Label::NonToxic => "non-toxic",
            };
            // Write into a String cannot fail.
            let _ = write!(
                out,
                "<article>\n<h2>{title}</h2>\n<p class=\"body\">{text}</p>\n\
                 <p><span class=\"{class}\">{label}</span> \
                 (probability: {probability:.4})</p>\n</article>\n",
                title = escape_html(&post.title),
                text = escape_html(&post.text),
                class = label_class,
                label = post.verdict.label,
                probability = post.verdict.probability,
            );
        }
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use toxwatch_model::Verdict;

    fn post(title: &str, text: &str, probability: f32) -> ClassifiedPost {
        ClassifiedPost::new(
            title,
            text,
            Verdict {
                label: Label::from_probability(probability),
                probability,
            },
        )
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let html = render_page(&[]);
        assert!(html.contains("No classified posts yet."));
        assert!(html.contains("</html>"));
    }

    #[test]
    fn markup_in_post_content_is_escaped() {
        let html = render_page(&[post(
            "<script>alert('x')</script>",
            "a & b < c",
            0.7,
        )]);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b &lt; c"));
    }

    #[test]
    fn probability_renders_with_four_decimals() {
        let html = render_page(&[post("t", "x", 0.123456)]);
        assert!(html.contains("0.1235"));
    }

    #[test]
    fn label_string_matches_verdict() {
        let html = render_page(&[post("t", "x", 0.9)]);
        assert!(html.contains("class=\"toxic\""));
        let html = render_page(&[post("t", "x", 0.5)]);
        assert!(html.contains("class=\"non-toxic\""));
    }
}
