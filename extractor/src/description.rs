use scraper::{ElementRef, Html};

use crate::{clean_text, selector, ExtractionError, Result};

/// Shortest description accepted as a real posting.
pub const MIN_DESCRIPTION_CHARS: usize = 200;

/// Elements whose text is never part of the description.
const HIDDEN: [&str; 5] = ["script", "style", "noscript", "template", "head"];

/// Content roots tried in order.
const CONTENT_ROOTS: [&str; 3] = ["article", "main", "body"];

/// Returns the whitespace-collapsed readable text of the posting.
pub fn extract_description(html: &str) -> Result<String> {
    let document = Html::parse_document(html);

    for css in CONTENT_ROOTS {
        let Some(root) = document.select(&selector(css)).next() else {
            continue;
        };
        let text = clean_text(&visible_text(root));
        if text.chars().count() >= MIN_DESCRIPTION_CHARS {
            return Ok(text);
        }
    }

    Err(ExtractionError::InsufficientContent)
}

fn visible_text(root: ElementRef<'_>) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN.contains(&element.name()))
        });
        if !hidden {
            parts.push(text);
        }
    }
    parts.join("\n")
}
