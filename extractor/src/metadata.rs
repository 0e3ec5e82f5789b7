use scraper::Html;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::{clean_text, selector};

/// Title and company found on a posting page. Either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobMetadata {
    pub job_title: String,
    pub company_name: String,
}

/// Finds the job title and company.
///
/// Structured `JobPosting` data wins, then OpenGraph tags, then the page
/// `<title>`. The company falls back to a name derived from the URL host.
pub fn extract_metadata(html: &str, url: &str) -> JobMetadata {
    let document = Html::parse_document(html);
    let mut job_title = String::new();
    let mut company_name = String::new();

    for posting in job_postings(&document) {
        if job_title.is_empty() {
            job_title = clean_text(&value_text(posting.get("title")));
        }

        if company_name.is_empty() {
            let org = posting
                .get("hiringOrganization")
                .or_else(|| posting.get("hiringorganisation"));
            company_name = match org {
                Some(Value::Object(org)) => clean_text(&value_text(org.get("name"))),
                Some(Value::String(name)) => clean_text(name),
                _ => String::new(),
            };
        }

        if !job_title.is_empty() && !company_name.is_empty() {
            break;
        }
    }

    if job_title.is_empty() {
        job_title = meta_property(&document, "og:title").unwrap_or_default();
    }

    if job_title.is_empty() {
        job_title = document
            .select(&selector("title"))
            .next()
            .map(|title| clean_text(&title.text().collect::<String>()))
            .unwrap_or_default();
    }

    if company_name.is_empty() {
        company_name = meta_property(&document, "og:site_name").unwrap_or_default();
    }

    if company_name.is_empty() {
        company_name = company_from_domain(url);
    }

    JobMetadata {
        job_title,
        company_name,
    }
}

/// Turns `https://www.acme-labs.io/jobs` into `Acme Labs`.
pub fn company_from_domain(url: &str) -> String {
    let Some(host) = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
    else {
        return String::new();
    };

    let host = host.strip_prefix("www.").unwrap_or(&host);
    let label = host.split('.').next().unwrap_or_default();
    title_case(&label.replace('-', " "))
}

/// Uppercases the first letter of every word and lowercases the rest.
/// Any non-letter starts a new word.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for c in text.chars() {
        if prev_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_alphabetic();
    }
    out
}

fn meta_property(document: &Html, property: &str) -> Option<String> {
    let css = format!(r#"meta[property="{property}"]"#);
    document
        .select(&selector(&css))
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(clean_text)
        .filter(|content| !content.is_empty())
}

/// Every JSON-LD node on the page typed as a `JobPosting`.
fn job_postings(document: &Html) -> Vec<Map<String, Value>> {
    let mut postings = Vec::new();

    for script in document.select(&selector(r#"script[type="application/ld+json"]"#)) {
        let payload = script.text().collect::<String>();
        if payload.trim().is_empty() {
            continue;
        }

        let data: Value = match serde_json::from_str(&payload) {
            Ok(data) => data,
            Err(e) => {
                debug!(error = %e, "Skipping malformed JSON-LD block");
                continue;
            }
        };

        walk(&data, &mut |node| {
            if node.get("@type").is_some_and(is_job_posting_type) {
                postings.push(node.clone());
            }
        });
    }

    postings
}

/// Visits objects, array items and `@graph` members.
fn walk(value: &Value, visit: &mut dyn FnMut(&Map<String, Value>)) {
    match value {
        Value::Object(map) => {
            visit(map);
            if let Some(Value::Array(graph)) = map.get("@graph") {
                for item in graph {
                    walk(item, visit);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, visit);
            }
        }
        _ => {}
    }
}

fn is_job_posting_type(value: &Value) -> bool {
    match value {
        Value::String(s) => s.eq_ignore_ascii_case("jobposting"),
        Value::Array(items) => items.iter().any(is_job_posting_type),
        _ => false,
    }
}

fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.acme-labs.io/careers/42";

    #[test]
    fn test_json_ld_beats_meta_tags() {
        let html = r#"<html><head>
            <meta property="og:title" content="Careers at Acme">
            <meta property="og:site_name" content="Acme Careers">
            <script type="application/ld+json">
              {"@context": "https://schema.org", "@type": "JobPosting",
               "title": "  Rust   Engineer ",
               "hiringOrganization": {"@type": "Organization", "name": "Acme Labs"}}
            </script></head><body></body></html>"#;

        let metadata = extract_metadata(html, URL);
        assert_eq!(metadata.job_title, "Rust Engineer");
        assert_eq!(metadata.company_name, "Acme Labs");
    }

    #[test]
    fn test_json_ld_graph_and_type_list() {
        let html = r#"<script type="application/ld+json">
            {"@graph": [
              {"@type": "WebPage", "name": "Jobs"},
              {"@type": ["Thing", "jobposting"], "title": "SRE", "hiringOrganization": "Globex"}
            ]}
            </script>"#;

        let metadata = extract_metadata(html, URL);
        assert_eq!(metadata.job_title, "SRE");
        assert_eq!(metadata.company_name, "Globex");
    }

    #[test]
    fn test_first_non_empty_value_across_postings() {
        let html = r#"
            <script type="application/ld+json">{"@type": "JobPosting", "title": "Data Engineer"}</script>
            <script type="application/ld+json">[{"@type": "JobPosting", "title": "Other",
                "hiringorganisation": {"name": "Initech"}}]</script>"#;

        let metadata = extract_metadata(html, URL);
        assert_eq!(metadata.job_title, "Data Engineer");
        assert_eq!(metadata.company_name, "Initech");
    }

    #[test]
    fn test_malformed_json_ld_is_skipped() {
        let html = r#"<head>
            <script type="application/ld+json">{not json</script>
            <meta property="og:title" content="Platform Engineer">
            <meta property="og:site_name" content="Hooli">
            </head>"#;

        let metadata = extract_metadata(html, URL);
        assert_eq!(metadata.job_title, "Platform Engineer");
        assert_eq!(metadata.company_name, "Hooli");
    }

    #[test]
    fn test_title_tag_and_domain_fallback() {
        let html = "<html><head><title>\n  QA Lead - Openings\n</title></head></html>";

        let metadata = extract_metadata(html, URL);
        assert_eq!(metadata.job_title, "QA Lead - Openings");
        assert_eq!(metadata.company_name, "Acme Labs");
    }

    #[test]
    fn test_nothing_found() {
        let metadata = extract_metadata("<html></html>", "not a url");
        assert_eq!(metadata, JobMetadata::default());
    }

    #[test]
    fn test_company_from_domain() {
        assert_eq!(company_from_domain("https://jobs.lever.co/acme"), "Jobs");
        assert_eq!(company_from_domain("https://WWW.Big-CORP.com/"), "Big Corp");
        assert_eq!(company_from_domain("https://acme2go.com"), "Acme2Go");
        assert_eq!(company_from_domain("mailto:someone"), "");
    }
}
