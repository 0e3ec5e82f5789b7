//! Plain-text rendering for the terminal.

use api::JobsApi;
use common::{Analysis, AnalysisAccepted, Job, Resume};
use extractor::JobPosting;

use crate::view::Dashboard;

pub const HEADING: &str = "Job Dashboard";
pub const PLACEHOLDER: &str = "Paste job URL";

/// Renders the whole page: heading, input row, error line, job cards.
pub fn render_dashboard<A: JobsApi>(dashboard: &Dashboard<A>) -> String {
    let mut lines = vec![HEADING.to_string(), "=".repeat(HEADING.len()), String::new()];

    let input = if dashboard.url().is_empty() {
        PLACEHOLDER
    } else {
        dashboard.url()
    };
    let button = if dashboard.is_create_disabled() {
        "[Create Job] (disabled)"
    } else {
        "[Create Job]"
    };
    lines.push(format!("> {input:<48} {button}"));
    lines.push(String::new());

    if let Some(error) = dashboard.error() {
        lines.push(format!("! {error}"));
        lines.push(String::new());
    }

    let cards = dashboard.cards();
    if cards.is_empty() {
        lines.push("(no jobs yet)".to_string());
    }
    for card in cards {
        lines.push(format!("[#{}] {}", card.key, card.company));
        lines.push(format!("      {}", card.title));
    }

    lines.join("\n")
}

/// Every known field of one job.
pub fn render_job(job: &Job) -> String {
    let mut lines = vec![
        format!("Job ID:          {}", job.id),
        format!("Company:         {}", job.company_label()),
        format!("Title:           {}", job.title_label()),
    ];
    if let Some(url) = &job.job_url {
        lines.push(format!("URL:             {url}"));
    }
    if let Some(source) = &job.description_source {
        lines.push(format!("Source:          {source}"));
    }
    if let Some(status) = &job.extraction_status {
        lines.push(format!("Extraction:      {status}"));
    }
    if let Some(created) = &job.created_at {
        lines.push(format!("Created:         {created}"));
    }
    if let Some(description) = job.job_description.as_deref().filter(|d| !d.is_empty()) {
        lines.push("Description:".to_string());
        lines.extend(description.lines().map(|line| format!("  {line}")));
    }
    lines.join("\n")
}

pub fn render_resumes(resumes: &[Resume]) -> String {
    if resumes.is_empty() {
        return "(no resumes uploaded)".to_string();
    }
    resumes
        .iter()
        .map(|resume| {
            let file = resume.file.as_deref().unwrap_or("-");
            let parsed = if resume.is_parsed() { "parsed" } else { "not parsed" };
            match resume.job_application {
                Some(job) => format!("[#{}] {file} ({parsed}, job #{job})", resume.id),
                None => format!("[#{}] {file} ({parsed})", resume.id),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_accepted(accepted: &AnalysisAccepted) -> String {
    let mut lines = vec![
        format!("Analysis ID:     {}", accepted.analysis_id),
        format!("Status:          {}", accepted.status),
    ];
    if let Some(level) = accepted.candidate_level {
        lines.push(format!("Level:           {level}"));
    }
    if !accepted.target_stack.is_empty() {
        lines.push(format!("Target stack:    {}", accepted.target_stack.join(", ")));
    }
    if !accepted.message.is_empty() {
        lines.push(accepted.message.clone());
    }
    lines.join("\n")
}

pub fn render_analysis(analysis: &Analysis) -> String {
    let mut lines = vec![format!("Status:          {}", analysis.status)];
    if let Some(score) = analysis.ats_score {
        lines.push(format!("ATS score:       {score}/100"));
    }
    push_list(&mut lines, "Missing keywords:", &analysis.missing_keywords);
    push_list(&mut lines, "Strengths:", &analysis.strengths);
    push_list(&mut lines, "Suggestions:", &analysis.suggestions);
    if let Some(error) = analysis.error_message.as_deref().filter(|e| !e.is_empty()) {
        lines.push(format!("Error:           {error}"));
    }
    if !analysis.is_finished() {
        lines.push("Still running, check again shortly.".to_string());
    }
    lines.join("\n")
}

pub fn render_posting(posting: &JobPosting) -> String {
    format!(
        "Company:         {}\nTitle:           {}\nDescription:\n  {}",
        posting.company_name, posting.job_title, posting.job_description
    )
}

fn push_list(lines: &mut Vec<String>, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(label.to_string());
    lines.extend(items.iter().map(|item| format!("  - {item}")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::ApiError;
    use async_trait::async_trait;
    use common::NewJob;
    use serde_json::json;

    struct StaticApi(Vec<Job>);

    #[async_trait]
    impl JobsApi for StaticApi {
        async fn get_jobs(&self) -> api::Result<Vec<Job>> {
            Ok(self.0.clone())
        }

        async fn create_job(&self, _data: &NewJob) -> api::Result<Option<Job>> {
            Err(ApiError::Rejected {
                status: 400,
                message: "job_url: Enter a valid URL.".to_string(),
            })
        }
    }

    fn jobs(value: serde_json::Value) -> Vec<Job> {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_render_empty_page() {
        let dashboard = Dashboard::new(StaticApi(Vec::new()));
        let page = render_dashboard(&dashboard);
        assert!(page.starts_with("Job Dashboard"));
        assert!(page.contains("Paste job URL"));
        assert!(page.contains("[Create Job] (disabled)"));
        assert!(page.contains("(no jobs yet)"));
    }

    #[tokio::test]
    async fn test_render_cards_with_fallbacks() {
        let mut dashboard = Dashboard::new(StaticApi(jobs(json!([
            {"id": 1, "company_name": "Acme", "job_title": "Eng"},
            {"id": 2}
        ]))));
        dashboard.mount().await;
        dashboard.set_url("https://example.com/j");

        let page = render_dashboard(&dashboard);
        assert!(page.contains("[#1] Acme\n      Eng"));
        assert!(page.contains("[#2] No Company\n      No Title"));
        assert!(page.contains("https://example.com/j"));
        assert!(!page.contains("(disabled)"));
    }

    #[tokio::test]
    async fn test_render_shows_error() {
        let mut dashboard = Dashboard::new(StaticApi(Vec::new()));
        dashboard.set_url("bad");
        dashboard.create().await;

        let page = render_dashboard(&dashboard);
        assert!(page.contains("! Could not create job: Request rejected (400): job_url: Enter a valid URL."));
    }

    #[test]
    fn test_render_job_detail() {
        let job: Job = serde_json::from_value(json!({
            "id": 9,
            "company_name": "Acme",
            "job_url": "https://acme.io/jobs/9",
            "extraction_status": "failed",
            "job_description": "Line one\nLine two"
        }))
        .unwrap();

        let text = render_job(&job);
        assert!(text.contains("Job ID:          9"));
        assert!(text.contains("Title:           No Title"));
        assert!(text.contains("Extraction:      failed"));
        assert!(text.contains("  Line one\n  Line two"));
    }

    #[test]
    fn test_render_analysis() {
        let analysis: Analysis = serde_json::from_value(json!({
            "status": "completed",
            "ats_score": 64,
            "missing_keywords": ["docker"],
            "strengths": []
        }))
        .unwrap();

        let text = render_analysis(&analysis);
        assert!(text.contains("ATS score:       64/100"));
        assert!(text.contains("Missing keywords:\n  - docker"));
        assert!(!text.contains("Strengths:"));
        assert!(!text.contains("Still running"));
    }

    #[test]
    fn test_render_pending_analysis() {
        let analysis: Analysis = serde_json::from_value(json!({"status": "processing"})).unwrap();
        assert_eq!(
            render_analysis(&analysis),
            "Status:          processing\nStill running, check again shortly."
        );
    }

    #[test]
    fn test_render_resumes() {
        let resumes: Vec<Resume> = serde_json::from_value(json!([
            {"id": 1, "file": "resumes/a.pdf", "parsed_text": "text", "job_application": 4},
            {"id": 2, "file": "resumes/b.pdf"}
        ]))
        .unwrap();

        assert_eq!(
            render_resumes(&resumes),
            "[#1] resumes/a.pdf (parsed, job #4)\n[#2] resumes/b.pdf (not parsed)"
        );
        assert_eq!(render_resumes(&[]), "(no resumes uploaded)");
    }
}
