use std::io::Write;
use std::path::Path;

use chrono::Utc;
use colored::Colorize;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::gemini::GeminiClient;
use crate::session::SessionStore;
use crate::store::{ProjectPatch, ProjectStore};
use crate::timer::Countdown;
use crate::types::{Brief, Feedback, ProjectStatus};

/// Render the project dashboard. With `watch`, countdowns are recomputed and
/// redrawn once per second until interrupted.
pub fn run_dashboard(store: &ProjectStore, session: &SessionStore, watch: bool) -> AppResult<()> {
    if session.user().is_none() {
        println!(
            "{} Run {} first.",
            "You're not signed in.".yellow(),
            "briefcraft login".cyan()
        );
        return Ok(());
    }

    if !watch {
        render_dashboard(store);
        return Ok(());
    }

    loop {
        let lines = render_dashboard(store);
        let _ = std::io::stdout().flush();
        std::thread::sleep(std::time::Duration::from_secs(1));
        // move back to the top of the block and erase it before redrawing
        print!("\x1b[{lines}A\x1b[J");
    }
}

fn render_dashboard(store: &ProjectStore) -> usize {
    let now = Utc::now();
    let mut lines = 0;

    let mut section = |title: &str, status: ProjectStatus| {
        println!("{}", title.bold());
        lines += 1;
        let mut empty = true;
        for project in store.projects().iter().filter(|p| p.status == status) {
            empty = false;
            match status {
                ProjectStatus::Active => {
                    let countdown =
                        Countdown::at(project.started_at, project.brief.deadline_hours, now);
                    let clock = if countdown.is_expired() {
                        countdown.to_string().red().bold()
                    } else {
                        countdown.to_string().cyan()
                    };
                    println!(
                        "  {}  {} [{}]  {}",
                        project.id.dimmed(),
                        project.brief.project_name.bold(),
                        project.brief.industry,
                        clock
                    );
                }
                ProjectStatus::Completed => {
                    let score = project
                        .feedback
                        .as_ref()
                        .map(|f| format!("{}/10", f.display_score()))
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "  {}  {} [{}]  {}",
                        project.id.dimmed(),
                        project.brief.project_name.bold(),
                        project.brief.industry,
                        score.green()
                    );
                }
                ProjectStatus::Expired => {
                    println!(
                        "  {}  {} [{}]  {}",
                        project.id.dimmed(),
                        project.brief.project_name.bold(),
                        project.brief.industry,
                        "expired".red()
                    );
                }
            }
            lines += 1;
        }
        if empty {
            println!("  {}", "nothing here yet".dimmed());
            lines += 1;
        }
        println!();
        lines += 1;
    };

    section("In progress", ProjectStatus::Active);
    section("Completed", ProjectStatus::Completed);
    section("Expired", ProjectStatus::Expired);
    lines
}

/// Submit an image for a project and render the mentor feedback.
pub fn run_submit(
    config: &Config,
    store: &mut ProjectStore,
    session: &SessionStore,
    project_id: &str,
    image_path: &Path,
) -> AppResult<()> {
    if session.user().is_none() {
        println!(
            "{} Run {} first.",
            "You're not signed in.".yellow(),
            "briefcraft login".cyan()
        );
        return Ok(());
    }

    let project = store
        .get(project_id)
        .ok_or_else(|| AppError::Usage(format!("no project with id {project_id}")))?;
    match project.status {
        ProjectStatus::Completed => {
            return Err(AppError::Usage(format!(
                "project {project_id} is already completed"
            )));
        }
        ProjectStatus::Expired => {
            return Err(AppError::Usage(format!(
                "project {project_id} has expired"
            )));
        }
        ProjectStatus::Active => {}
    }
    let brief = project.brief.clone();

    let mime = image_mime(image_path).ok_or_else(|| {
        AppError::Usage(format!(
            "unsupported image type: {} (use png, jpg, webp, or gif)",
            image_path.display()
        ))
    })?;
    let image = std::fs::read(image_path)?;

    println!("{}", "Sending your design to the mentor...".dimmed());
    let client = GeminiClient::new(config);
    let feedback = client.evaluate_submission(&brief, &image, mime);

    store.update_project(
        project_id,
        ProjectPatch {
            status: Some(ProjectStatus::Completed),
            feedback: Some(feedback.clone()),
            submitted_image: Some(image_path.display().to_string()),
        },
    )?;

    print_feedback(&feedback);
    Ok(())
}

/// MIME type for a submitted image, by extension.
pub fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Full brief card, as shown on the wizard result step and for project detail.
pub fn print_brief(brief: &Brief) {
    let list = |items: &[String]| {
        for item in items {
            println!("    - {item}");
        }
    };

    println!();
    println!("{}", brief.project_name.bold().underline());
    println!(
        "  {} [{}]",
        brief.company_name.bold(),
        brief.industry.cyan()
    );
    println!("  {}", brief.about_company.dimmed());
    println!();
    println!("  {} {}", "Goal:".bold(), brief.project_goal);
    println!("  {} {}", "Audience:".bold(), brief.target_audience);
    println!("  {} {} hours", "Deadline:".bold(), brief.deadline_hours);
    println!();
    println!("  {}", "Deliverables".bold());
    list(&brief.required_deliverables);
    println!("  {} {}", "Style:".bold(), brief.style_preferences);
    println!("  {} {}", "Colors:".bold(), brief.suggested_colors.join(", "));
    println!("  {}", "Copy to include".bold());
    list(&brief.copywriting);
    println!("  {}", "Contact details".bold());
    list(&brief.contact_details);
    println!(
        "  {} {}",
        "Inspiration:".bold(),
        brief.visual_references.join(", ")
    );
    println!("  {} {}", "Provided asset:".bold(), brief.asset_url().cyan());
    println!();
}

/// Mentor feedback card: score, headline, advice, strengths, weaknesses.
pub fn print_feedback(feedback: &Feedback) {
    let score = format!("{}/10", feedback.display_score());
    println!();
    if feedback.is_success {
        println!("{}  {}", score.green().bold(), "Great work!".bold());
    } else {
        println!(
            "{}  {}",
            score.red().bold(),
            "Good attempt, it needs another pass.".bold()
        );
    }
    println!();
    println!("  {} {}", "Mentor's advice:".bold(), feedback.advice);
    println!();
    println!("  {}", "Strengths".green().bold());
    for item in &feedback.strengths {
        println!("    + {item}");
    }
    println!("  {}", "Needs improvement".red().bold());
    for item in &feedback.weaknesses {
        println!("    - {item}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_API_BASE, DEFAULT_MODEL};
    use crate::session::mock_user;
    use crate::types::Brief;
    use std::path::PathBuf;

    fn config(dir: &Path) -> Config {
        Config {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            data_dir: dir.to_path_buf(),
        }
    }

    fn brief() -> Brief {
        Brief {
            id: "01TEST".to_string(),
            project_name: "Menu Board".to_string(),
            company_name: "Casa Verde".to_string(),
            industry: "Restaurants & Cafés".to_string(),
            about_company: "A neighborhood café".to_string(),
            target_audience: "Locals".to_string(),
            project_goal: "New menu launch".to_string(),
            required_deliverables: vec!["Menu board".to_string()],
            style_preferences: "Rustic".to_string(),
            suggested_colors: vec!["#2e5339".to_string()],
            deadline_hours: 48,
            copywriting: vec!["Fresh every day".to_string()],
            contact_details: vec!["casa@example.com".to_string()],
            visual_references: vec!["chalkboard menus".to_string()],
            provided_asset_description: "A rustic café interior".to_string(),
        }
    }

    #[test]
    fn submit_completes_the_project_with_feedback() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SessionStore::open(dir.path()).unwrap();
        session.login(mock_user("Dana", "")).unwrap();
        let mut store = ProjectStore::open(dir.path()).unwrap();
        let project = store
            .create_project(session.user().unwrap(), brief())
            .unwrap();

        let image = dir.path().join("design.png");
        std::fs::write(&image, b"png bytes").unwrap();

        // no API key: evaluation falls back, but the flow must still complete
        run_submit(&config(dir.path()), &mut store, &session, &project.id, &image).unwrap();

        assert_eq!(store.projects().len(), 1);
        let done = store.get(&project.id).unwrap();
        assert_eq!(done.status, ProjectStatus::Completed);
        let feedback = done.feedback.as_ref().unwrap();
        assert!((1..=10).contains(&feedback.display_score()));
        assert_eq!(done.submitted_image.as_deref(), Some(image.to_str().unwrap()));
    }

    #[test]
    fn submit_rejects_unknown_project() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SessionStore::open(dir.path()).unwrap();
        session.login(mock_user("Dana", "")).unwrap();
        let mut store = ProjectStore::open(dir.path()).unwrap();

        let image = dir.path().join("design.png");
        std::fs::write(&image, b"png bytes").unwrap();
        let result = run_submit(&config(dir.path()), &mut store, &session, "missing", &image);
        assert!(matches!(result, Err(AppError::Usage(_))));
    }

    #[test]
    fn submit_rejects_completed_project() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SessionStore::open(dir.path()).unwrap();
        session.login(mock_user("Dana", "")).unwrap();
        let mut store = ProjectStore::open(dir.path()).unwrap();
        let project = store
            .create_project(session.user().unwrap(), brief())
            .unwrap();
        store
            .update_project(
                &project.id,
                ProjectPatch {
                    status: Some(ProjectStatus::Completed),
                    ..Default::default()
                },
            )
            .unwrap();

        let image = dir.path().join("design.png");
        std::fs::write(&image, b"png bytes").unwrap();
        let result = run_submit(&config(dir.path()), &mut store, &session, &project.id, &image);
        assert!(matches!(result, Err(AppError::Usage(_))));
    }

    #[test]
    fn image_mime_by_extension() {
        assert_eq!(image_mime(&PathBuf::from("a.png")), Some("image/png"));
        assert_eq!(image_mime(&PathBuf::from("a.JPG")), Some("image/jpeg"));
        assert_eq!(image_mime(&PathBuf::from("a.jpeg")), Some("image/jpeg"));
        assert_eq!(image_mime(&PathBuf::from("a.webp")), Some("image/webp"));
        assert_eq!(image_mime(&PathBuf::from("a.svg")), None);
        assert_eq!(image_mime(&PathBuf::from("noext")), None);
    }
}
