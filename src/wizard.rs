use colored::Colorize;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use crate::config::Config;
use crate::dashboard;
use crate::error::AppResult;
use crate::gemini::{GeminiClient, GenerationError};
use crate::session::{SessionError, SessionStore, login_prompt};
use crate::store::ProjectStore;
use crate::types::{Brief, DesignCategory, Difficulty};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    Category,
    Industry,
    Result,
}

/// The wizard state machine: category -> industry -> result, resettable.
/// Transitions are pure; the interactive driver lives in [`run_wizard`].
///
/// Generation requests carry a token from the request counter; a completion
/// commits only while its token is still current, so a superseded request can
/// never overwrite newer state.
pub struct WizardFlow {
    step: WizardStep,
    difficulty: Difficulty,
    category: Option<DesignCategory>,
    /// Chosen industry focus; `None` means "random domain".
    industry: Option<String>,
    brief: Option<Brief>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl WizardFlow {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            step: WizardStep::Category,
            difficulty,
            category: None,
            industry: None,
            brief: None,
            loading: false,
            error: None,
            generation: 0,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn category(&self) -> Option<DesignCategory> {
        self.category
    }

    pub fn industry(&self) -> Option<&str> {
        self.industry.as_deref()
    }

    pub fn brief(&self) -> Option<&Brief> {
        self.brief.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn select_category(&mut self, category: DesignCategory) {
        if self.step != WizardStep::Category {
            return;
        }
        self.category = Some(category);
        self.error = None;
        self.step = WizardStep::Industry;
    }

    /// Start a generation request for the given focus (`None` = random).
    /// Returns the request token, or `None` when a request is already in
    /// flight: only one generation may run per wizard instance.
    pub fn begin_generation(&mut self, industry: Option<String>) -> Option<u64> {
        if self.loading || self.category.is_none() {
            return None;
        }
        self.industry = industry;
        self.loading = true;
        self.error = None;
        self.generation += 1;
        Some(self.generation)
    }

    /// Re-run generation with the unchanged category/industry/difficulty.
    pub fn regenerate(&mut self) -> Option<u64> {
        if self.step != WizardStep::Result {
            return None;
        }
        let industry = self.industry.clone();
        self.begin_generation(industry)
    }

    /// Commit a finished request. Returns false (and changes nothing) when the
    /// token is stale. Success lands on the result step; failure returns to
    /// the industry step with the error surfaced.
    pub fn complete_generation(
        &mut self,
        token: u64,
        result: Result<Brief, GenerationError>,
    ) -> bool {
        if !self.loading || token != self.generation {
            return false;
        }
        self.loading = false;
        match result {
            Ok(brief) => {
                self.brief = Some(brief);
                self.step = WizardStep::Result;
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.step = WizardStep::Industry;
            }
        }
        true
    }

    /// Explicit start-over: clears the brief and all selections.
    pub fn start_over(&mut self) {
        self.category = None;
        self.industry = None;
        self.brief = None;
        self.error = None;
        self.loading = false;
        self.step = WizardStep::Category;
    }
}

const RANDOM_LABEL: &str = "Random domain";
const CUSTOM_LABEL: &str = "Something else...";
const BACK_LABEL: &str = "Back";

/// Interactive driver for the wizard. Collects choices, calls the gateway,
/// and hands accepted briefs to the project store.
pub fn run_wizard(
    config: &Config,
    session: &mut SessionStore,
    store: &mut ProjectStore,
) -> AppResult<()> {
    let client = GeminiClient::new(config);
    let theme = ColorfulTheme::default();

    let levels = [Difficulty::Beginner, Difficulty::Professional];
    let level = Select::with_theme(&theme)
        .with_prompt("Difficulty")
        .items(&levels.map(|d| d.label()))
        .default(0)
        .interact()?;
    let mut flow = WizardFlow::new(levels[level]);

    loop {
        match flow.step() {
            WizardStep::Category => {
                let mut items: Vec<&str> =
                    DesignCategory::ALL.iter().map(|c| c.label()).collect();
                items.push("Quit");
                let choice = Select::with_theme(&theme)
                    .with_prompt("Pick a design type")
                    .items(&items)
                    .default(0)
                    .interact()?;
                if choice == DesignCategory::ALL.len() {
                    return Ok(());
                }
                flow.select_category(DesignCategory::ALL[choice]);
            }
            WizardStep::Industry => {
                if let Some(message) = flow.error() {
                    eprintln!("{}", message.red());
                    eprintln!("{}", "Pick an industry to try again.".dimmed());
                }
                let Some(category) = flow.category() else {
                    flow.start_over();
                    continue;
                };

                let presets = category.industries();
                let mut items: Vec<&str> = presets.to_vec();
                items.push(RANDOM_LABEL);
                items.push(CUSTOM_LABEL);
                items.push(BACK_LABEL);
                let choice = Select::with_theme(&theme)
                    .with_prompt(format!("Pick a project industry ({category})"))
                    .items(&items)
                    .default(0)
                    .interact()?;

                let industry = if choice < presets.len() {
                    Some(presets[choice].to_string())
                } else if items[choice] == RANDOM_LABEL {
                    None
                } else if items[choice] == CUSTOM_LABEL {
                    let custom: String = Input::with_theme(&theme)
                        .with_prompt("Industry (e.g. budget airline, delivery app)")
                        .allow_empty(true)
                        .interact_text()?;
                    if custom.trim().is_empty() {
                        continue;
                    }
                    Some(custom.trim().to_string())
                } else {
                    flow.start_over();
                    continue;
                };

                generate(&client, &mut flow, industry);
            }
            WizardStep::Result => {
                let Some(brief) = flow.brief().cloned() else {
                    flow.start_over();
                    continue;
                };
                dashboard::print_brief(&brief);

                let actions = ["Accept brief", "Regenerate", "Start over", "Quit"];
                let action = Select::with_theme(&theme)
                    .with_prompt("What next?")
                    .items(&actions)
                    .default(0)
                    .interact()?;
                match action {
                    0 => match session.require_user() {
                        Ok(user) => {
                            let project = store.create_project(user, brief.clone())?;
                            println!();
                            println!(
                                "{} {} is on the clock: {} hours.",
                                "Accepted.".green().bold(),
                                project.brief.project_name.bold(),
                                project.brief.deadline_hours
                            );
                            println!(
                                "Track it with {} and submit with {}.",
                                "briefcraft dashboard".cyan(),
                                format!("briefcraft submit {} <image>", project.id).cyan()
                            );
                            return Ok(());
                        }
                        Err(SessionError::AuthRequired) => {
                            println!("{}", "Sign in to accept this brief.".yellow());
                            login_prompt(session)?;
                        }
                        Err(err) => return Err(err.into()),
                    },
                    1 => {
                        if let Some(token) = flow.regenerate() {
                            run_generation(&client, &mut flow, token);
                        }
                    }
                    2 => flow.start_over(),
                    _ => return Ok(()),
                }
            }
        }
    }
}

fn generate(client: &GeminiClient, flow: &mut WizardFlow, industry: Option<String>) {
    if let Some(token) = flow.begin_generation(industry) {
        run_generation(client, flow, token);
    }
}

fn run_generation(client: &GeminiClient, flow: &mut WizardFlow, token: u64) {
    let Some(category) = flow.category() else {
        return;
    };
    println!("{}", "Writing your brief...".dimmed());
    let industry = flow.industry().map(str::to_string);
    let result = client.generate_brief(category, flow.difficulty(), industry.as_deref());
    flow.complete_generation(token, result);
}
