use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated design assignment. Field names are serialized in camelCase so
/// the stored form matches the response schema sent to the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brief {
    /// Assigned client-side after the model response is parsed, never by the model.
    pub id: String,
    pub project_name: String,
    pub company_name: String,
    pub industry: String,
    pub about_company: String,
    pub target_audience: String,
    pub project_goal: String,
    pub required_deliverables: Vec<String>,
    pub style_preferences: String,
    pub suggested_colors: Vec<String>,
    pub deadline_hours: u32,
    pub copywriting: Vec<String>,
    pub contact_details: Vec<String>,
    pub visual_references: Vec<String>,
    pub provided_asset_description: String,
}

impl Brief {
    /// URL of the illustrative asset for this brief. Deterministic: the brief
    /// id doubles as the generator seed.
    pub fn asset_url(&self) -> String {
        format!(
            "https://image.pollinations.ai/prompt/{}?model=flux&width=1024&height=1024&nologo=true&enhance=true&seed={}",
            urlencoding::encode(&self.provided_asset_description),
            self.id
        )
    }
}

/// Mentor critique of a submitted design image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Nominally 1-10. The response schema does not bound it; consumers clamp
    /// before display.
    pub score: i64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub advice: String,
    pub is_success: bool,
}

impl Feedback {
    pub fn display_score(&self) -> i64 {
        self.score.clamp(1, 10)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Completed,
    Expired,
}

/// A brief accepted by the signed-in user, tracked through its lifecycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub brief: Brief,
    pub started_at: DateTime<Utc>,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
    /// Path of the submitted image file, present once evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_image: Option<String>,
}

/// The singleton mock-auth identity. No password, no server round-trip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub level: String,
    pub xp: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesignCategory {
    Logo,
    BrandIdentity,
    UiUx,
    SocialMedia,
    Packaging,
    Illustration,
    Advertising,
    YouTube,
    Education,
}

impl DesignCategory {
    pub const ALL: [DesignCategory; 9] = [
        DesignCategory::Logo,
        DesignCategory::BrandIdentity,
        DesignCategory::UiUx,
        DesignCategory::SocialMedia,
        DesignCategory::Packaging,
        DesignCategory::Illustration,
        DesignCategory::Advertising,
        DesignCategory::YouTube,
        DesignCategory::Education,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DesignCategory::Logo => "Logo Design",
            DesignCategory::BrandIdentity => "Brand Identity",
            DesignCategory::UiUx => "UI/UX Design",
            DesignCategory::SocialMedia => "Social Media",
            DesignCategory::Packaging => "Packaging",
            DesignCategory::Illustration => "Digital Illustration",
            DesignCategory::Advertising => "Ad Campaign",
            DesignCategory::YouTube => "YouTube Thumbnail",
            DesignCategory::Education => "Education / Tutoring Promo",
        }
    }

    /// Industry presets offered for this category. Education and YouTube get
    /// their own lists; everything else shares the general one.
    pub fn industries(&self) -> &'static [&'static str] {
        match self {
            DesignCategory::Education => EDUCATION_INDUSTRIES,
            DesignCategory::YouTube => YOUTUBE_INDUSTRIES,
            _ => INDUSTRIES,
        }
    }
}

impl std::fmt::Display for DesignCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Professional,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Professional => "Professional",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub const INDUSTRIES: &[&str] = &[
    "Restaurants & Cafés",
    "Tech & Software",
    "Real Estate & Construction",
    "Fashion & Apparel",
    "Health & Fitness",
    "Beauty & Cosmetics",
    "Travel & Tourism",
    "Financial Services",
    "E-commerce",
];

pub const EDUCATION_INDUSTRIES: &[&str] = &[
    "Math & Science Tutoring",
    "Language Learning (English/German)",
    "Quran Memorization",
    "Early Childhood (Kindergarten)",
    "Programming & Design Courses",
    "Personal Training",
    "Music & Art Lessons",
    "Online Learning Platforms",
];

pub const YOUTUBE_INDUSTRIES: &[&str] = &[
    "Gaming",
    "Vlogs & Travel",
    "Tech Reviews",
    "Stories & Documentaries",
    "Cooking & Recipes",
    "Podcasts & Interviews",
    "Sports Analysis",
    "Educational Content",
];
