use crate::types::{Brief, DesignCategory, Difficulty};

/// Instruction for brief generation. Embeds the design category, an industry
/// focus (or a request for a random one), and the difficulty modifier.
pub fn brief_prompt(
    category: DesignCategory,
    difficulty: Difficulty,
    industry: Option<&str>,
) -> String {
    let industry_line = match industry {
        Some(focus) => format!("Focus specifically on this industry: {focus}."),
        None => "Pick an interesting random domain.".to_string(),
    };

    let difficulty_line = match difficulty {
        Difficulty::Beginner => {
            "Level: beginner. Keep the requirements simple and clear, the copy short, \
             and the deadline generous (48-72 hours)."
        }
        Difficulty::Professional => {
            "Level: professional. Make the requirements complex, challenge the designer \
             with creative constraints, and keep the deadline tight (12-24 hours)."
        }
    };

    format!(
        "You are an art director. Create a fictional graphic design brief.\n\
         Requested design type: {category}.\n\
         {industry_line}\n\
         {difficulty_line}\n\
         \n\
         Special requirements:\n\
         1. If the design type is an education/tutoring promo, include details about the subject and the teacher.\n\
         2. If it is a YouTube thumbnail, lean on clickbait and catchy titles.\n\
         3. The providedAssetDescription field must be a very precise English description usable for image generation (for example the teacher's portrait, or the product shot)."
    )
}

/// Instruction for evaluating a submitted image against its brief.
pub fn evaluation_prompt(brief: &Brief) -> String {
    format!(
        "You are a graphic design mentor.\n\
         The designer submitted a design based on the following brief:\n\
         - Project: {}\n\
         - Goal: {}\n\
         - Audience: {}\n\
         - Required copy: {}\n\
         - Style: {}\n\
         \n\
         Analyze the attached image. Did the designer follow the brief? Is the copy legible? \
         Are the colors cohesive?\n\
         Be kind and very encouraging, but name the mistakes clearly so they can learn from them.",
        brief.project_name,
        brief.project_goal,
        brief.target_audience,
        brief.copywriting.join(", "),
        brief.style_preferences,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brief_prompt_embeds_category_and_industry() {
        let prompt = brief_prompt(
            DesignCategory::SocialMedia,
            Difficulty::Beginner,
            Some("Restaurants & Cafés"),
        );
        assert!(prompt.contains("Social Media"));
        assert!(prompt.contains("Restaurants & Cafés"));
        assert!(prompt.contains("Level: beginner"));
        assert!(prompt.contains("48-72 hours"));
    }

    #[test]
    fn brief_prompt_requests_random_domain_when_unset() {
        let prompt = brief_prompt(DesignCategory::Logo, Difficulty::Professional, None);
        assert!(prompt.contains("random domain"));
        assert!(prompt.contains("Level: professional"));
        assert!(prompt.contains("12-24 hours"));
    }

    #[test]
    fn evaluation_prompt_embeds_brief_fields() {
        let brief = Brief {
            id: "x".to_string(),
            project_name: "Neon Nights".to_string(),
            company_name: "Club X".to_string(),
            industry: "Events".to_string(),
            about_company: "A club".to_string(),
            target_audience: "Night owls".to_string(),
            project_goal: "Fill the dance floor".to_string(),
            required_deliverables: vec!["Flyer".to_string()],
            style_preferences: "Retro neon".to_string(),
            suggested_colors: vec!["#ff00ff".to_string()],
            deadline_hours: 24,
            copywriting: vec!["Friday".to_string(), "Free entry".to_string()],
            contact_details: vec!["club@example.com".to_string()],
            visual_references: vec!["synthwave".to_string()],
            provided_asset_description: "A neon sign".to_string(),
        };
        let prompt = evaluation_prompt(&brief);
        assert!(prompt.contains("Neon Nights"));
        assert!(prompt.contains("Fill the dance floor"));
        assert!(prompt.contains("Night owls"));
        assert!(prompt.contains("Friday, Free entry"));
        assert!(prompt.contains("Retro neon"));
    }
}
