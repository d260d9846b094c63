use serde_json::{Value, json};

/// Response schema for brief generation. The model must emit an object with
/// all fourteen fields; the brief id is assigned client-side afterwards.
pub fn brief_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "projectName": { "type": "STRING", "description": "Suggested project name" },
            "companyName": { "type": "STRING", "description": "Name of the fictional company" },
            "industry": { "type": "STRING", "description": "The company's exact line of business" },
            "aboutCompany": { "type": "STRING", "description": "Short blurb about the company" },
            "targetAudience": { "type": "STRING", "description": "Description of the target audience" },
            "projectGoal": { "type": "STRING", "description": "Primary goal of this design" },
            "requiredDeliverables": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of required deliverables"
            },
            "stylePreferences": { "type": "STRING", "description": "Preferred visual style" },
            "suggestedColors": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Color suggestions"
            },
            "deadlineHours": {
                "type": "INTEGER",
                "description": "Hours available to complete the project (e.g. 24, 48)"
            },
            "copywriting": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Ad copy or headlines that must appear in the design"
            },
            "contactDetails": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Fictional contact details"
            },
            "visualReferences": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Keywords for finding inspiration"
            },
            "providedAssetDescription": {
                "type": "STRING",
                "description": "Precise English description of an image (portrait, product shot) that will be supplied to the designer for use in the design. Example: A smiling math teacher pointing at a whiteboard, studio lighting"
            }
        },
        "required": [
            "projectName",
            "companyName",
            "industry",
            "aboutCompany",
            "targetAudience",
            "projectGoal",
            "requiredDeliverables",
            "stylePreferences",
            "suggestedColors",
            "deadlineHours",
            "copywriting",
            "contactDetails",
            "visualReferences",
            "providedAssetDescription"
        ]
    })
}

/// Response schema for submission evaluation.
pub fn feedback_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "INTEGER", "description": "Rating from 1 to 10" },
            "strengths": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Strong points of the design"
            },
            "weaknesses": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Weak points or mistakes"
            },
            "advice": { "type": "STRING", "description": "Friendly, encouraging advice for improvement" },
            "isSuccess": { "type": "BOOLEAN", "description": "Does the design succeed at its purpose?" }
        },
        "required": ["score", "strengths", "weaknesses", "advice", "isSuccess"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brief_schema_requires_all_fourteen_fields() {
        let schema = brief_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 14);
        let properties = schema["properties"].as_object().unwrap();
        for field in required {
            assert!(
                properties.contains_key(field.as_str().unwrap()),
                "required field {field} has no property entry"
            );
        }
    }

    #[test]
    fn feedback_schema_requires_all_five_fields() {
        let schema = feedback_schema();
        assert_eq!(schema["required"].as_array().unwrap().len(), 5);
        assert_eq!(schema["properties"]["score"]["type"], "INTEGER");
        assert_eq!(schema["properties"]["isSuccess"]["type"], "BOOLEAN");
    }
}
