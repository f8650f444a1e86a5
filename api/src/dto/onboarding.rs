use serde::{Deserialize, Serialize};

/// Onboarding form; trimming and length checks happen in the auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteOnboardingRequest {
    #[serde(default)]
    pub first_name: String,
}

/// Favorite team selection; an empty or missing list is rejected by the auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteTeamsRequest {
    #[serde(default)]
    pub team_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteTeamsSaved {
    pub count: usize,
}

/// "Successfully saved 1 favorite team" / "... 3 favorite teams"
pub fn favorite_teams_message(count: usize) -> String {
    format!(
        "Successfully saved {} favorite team{}",
        count,
        if count == 1 { "" } else { "s" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_ids_are_camel_case_and_default_to_empty() {
        let request: FavoriteTeamsRequest = serde_json::from_str(r#"{"teamIds":[4,9]}"#).unwrap();
        assert_eq!(request.team_ids, vec![4, 9]);

        let request: FavoriteTeamsRequest = serde_json::from_str("{}").unwrap();
        assert!(request.team_ids.is_empty());
    }

    #[test]
    fn test_message_pluralizes() {
        assert_eq!(favorite_teams_message(1), "Successfully saved 1 favorite team");
        assert_eq!(favorite_teams_message(3), "Successfully saved 3 favorite teams");
    }
}
