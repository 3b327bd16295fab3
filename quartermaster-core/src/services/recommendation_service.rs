// src/services/recommendation_service.rs

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use quartermaster_common::error::Error;
use quartermaster_common::models::{ComplaintStatus, AssetCondition, RecommendationPrompt};
use quartermaster_common::traits::collaborator_traits::RecommendationProvider;
use quartermaster_common::traits::repository_traits::{AssetRepository, ComplaintRepository};

/// Assets older than this are flagged as nearing end of service life.
const REPLACEMENT_AGE_DAYS: i64 = 4 * 365;

pub struct RecommendationService {
    assets: Arc<dyn AssetRepository>,
    complaints: Arc<dyn ComplaintRepository>,
    provider: Arc<dyn RecommendationProvider>,
}

impl RecommendationService {
    pub fn new(
        assets: Arc<dyn AssetRepository>,
        complaints: Arc<dyn ComplaintRepository>,
        provider: Arc<dyn RecommendationProvider>,
    ) -> Self {
        Self {
            assets,
            complaints,
            provider,
        }
    }

    /// Always yields exactly three advisory lines: the provider's when it
    /// answers usably, the rule-based approximation otherwise.
    pub async fn recommendations_for_asset(&self, asset_id: &str) -> Result<[String; 3], Error> {
        let asset = self
            .assets
            .get(asset_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("asset {asset_id}")))?;
        let complaints = self.complaints.list_for_asset(asset_id).await?;

        let open_complaints = complaints
            .iter()
            .filter(|c| c.status != ComplaintStatus::Resolved)
            .count() as i64;
        let prompt = RecommendationPrompt {
            asset_name: asset.name.clone(),
            category: asset.category,
            condition: asset.condition,
            age_days: (Utc::now() - asset.created_at).num_days(),
            open_complaints,
            total_complaints: complaints.len() as i64,
        };

        match self.provider.recommend(&prompt).await {
            Ok(lines) => {
                let usable: Vec<String> = lines
                    .into_iter()
                    .map(|l| l.trim().to_string())
                    .filter(|l| !l.is_empty())
                    .collect();
                if let [first, second, third, ..] = usable.as_slice() {
                    return Ok([first.clone(), second.clone(), third.clone()]);
                }
                warn!(
                    "recommendation provider returned {} usable line(s), using fallback",
                    usable.len()
                );
            }
            Err(e) => {
                warn!("recommendation provider failed, using fallback: {}", e);
            }
        }

        Ok(fallback_recommendations(&prompt))
    }
}

fn fallback_recommendations(prompt: &RecommendationPrompt) -> [String; 3] {
    let condition_advice = match prompt.condition {
        AssetCondition::Damaged => format!(
            "'{}' is marked damaged; assess whether repair or replacement is more economical.",
            prompt.asset_name
        ),
        AssetCondition::UnderRepair => format!(
            "'{}' is under repair; follow up on the repair progress before reassigning it.",
            prompt.asset_name
        ),
        _ if prompt.age_days >= REPLACEMENT_AGE_DAYS => format!(
            "'{}' is nearing the end of its typical service life; plan a replacement budget.",
            prompt.asset_name
        ),
        _ => format!(
            "'{}' needs no immediate action; keep it on its regular maintenance cycle.",
            prompt.asset_name
        ),
    };

    let complaint_advice = if prompt.open_complaints > 0 {
        format!(
            "Resolve the {} open complaint(s) before the next redeployment.",
            prompt.open_complaints
        )
    } else if prompt.total_complaints >= 3 {
        "The complaint history is recurring; schedule a deeper inspection.".to_string()
    } else {
        "No open complaints; no corrective work is pending.".to_string()
    };

    let routine_advice = format!(
        "Add a routine inspection for this {} to the next maintenance window.",
        prompt.category
    );

    [condition_advice, complaint_advice, routine_advice]
}

#[cfg(test)]
mod tests {
    use super::*;
    use quartermaster_common::models::AssetCategory;

    fn prompt(condition: AssetCondition, age_days: i64, open: i64, total: i64) -> RecommendationPrompt {
        RecommendationPrompt {
            asset_name: "Dell U2720Q".to_string(),
            category: AssetCategory::Monitor,
            condition,
            age_days,
            open_complaints: open,
            total_complaints: total,
        }
    }

    #[test]
    fn damaged_assets_lead_with_replacement_advice() {
        let lines = fallback_recommendations(&prompt(AssetCondition::Damaged, 10, 0, 0));
        assert!(lines[0].contains("damaged"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn old_assets_get_replacement_planning() {
        let lines = fallback_recommendations(&prompt(AssetCondition::Good, 5 * 365, 0, 0));
        assert!(lines[0].contains("service life"));
    }

    #[test]
    fn open_complaints_are_surfaced() {
        let lines = fallback_recommendations(&prompt(AssetCondition::Good, 10, 2, 2));
        assert!(lines[1].contains("2 open complaint"));
    }
}
