// src/services/report_service.rs

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{Duration, Utc};
use tracing::warn;

use quartermaster_common::error::Error;
use quartermaster_common::models::{
    Asset, DashboardStats, ReportFile, ReportFilter, ReportRequest, ReportRow,
};
use quartermaster_common::traits::collaborator_traits::ReportRenderer;
use quartermaster_common::traits::repository_traits::{
    ActivityLogRepository, AssetRepository, ComplaintRepository, MaintenanceRepository,
};

pub struct ReportService {
    assets: Arc<dyn AssetRepository>,
    complaints: Arc<dyn ComplaintRepository>,
    maintenance: Arc<dyn MaintenanceRepository>,
    activity: Arc<dyn ActivityLogRepository>,
    renderer: Arc<dyn ReportRenderer>,
}

impl ReportService {
    pub fn new(
        assets: Arc<dyn AssetRepository>,
        complaints: Arc<dyn ComplaintRepository>,
        maintenance: Arc<dyn MaintenanceRepository>,
        activity: Arc<dyn ActivityLogRepository>,
        renderer: Arc<dyn ReportRenderer>,
    ) -> Self {
        Self {
            assets,
            complaints,
            maintenance,
            activity,
            renderer,
        }
    }

    /// Six independent sub-queries; rows changing between them can produce
    /// momentarily inconsistent aggregates.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, Error> {
        let now = Utc::now();

        let total_assets = self.assets.count_all().await?;
        let archived_assets = self.assets.count_archived().await?;
        let assets_by_condition = self
            .assets
            .counts_by_condition()
            .await?
            .into_iter()
            .map(|(condition, n)| (condition.to_string(), n))
            .collect();
        let assets_by_category = self
            .assets
            .counts_by_category()
            .await?
            .into_iter()
            .map(|(category, n)| (category.to_string(), n))
            .collect();
        let pending_complaints = self.complaints.count_pending().await?;
        let upcoming_maintenance = self
            .maintenance
            .count_upcoming(now, now + Duration::days(30))
            .await?;
        let recent_activity = self.activity.count_since(now - Duration::days(7)).await?;

        Ok(DashboardStats {
            total_assets,
            archived_assets,
            assets_by_condition,
            assets_by_category,
            pending_complaints,
            upcoming_maintenance,
            recent_activity,
        })
    }

    pub async fn generate_report(&self, filter: &ReportFilter) -> Result<ReportFile, Error> {
        let assets = self.assets.list_for_report(filter).await?;
        let rows: Vec<ReportRow> = assets.iter().map(report_row).collect();

        let stamp = Utc::now().format("%Y%m%d-%H%M%S");
        let filename = format!("asset-report-{stamp}.{}", filter.format.extension());
        let request = ReportRequest {
            filename: filename.clone(),
            format: filter.format,
            rows,
        };

        match self.renderer.render(&request).await {
            Ok(url) => Ok(ReportFile { url, filename }),
            Err(e) => {
                warn!("report renderer unavailable, falling back to csv: {}", e);
                Ok(csv_fallback(&request))
            }
        }
    }
}

fn report_row(asset: &Asset) -> ReportRow {
    ReportRow {
        asset_id: asset.asset_id.clone(),
        name: asset.name.clone(),
        category: asset.category,
        condition: asset.condition,
        owner: asset.owner.clone(),
        is_archived: asset.is_archived,
        created_at: asset.created_at,
    }
}

/// Locally computed stand-in when the rendering collaborator is down: the
/// selected rows as CSV behind a data URL.
fn csv_fallback(request: &ReportRequest) -> ReportFile {
    let mut csv = String::from("asset_id,name,category,condition,owner,archived,created_at\n");
    for row in &request.rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            row.asset_id,
            csv_field(&row.name),
            row.category,
            row.condition,
            csv_field(row.owner.as_deref().unwrap_or("")),
            row.is_archived,
            row.created_at.to_rfc3339(),
        ));
    }

    let filename = match request.filename.rsplit_once('.') {
        Some((stem, _)) => format!("{stem}.csv"),
        None => format!("{}.csv", request.filename),
    };
    let encoded = STANDARD.encode(csv.as_bytes());
    ReportFile {
        url: format!("data:text/csv;base64,{encoded}"),
        filename,
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
