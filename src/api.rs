use actix_web::{web, HttpResponse};
use log::debug;
use serde::Deserialize;

use crate::analytics::{FilteredView, SliderBounds, SupportMode};
use crate::data::{Dataset, GradeRange};
use crate::error::{ApiError, RangeError};
use crate::page;

/// Shared, read-only server state.
pub struct DashboardState {
    pub dataset: Dataset,
    pub title: String,
}

impl DashboardState {
    pub fn new(dataset: Dataset, title: impl Into<String>) -> Self {
        DashboardState {
            dataset,
            title: title.into(),
        }
    }
}

/// `?min=&max=` grade filter. Missing endpoints default to the dataset bounds.
/// Endpoints are signed: negative values clamp to the lower bound.
#[derive(Deserialize, Debug, Default)]
pub struct RangeQuery {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl RangeQuery {
    /// Clamp each endpoint into `bounds`, then require `min <= max`.
    pub fn resolve(&self, bounds: GradeRange) -> Result<GradeRange, RangeError> {
        let min = self.min.map_or(bounds.min(), |g| clamp_endpoint(bounds, g));
        let max = self.max.map_or(bounds.max(), |g| clamp_endpoint(bounds, g));
        if self.min.is_some_and(|g| g != i64::from(min))
            || self.max.is_some_and(|g| g != i64::from(max))
        {
            debug!(
                "clamped grade range {:?}..={:?} to {}..={}",
                self.min, self.max, min, max
            );
        }
        GradeRange::new(min, max)
    }
}

fn clamp_endpoint(bounds: GradeRange, grade: i64) -> u32 {
    if grade < 0 {
        return bounds.min();
    }
    u32::try_from(grade).map_or(bounds.max(), |g| bounds.clamp(g))
}

#[derive(Deserialize, Debug, Default)]
pub struct ModeQuery {
    #[serde(default)]
    pub mode: SupportMode,
}

// Homepage endpoint
async fn serve_homepage(state: web::Data<DashboardState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page::render(&state.title))
}

// Health check endpoint
async fn health_check(state: web::Data<DashboardState>) -> HttpResponse {
    HttpResponse::Ok().body(format!(
        "Dashboard is running with {} student records",
        state.dataset.len()
    ))
}

async fn get_bounds(state: web::Data<DashboardState>) -> HttpResponse {
    HttpResponse::Ok().json(SliderBounds::new(state.dataset.grade_bounds()))
}

async fn get_heatmap(
    state: web::Data<DashboardState>,
    query: web::Query<RangeQuery>,
) -> Result<HttpResponse, ApiError> {
    let range = query.resolve(state.dataset.grade_bounds())?;
    let view = FilteredView::new(&state.dataset, range);
    Ok(HttpResponse::Ok().json(view.joint_distribution()))
}

async fn get_support(
    state: web::Data<DashboardState>,
    query: web::Query<RangeQuery>,
    mode: web::Query<ModeQuery>,
) -> Result<HttpResponse, ApiError> {
    let range = query.resolve(state.dataset.grade_bounds())?;
    let view = FilteredView::new(&state.dataset, range);
    Ok(HttpResponse::Ok().json(view.support_summary(mode.mode)))
}

/// Register every dashboard route. Expects `web::Data<DashboardState>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(serve_homepage))
        .route("/health", web::get().to(health_check))
        .route("/api/bounds", web::get().to(get_bounds))
        .route("/api/heatmap", web::get().to(get_heatmap))
        .route("/api/support", web::get().to(get_support));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> GradeRange {
        GradeRange::new(4, 18).unwrap()
    }

    #[test]
    fn test_missing_endpoints_default_to_bounds() {
        let range = RangeQuery::default().resolve(bounds()).unwrap();
        assert_eq!(range, bounds());
    }

    #[test]
    fn test_out_of_bounds_endpoints_are_clamped() {
        let query = RangeQuery {
            min: Some(0),
            max: Some(40),
        };
        assert_eq!(query.resolve(bounds()).unwrap(), bounds());

        let above = RangeQuery {
            min: Some(25),
            max: None,
        };
        assert_eq!(above.resolve(bounds()).unwrap(), GradeRange::new(18, 18).unwrap());
    }

    #[test]
    fn test_negative_and_oversized_endpoints_are_clamped() {
        let query = RangeQuery {
            min: Some(-5),
            max: Some(99_999_999_999),
        };
        assert_eq!(query.resolve(bounds()).unwrap(), bounds());

        let low = RangeQuery {
            min: None,
            max: Some(-1),
        };
        assert_eq!(low.resolve(bounds()).unwrap(), GradeRange::new(4, 4).unwrap());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let query = RangeQuery {
            min: Some(12),
            max: Some(8),
        };
        assert_eq!(
            query.resolve(bounds()),
            Err(RangeError::Inverted { min: 12, max: 8 })
        );
    }
}
