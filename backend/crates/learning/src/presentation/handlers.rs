//! HTTP Handlers

use auth::domain::repository::UserRepository;
use auth::domain::value_object::email::Email;
use auth::middleware::CurrentUser;
use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use kernel::id::CertificateId;
use std::sync::Arc;

use crate::application::certificate::{
    IssueCertificateInput, IssueCertificateUseCase, VerifyCertificateUseCase,
};
use crate::application::complete_lesson::{CompleteLessonInput, CompleteLessonUseCase};
use crate::application::config::LearningConfig;
use crate::application::dashboard::{DashboardInput, DashboardUseCase};
use crate::application::enroll::{EnrollInput, EnrollUseCase};
use crate::application::list_courses::ListCoursesUseCase;
use crate::domain::repository::LearningStore;
use crate::domain::value_objects::{CourseSlug, LessonId};
use crate::error::{LearningError, LearningResult};
use crate::presentation::dto::{
    CertificateIdResponse, CertificateRequest, CertificateResponse, CompleteLessonRequest,
    CompleteLessonResponse, CourseResponse, DashboardQuery, DashboardResponse, EnrollRequest,
    OkResponse,
};

/// Shared state for learning handlers
#[derive(Clone)]
pub struct LearningAppState<U, L>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    L: LearningStore,
{
    pub users: Option<Arc<U>>,
    pub store: Option<Arc<L>>,
    pub config: Arc<LearningConfig>,
}

impl<U, L> LearningAppState<U, L>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    L: LearningStore,
{
    /// The store, or `NotConfigured`
    pub fn store(&self) -> LearningResult<Arc<L>> {
        self.store.clone().ok_or(LearningError::NotConfigured)
    }
}

/// GET /api/courses
pub async fn list_courses<U, L>(
    State(state): State<LearningAppState<U, L>>,
) -> LearningResult<Json<Vec<CourseResponse>>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    L: LearningStore,
{
    let courses = ListCoursesUseCase::new(state.store.clone())
        .execute()
        .await?;

    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// POST /api/enroll
pub async fn enroll<U, L>(
    State(state): State<LearningAppState<U, L>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<EnrollRequest>,
) -> LearningResult<Json<OkResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    L: LearningStore,
{
    let email = Email::new(req.email)?;
    current.ensure_is(&email)?;

    let store = state.store()?;
    EnrollUseCase::new(store.clone(), store)
        .execute(EnrollInput {
            email,
            course_slug: CourseSlug::new(req.course_slug)?,
        })
        .await?;

    Ok(Json(OkResponse::ok()))
}

/// POST /api/progress/complete
pub async fn complete_lesson<U, L>(
    State(state): State<LearningAppState<U, L>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CompleteLessonRequest>,
) -> LearningResult<Json<CompleteLessonResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    L: LearningStore,
{
    let email = Email::new(req.email)?;
    current.ensure_is(&email)?;

    let output = CompleteLessonUseCase::new(state.store()?, state.config.clone())
        .execute(CompleteLessonInput {
            email,
            course_slug: CourseSlug::new(req.course_slug)?,
            lesson_id: LessonId::new(req.lesson_id)?,
            xp_reward: req.xp,
        })
        .await?;

    Ok(Json(CompleteLessonResponse {
        ok: true,
        week_unlocked: output.week_unlocked,
    }))
}

/// GET /api/dashboard?email=...&course_slug=...
pub async fn dashboard<U, L>(
    State(state): State<LearningAppState<U, L>>,
    Query(query): Query<DashboardQuery>,
) -> LearningResult<Json<DashboardResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    L: LearningStore,
{
    let course_slug = query.course_slug.map(CourseSlug::new).transpose()?;

    let view = DashboardUseCase::new(state.users.clone(), state.store.clone(), state.config.clone())
        .execute(DashboardInput {
            email: Email::new(query.email)?,
            course_slug,
        })
        .await?;

    Ok(Json(DashboardResponse::from(view)))
}

/// POST /api/certificate
pub async fn issue_certificate<U, L>(
    State(state): State<LearningAppState<U, L>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CertificateRequest>,
) -> LearningResult<Json<CertificateIdResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    L: LearningStore,
{
    let email = Email::new(req.email)?;
    current.ensure_is(&email)?;

    let certificate = IssueCertificateUseCase::new(state.store()?)
        .execute(IssueCertificateInput {
            email,
            course_slug: CourseSlug::new(req.course_slug)?,
        })
        .await?;

    Ok(Json(CertificateIdResponse {
        certificate_id: certificate.certificate_id.to_string(),
    }))
}

/// GET /api/certificate/{certificate_id}
pub async fn verify_certificate<U, L>(
    State(state): State<LearningAppState<U, L>>,
    Path(certificate_id): Path<String>,
) -> LearningResult<Json<CertificateResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    L: LearningStore,
{
    let store = state.store()?;

    // A malformed id cannot name a certificate.
    let certificate_id: CertificateId = certificate_id
        .parse()
        .map_err(|_| LearningError::CertificateNotFound)?;

    let certificate = VerifyCertificateUseCase::new(store)
        .execute(certificate_id)
        .await?;

    Ok(Json(CertificateResponse::from(certificate)))
}
