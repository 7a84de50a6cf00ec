//! Certificate Use Cases
//!
//! Issuance overwrites: the pair keeps only its latest certificate id.
//! Completion of the course is not checked.

use auth::domain::value_object::email::Email;
use kernel::id::CertificateId;
use std::sync::Arc;

use crate::domain::entities::Certificate;
use crate::domain::repository::CertificateRepository;
use crate::domain::value_objects::CourseSlug;
use crate::error::{LearningError, LearningResult};

/// Issue certificate input
pub struct IssueCertificateInput {
    pub email: Email,
    pub course_slug: CourseSlug,
}

/// Issue certificate use case
pub struct IssueCertificateUseCase<C>
where
    C: CertificateRepository,
{
    certificate_repo: Arc<C>,
}

impl<C> IssueCertificateUseCase<C>
where
    C: CertificateRepository,
{
    pub fn new(certificate_repo: Arc<C>) -> Self {
        Self { certificate_repo }
    }

    pub async fn execute(&self, input: IssueCertificateInput) -> LearningResult<Certificate> {
        let certificate = Certificate::issue(input.email, input.course_slug);

        self.certificate_repo
            .upsert_certificate(&certificate)
            .await?;

        tracing::info!(
            certificate_id = %certificate.certificate_id,
            email = %certificate.user_email,
            course = %certificate.course_slug,
            "Certificate issued"
        );

        Ok(certificate)
    }
}

/// Verify certificate use case
pub struct VerifyCertificateUseCase<C>
where
    C: CertificateRepository,
{
    certificate_repo: Arc<C>,
}

impl<C> VerifyCertificateUseCase<C>
where
    C: CertificateRepository,
{
    pub fn new(certificate_repo: Arc<C>) -> Self {
        Self { certificate_repo }
    }

    /// Look a certificate up by id. Replaced ids are no longer found.
    pub async fn execute(&self, certificate_id: CertificateId) -> LearningResult<Certificate> {
        self.certificate_repo
            .find_certificate_by_id(certificate_id)
            .await?
            .ok_or(LearningError::CertificateNotFound)
    }
}
