use super::*;

impl PostgresVisibilityRepository {
    pub(super) async fn list_professional_registrations_impl(
        &self,
        tenant_id: TenantId,
        person_id: PersonId,
    ) -> AppResult<Vec<ProfessionalRegistration>> {
        let rows = sqlx::query_as::<_, RegistrationRow>(
            r#"
            SELECT person_id, role_title
            FROM professional_registrations
            WHERE tenant_id = $1
              AND person_id = $2
            ORDER BY role_title
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(person_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load professional registrations for person '{}' in tenant '{}': {error}",
                person_id, tenant_id
            ))
        })?;

        Ok(rows
            .into_iter()
            .map(|row| {
                ProfessionalRegistration::new(PersonId::from_uuid(row.person_id), row.role_title)
            })
            .collect())
    }
}
