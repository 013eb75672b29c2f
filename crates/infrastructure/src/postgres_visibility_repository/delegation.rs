use super::*;

impl PostgresVisibilityRepository {
    pub(super) async fn find_valid_delegation_link_impl(
        &self,
        tenant_id: TenantId,
        therapist_ids: &BTreeSet<PersonId>,
        client_id: PersonId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<DelegationLink>> {
        if therapist_ids.is_empty() {
            return Ok(None);
        }

        let row = sqlx::query_as::<_, DelegationLinkRow>(
            r#"
            SELECT therapist_id, client_id, status, start_date, end_date
            FROM delegation_links
            WHERE tenant_id = $1
              AND client_id = $2
              AND therapist_id = ANY($3)
              AND status = 'active'
              AND start_date <= $4
              AND (end_date IS NULL OR end_date > $4)
            LIMIT 1
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(client_id.as_uuid())
        .bind(uuid_list(therapist_ids))
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to resolve delegation link for client '{}' in tenant '{}': {error}",
                client_id, tenant_id
            ))
        })?;

        row.map(|row| {
            Ok(DelegationLink {
                therapist_id: PersonId::from_uuid(row.therapist_id),
                client_id: PersonId::from_uuid(row.client_id),
                status: decode_status(row.status.as_str(), tenant_id, "delegation_links")?,
                start_date: row.start_date,
                end_date: row.end_date,
            })
        })
        .transpose()
    }

    pub(super) async fn list_clients_with_valid_links_impl(
        &self,
        tenant_id: TenantId,
        therapist_ids: Option<&BTreeSet<PersonId>>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<PersonId>> {
        if therapist_ids.is_some_and(BTreeSet::is_empty) {
            return Ok(Vec::new());
        }

        let client_ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT DISTINCT client_id
            FROM delegation_links
            WHERE tenant_id = $1
              AND ($2::uuid[] IS NULL OR therapist_id = ANY($2))
              AND status = 'active'
              AND start_date <= $3
              AND (end_date IS NULL OR end_date > $3)
            ORDER BY client_id
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(therapist_ids.map(uuid_list))
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list visible clients in tenant '{}': {error}",
                tenant_id
            ))
        })?;

        Ok(client_ids.into_iter().map(PersonId::from_uuid).collect())
    }
}
