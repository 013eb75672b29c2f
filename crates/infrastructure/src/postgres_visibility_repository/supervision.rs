use super::*;

impl PostgresVisibilityRepository {
    pub(super) async fn list_active_supervision_edges_impl(
        &self,
        tenant_id: TenantId,
        filter: &SupervisionEdgeFilter,
    ) -> AppResult<Vec<SupervisionEdge>> {
        if filter
            .supervisor_id_in
            .as_ref()
            .is_some_and(BTreeSet::is_empty)
        {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, SupervisionEdgeRow>(
            r#"
            SELECT supervisor_id, clinician_id, status, start_date, end_date
            FROM supervision_edges
            WHERE tenant_id = $1
              AND status = 'active'
              AND ($2::uuid IS NULL OR supervisor_id = $2)
              AND ($3::uuid IS NULL OR clinician_id = $3)
              AND ($4::uuid[] IS NULL OR supervisor_id = ANY($4))
            ORDER BY supervisor_id, clinician_id
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(filter.supervisor_id.map(|id| id.as_uuid()))
        .bind(filter.clinician_id.map(|id| id.as_uuid()))
        .bind(filter.supervisor_id_in.as_ref().map(uuid_list))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load supervision edges in tenant '{}': {error}",
                tenant_id
            ))
        })?;

        rows.into_iter()
            .map(|row| {
                Ok(SupervisionEdge {
                    supervisor_id: PersonId::from_uuid(row.supervisor_id),
                    clinician_id: PersonId::from_uuid(row.clinician_id),
                    status: decode_status(row.status.as_str(), tenant_id, "supervision_edges")?,
                    start_date: row.start_date,
                    end_date: row.end_date,
                })
            })
            .collect()
    }
}
