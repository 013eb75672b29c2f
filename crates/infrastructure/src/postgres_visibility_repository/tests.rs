use std::collections::BTreeSet;
use std::sync::Arc;

use carelink_application::{
    DelegationLinkRepository, ProfessionalRegistrationRepository, ResourceAccessService,
    SupervisionEdgeFilter, SupervisionEdgeRepository, VisibilityService,
};
use carelink_core::TenantId;
use carelink_domain::{LinkStatus, Ownership, PersonId, VisibilityScope};
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresVisibilityRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres visibility tests: {error}");
    }

    Some(pool)
}

async fn ensure_tenant(pool: &PgPool, tenant_id: TenantId, name: &str) {
    let insert = sqlx::query(
        r#"
            INSERT INTO tenants (id, name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            "#,
    )
    .bind(tenant_id.as_uuid())
    .bind(name)
    .execute(pool)
    .await;

    assert!(insert.is_ok());
}

async fn insert_registration(
    pool: &PgPool,
    tenant_id: TenantId,
    person_id: PersonId,
    role_title: &str,
) {
    let insert = sqlx::query(
        r#"
            INSERT INTO professional_registrations (tenant_id, person_id, role_title)
            VALUES ($1, $2, $3)
            "#,
    )
    .bind(tenant_id.as_uuid())
    .bind(person_id.as_uuid())
    .bind(role_title)
    .execute(pool)
    .await;

    assert!(insert.is_ok());
}

async fn insert_edge(
    pool: &PgPool,
    tenant_id: TenantId,
    supervisor_id: PersonId,
    clinician_id: PersonId,
    status: LinkStatus,
) {
    let insert = sqlx::query(
        r#"
            INSERT INTO supervision_edges (tenant_id, supervisor_id, clinician_id, status, start_date)
            VALUES ($1, $2, $3, $4, now() - interval '30 days')
            "#,
    )
    .bind(tenant_id.as_uuid())
    .bind(supervisor_id.as_uuid())
    .bind(clinician_id.as_uuid())
    .bind(status.as_str())
    .execute(pool)
    .await;

    assert!(insert.is_ok());
}

async fn insert_link(
    pool: &PgPool,
    tenant_id: TenantId,
    therapist_id: PersonId,
    client_id: PersonId,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
) {
    let insert = sqlx::query(
        r#"
            INSERT INTO delegation_links (tenant_id, therapist_id, client_id, status, start_date, end_date)
            VALUES ($1, $2, $3, 'active', $4, $5)
            "#,
    )
    .bind(tenant_id.as_uuid())
    .bind(therapist_id.as_uuid())
    .bind(client_id.as_uuid())
    .bind(start_date)
    .bind(end_date)
    .execute(pool)
    .await;

    assert!(insert.is_ok());
}

#[tokio::test]
async fn registrations_are_scoped_to_tenant_and_person() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresVisibilityRepository::new(pool.clone());
    let tenant_id = TenantId::new();
    let other_tenant_id = TenantId::new();
    ensure_tenant(&pool, tenant_id, "Clinic A").await;
    ensure_tenant(&pool, other_tenant_id, "Clinic B").await;

    let person_id = PersonId::new();
    insert_registration(&pool, tenant_id, person_id, "Psicóloga").await;
    insert_registration(&pool, tenant_id, person_id, "Supervisora").await;
    insert_registration(&pool, other_tenant_id, person_id, "Diretora").await;

    let registrations = repository
        .list_professional_registrations(tenant_id, person_id)
        .await;
    let Ok(registrations) = registrations else {
        panic!("registration lookup failed");
    };

    let titles: Vec<&str> = registrations
        .iter()
        .map(|registration| registration.role_title.as_str())
        .collect();
    assert_eq!(titles, vec!["Psicóloga", "Supervisora"]);
}

#[tokio::test]
async fn supervision_filters_return_only_active_edges() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresVisibilityRepository::new(pool.clone());
    let tenant_id = TenantId::new();
    ensure_tenant(&pool, tenant_id, "Supervision Clinic").await;

    let supervisor_id = PersonId::new();
    let active_id = PersonId::new();
    let ended_id = PersonId::new();
    let second_id = PersonId::new();
    insert_edge(&pool, tenant_id, supervisor_id, active_id, LinkStatus::Active).await;
    insert_edge(&pool, tenant_id, supervisor_id, ended_id, LinkStatus::Ended).await;
    insert_edge(&pool, tenant_id, active_id, second_id, LinkStatus::Active).await;

    let direct = repository
        .list_active_supervision_edges(
            tenant_id,
            &SupervisionEdgeFilter::supervised_by(supervisor_id),
        )
        .await;
    assert!(matches!(&direct, Ok(edges) if edges.len() == 1 && edges[0].clinician_id == active_id));

    let upward = repository
        .list_active_supervision_edges(tenant_id, &SupervisionEdgeFilter::supervising(active_id))
        .await;
    assert!(
        matches!(&upward, Ok(edges) if edges.len() == 1 && edges[0].supervisor_id == supervisor_id)
    );

    let second_hop = repository
        .list_active_supervision_edges(
            tenant_id,
            &SupervisionEdgeFilter::supervised_by_any(BTreeSet::from([active_id, ended_id])),
        )
        .await;
    assert!(
        matches!(&second_hop, Ok(edges) if edges.len() == 1 && edges[0].clinician_id == second_id)
    );

    let empty = repository
        .list_active_supervision_edges(
            tenant_id,
            &SupervisionEdgeFilter::supervised_by_any(BTreeSet::new()),
        )
        .await;
    assert!(matches!(empty, Ok(edges) if edges.is_empty()));
}

#[tokio::test]
async fn delegation_lookup_honors_time_window() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresVisibilityRepository::new(pool.clone());
    let tenant_id = TenantId::new();
    ensure_tenant(&pool, tenant_id, "Delegation Clinic").await;

    let now = Utc::now();
    let therapist_id = PersonId::new();
    let current_client = PersonId::new();
    let expired_client = PersonId::new();
    let future_client = PersonId::new();
    insert_link(
        &pool,
        tenant_id,
        therapist_id,
        current_client,
        now - Duration::days(3),
        Some(now + Duration::days(3)),
    )
    .await;
    insert_link(
        &pool,
        tenant_id,
        therapist_id,
        expired_client,
        now - Duration::days(10),
        Some(now - Duration::days(1)),
    )
    .await;
    insert_link(
        &pool,
        tenant_id,
        therapist_id,
        future_client,
        now + Duration::days(1),
        None,
    )
    .await;

    let therapist_ids = BTreeSet::from([therapist_id]);
    let current = repository
        .find_valid_delegation_link(tenant_id, &therapist_ids, current_client, now)
        .await;
    let expired = repository
        .find_valid_delegation_link(tenant_id, &therapist_ids, expired_client, now)
        .await;
    let future = repository
        .find_valid_delegation_link(tenant_id, &therapist_ids, future_client, now)
        .await;

    assert!(matches!(current, Ok(Some(link)) if link.therapist_id == therapist_id));
    assert!(matches!(expired, Ok(None)));
    assert!(matches!(future, Ok(None)));

    let clients = repository
        .list_clients_with_valid_links(tenant_id, Some(&therapist_ids), now)
        .await;
    assert!(matches!(clients, Ok(ids) if ids == vec![current_client]));
}

#[tokio::test]
async fn senior_supervisor_reaches_client_through_second_hop_link() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = Arc::new(PostgresVisibilityRepository::new(pool.clone()));
    let tenant_id = TenantId::new();
    ensure_tenant(&pool, tenant_id, "End To End Clinic").await;

    let caller_id = PersonId::new();
    let first_id = PersonId::new();
    let second_id = PersonId::new();
    let client_id = PersonId::new();
    insert_registration(&pool, tenant_id, caller_id, "Supervisor Sênior").await;
    insert_edge(&pool, tenant_id, caller_id, first_id, LinkStatus::Active).await;
    insert_edge(&pool, tenant_id, first_id, second_id, LinkStatus::Active).await;
    insert_link(
        &pool,
        tenant_id,
        second_id,
        client_id,
        Utc::now() - Duration::days(1),
        None,
    )
    .await;

    let visibility_service = VisibilityService::new(repository.clone(), repository.clone());
    let resource_access_service = ResourceAccessService::new(repository);

    let scope = visibility_service
        .resolve_visibility_scope(tenant_id, caller_id)
        .await;
    let Ok(scope) = scope else {
        panic!("scope resolution failed");
    };
    assert_eq!(
        scope,
        VisibilityScope::partial(caller_id, [first_id, second_id])
    );

    let granted = resource_access_service
        .authorize(
            tenant_id,
            &Ownership::ClientOwned { client_id },
            caller_id,
            &scope,
        )
        .await;
    assert!(matches!(granted, Ok(true)));
}
