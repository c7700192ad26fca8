use sqlx::PgPool;
use thetable_core::roles::{ROLE_ADMIN, ROLE_MEMBER};
use thetable_db::repositories::RoleRepo;

/// Full bootstrap test: connect, migrate, verify seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    thetable_db::health_check(&pool).await.unwrap();

    // Both seeded roles must exist and resolve by name.
    for role_name in [ROLE_ADMIN, ROLE_MEMBER] {
        let role = RoleRepo::find_by_name(&pool, role_name)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("role {role_name} should be seeded"));
        assert_eq!(role.name, role_name);
    }

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM roles")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 2, "exactly two roles should be seeded");
}

/// Unknown role IDs resolve to a placeholder name instead of erroring.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolve_unknown_role_name(pool: PgPool) {
    let name = RoleRepo::resolve_name(&pool, 999_999).await.unwrap();
    assert_eq!(name, "unknown");
}
