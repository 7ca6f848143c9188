use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgConnection, PgExecutor, PgPool, Row};
use std::collections::BTreeSet;
use std::time::Duration;
use thiserror::Error;
use crate::auth::RoleType;
use crate::core::{AllocationError, Allocator};
use crate::models::{
    Allocation, Skill, SkillId, Ta, TaSkills, TaSummary, Team, TeamOverview,
};

/// Advisory lock key held by every transaction that rewrites `team_tas`
const ASSIGNMENT_LOCK_KEY: i64 = 0x7461_6d61_7463_68;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),
}

/// PostgreSQL client for rosters and team-TA links
///
/// Loads the team and TA rosters the allocation engine consumes and owns
/// the `team_tas` table the engine's output is written to.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Create a client without opening any connection until first use
    pub fn connect_lazy(database_url: &str) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(1))
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Load every team with its required skills, ordered by id
    pub async fn load_teams(&self) -> Result<Vec<Team>, PostgresError> {
        Ok(fetch_teams(&self.pool).await?)
    }

    /// Load every user with the TA role and their skills, ordered by id
    pub async fn load_tas(&self) -> Result<Vec<Ta>, PostgresError> {
        Ok(fetch_tas(&self.pool).await?)
    }

    /// Replace all team-TA links with the given allocation
    ///
    /// Runs as one transaction under the assignment lock: prior links are
    /// deleted and the new set is inserted, or nothing changes. Returns the
    /// number of links written.
    pub async fn replace_assignments(&self, allocation: &Allocation) -> Result<u64, PostgresError> {
        let mut tx = self.pool.begin().await?;

        lock_assignments(&mut tx).await?;
        let inserted = write_links(&mut tx, allocation).await?;

        tx.commit().await?;
        Ok(inserted)
    }

    /// Load both rosters, run the allocator and replace all links in one locked transaction
    ///
    /// Concurrent runs are serialized on the assignment lock, so the stored
    /// links always come from exactly one run over the rosters it read. An
    /// engine error rolls the transaction back and leaves the old links.
    pub async fn allocate_and_replace(
        &self,
        allocator: &Allocator,
    ) -> Result<(Allocation, u64), PostgresError> {
        let mut tx = self.pool.begin().await?;

        // Read committed: statements after the lock see the previous run's links
        lock_assignments(&mut tx).await?;

        let teams = fetch_teams(&mut *tx).await?;
        let tas = fetch_tas(&mut *tx).await?;

        tracing::info!(
            "Running allocation for {} teams and {} TAs (n: {})",
            teams.len(),
            tas.len(),
            allocator.tas_per_team()
        );

        let allocation = allocator.allocate(&teams, &tas)?;
        let inserted = write_links(&mut tx, &allocation).await?;

        tx.commit().await?;
        Ok((allocation, inserted))
    }

    /// Every team with its skills and currently linked TAs
    pub async fn match_overview(&self) -> Result<Vec<TeamOverview>, PostgresError> {
        let teams = sqlx::query("SELECT id, name FROM teams ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let skills = sqlx::query(
            r#"
            SELECT ts.team_id, s.id, s.name, s.bg_color, s.color, s.icon
            FROM team_skills ts
            JOIN skills s ON s.id = ts.skill_id
            ORDER BY ts.team_id, s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let links = sqlx::query(
            r#"
            SELECT tt.team_id, u.id, u.name
            FROM team_tas tt
            JOIN users u ON u.id = tt.ta_id
            ORDER BY tt.team_id, tt.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let overview = teams
            .iter()
            .map(|team| {
                let team_id: i32 = team.get("id");
                TeamOverview {
                    team_id,
                    team_name: team.get("name"),
                    skills: skills
                        .iter()
                        .filter(|row| row.get::<i32, _>("team_id") == team_id)
                        .map(|row| Skill {
                            id: row.get("id"),
                            name: row.get("name"),
                            bg_color: row.get("bg_color"),
                            color: row.get("color"),
                            icon: row.get("icon"),
                        })
                        .collect(),
                    tas: links
                        .iter()
                        .filter(|row| row.get::<i32, _>("team_id") == team_id)
                        .map(|row| TaSummary {
                            id: row.get("id"),
                            name: row.get("name"),
                        })
                        .collect(),
                }
            })
            .collect();

        Ok(overview)
    }

    /// TA skill sets for display next to the overview
    pub async fn ta_skills(&self) -> Result<Vec<TaSkills>, PostgresError> {
        Ok(self
            .load_tas()
            .await?
            .into_iter()
            .map(|ta| TaSkills {
                id: ta.id,
                name: ta.name,
                skills: ta.skills.into_iter().collect(),
            })
            .collect())
    }

    /// Role of the user with the given username, if the user exists
    pub async fn user_role(&self, username: &str) -> Result<Option<RoleType>, PostgresError> {
        let query = r#"
            SELECT r.role
            FROM users u
            JOIN roles r ON r.id = u.role_id
            WHERE u.username = $1
        "#;

        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get("role")))
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

async fn fetch_teams<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Team>, sqlx::Error> {
    let query = r#"
        SELECT t.id, t.name, ts.skill_id
        FROM teams t
        LEFT JOIN team_skills ts ON ts.team_id = t.id
        ORDER BY t.id, ts.skill_id
    "#;

    let rows = sqlx::query(query).fetch_all(executor).await?;

    let teams: Vec<Team> = fold_skill_rows(rows.iter().map(skill_row))
        .into_iter()
        .map(|(id, name, skills)| Team { id, name, skills })
        .collect();

    tracing::debug!("Loaded {} teams", teams.len());
    Ok(teams)
}

async fn fetch_tas<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Ta>, sqlx::Error> {
    let query = r#"
        SELECT u.id, u.name, us.skill_id
        FROM users u
        JOIN roles r ON r.id = u.role_id
        LEFT JOIN user_skills us ON us.user_id = u.id
        WHERE r.role = $1
        ORDER BY u.id, us.skill_id
    "#;

    let rows = sqlx::query(query)
        .bind(RoleType::Ta)
        .fetch_all(executor)
        .await?;

    let tas: Vec<Ta> = fold_skill_rows(rows.iter().map(skill_row))
        .into_iter()
        .map(|(id, name, skills)| Ta { id, name, skills })
        .collect();

    tracing::debug!("Loaded {} TAs", tas.len());
    Ok(tas)
}

/// Block until no other transaction is rewriting `team_tas`; released on commit or rollback
async fn lock_assignments(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(ASSIGNMENT_LOCK_KEY)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

async fn write_links(conn: &mut PgConnection, allocation: &Allocation) -> Result<u64, sqlx::Error> {
    let (team_ids, ta_ids): (Vec<i32>, Vec<i32>) = allocation
        .links()
        .map(|link| (link.team_id, link.ta_id))
        .unzip();

    let cleared = sqlx::query("DELETE FROM team_tas")
        .execute(&mut *conn)
        .await?
        .rows_affected();

    let inserted = sqlx::query(
        r#"
        INSERT INTO team_tas (team_id, ta_id)
        SELECT * FROM UNNEST($1::int4[], $2::int4[])
        "#,
    )
    .bind(&team_ids)
    .bind(&ta_ids)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    tracing::info!(
        "Replaced team-TA links: cleared {}, inserted {}",
        cleared,
        inserted
    );

    Ok(inserted)
}

fn skill_row(row: &PgRow) -> (i32, String, Option<SkillId>) {
    (row.get("id"), row.get("name"), row.get("skill_id"))
}

/// Collapse `(id, name, skill)` join rows, ordered by id, into one entry per id
///
/// A `None` skill comes from the LEFT JOIN on an entity without skills.
fn fold_skill_rows<I>(rows: I) -> Vec<(i32, String, BTreeSet<SkillId>)>
where
    I: IntoIterator<Item = (i32, String, Option<SkillId>)>,
{
    let mut grouped: Vec<(i32, String, BTreeSet<SkillId>)> = Vec::new();

    for (id, name, skill) in rows {
        match grouped.last_mut() {
            Some((last_id, _, skills)) if *last_id == id => {
                skills.extend(skill);
            }
            _ => grouped.push((id, name, skill.into_iter().collect())),
        }
    }

    grouped
}
