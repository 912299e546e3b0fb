//! Agent repository for database operations.

use crate::entities::{Agent, AgentDetailsUpdate, AgentLlm, AgentToolsUpdate, NewAgent};
use crate::types::{DatabaseError, DatabaseResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

const AGENT_COLUMNS: &str = "id, agent_external_id, agent_name, agent_first_message, agent_prompt, agent_llm, \
     organization_id, user_id, end_call_tool, skip_turn_tool, transfer_to_number_tool, \
     transfer_to_number_phone, archived, deleted, created_at, updated_at";

#[derive(Clone)]
pub struct AgentRepository {
    pool: SqlitePool,
}

impl AgentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new agent. Agents start archived and not deleted.
    pub async fn create(&self, request: &NewAgent) -> DatabaseResult<Agent> {
        let id = cuid2::create_id();
        let now = crate::timestamp();

        sqlx::query(
            "INSERT INTO agents (id, agent_external_id, agent_name, agent_first_message, agent_prompt, agent_llm,
                                 organization_id, user_id, archived, deleted, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, TRUE, FALSE, ?, ?)",
        )
        .bind(&id)
        .bind(&request.external_id)
        .bind(&request.name)
        .bind(&request.first_message)
        .bind(&request.prompt)
        .bind(request.llm.as_str())
        .bind(&request.organization_id)
        .bind(&request.user_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(agent_id = %id, external_id = %request.external_id, "agent row inserted");

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| DatabaseError::QueryError(sqlx::Error::RowNotFound))
    }

    /// Find an agent regardless of its deleted flag.
    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Agent>> {
        let row = sqlx::query(&format!("SELECT {AGENT_COLUMNS} FROM agents WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(agent_from_row).transpose()
    }

    pub async fn find_active_by_id(&self, id: &str) -> DatabaseResult<Option<Agent>> {
        let row = sqlx::query(&format!(
            "SELECT {AGENT_COLUMNS} FROM agents WHERE id = ? AND deleted = FALSE"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(agent_from_row).transpose()
    }

    pub async fn find_active_in_organization(
        &self,
        id: &str,
        organization_id: &str,
    ) -> DatabaseResult<Option<Agent>> {
        let row = sqlx::query(&format!(
            "SELECT {AGENT_COLUMNS} FROM agents WHERE id = ? AND organization_id = ? AND deleted = FALSE"
        ))
        .bind(id)
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(agent_from_row).transpose()
    }

    /// All agents of an organization, archived and deleted included, newest first.
    pub async fn list_by_organization(&self, organization_id: &str) -> DatabaseResult<Vec<Agent>> {
        let rows = sqlx::query(&format!(
            "SELECT {AGENT_COLUMNS} FROM agents WHERE organization_id = ?
             ORDER BY created_at DESC, rowid DESC"
        ))
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(agent_from_row).collect()
    }

    pub async fn update_details(&self, id: &str, update: &AgentDetailsUpdate) -> DatabaseResult<()> {
        sqlx::query(
            "UPDATE agents
             SET agent_name = ?, agent_first_message = ?, agent_prompt = ?, agent_llm = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&update.name)
        .bind(&update.first_message)
        .bind(&update.prompt)
        .bind(update.llm.as_str())
        .bind(crate::timestamp())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn set_archived(&self, id: &str, archived: bool) -> DatabaseResult<Option<Agent>> {
        sqlx::query("UPDATE agents SET archived = ?, updated_at = ? WHERE id = ?")
            .bind(archived)
            .bind(crate::timestamp())
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.find_by_id(id).await
    }

    /// Soft delete: the row stays, archived and flagged deleted.
    pub async fn mark_deleted(&self, id: &str) -> DatabaseResult<()> {
        sqlx::query("UPDATE agents SET archived = TRUE, deleted = TRUE, updated_at = ? WHERE id = ?")
            .bind(crate::timestamp())
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(agent_id = %id, "agent row marked deleted");
        Ok(())
    }

    pub async fn update_tools(&self, id: &str, tools: &AgentToolsUpdate) -> DatabaseResult<()> {
        sqlx::query(
            "UPDATE agents
             SET end_call_tool = ?, skip_turn_tool = ?, transfer_to_number_tool = ?,
                 transfer_to_number_phone = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(tools.end_call)
        .bind(tools.skip_turn)
        .bind(tools.transfer_to_number)
        .bind(&tools.transfer_to_number_phone)
        .bind(crate::timestamp())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn agent_from_row(row: &SqliteRow) -> DatabaseResult<Agent> {
    let llm: String = row.try_get("agent_llm")?;
    let llm = llm
        .parse::<AgentLlm>()
        .map_err(|value| DatabaseError::InvalidValue {
            column: "agent_llm",
            value,
        })?;

    Ok(Agent {
        id: row.try_get("id")?,
        external_id: row.try_get("agent_external_id")?,
        name: row.try_get("agent_name")?,
        first_message: row.try_get("agent_first_message")?,
        prompt: row.try_get("agent_prompt")?,
        llm,
        organization_id: row.try_get("organization_id")?,
        user_id: row.try_get("user_id")?,
        end_call_tool: row.try_get("end_call_tool")?,
        skip_turn_tool: row.try_get("skip_turn_tool")?,
        transfer_to_number_tool: row.try_get("transfer_to_number_tool")?,
        transfer_to_number_phone: row.try_get("transfer_to_number_phone")?,
        archived: row.try_get("archived")?,
        deleted: row.try_get("deleted")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
