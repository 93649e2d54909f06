//! Ticket repository contract and SQLite implementation.
//!
//! # Invariants
//! - `put` is an upsert keyed by id.
//! - `delete` of a nonexistent id reports success without state change.
//! - `get_all` returns newest tickets first for the wall view.

use crate::model::ticket::{Ticket, TicketId};
use crate::repo::{ensure_ready, RepoResult};
use rusqlite::{params, Connection, Row};

const TICKET_SELECT_SQL: &str = "SELECT id, image, rotation, created_at FROM tickets";

/// Repository interface for ticket mementos.
pub trait TicketRepository {
    fn put(&self, ticket: &Ticket) -> RepoResult<TicketId>;
    fn delete(&self, id: TicketId) -> RepoResult<()>;
    fn get_all(&self) -> RepoResult<Vec<Ticket>>;
}

/// SQLite-backed ticket repository.
pub struct SqliteTicketRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTicketRepository<'conn> {
    /// Wraps a migrated connection, rejecting one that is not ready.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_ready(conn, &["tickets"])?;
        Ok(Self { conn })
    }
}

impl TicketRepository for SqliteTicketRepository<'_> {
    fn put(&self, ticket: &Ticket) -> RepoResult<TicketId> {
        ticket.validate()?;

        self.conn.execute(
            "INSERT INTO tickets (id, image, rotation, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                image = excluded.image,
                rotation = excluded.rotation,
                created_at = excluded.created_at;",
            params![
                ticket.id,
                ticket.image.as_str(),
                ticket.rotation,
                ticket.created_at.as_str(),
            ],
        )?;

        Ok(ticket.id)
    }

    fn delete(&self, id: TicketId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM tickets WHERE id = ?1;", [id])?;
        Ok(())
    }

    fn get_all(&self) -> RepoResult<Vec<Ticket>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TICKET_SELECT_SQL} ORDER BY id DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut tickets = Vec::new();

        while let Some(row) = rows.next()? {
            tickets.push(parse_ticket_row(row)?);
        }

        Ok(tickets)
    }
}

fn parse_ticket_row(row: &Row<'_>) -> RepoResult<Ticket> {
    let ticket = Ticket {
        id: row.get("id")?,
        image: row.get("image")?,
        rotation: row.get("rotation")?,
        created_at: row.get("created_at")?,
    };
    ticket.validate()?;
    Ok(ticket)
}
