use super::{Credentials, Provider, Session, UserId};
use log::{debug, info, trace};
use rusqlite::{Connection, OptionalExtension, Result as SqlResult, Row};

type Result<T> = SqlResult<Option<T>>;

/// Schema migrations, applied in order.
/// `PRAGMA user_version` records how many have run.
const MIGRATIONS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS oauth (
        provider      TEXT NOT NULL,
        user_id       INTEGER NOT NULL,
        username      TEXT NOT NULL,
        access_token  TEXT NOT NULL,
        refresh_token TEXT NOT NULL,
        expires_at    INTEGER NOT NULL,
        PRIMARY KEY (provider, user_id)
    )",
    "CREATE TABLE IF NOT EXISTS sessions (
        token      TEXT PRIMARY KEY,
        user_id    INTEGER NOT NULL,
        created_at INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS sessions_user ON sessions (user_id)",
    "ALTER TABLE oauth ADD COLUMN scopes TEXT NOT NULL DEFAULT ''",
];

pub struct Database {
    conn: Connection,
}

/// Build the database.
impl Database {
    /// Open (or create) the database at `path` and bring its schema up to date.
    /// `":memory:"` gives a private in-memory database.
    pub fn build(path: &str) -> SqlResult<Database> {
        let conn = Connection::open(path)?;
        trace!("Opened database connection to {}", path);

        let mut db = Database { conn };
        db.migrate()?;
        info!("Connected to database: {}", path);

        Ok(db)
    }

    fn migrate(&mut self) -> SqlResult<()> {
        let version = self.schema_version()?;

        for (index, migration) in MIGRATIONS.iter().enumerate().skip(version) {
            info!("Running migration {}", index + 1);
            let tx = self.conn.transaction()?;
            tx.execute_batch(migration)?;
            tx.pragma_update(None, "user_version", (index + 1) as i64)?;
            tx.commit()?;
        }

        Ok(())
    }

    pub fn schema_version(&self) -> SqlResult<usize> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;
        Ok(version as usize)
    }
}

/// OAuth stuff
impl Database {
    pub fn set_credentials(&self, provider: Provider, credentials: &Credentials) -> SqlResult<()> {
        debug!(
            "Saving {} credentials for user {}",
            provider, credentials.user_id
        );
        self.conn.execute(
            "INSERT OR REPLACE INTO oauth
                (provider, user_id, username, access_token, refresh_token, expires_at, scopes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                provider.slug(),
                credentials.user_id,
                credentials.username.as_str(),
                credentials.access_token.as_str(),
                credentials.refresh_token.as_str(),
                credentials.expires_at,
                credentials.scopes.join(","),
            ),
        )?;
        Ok(())
    }

    pub fn get_credentials(&self, provider: Provider, user_id: UserId) -> Result<Credentials> {
        debug!("Getting {} credentials for user {}", provider, user_id);
        self.conn
            .query_row(
                "SELECT user_id, username, access_token, refresh_token, expires_at, scopes
                 FROM oauth WHERE provider=?1 AND user_id=?2",
                (provider.slug(), user_id),
                map_credentials,
            )
            .optional()
    }

    /// Returns whether there was anything to delete.
    pub fn delete_credentials(&self, provider: Provider, user_id: UserId) -> SqlResult<bool> {
        debug!("Deleting {} credentials for user {}", provider, user_id);
        let deleted = self.conn.execute(
            "DELETE FROM oauth WHERE provider=?1 AND user_id=?2",
            (provider.slug(), user_id),
        )?;
        Ok(deleted > 0)
    }

    /// Remove every trace of a user: all provider credentials and all sessions.
    pub fn delete_account(&mut self, user_id: UserId) -> SqlResult<()> {
        debug!("Deleting account {}", user_id);
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM oauth WHERE user_id=?1", (user_id,))?;
        tx.execute("DELETE FROM sessions WHERE user_id=?1", (user_id,))?;
        tx.commit()?;
        info!("Deleted account {}", user_id);
        Ok(())
    }
}

/// Session stuff
impl Database {
    pub fn add_session(&self, session: &Session) -> SqlResult<()> {
        debug!("Adding session for user {}", session.user_id);
        self.conn.execute(
            "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
            (session.token.as_str(), session.user_id, session.created_at),
        )?;
        Ok(())
    }

    pub fn get_session_from_token(&self, token: &str) -> Result<Session> {
        trace!("Getting session from token");
        self.conn
            .query_row(
                "SELECT token, user_id, created_at FROM sessions WHERE token=?1",
                (token,),
                |row| Ok(Session::new(row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()
    }

    pub fn delete_session(&self, token: &str) -> SqlResult<()> {
        debug!("Deleting session");
        self.conn
            .execute("DELETE FROM sessions WHERE token=?1", (token,))?;
        Ok(())
    }

    /// Delete sessions created at or before `cutoff` (unix seconds).
    pub fn purge_sessions_before(&self, cutoff: i64) -> SqlResult<usize> {
        let purged = self
            .conn
            .execute("DELETE FROM sessions WHERE created_at <= ?1", (cutoff,))?;
        if purged > 0 {
            info!("Purged {} expired sessions", purged);
        }
        Ok(purged)
    }
}

fn map_credentials(row: &Row) -> SqlResult<Credentials> {
    let scopes: String = row.get(5)?;
    Ok(Credentials {
        user_id: row.get(0)?,
        username: row.get(1)?,
        access_token: row.get(2)?,
        refresh_token: row.get(3)?,
        expires_at: row.get(4)?,
        scopes: scopes
            .split(',')
            .filter(|scope| !scope.is_empty())
            .map(str::to_string)
            .collect(),
    })
}
