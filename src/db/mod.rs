use crate::error::AppError;
use rusqlite::{params, Connection, OptionalExtension, Result};
use std::sync::mpsc::{self, Sender};
use std::thread;
use tracing::error;

pub const LOG_LEVEL_KEY: &str = "log_level";
pub const CUSTOM_PARAMS_KEY: &str = "custom_params";

/// Last value a driver was published with.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDriver {
    pub driver: String,
    pub value: f64,
    pub uom: u16,
    pub updated: i64,
}

pub trait DatabaseTrait: Send + Sync {
    fn get_param(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set_param(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn save_driver(&self, address: &str, driver: StoredDriver) -> Result<(), AppError>;
    fn load_drivers(&self, address: &str) -> Result<Vec<StoredDriver>, AppError>;
    fn delete_node(&self, address: &str) -> Result<(), AppError>;
}

pub enum DatabaseCommand {
    GetParam { key: String, response: Sender<Result<Option<String>>> },
    SetParam { key: String, value: String, response: Sender<Result<()>> },
    SaveDriver { address: String, driver: StoredDriver, response: Sender<Result<()>> },
    LoadDrivers { address: String, response: Sender<Result<Vec<StoredDriver>>> },
    DeleteNode { address: String, response: Sender<Result<()>> },
}

/// SQLite store. The connection lives on its own thread and is fed through a channel.
#[derive(Clone)]
pub struct Database {
    pub sender: Sender<DatabaseCommand>,
}

impl Database {
    pub fn new(path: &str) -> Result<Self, AppError> {
        let (tx, rx) = mpsc::channel();

        let conn = Connection::open(path)?;
        initialize(&conn)?;
        thread::spawn(move || {
            while let Ok(command) = rx.recv() {
                match command {
                    DatabaseCommand::GetParam { key, response } => {
                        let _ = response.send(get_param(&conn, &key));
                    }
                    DatabaseCommand::SetParam { key, value, response } => {
                        let _ = response.send(set_param(&conn, &key, &value));
                    }
                    DatabaseCommand::SaveDriver { address, driver, response } => {
                        let _ = response.send(save_driver(&conn, &address, &driver));
                    }
                    DatabaseCommand::LoadDrivers { address, response } => {
                        let _ = response.send(load_drivers(&conn, &address));
                    }
                    DatabaseCommand::DeleteNode { address, response } => {
                        let res = conn.execute("DELETE FROM drivers WHERE address = ?1", params![address]).map(|_| ());
                        let _ = response.send(res);
                    }
                }
            }
            error!("Database channel closed, stopping database thread.");
        });

        Ok(Self { sender: tx })
    }

    fn request<T>(&self, build: impl FnOnce(Sender<Result<T>>) -> DatabaseCommand) -> Result<T, AppError> {
        let (response_tx, response_rx) = mpsc::channel();
        self.sender.send(build(response_tx)).map_err(|_| AppError::DbChannel)?;
        Ok(response_rx.recv().map_err(|_| AppError::DbChannel)??)
    }
}

impl DatabaseTrait for Database {
    fn get_param(&self, key: &str) -> Result<Option<String>, AppError> {
        self.request(|response| DatabaseCommand::GetParam { key: key.to_owned(), response })
    }

    fn set_param(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.request(|response| DatabaseCommand::SetParam { key: key.to_owned(), value: value.to_owned(), response })
    }

    fn save_driver(&self, address: &str, driver: StoredDriver) -> Result<(), AppError> {
        self.request(|response| DatabaseCommand::SaveDriver { address: address.to_owned(), driver, response })
    }

    fn load_drivers(&self, address: &str) -> Result<Vec<StoredDriver>, AppError> {
        self.request(|response| DatabaseCommand::LoadDrivers { address: address.to_owned(), response })
    }

    fn delete_node(&self, address: &str) -> Result<(), AppError> {
        self.request(|response| DatabaseCommand::DeleteNode { address: address.to_owned(), response })
    }
}

fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS params (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS drivers (
            address TEXT NOT NULL,
            driver TEXT NOT NULL,
            value REAL NOT NULL,
            uom INTEGER NOT NULL,
            updated INTEGER NOT NULL,
            PRIMARY KEY (address, driver)
        );",
    )
}

fn get_param(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM params WHERE key = ?1", params![key], |row| row.get(0)).optional()
}

fn set_param(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO params (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )
    .map(|_| ())
}

fn save_driver(conn: &Connection, address: &str, driver: &StoredDriver) -> Result<()> {
    conn.execute(
        "INSERT INTO drivers (address, driver, value, uom, updated) VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(address, driver) DO UPDATE SET value = excluded.value, uom = excluded.uom, updated = excluded.updated",
        params![address, driver.driver, driver.value, driver.uom, driver.updated],
    )
    .map(|_| ())
}

fn load_drivers(conn: &Connection, address: &str) -> Result<Vec<StoredDriver>> {
    let mut stmt = conn.prepare("SELECT driver, value, uom, updated FROM drivers WHERE address = ?1 ORDER BY driver")?;
    let rows = stmt.query_map(params![address], |row| {
        Ok(StoredDriver { driver: row.get(0)?, value: row.get(1)?, uom: row.get(2)?, updated: row.get(3)? })
    })?;
    rows.collect()
}
