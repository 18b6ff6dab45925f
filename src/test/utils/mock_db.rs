use crate::db::{DatabaseTrait, StoredDriver};
use crate::error::AppError;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

/// In-memory stand-in for the SQLite store.
#[derive(Debug, Default)]
pub struct MockDatabase {
    params: Mutex<HashMap<String, String>>,
    drivers: Mutex<HashMap<String, BTreeMap<String, StoredDriver>>>,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DatabaseTrait for MockDatabase {
    fn get_param(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.params.lock().unwrap().get(key).cloned())
    }

    fn set_param(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.params.lock().unwrap().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn save_driver(&self, address: &str, driver: StoredDriver) -> Result<(), AppError> {
        self.drivers.lock().unwrap().entry(address.to_owned()).or_default().insert(driver.driver.clone(), driver);
        Ok(())
    }

    fn load_drivers(&self, address: &str) -> Result<Vec<StoredDriver>, AppError> {
        Ok(self.drivers.lock().unwrap().get(address).map(|d| d.values().cloned().collect()).unwrap_or_default())
    }

    fn delete_node(&self, address: &str) -> Result<(), AppError> {
        self.drivers.lock().unwrap().remove(address);
        Ok(())
    }
}
