use crate::{
    error::AppError,
    nodes::{host::NodeHost, Driver, NodeInfo},
};
use mockall::mock;
use std::{collections::BTreeMap, sync::Mutex};

mock! {
    pub Host {}
    impl NodeHost for Host {
        fn add_node(&self, node: &NodeInfo) -> Result<(), AppError>;
        fn del_node(&self, address: &str) -> Result<(), AppError>;
        fn set_driver(&self, address: &str, driver: &Driver) -> Result<(), AppError>;
        fn add_notice(&self, key: &str, text: &str) -> Result<(), AppError>;
        fn remove_notices_all(&self) -> Result<(), AppError>;
    }
}

/// Records everything the node server tells the hub.
#[derive(Debug, Default)]
pub struct MemoryHost {
    nodes: Mutex<BTreeMap<String, NodeInfo>>,
    deleted: Mutex<Vec<String>>,
    drivers: Mutex<Vec<(String, String, f64, u16)>>,
    notices: Mutex<BTreeMap<String, String>>,
}

impl MemoryHost {
    /// Every (value, uom) published for a driver, oldest first.
    pub fn published(&self, address: &str, driver: &str) -> Vec<(f64, u16)> {
        self.drivers
            .lock()
            .unwrap()
            .iter()
            .filter(|(a, d, _, _)| a == address && d == driver)
            .map(|(_, _, value, uom)| (*value, *uom))
            .collect()
    }

    pub fn last(&self, address: &str, driver: &str) -> Option<(f64, u16)> {
        self.published(address, driver).last().copied()
    }

    pub fn node_addresses(&self) -> Vec<String> {
        self.nodes.lock().unwrap().keys().cloned().collect()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn notice_keys(&self) -> Vec<String> {
        self.notices.lock().unwrap().keys().cloned().collect()
    }
}

impl NodeHost for MemoryHost {
    fn add_node(&self, node: &NodeInfo) -> Result<(), AppError> {
        self.nodes.lock().unwrap().insert(node.address.clone(), node.clone());
        Ok(())
    }

    fn del_node(&self, address: &str) -> Result<(), AppError> {
        if self.nodes.lock().unwrap().remove(address).is_none() {
            return Err(AppError::Host(format!("no node {}", address)));
        }
        self.deleted.lock().unwrap().push(address.to_owned());
        Ok(())
    }

    fn set_driver(&self, address: &str, driver: &Driver) -> Result<(), AppError> {
        self.drivers.lock().unwrap().push((address.to_owned(), driver.driver.clone(), driver.value, driver.uom));
        Ok(())
    }

    fn add_notice(&self, key: &str, text: &str) -> Result<(), AppError> {
        self.notices.lock().unwrap().insert(key.to_owned(), text.to_owned());
        Ok(())
    }

    fn remove_notices_all(&self) -> Result<(), AppError> {
        self.notices.lock().unwrap().clear();
        Ok(())
    }
}
