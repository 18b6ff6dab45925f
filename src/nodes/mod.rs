pub mod controller;
pub mod daily;
pub mod host;
pub mod uom;

use crate::{error::AppError, weather::convert::WeatherIcon};
use host::NodeHost;
use serde::{Deserialize, Serialize};
use tracing::trace;
use uom::{DriverKind, UnitSystem};

/// ISY driver ids.
pub mod drv {
    pub const ST: &str = "ST";
    pub const CLITEMP: &str = "CLITEMP";
    pub const CLIHUM: &str = "CLIHUM";
    pub const DEWPT: &str = "DEWPT";
    pub const BARPRES: &str = "BARPRES";
    pub const WINDDIR: &str = "WINDDIR";
    pub const DISTANC: &str = "DISTANC";
    pub const RAINRT: &str = "RAINRT";
    pub const UV: &str = "UV";
    pub const GV0: &str = "GV0";
    pub const GV1: &str = "GV1";
    pub const GV4: &str = "GV4";
    pub const GV5: &str = "GV5";
    pub const GV7: &str = "GV7";
    pub const GV9: &str = "GV9";
    pub const GV10: &str = "GV10";
    pub const GV13: &str = "GV13";
    pub const GV14: &str = "GV14";
    pub const GV18: &str = "GV18";
    pub const GV19: &str = "GV19";
    pub const GV20: &str = "GV20";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub driver: String,
    pub value: f64,
    pub uom: u16,
    #[serde(skip)]
    pub kind: Option<DriverKind>,
}

impl Driver {
    pub fn new(driver: &str, kind: DriverKind, units: UnitSystem) -> Self {
        Self { driver: driver.to_owned(), value: 0., uom: kind.uom(units), kind: Some(kind) }
    }
}

/// What the host needs to register a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub address: String,
    pub primary: String,
    pub name: String,
    pub node_def_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub info: NodeInfo,
    pub drivers: Vec<Driver>,
}

impl Node {
    pub fn new(info: NodeInfo, layout: &[(&str, DriverKind)], units: UnitSystem) -> Self {
        let drivers = layout.iter().map(|(id, kind)| Driver::new(id, *kind, units)).collect();
        Self { info, drivers }
    }

    pub fn address(&self) -> &str {
        &self.info.address
    }

    pub fn driver(&self, id: &str) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.driver == id)
    }

    /// Weather icon currently held by the conditions driver.
    pub fn conditions(&self) -> Option<WeatherIcon> {
        self.driver(drv::GV13).and_then(|d| WeatherIcon::from_code(d.value as u8))
    }

    pub fn set_driver_uom(&mut self, units: UnitSystem) {
        for driver in self.drivers.iter_mut() {
            if let Some(kind) = driver.kind {
                driver.uom = kind.uom(units);
            }
        }
    }

    /// Publishes `value` when it differs from the last one, or always with `force`.
    /// Returns whether the host was told.
    pub fn update_driver(&mut self, id: &str, value: f64, force: bool, host: &dyn NodeHost) -> Result<bool, AppError> {
        let address = self.info.address.clone();
        let Some(driver) = self.drivers.iter_mut().find(|d| d.driver == id) else {
            trace!(node = %address, driver = id, "Unknown driver ignored.");
            return Ok(false);
        };
        if driver.value == value && !force {
            return Ok(false);
        }
        let previous = driver.value;
        driver.value = value;
        if let Err(e) = host.set_driver(&address, driver) {
            // not published, so retried on the next update
            driver.value = previous;
            return Err(e);
        }
        Ok(true)
    }

    pub fn report_drivers(&self, host: &dyn NodeHost) -> Result<(), AppError> {
        for driver in &self.drivers {
            host.set_driver(self.address(), driver)?;
        }
        Ok(())
    }
}
