//! The controller node: owns the custom parameters, the forecast nodes and the
//! current conditions, and turns provider responses into driver updates.
use super::{
    daily::{self, new_daily_node},
    drv,
    host::NodeHost,
    uom::{DriverKind, UnitSystem},
    Node, NodeInfo,
};
use crate::{
    config::params::{Notice, ParamUpdate, Params, MAX_FORECAST_DAYS},
    db::{DatabaseTrait, StoredDriver, CUSTOM_PARAMS_KEY},
    error::AppError,
    weather::{
        assembler::{assemble_conditions, Site},
        convert::WeatherIcon,
        model::ForecastResponse,
    },
};
use std::collections::BTreeMap;
use tracing::{debug, error, info, warn};

pub const ADDRESS: &str = "weather";
pub const NODE_DEF_ID: &str = "dsweather";
pub const NAME: &str = "DarkSky";
pub const ERROR_NOTICE: &str = "error";

pub const DRIVERS: [(&str, DriverKind); 16] = [
    (drv::ST, DriverKind::Status),
    (drv::CLITEMP, DriverKind::Temperature),
    (drv::GV0, DriverKind::Temperature), // apparent
    (drv::CLIHUM, DriverKind::Percent),
    (drv::DEWPT, DriverKind::Temperature),
    (drv::BARPRES, DriverKind::Pressure),
    (drv::GV4, DriverKind::Speed),
    (drv::WINDDIR, DriverKind::Direction),
    (drv::GV5, DriverKind::Speed), // gust
    (drv::GV13, DriverKind::Conditions),
    (drv::GV14, DriverKind::Percent), // clouds
    (drv::DISTANC, DriverKind::Distance),
    (drv::GV18, DriverKind::Percent), // precip chance
    (drv::RAINRT, DriverKind::RainRate),
    (drv::UV, DriverKind::UvIndex),
    (drv::GV10, DriverKind::Index), // ozone
];

pub fn new_controller_node(units: UnitSystem) -> Node {
    let info = NodeInfo {
        address: ADDRESS.to_owned(),
        primary: ADDRESS.to_owned(),
        name: NAME.to_owned(),
        node_def_id: NODE_DEF_ID.to_owned(),
    };
    Node::new(info, &DRIVERS, units)
}

#[derive(Debug)]
pub struct Controller {
    pub params: Params,
    pub configured: bool,
    pub nodes: BTreeMap<String, Node>,
    notices: BTreeMap<String, String>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        let params = Params::default();
        let nodes = BTreeMap::from([(ADDRESS.to_owned(), new_controller_node(params.units))]);
        Self { params, configured: false, nodes, notices: BTreeMap::new() }
    }

    /// Registers the controller, applies the initial parameters and creates the forecast nodes.
    pub fn start(
        &mut self, initial: &BTreeMap<String, String>, host: &dyn NodeHost, db: &dyn DatabaseTrait,
    ) -> Result<(), AppError> {
        info!("Starting node server");
        if let Some(node) = self.nodes.get(ADDRESS) {
            host.add_node(&node.info)?;
        }
        self.check_params(initial, host)?;
        self.discover(host, db)?;
        self.set_status(true, host)?;
        info!("Node server started");
        Ok(())
    }

    pub fn stop(&mut self, host: &dyn NodeHost) -> Result<(), AppError> {
        info!("Stopping node server");
        self.set_status(false, host)
    }

    fn set_status(&mut self, up: bool, host: &dyn NodeHost) -> Result<(), AppError> {
        match self.nodes.get_mut(ADDRESS) {
            Some(node) => node.update_driver(drv::ST, if up { 1. } else { 0. }, true, host).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Initial parameter check: every notice is raised again from scratch.
    pub fn check_params(&mut self, map: &BTreeMap<String, String>, host: &dyn NodeHost) -> Result<ParamUpdate, AppError> {
        self.remove_notices_all(host)?;
        let update = self.params.update_from_map(map);
        self.configured = update.valid;
        if update.valid {
            debug!("All required parameters are set!");
        } else {
            debug!(api_key = %self.params.api_key, location = %self.params.location, "Configuration required.");
        }
        self.send_notices(&update.notices, host)?;
        self.set_driver_uom(self.params.units);
        Ok(update)
    }

    /// Applies parameters changed by the user while running. An invalid set
    /// stops polling until a valid one arrives; the notices always reflect the
    /// latest submission.
    pub fn process_config(
        &mut self, map: &BTreeMap<String, String>, host: &dyn NodeHost, db: &dyn DatabaseTrait,
    ) -> Result<ParamUpdate, AppError> {
        let update = self.params.update_from_map(map);
        self.remove_notices_all(host)?;
        self.send_notices(&update.notices, host)?;
        self.configured = update.valid;
        match (update.valid, update.changed) {
            (false, _) => debug!("Configuration not yet valid"),
            (true, true) => {
                debug!("Configuration is valid");
                self.discover(host, db)?;
                db.set_param(CUSTOM_PARAMS_KEY, &serde_json::to_string(&self.params.to_map())?)?;
            }
            (true, false) => debug!("Configuration not changed, but is valid"),
        }
        Ok(update)
    }

    /// Keeps `forecast_0..n-1` and drops the rest.
    pub fn discover(&mut self, host: &dyn NodeHost, db: &dyn DatabaseTrait) -> Result<(), AppError> {
        info!(days = self.params.forecast_days, "In discovery");
        let days = self.params.forecast_days.min(MAX_FORECAST_DAYS);

        for day in days..MAX_FORECAST_DAYS {
            let address = daily::address(day);
            self.nodes.remove(&address);
            if let Err(e) = host.del_node(&address) {
                debug!(node = %address, error = %e, "Failed to delete node");
            }
            db.delete_node(&address)?;
        }

        for day in 0..days {
            let address = daily::address(day);
            if !self.nodes.contains_key(&address) {
                let mut node = new_daily_node(ADDRESS, day, self.params.units);
                restore_drivers(&mut node, &db.load_drivers(&address)?);
                self.nodes.insert(address.clone(), node);
            }
            if let Some(node) = self.nodes.get(&address) {
                if let Err(e) = host.add_node(&node.info) {
                    error!(node = %address, error = %e, "Failed to create forecast node");
                }
            }
        }

        self.set_driver_uom(self.params.units);
        Ok(())
    }

    pub fn set_driver_uom(&mut self, units: UnitSystem) {
        info!(units = %units, "Configure driver units");
        for node in self.nodes.values_mut() {
            node.set_driver_uom(units);
        }
    }

    /// Parameters for the next provider request, `None` while unconfigured.
    pub fn request_params(&self) -> Option<Params> {
        if !self.configured {
            info!("Skipping connection because we aren't configured yet.");
            return None;
        }
        Some(self.params.clone())
    }

    /// Publishes the current conditions and each configured forecast day.
    /// `requested` are the parameters the response was fetched with; a
    /// response fetched in another unit system than the current one is dropped.
    /// Returns how many drivers were sent to the host.
    pub fn process_response(
        &mut self, response: &ForecastResponse, requested: &Params, host: &dyn NodeHost, db: &dyn DatabaseTrait,
        now: i64, force: bool,
    ) -> Result<usize, AppError> {
        if let Some(message) = &response.error {
            error!(error = %message, "DarkSky reports an error");
            self.add_notice(ERROR_NOTICE, message, host)?;
            return Err(AppError::Provider(message.clone()));
        }

        if requested.units != self.params.units {
            info!(requested = %requested.units, current = %self.params.units, "Units changed during the request, response dropped");
            return Ok(0);
        }
        debug!(latitude = response.latitude, longitude = response.longitude, days = response.days(), "Forecast received");

        let Some(conditions) = response.conditions() else {
            error!("No current condition object in query response.");
            return Ok(0);
        };

        let mut published = 0;
        match conditions {
            Ok(conditions) => {
                debug!(icon = %WeatherIcon::classify(&conditions.icon), "Current conditions");
                if let Some(node) = self.nodes.get_mut(ADDRESS) {
                    for (id, value) in assemble_conditions(&conditions).drivers() {
                        if node.update_driver(id, value, force, host)? {
                            published += 1;
                        }
                    }
                    save_drivers(node, db, now);
                }
            }
            Err(e) => warn!(error = %e, "Current conditions skipped"),
        }

        let site = Site {
            latitude: response.latitude,
            elevation: requested.elevation,
            plant_coefficient: requested.plant_type,
            units: requested.units,
        };
        debug!(days = requested.forecast_days, "Process forecast data");
        for day in 0..requested.forecast_days {
            let address = daily::address(day);
            let Some(node) = self.nodes.get_mut(&address) else {
                debug!(node = %address, "Forecast node not created yet");
                continue;
            };
            match response.day(day as usize) {
                Some(Ok(sample)) => {
                    published += node.update_forecast(&sample, &site, force, host)?;
                    save_drivers(node, db, now);
                }
                Some(Err(e)) => warn!(day, error = %e, "Failed to query forecast data"),
                None => debug!(day, "No forecast data for day"),
            }
        }
        Ok(published)
    }

    /// Re-sends every driver of every node.
    pub fn query(&self, host: &dyn NodeHost) -> Result<(), AppError> {
        for node in self.nodes.values() {
            node.report_drivers(host)?;
        }
        Ok(())
    }

    pub fn add_notice(&mut self, key: &str, text: &str, host: &dyn NodeHost) -> Result<(), AppError> {
        self.notices.insert(key.to_owned(), text.to_owned());
        host.add_notice(key, text)
    }

    pub fn remove_notices_all(&mut self, host: &dyn NodeHost) -> Result<(), AppError> {
        self.notices.clear();
        host.remove_notices_all()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.iter().map(|(key, text)| Notice { key: key.clone(), text: text.clone() }).collect()
    }

    fn send_notices(&mut self, notices: &[Notice], host: &dyn NodeHost) -> Result<(), AppError> {
        for notice in notices {
            self.add_notice(&notice.key, &notice.text, host)?;
        }
        Ok(())
    }
}

fn restore_drivers(node: &mut Node, stored: &[StoredDriver]) {
    for saved in stored {
        if let Some(driver) = node.drivers.iter_mut().find(|d| d.driver == saved.driver) {
            driver.value = saved.value;
        }
    }
}

fn save_drivers(node: &Node, db: &dyn DatabaseTrait, now: i64) {
    for driver in &node.drivers {
        let stored = StoredDriver { driver: driver.driver.clone(), value: driver.value, uom: driver.uom, updated: now };
        if let Err(e) = db.save_driver(node.address(), stored) {
            warn!(node = %node.address(), error = %e, "Failed to save driver snapshot");
        }
    }
}
