use super::{drv, host::NodeHost, uom::DriverKind, uom::UnitSystem, Node, NodeInfo};
use crate::{
    error::AppError,
    utils::ux_ts_to_string,
    weather::{
        assembler::{assemble_forecast, Site},
        model::DailySample,
    },
};
use tracing::info;

pub const NODE_DEF_ID: &str = "daily";

pub const DRIVERS: [(&str, DriverKind); 18] = [
    (drv::GV19, DriverKind::DayOfWeek),
    (drv::GV0, DriverKind::Temperature), // high
    (drv::GV1, DriverKind::Temperature), // low
    (drv::CLIHUM, DriverKind::Percent),
    (drv::DEWPT, DriverKind::Temperature),
    (drv::BARPRES, DriverKind::Pressure),
    (drv::GV13, DriverKind::Conditions),
    (drv::GV14, DriverKind::Percent), // clouds
    (drv::GV4, DriverKind::Speed),
    (drv::GV5, DriverKind::Speed), // gust
    (drv::WINDDIR, DriverKind::Direction),
    (drv::GV7, DriverKind::Precipitation),
    (drv::GV18, DriverKind::Percent), // precip chance
    (drv::UV, DriverKind::UvIndex),
    (drv::GV10, DriverKind::Index), // ozone
    (drv::DISTANC, DriverKind::Distance),
    (drv::GV9, DriverKind::Index), // moon phase
    (drv::GV20, DriverKind::Evapotranspiration),
];

pub fn address(day: u8) -> String {
    format!("forecast_{}", day)
}

pub fn new_daily_node(primary: &str, day: u8, units: UnitSystem) -> Node {
    let info = NodeInfo {
        address: address(day),
        primary: primary.to_owned(),
        name: format!("Forecast {}", day),
        node_def_id: NODE_DEF_ID.to_owned(),
    };
    Node::new(info, &DRIVERS, units)
}

impl Node {
    pub fn update_forecast(
        &mut self, sample: &DailySample, site: &Site, force: bool, host: &dyn NodeHost,
    ) -> Result<usize, AppError> {
        let values = assemble_forecast(sample, site);
        info!(
            node = self.address(),
            date = %ux_ts_to_string(sample.time),
            day_of_week = values.day_of_week,
            et0 = values.et0,
            "Forecast updated."
        );
        let mut published = 0;
        for (id, value) in values.drivers() {
            if self.update_driver(id, value, force, host)? {
                published += 1;
            }
        }
        Ok(published)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        test::utils::{fixtures::FORECAST_US, mock_host::MemoryHost},
        weather::model::ForecastResponse,
    };

    #[test]
    fn daily_node_layout() {
        let node = new_daily_node("weather", 2, UnitSystem::Us);
        assert_eq!(node.address(), "forecast_2");
        assert_eq!(node.info.name, "Forecast 2");
        assert_eq!(node.drivers.len(), 18);
        assert_eq!(node.driver(drv::GV20).unwrap().uom, 120);
        assert_eq!(node.driver(drv::GV7).unwrap().uom, 105);
    }

    #[test]
    fn update_forecast_publishes_values() {
        let resp = ForecastResponse::from_json(FORECAST_US).unwrap();
        let sample = resp.day(1).unwrap().unwrap();
        let site = Site { latitude: resp.latitude, elevation: 43., plant_coefficient: 0.23, units: UnitSystem::Us };
        let host = MemoryHost::default();
        let mut node = new_daily_node("weather", 1, UnitSystem::Us);

        let published = node.update_forecast(&sample, &site, false, &host).unwrap();
        // every driver moves off its initial 0
        assert_eq!(published, 18);
        assert_eq!(host.last("forecast_1", drv::GV19), Some((6., 25)));
        assert_eq!(host.last("forecast_1", drv::GV7), Some((0.3, 105)));
        assert_eq!(host.last("forecast_1", drv::CLIHUM), Some((60., 22)));
        assert_eq!(host.last("forecast_1", drv::GV20), Some((0.191, 120)));

        // Same sample again: nothing new to say
        assert_eq!(node.update_forecast(&sample, &site, false, &host).unwrap(), 0);
        assert_eq!(node.update_forecast(&sample, &site, true, &host).unwrap(), 18);
    }
}
