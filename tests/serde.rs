#![cfg(feature = "serde")]

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use wireworld::{
    CellState, Config, CycleDirection, Direction, EditTool, Neighbors, RateChange,
    SchedulerConfig, ZoomConfig,
};

fn reencode<T: Serialize + DeserializeOwned + PartialEq + Debug>(value: T) {
    let bytes = bincode::serialize(&value).unwrap();
    assert_eq!(bincode::deserialize::<T>(&bytes).unwrap(), value);
}

#[test]
fn config_survives_bincode() {
    let config = Config {
        cell_pixel_width: 8,
        window_size: (640, 480),
        scheduler: SchedulerConfig {
            sps_initial: 16.0,
            sps_min: 2.0,
            sps_max: 64.0,
        },
        zoom: ZoomConfig {
            min: 0.5,
            max: 2.0,
            step: 1.5,
        },
    };
    reencode(config);
    let decoded: Config = bincode::deserialize(&bincode::serialize(&config).unwrap()).unwrap();
    decoded.validate().unwrap();
}

#[test]
fn input_enums_survive_bincode() {
    reencode(CellState::ElectronTail);
    reencode(CycleDirection::Backward);
    reencode(EditTool::Secondary);
    reencode(RateChange::Faster);
    reencode(Direction::DownLeft);
    reencode(Neighbors::new(|dir| dir.offset((3, -7))));
}
