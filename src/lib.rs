pub mod error;
pub mod logging;
pub mod defaultlogger;
pub mod utils;

pub mod elements;
pub mod geometry;
pub mod features;
pub mod overpass;
pub mod output;

pub mod fetch;
pub mod fetch_bbox;
