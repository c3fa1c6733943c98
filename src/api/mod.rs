mod calendar_controller;
mod data_controller;
mod engine;
mod engine_config;
mod json_contract;
pub mod labels;
mod layout_cache;
mod layout_pipeline;
mod navigation_controller;
mod store;
mod validation;

pub use engine::CalendarEngine;
pub use engine_config::CalendarEngineConfig;
pub use json_contract::{LAYOUT_FRAME_JSON_SCHEMA_V1, LayoutFrameJsonContractV1};
pub use labels::{header_title, hour_label, hour_labels, month_name, weekday_headers};
pub use layout_cache::LayoutCacheStats;
pub use layout_pipeline::{LayoutInputs, LayoutPass, build_layout};
pub use store::{
    CalendarRef, EventQuery, EventRecord, EventStore, InMemoryEventStore, StoreAck,
    StoreOperation,
};
