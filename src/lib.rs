// Datemark library: stamps capture dates onto photos

pub mod batch;
pub mod config;
pub mod constants;
pub mod logging;
pub mod metadata;
pub mod watermark;
