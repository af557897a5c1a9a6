//! Carrier module: how problem states present their identity to the engine.

pub mod state;
