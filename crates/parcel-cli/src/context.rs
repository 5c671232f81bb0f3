use anyhow::Context;
use parcel_config::EngineConfig;
use parcel_engine::FeasibilityEngine;
use parcel_schema::SchemaRegistry;

/// Shared resources built once per invocation.
pub struct AppContext {
    pub engine: FeasibilityEngine,
    pub schemas: SchemaRegistry,
}

impl AppContext {
    pub fn init(config: EngineConfig) -> anyhow::Result<Self> {
        let engine = FeasibilityEngine::new(config).context("failed to build feasibility engine")?;
        Ok(Self {
            engine,
            schemas: SchemaRegistry::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }
}
