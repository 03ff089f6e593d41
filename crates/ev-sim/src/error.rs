use ev_agent::AgentError;
use ev_core::EvError;
use ev_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("floor plan error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("population error: {0}")]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Core(#[from] EvError),
}

pub type SimResult<T> = Result<T, SimError>;
