//! Built-in UV sources that need no network

use futures::future::{self, BoxFuture, FutureExt};
use tracing::debug;

use super::{Coordinates, SourceError, UvSource};
use crate::engine::UvReading;

/// Answers every lookup with the same reading
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    reading: UvReading,
}

impl SimulatedSource {
    pub fn new(reading: UvReading) -> Self {
        Self { reading }
    }
}

impl UvSource for SimulatedSource {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn by_postcode<'a>(&'a self, postcode: &'a str) -> BoxFuture<'a, Result<UvReading, SourceError>> {
        debug!("Simulated lookup for postcode {}", postcode);
        future::ready(Ok(self.reading)).boxed()
    }

    fn by_coordinates(&self, coordinates: Coordinates) -> BoxFuture<'_, Result<UvReading, SourceError>> {
        debug!("Simulated lookup for {:?}", coordinates);
        future::ready(Ok(self.reading)).boxed()
    }
}

/// Placeholder used when no lookup backend is configured
#[derive(Debug, Clone, Default)]
pub struct UnconfiguredSource;

impl UvSource for UnconfiguredSource {
    fn name(&self) -> &'static str {
        "unconfigured"
    }

    fn by_postcode<'a>(&'a self, _postcode: &'a str) -> BoxFuture<'a, Result<UvReading, SourceError>> {
        future::ready(Err(unavailable())).boxed()
    }

    fn by_coordinates(&self, _coordinates: Coordinates) -> BoxFuture<'_, Result<UvReading, SourceError>> {
        future::ready(Err(unavailable())).boxed()
    }
}

fn unavailable() -> SourceError {
    SourceError::Unavailable("no UV lookup backend configured".to_string())
}
