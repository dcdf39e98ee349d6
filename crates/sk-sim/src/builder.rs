//! Fluent builder for constructing a [`Sim`].

use log::info;
use sk_core::{SimConfig, SkError, UnitId};
use sk_engage::TrajectoryRegistry;
use sk_nav::{Destination, Navigator};
use sk_unit::UnitStore;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<N>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, tick duration, approach timing, …
/// - [`UnitStore`]: from [`sk_unit::UnitStoreBuilder`]
/// - `N: Navigator`: sized for the same number of units
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default              |
/// |----------------------|----------------------|
/// | `.destinations(v)`   | No unit has a destination |
///
/// # Example
///
/// ```rust,ignore
/// let units = UnitStoreBuilder::new().unit(TeamId(0), placement).build();
/// let nav = SteeringNavigator::new(config.nav, units.count);
/// let mut sim = SimBuilder::new(config, units, nav).build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<N: Navigator> {
    config:       SimConfig,
    units:        UnitStore,
    nav:          N,
    destinations: Option<Vec<Option<Destination>>>,
}

impl<N: Navigator> SimBuilder<N> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, units: UnitStore, nav: N) -> Self {
        Self { config, units, nav, destinations: None }
    }

    /// Supply an initial destination per unit (must be length `unit_count`).
    ///
    /// Units are not started; call [`Sim::start`] for those that should seek.
    pub fn destinations(mut self, destinations: Vec<Option<Destination>>) -> Self {
        self.destinations = Some(destinations);
        self
    }

    /// Validate inputs, register every unit with a fresh registry, and return
    /// a ready-to-run [`Sim`].
    pub fn build(mut self) -> SimResult<Sim<N>> {
        self.config.validate()?;

        let unit_count = self.units.count;
        if self.nav.unit_count() != unit_count {
            return Err(SimError::UnitCountMismatch {
                expected: unit_count,
                got:      self.nav.unit_count(),
                what:     "navigator",
            });
        }

        if let Some(destinations) = self.destinations {
            if destinations.len() != unit_count {
                return Err(SimError::UnitCountMismatch {
                    expected: unit_count,
                    got:      destinations.len(),
                    what:     "destinations",
                });
            }
            for (i, destination) in destinations.into_iter().enumerate() {
                let Some(destination) = destination else {
                    continue;
                };
                if let Some(target) = destination.target_unit() {
                    if target.index() >= unit_count {
                        return Err(SkError::UnitNotFound(target).into());
                    }
                }
                self.nav.set_destination(UnitId(i as u32), destination);
            }
        }

        let mut registry = TrajectoryRegistry::new(self.config.approach);
        for unit in self.units.unit_ids() {
            registry.register_unit(unit);
        }
        info!("built sim: {unit_count} units, {} ticks", self.config.total_ticks);

        Ok(Sim {
            clock:    self.config.make_clock(),
            config:   self.config,
            units:    self.units,
            nav:      self.nav,
            registry,
        })
    }
}
