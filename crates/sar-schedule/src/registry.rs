//! Lazily populated cache of named movement schedules.
//!
//! A `ScheduleRegistry` is an ordinary value: create one per process (or per
//! test) and pass it to whatever needs schedules.  The read-check-create-insert
//! sequence runs under one `parking_lot::Mutex`, so concurrent callers asking
//! for the same `(kind, zone)` pair always receive the same `Arc`.  Once
//! handed out, schedules are immutable and need no further locking.
//!
//! Entries are never evicted.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use crate::schedule::MovementSchedule;
use crate::standard::{NAME_SEPARATOR, StandardSchedule};
use crate::zone::{ZoneRules, parse_zone};
use crate::{ScheduleError, ScheduleResult};

#[derive(Debug, Default)]
pub struct ScheduleRegistry {
    schedules: Mutex<Vec<Arc<dyn MovementSchedule>>>,
}

impl ScheduleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the standard schedules for `zone`.
    pub fn with_standard(zone: Arc<dyn ZoneRules>) -> ScheduleResult<Self> {
        let registry = Self::new();
        {
            let mut schedules = registry.schedules.lock();
            instantiate_standard(&mut schedules, &zone)?;
        }
        Ok(registry)
    }

    /// Add a custom schedule.  Names must be unique.
    pub fn register(&self, schedule: Arc<dyn MovementSchedule>) -> ScheduleResult<()> {
        let mut schedules = self.schedules.lock();
        if schedules.iter().any(|s| s.name() == schedule.name()) {
            return Err(ScheduleError::DuplicateName(schedule.name().to_string()));
        }
        schedules.push(schedule);
        Ok(())
    }

    /// Look up a schedule by exact name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn MovementSchedule>> {
        self.schedules.lock().iter().find(|s| s.name() == name).cloned()
    }

    /// Names of every registered schedule, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.schedules.lock().iter().map(|s| s.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.schedules.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.lock().is_empty()
    }

    /// Return the `kind` schedule for `zone`, creating all three standard
    /// schedules for that zone on first request.
    pub fn get_or_create(
        &self,
        kind: StandardSchedule,
        zone: Arc<dyn ZoneRules>,
    ) -> ScheduleResult<Arc<dyn MovementSchedule>> {
        let name = kind.name_for(&zone.id());
        let mut schedules = self.schedules.lock();

        if let Some(found) = schedules.iter().find(|s| s.name() == name) {
            return Ok(Arc::clone(found));
        }

        log::debug!("creating standard movement schedules for zone {}", zone.id());
        instantiate_standard(&mut schedules, &zone)?;

        schedules
            .iter()
            .find(|s| s.name() == name)
            .cloned()
            .ok_or_else(|| ScheduleError::Parse(format!("no movement schedule named {name:?}")))
    }

    /// Resolve a schedule name, recreating a standard schedule if needed.
    ///
    /// The name is split on its first `-` into kind and zone id.  An unknown
    /// kind falls back to `Continuous`; a missing or unparseable zone falls
    /// back to UTC.  Both fallbacks are logged.
    pub fn get_or_recreate(&self, name: &str) -> ScheduleResult<Arc<dyn MovementSchedule>> {
        if let Some(found) = self.get(name) {
            return Ok(found);
        }
        log::info!("recreating movement schedule for name {name:?}");

        let (kind_str, zone_str) = match name.split_once(NAME_SEPARATOR) {
            Some((k, z)) => (k, Some(z)),
            None => (name, None),
        };
        let kind = kind_str.parse::<StandardSchedule>().unwrap_or_else(|_| {
            log::warn!("using default 'Continuous' movement schedule for unrecognized type {kind_str:?}");
            StandardSchedule::Continuous
        });
        let zone = zone_str.and_then(parse_zone).unwrap_or_else(|| {
            log::warn!("unrecognized zone in schedule name {name:?}; using UTC");
            Arc::new(Utc) as Arc<dyn ZoneRules>
        });
        self.get_or_create(kind, zone)
    }
}

fn instantiate_standard(
    schedules: &mut Vec<Arc<dyn MovementSchedule>>,
    zone:      &Arc<dyn ZoneRules>,
) -> ScheduleResult<()> {
    for kind in StandardSchedule::ALL {
        let name = kind.name_for(&zone.id());
        if schedules.iter().any(|s| s.name() == name) {
            log::error!("already have a movement schedule named {name:?}");
            continue;
        }
        schedules.push(Arc::new(kind.create(Arc::clone(zone))?));
    }
    Ok(())
}
