//! Planon business objects readable through a [`Datastore`](crate::Datastore).

use serde::de::DeserializeOwned;
use serde::Serialize;

use crewsync_core::{LaborGroup, Person, Syscode, Trade};

/// A record type stored in Planon.
pub trait Resource: Serialize + DeserializeOwned {
    /// Planon business-object name, used in REST paths and as the in-memory
    /// collection key.
    const NAME: &'static str;

    fn syscode(&self) -> Syscode;
}

impl Resource for Person {
    const NAME: &'static str = "Person";

    fn syscode(&self) -> Syscode {
        self.syscode
    }
}

impl Resource for Trade {
    const NAME: &'static str = "Trade";

    fn syscode(&self) -> Syscode {
        self.syscode
    }
}

impl Resource for LaborGroup {
    const NAME: &'static str = "WorkingHoursTariffGroup";

    fn syscode(&self) -> Syscode {
        self.syscode
    }
}
