pub mod modifiers;
pub mod record;
pub mod prototype;
pub mod severity;

pub use modifiers::{ModifierKey, ModifierStore, Upsert};
pub use record::{IntegrityChange, Organ, SeverityChange};
pub use prototype::{OrganPrototype, PrototypeRegistry};
pub use severity::{OrganSeverity, Threshold, ThresholdTable};
