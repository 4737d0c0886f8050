pub mod geometry;
pub mod lake;
pub mod management_unit;
pub mod project;
pub mod sample;

pub use geometry::Geometry;
pub use lake::{Lake, LakeId};
pub use management_unit::{ManagementUnit, ManagementUnitType, UnitId, UnitRef, UnitTypeId};
pub use project::{Fn011, ProjectId};
pub use sample::{Fn121, SampleId};
