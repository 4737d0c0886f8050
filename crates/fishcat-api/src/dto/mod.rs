mod response;

pub use response::{
    HealthResponse, ProjectResponse, SampleResponse, UnitRefResponse, UnitResponse,
    UnitTypeResponse,
};
