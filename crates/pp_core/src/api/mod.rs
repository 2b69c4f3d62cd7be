pub mod json_api;

pub use json_api::{
    build_assignments_json, credit_score_json, AssignmentRequest, AssignmentResponse, CreditRequest,
    CreditResponse, PriorWeek, SCHEMA_VERSION,
};
