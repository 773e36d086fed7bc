pub mod call;
pub mod ids;
pub mod patient;
pub mod phone;
pub mod user;

pub use call::{CallOutcome, CallRecord};
pub use ids::{CallRecordId, PatientId, UserId};
pub use patient::{normalize_patient_name, Patient};
pub use phone::{call_key, normalize_phone_for_match, strip_call_key};
pub use user::User;
