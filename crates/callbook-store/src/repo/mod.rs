pub mod calls;
pub mod patients;
pub mod session;
pub mod users;

pub use calls::{CallLogRow, CallsRepo};
pub use patients::{PatientNew, PatientSearchRow, PatientUpdate, PatientsRepo};
pub use session::SessionRepo;
pub use users::{UserNew, UsersRepo};
