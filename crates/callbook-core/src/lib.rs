pub mod domain;
pub mod dto;
pub mod error;
pub mod filter;
pub mod flow;
pub mod rules;
pub mod time;

pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use filter::{parse_search, FilterParseError, PatientSearch, SearchExpr};
pub use flow::{CallModal, ModalState, ReachedRedirect, Selection, View};
pub use rules::*;
