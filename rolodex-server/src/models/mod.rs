//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod email;
pub mod text;
pub mod record_id;
pub mod patch;
pub mod pagination;
pub mod customer;
pub mod employee;

pub use validation::ValidationError;
pub use email::Email;
pub use text::RequiredText;
pub use record_id::RecordId;
pub use patch::Patch;
pub use pagination::{PageWindow, Paginated, Pagination, PaginationParams, DEFAULT_PER_PAGE};
pub use customer::{CustomerChanges, CustomerInput, CustomerPatch, NewCustomer};
pub use employee::{EmployeeInput, EmployeePatch, NewEmployee};
