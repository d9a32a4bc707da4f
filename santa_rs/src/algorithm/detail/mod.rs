mod assignment_context;
pub mod hungarian;

pub use assignment_context::AssignmentContext;
