//! Student records domain module.
//!
//! Registration rules, the uniform status a student carries, and reported
//! repairs. Pure domain logic (no IO, no HTTP, no storage).

pub mod repair;
pub mod student;

pub use repair::{NewRepair, Repair, RepairStatus};
pub use student::{NewStudent, PaymentStatus, Student, StudentUpdate, UniformStatus};
