//! Data models for hospital management entities.
//!
//! This module contains all the data structures used to represent
//! backend resources:
//!
//! - `User`, `Role`, `Section`: identity and role-based navigation
//! - `Patient`, `Doctor`: people records
//! - `Appointment`: scheduling
//! - `Bill`, `InsuranceProvider`: billing
//! - `InventoryItem`, `InventoryStats`: stock
//! - `MedicalRecord`, `PrescriptionItem`, `VitalSigns`: clinical records
//! - `ReportKind`, `ReportFilters`: reporting

pub mod appointment;
pub mod billing;
pub mod doctor;
pub mod inventory;
pub mod patient;
pub mod record;
pub mod report;
pub mod user;

pub use appointment::{Appointment, AppointmentInput};
pub use billing::{Bill, BillDetails, BillInput, InsuranceProvider, InsuranceProviderInput};
pub use doctor::{Doctor, DoctorInput};
pub use inventory::{InventoryItem, InventoryItemInput, InventoryStats};
pub use patient::{Patient, PatientInput};
pub use record::{MedicalRecord, MedicalRecordInput, PrescriptionItem, VitalSigns};
pub use report::{ReportFilters, ReportKind};
pub use user::{Role, Section, User};
