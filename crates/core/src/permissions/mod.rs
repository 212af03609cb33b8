mod license;
mod permset;

pub use license::{
    license_assignment_fields, resolve_licenses, LicenseAssignment, DUPLICATE_LICENSE_SIGNATURE,
};
pub use permset::{permset_assignment_fields, PermsetAssignment, DUPLICATE_PERMSET_SIGNATURE};
