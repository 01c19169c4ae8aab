use serde::{Deserialize, Serialize};

/// Back-office roles, exhaustively enumerated.
///
/// Role names travel as strings in tokens and the users table; everything
/// else in the codebase works with this enum so a typo in a role name is a
/// compile error, not a silent authorization hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    SuperAdmin,
    Admin,
    AdmissionStaff,
    DocumentOfficer,
    AccountsOfficer,
    Principal,
    Director,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::AdmissionStaff,
        Role::DocumentOfficer,
        Role::AccountsOfficer,
        Role::Principal,
        Role::Director,
    ];

    /// Stable string encoding used in tokens and the users table
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::AdmissionStaff => "ADMISSION_STAFF",
            Role::DocumentOfficer => "DOCUMENT_OFFICER",
            Role::AccountsOfficer => "ACCOUNTS_OFFICER",
            Role::Principal => "PRINCIPAL",
            Role::Director => "DIRECTOR",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SUPER_ADMIN" => Some(Role::SuperAdmin),
            "ADMIN" => Some(Role::Admin),
            "ADMISSION_STAFF" => Some(Role::AdmissionStaff),
            "DOCUMENT_OFFICER" => Some(Role::DocumentOfficer),
            "ACCOUNTS_OFFICER" => Some(Role::AccountsOfficer),
            "PRINCIPAL" => Some(Role::Principal),
            "DIRECTOR" => Some(Role::Director),
            _ => None,
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        capability.allowed_roles().contains(self)
    }
}

/// Operations gated by role. Each endpoint declares exactly one capability;
/// the role sets live in `allowed_roles` and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManageUsers,
    ManageAcademics,
    EnterApplications,
    ViewStudents,
    DeclareDocuments,
    RecordPayments,
    AdjustFees,
    ViewPayments,
}

impl Capability {
    /// The capability table: minimal allowed-role set per operation.
    pub const fn allowed_roles(self) -> &'static [Role] {
        match self {
            Capability::ManageUsers | Capability::ManageAcademics => {
                &[Role::Admin, Role::SuperAdmin]
            }
            Capability::EnterApplications => {
                &[Role::AdmissionStaff, Role::Admin, Role::SuperAdmin]
            }
            Capability::ViewStudents => &Role::ALL,
            Capability::DeclareDocuments => {
                &[Role::DocumentOfficer, Role::Admin, Role::SuperAdmin]
            }
            Capability::RecordPayments => {
                &[Role::AccountsOfficer, Role::Admin, Role::SuperAdmin]
            }
            // Single role, not a set: stricter than the other fee operations
            Capability::AdjustFees => &[Role::AccountsOfficer],
            Capability::ViewPayments => &[
                Role::AccountsOfficer,
                Role::Admin,
                Role::SuperAdmin,
                Role::Principal,
                Role::Director,
            ],
        }
    }

    /// Human-readable role list for 403 messages
    pub fn role_names(self) -> String {
        self.allowed_roles()
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
