//! Caller roles stored on `profiles.role`.

use crate::status::text_enum;

text_enum! {
    /// Role carried by every user's profile. New users default to `Client`.
    Role ("role") {
        Client => "CLIENT",
        Admin => "ADMIN",
    }
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}
