//! Visibility and ownership policy.
//!
//! Every protected entity type implements [`Owned`], declaring its
//! [`EntityKind`] and how to resolve the user that owns an instance. The policy
//! functions are generic over that trait, so the owner lookup is resolved at
//! compile time per entity type.
//!
//! Denials are reported by callers as "not found" so that the existence of a
//! row is never revealed to someone who may not see it.

use crate::roles::Role;
use crate::types::DbId;

/// The protected resource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Client,
    Project,
    Task,
    Subtask,
}

impl EntityKind {
    /// Name used in error messages and logs.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Client => "Cliente",
            EntityKind::Project => "Proyecto",
            EntityKind::Task => "Tarea",
            EntityKind::Subtask => "SubTarea",
        }
    }
}

/// Ownership capability of a protected entity.
pub trait Owned {
    const KIND: EntityKind;

    /// The user account that owns this instance, if any.
    fn owner_of(&self) -> Option<DbId>;
}

/// The authenticated principal of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: DbId,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: DbId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Which rows a caller receives from a collection listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Every row matching the filters.
    All,
    /// An empty collection regardless of filters.
    Nothing,
}

/// Decide whether `caller` may read or mutate `instance`.
///
/// Anonymous callers are always denied. Admins are always allowed. Anyone else
/// must be the resolved owner of the instance.
pub fn can_access<E: Owned>(caller: Option<&Caller>, instance: &E) -> bool {
    let Some(caller) = caller else {
        return false;
    };
    if caller.is_admin() {
        return true;
    }
    instance.owner_of() == Some(caller.user_id)
}

/// Collection-level visibility.
///
/// Non-admin callers get an empty listing for every entity kind. Clients are
/// not linked to user accounts in the listing path, so there is no per-owner
/// query to run.
pub fn list_scope(caller: &Caller) -> ListScope {
    if caller.is_admin() {
        ListScope::All
    } else {
        ListScope::Nothing
    }
}
