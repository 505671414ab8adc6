use serde::{Deserialize, Serialize};

use carebase_core::{AccountId, EmailAddress, Entity, RoleId, SoftDelete};

/// Identity record behind every login.
///
/// The email is the natural key (store-enforced unique). The credential hash
/// is opaque here: it is produced and checked by the hashing collaborator,
/// never inspected by the domain. An account holds exactly one role at all
/// times and is never physically removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub credential_hash: String,
    pub role_id: RoleId,
    pub is_deleted: bool,
}

impl Account {
    pub fn new(email: EmailAddress, credential_hash: String, role_id: RoleId) -> Self {
        Self {
            id: AccountId::new(),
            email,
            credential_hash,
            role_id,
            is_deleted: false,
        }
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl SoftDelete for Account {
    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn mark_deleted(&mut self) {
        self.is_deleted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_deleted_is_idempotent() {
        let email = EmailAddress::parse("a@b.c").unwrap();
        let mut account = Account::new(email, "$argon2id$...".into(), RoleId::new());

        assert!(!account.is_deleted);
        account.mark_deleted();
        account.mark_deleted();
        assert!(account.is_deleted);
    }
}
